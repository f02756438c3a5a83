/// Procedural sphere and ring tessellation
use glam::{Vec2, Vec3};

use super::mesh::Mesh;
use crate::{OrreryError, OrreryResult};

/// Smallest latitude band count that still yields interior bands
pub const MIN_SPHERE_SUBDIVISIONS: u32 = 3;

/// Default number of quads around a ring
pub const DEFAULT_RING_SEGMENTS: u32 = 128;

/// U coordinate of the inner ring edge; kept off zero so alpha textures
/// don't bleed at the border
pub const RING_INNER_U: f32 = 0.01;

/// V coordinate sampled across the whole ring
pub const RING_V: f32 = 0.5;

/// Number of vertices `build_sphere(n)` emits; zero when `n` is too small
/// to build
pub fn sphere_vertex_count(n: u32) -> usize {
    if n < MIN_SPHERE_SUBDIVISIONS {
        return 0;
    }
    let n = n as usize;
    6 * 2 * n * (n - 2) + 2 * 2 * n * 3
}

fn sphere_point(theta: f64, phi: f64) -> Vec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vec3::new(
        (sin_theta * cos_phi) as f32,
        cos_theta as f32,
        (sin_theta * sin_phi) as f32,
    )
}

/// Build a UV sphere of radius 1 with `n` latitude bands and `2n`
/// longitude bands.
///
/// Each pole is a fan of degenerate cells with its own apex vertex per
/// longitude band, so every band keeps an independent U range. V runs from
/// 1 at the north pole to 0 at the south pole.
pub fn build_sphere(n: u32) -> OrreryResult<Mesh> {
    if n < MIN_SPHERE_SUBDIVISIONS {
        return Err(OrreryError::InvalidParameter(format!(
            "sphere needs at least {MIN_SPHERE_SUBDIVISIONS} subdivisions, got {n}"
        )));
    }

    let count = sphere_vertex_count(n);
    let mut positions = Vec::with_capacity(count);
    let mut tex_coords = Vec::with_capacity(count);

    let bands = n as f64;
    let step = std::f64::consts::PI / bands;
    let u_step = 1.0 / (2.0 * bands);
    let v_step = 1.0 / bands;

    // Angles come from indices, never accumulated
    for i in 1..(n - 1) {
        let t0 = step * i as f64;
        let t1 = step * (i + 1) as f64;
        let v0 = (1.0 - v_step * i as f64) as f32;
        let v1 = (1.0 - v_step * (i + 1) as f64) as f32;

        for j in 0..(2 * n) {
            let p0 = step * j as f64;
            let p1 = step * (j + 1) as f64;
            let u0 = (u_step * j as f64) as f32;
            let u1 = (u_step * (j + 1) as f64) as f32;

            positions.extend([
                sphere_point(t0, p0),
                sphere_point(t1, p0),
                sphere_point(t1, p1),
                sphere_point(t0, p0),
                sphere_point(t1, p1),
                sphere_point(t0, p1),
            ]);
            tex_coords.extend([
                Vec2::new(u0, v0),
                Vec2::new(u0, v1),
                Vec2::new(u1, v1),
                Vec2::new(u0, v0),
                Vec2::new(u1, v1),
                Vec2::new(u1, v0),
            ]);
        }
    }

    let north = step;
    let south = std::f64::consts::PI - step;
    let north_v = (1.0 - v_step) as f32;
    let south_v = v_step as f32;

    for j in 0..(2 * n) {
        let p0 = step * j as f64;
        let p1 = step * (j + 1) as f64;
        let u0 = (u_step * j as f64) as f32;
        let u1 = (u_step * (j + 1) as f64) as f32;

        positions.extend([sphere_point(north, p0), sphere_point(north, p1), Vec3::Y]);
        tex_coords.extend([
            Vec2::new(u0, north_v),
            Vec2::new(u1, north_v),
            Vec2::new(u0, 1.0),
        ]);

        positions.extend([
            sphere_point(south, p0),
            sphere_point(south, p1),
            Vec3::NEG_Y,
        ]);
        tex_coords.extend([
            Vec2::new(u0, south_v),
            Vec2::new(u1, south_v),
            Vec2::new(u0, 0.0),
        ]);
    }

    debug_assert_eq!(positions.len(), count);
    log::debug!(
        "Built sphere with {} subdivisions ({} triangles)",
        n,
        count / 3
    );

    Ok(Mesh::from_parts(positions, tex_coords))
}

/// Build a flat annulus in the XZ plane between two radii given as
/// fractions of the parent body's size.
///
/// Segments share no vertices; the far edge of the last segment reuses the
/// exact coordinates of the first segment's near edge.
pub fn build_ring(
    inner_radius_ratio: f64,
    outer_radius_ratio: f64,
    segments: u32,
) -> OrreryResult<Mesh> {
    if !(inner_radius_ratio.is_finite() && outer_radius_ratio.is_finite()) {
        return Err(OrreryError::InvalidParameter(format!(
            "ring radii must be finite, got {inner_radius_ratio} and {outer_radius_ratio}"
        )));
    }
    if inner_radius_ratio <= 0.0 || inner_radius_ratio >= outer_radius_ratio {
        return Err(OrreryError::InvalidParameter(format!(
            "ring needs 0 < inner < outer, got {inner_radius_ratio} and {outer_radius_ratio}"
        )));
    }
    if segments < 3 {
        return Err(OrreryError::InvalidParameter(format!(
            "ring needs at least 3 segments, got {segments}"
        )));
    }

    let count = segments as usize * 6;
    let mut positions = Vec::with_capacity(count);
    let mut tex_coords = Vec::with_capacity(count);

    let edge = |k: u32| -> (Vec3, Vec3) {
        let angle = std::f64::consts::TAU * (k % segments) as f64 / segments as f64;
        let (sin, cos) = angle.sin_cos();
        (
            Vec3::new(
                (inner_radius_ratio * cos) as f32,
                0.0,
                (inner_radius_ratio * sin) as f32,
            ),
            Vec3::new(
                (outer_radius_ratio * cos) as f32,
                0.0,
                (outer_radius_ratio * sin) as f32,
            ),
        )
    };

    let inner_uv = Vec2::new(RING_INNER_U, RING_V);
    let outer_uv = Vec2::new(1.0, RING_V);

    for k in 0..segments {
        let (inner0, outer0) = edge(k);
        let (inner1, outer1) = edge(k + 1);

        positions.extend([inner0, outer0, outer1, inner0, outer1, inner1]);
        tex_coords.extend([inner_uv, outer_uv, outer_uv, inner_uv, outer_uv, inner_uv]);
    }

    log::debug!(
        "Built ring {:.3}..{:.3} with {} segments",
        inner_radius_ratio,
        outer_radius_ratio,
        segments
    );

    Ok(Mesh::from_parts(positions, tex_coords))
}
