pub mod body;

pub use body::*;

use glam::{DMat4, DVec3};

pub const PI: f64 = std::f64::consts::PI;
pub const TAU: f64 = std::f64::consts::TAU;

/// Wrap an angle into [0, 2π). Negative input (retrograde motion) wraps
/// from the top.
#[inline]
pub fn wrap_phase(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Angular distance between two phases, ignoring whole turns.
pub fn phase_distance(a: f64, b: f64) -> f64 {
    let d = wrap_phase(a - b);
    d.min(TAU - d)
}

/// Position on a body's orbit around its parent, before the orbital-plane
/// tilt is applied.
///
/// Uses `(cos φ + sin φ, 0, cos φ - sin φ)`, which is a circle of radius
/// `radius·√2` starting at 45°. Kept this way so scenes line up with the
/// historical layout.
#[inline]
pub fn orbit_offset(radius: f64, phase: f64) -> DVec3 {
    let (sin, cos) = phase.sin_cos();
    DVec3::new(radius * (cos + sin), 0.0, radius * (-sin + cos))
}

/// Convert spherical coordinates (polar angle from +Y, azimuth in the XZ
/// plane) to a Cartesian offset.
#[inline]
pub fn spherical_to_cartesian(radius: f64, polar: f64, azimuth: f64) -> DVec3 {
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
    DVec3::new(
        radius * sin_polar * cos_azimuth,
        radius * cos_polar,
        radius * sin_polar * sin_azimuth,
    )
}

/// Translation column of an affine transform.
#[inline]
pub fn translation_of(transform: &DMat4) -> DVec3 {
    transform.w_axis.truncate()
}
