/// Orbital transform engine
/// Advances every body's clocks and rebuilds world transforms parent-first
use std::time::Duration;

use glam::{DMat3, DMat4, DVec3};

use super::clock::SimulationClock;
use super::hierarchy::Hierarchy;
use crate::math::{BodyId, CelestialBody, orbit_offset, translation_of};
use crate::{OrreryError, OrreryResult};

/// Floor for [`OrbitalTransformEngine::scale_time`], in days per second
pub const MIN_TIME_SCALE: f64 = 1e-6;

pub struct OrbitalTransformEngine {
    bodies: Vec<CelestialBody>,
    hierarchy: Option<Hierarchy>,
    clocks: Vec<SimulationClock>,
    transforms: Vec<DMat4>,

    // Simulated days per second of frame time
    time_scale: f64,
    default_time_scale: f64,
    paused: bool,
    elapsed_days: f64,
}

impl OrbitalTransformEngine {
    /// Empty engine; add bodies and call [`finalize`](Self::finalize)
    pub fn new(time_scale: f64) -> OrreryResult<Self> {
        validate_time_scale(time_scale)?;
        Ok(Self {
            bodies: Vec::new(),
            hierarchy: None,
            clocks: Vec::new(),
            transforms: Vec::new(),
            time_scale,
            default_time_scale: time_scale,
            paused: false,
            elapsed_days: 0.0,
        })
    }

    /// Build and finalize an engine from a body table in one step
    pub fn from_bodies(
        bodies: impl IntoIterator<Item = CelestialBody>,
        time_scale: f64,
    ) -> OrreryResult<Self> {
        let mut engine = Self::new(time_scale)?;
        for body in bodies {
            engine.add_body(body)?;
        }
        engine.finalize()?;
        Ok(engine)
    }

    pub fn add_body(&mut self, body: CelestialBody) -> OrreryResult<()> {
        if self.hierarchy.is_some() {
            return Err(OrreryError::InvalidHierarchy(format!(
                "cannot add '{}' after the hierarchy was finalized",
                body.name
            )));
        }
        self.bodies.push(body);
        Ok(())
    }

    /// Validate parent links, fix the update order and compute the
    /// transforms for the initial phases
    pub fn finalize(&mut self) -> OrreryResult<()> {
        if self.hierarchy.is_some() {
            return Ok(());
        }

        let hierarchy = Hierarchy::build(&self.bodies)?;
        log::info!(
            "Finalized hierarchy with {} bodies (max depth {})",
            self.bodies.len(),
            hierarchy.max_depth()
        );

        self.clocks = vec![SimulationClock::default(); self.bodies.len()];
        self.transforms = vec![DMat4::IDENTITY; self.bodies.len()];
        self.hierarchy = Some(hierarchy);
        self.update_transforms();
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.hierarchy.is_some()
    }

    fn hierarchy(&self) -> OrreryResult<&Hierarchy> {
        self.hierarchy.as_ref().ok_or_else(|| {
            OrreryError::NotInitialized(format!(
                "{} bodies registered but hierarchy not finalized",
                self.bodies.len()
            ))
        })
    }

    /// Advance every clock by `dt` of frame time and recompute all world
    /// transforms. A paused engine keeps its phases.
    pub fn advance(&mut self, dt: Duration) -> OrreryResult<()> {
        self.hierarchy()?;

        if !self.paused {
            let days = dt.as_secs_f64() * self.time_scale;
            let elapsed_days = self.elapsed_days + days;
            if !elapsed_days.is_finite() {
                return Err(OrreryError::InvalidParameter(format!(
                    "advancing {:?} at {} days/s overflows the clock",
                    dt, self.time_scale
                )));
            }

            // Step every clock before committing any, so a failure leaves
            // the frame as it was
            let clocks = self
                .clocks
                .iter()
                .zip(&self.bodies)
                .map(|(clock, body)| {
                    clock.stepped(days, body.rotation_period, body.revolution_period)
                })
                .collect::<OrreryResult<Vec<_>>>()?;
            self.clocks = clocks;
            self.elapsed_days = elapsed_days;
        }

        self.update_transforms();
        Ok(())
    }

    fn update_transforms(&mut self) {
        let Some(hierarchy) = &self.hierarchy else {
            return;
        };

        for &id in &hierarchy.order {
            let i = id.index();
            let body = &self.bodies[i];
            let clock = &self.clocks[i];

            let spin = DMat4::from_rotation_y(clock.rotation_phase)
                * DMat4::from_scale(DVec3::splat(body.size_scale));
            let tilt = DMat4::from_rotation_z(body.axial_tilt);

            let offset = DMat3::from_rotation_z(body.orbital_plane_tilt)
                * orbit_offset(body.orbital_radius, clock.revolution_phase);
            // Children follow the parent's position only, never its spin or tilt
            let anchor = hierarchy.parents[i]
                .map(|parent| translation_of(&self.transforms[parent.index()]))
                .unwrap_or(DVec3::ZERO);

            self.transforms[i] = DMat4::from_translation(anchor + offset) * tilt * spin;
        }
    }

    pub fn body_id(&self, name: &str) -> OrreryResult<BodyId> {
        self.hierarchy()?
            .index
            .get(name)
            .copied()
            .ok_or_else(|| OrreryError::NotFound(name.to_string()))
    }

    pub fn body(&self, id: BodyId) -> OrreryResult<&CelestialBody> {
        self.bodies
            .get(id.index())
            .ok_or_else(|| OrreryError::NotFound(format!("body index {}", id.index())))
    }

    pub fn body_by_name(&self, name: &str) -> OrreryResult<&CelestialBody> {
        self.body(self.body_id(name)?)
    }

    /// World transform of `name` for the current frame
    pub fn world_transform(&self, name: &str) -> OrreryResult<DMat4> {
        let id = self.body_id(name)?;
        Ok(self.transforms[id.index()])
    }

    pub fn world_translation(&self, name: &str) -> OrreryResult<DVec3> {
        self.world_transform(name).map(|m| translation_of(&m))
    }

    /// Offset from the parent's position, orbital-plane tilt included
    pub fn orbit_offset(&self, name: &str) -> OrreryResult<DVec3> {
        let id = self.body_id(name)?;
        let body = &self.bodies[id.index()];
        let phase = self.clocks[id.index()].revolution_phase;
        Ok(DMat3::from_rotation_z(body.orbital_plane_tilt) * orbit_offset(body.orbital_radius, phase))
    }

    pub fn clock(&self, name: &str) -> OrreryResult<SimulationClock> {
        let id = self.body_id(name)?;
        Ok(self.clocks[id.index()])
    }

    /// Bodies with their current transforms, parents before children
    pub fn draw_list(
        &self,
    ) -> OrreryResult<impl Iterator<Item = (BodyId, &CelestialBody, &DMat4)> + '_> {
        let hierarchy = self.hierarchy()?;
        Ok(hierarchy
            .order
            .iter()
            .map(|&id| (id, &self.bodies[id.index()], &self.transforms[id.index()])))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Zero every phase and the elapsed time
    pub fn reset_simulation(&mut self) {
        log::info!("Resetting simulation after {:.2} days", self.elapsed_days);
        self.clocks.iter_mut().for_each(SimulationClock::reset);
        self.elapsed_days = 0.0;
        self.update_transforms();
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, time_scale: f64) -> OrreryResult<()> {
        validate_time_scale(time_scale)?;
        self.time_scale = time_scale;
        log::info!("Time scale set to {:.4} days/s", time_scale);
        Ok(())
    }

    /// Multiply the time scale, e.g. by 2.0 to speed up or 0.5 to slow down
    pub fn scale_time(&mut self, factor: f64) -> OrreryResult<()> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(OrreryError::InvalidParameter(format!(
                "time scale factor must be positive, got {factor}"
            )));
        }
        let mut scaled = self.time_scale * factor;
        // A running clock never slows to a standstill; only an explicit
        // zero freezes it
        if self.time_scale > 0.0 {
            scaled = scaled.max(MIN_TIME_SCALE);
        }
        self.set_time_scale(scaled)
    }

    pub fn reset_time_scale(&mut self) {
        self.time_scale = self.default_time_scale;
        log::info!("Time scale reset to {:.4} days/s", self.time_scale);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause state, returning the new one
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }
}

fn validate_time_scale(time_scale: f64) -> OrreryResult<()> {
    if time_scale.is_finite() && time_scale >= 0.0 {
        Ok(())
    } else {
        Err(OrreryError::InvalidParameter(format!(
            "time scale must be finite and non-negative, got {time_scale}"
        )))
    }
}
