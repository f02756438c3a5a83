/// Orbital camera rig
/// Orbits the focused body on a sphere whose size follows the body's scale
use glam::{DMat4, DVec3};

use crate::config::CameraConfig;
use crate::math::{PI, TAU, spherical_to_cartesian};
use crate::orbits::OrbitalTransformEngine;
use crate::{OrreryError, OrreryResult};

/// Closest the polar angle may get to either pole, radians
pub const POLAR_MARGIN: f64 = 0.01;

/// User-steered camera parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub focus: String,
    /// Distance from the focus in camera units
    pub orbit_radius: f64,
    /// Angle from +Y, kept inside (0, π)
    pub polar_angle: f64,
    /// Angle in the XZ plane, kept inside [-2π, 2π]
    pub azimuth_angle: f64,
    /// Focus size relative to the reference body
    pub scale_factor: f64,
}

/// Where the eye sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePose {
    pub position: DVec3,
    pub centre: DVec3,
}

impl EyePose {
    /// Right-handed look-at with +Y up
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.centre, DVec3::Y)
    }
}

pub struct CameraRig {
    state: CameraState,
    reference_size: f64,
    min_radius: f64,
    max_radius: f64,
    sensitivity: f64,
    zoom_step: f64,
}

impl CameraRig {
    pub fn new(config: &CameraConfig, reference_size: f64) -> OrreryResult<Self> {
        if !(reference_size.is_finite() && reference_size > 0.0) {
            return Err(OrreryError::InvalidParameter(format!(
                "reference size must be positive, got {reference_size}"
            )));
        }

        let initial = [
            ("initial_radius", config.initial_radius),
            ("initial_polar", config.initial_polar),
            ("initial_azimuth", config.initial_azimuth),
            ("drag_sensitivity", config.drag_sensitivity),
            ("zoom_step", config.zoom_step),
        ];
        if let Some((field, value)) = initial.iter().find(|(_, value)| !value.is_finite()) {
            return Err(OrreryError::InvalidParameter(format!(
                "camera {field} must be finite, got {value}"
            )));
        }

        if !(config.min_radius > 0.0 && config.min_radius < config.max_radius) {
            return Err(OrreryError::InvalidParameter(format!(
                "camera radius band [{}, {}] is empty",
                config.min_radius, config.max_radius
            )));
        }

        Ok(Self {
            state: CameraState {
                focus: config.reference_body.clone(),
                orbit_radius: config
                    .initial_radius
                    .clamp(config.min_radius, config.max_radius),
                polar_angle: config.initial_polar.clamp(POLAR_MARGIN, PI - POLAR_MARGIN),
                azimuth_angle: config.initial_azimuth % TAU,
                scale_factor: 1.0,
            },
            reference_size,
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            sensitivity: config.drag_sensitivity,
            zoom_step: config.zoom_step,
        })
    }

    /// Rig sized against the configured reference body and focused on the
    /// configured initial body
    pub fn from_engine(config: &CameraConfig, engine: &OrbitalTransformEngine) -> OrreryResult<Self> {
        let reference = engine.body_by_name(&config.reference_body)?;
        let mut rig = Self::new(config, reference.size_scale)?;
        rig.set_focus(engine, &config.initial_focus)?;
        Ok(rig)
    }

    /// Switch the focus body and rescale the rig to its size
    pub fn set_focus(&mut self, engine: &OrbitalTransformEngine, name: &str) -> OrreryResult<()> {
        let body = engine.body_by_name(name)?;
        if !(body.size_scale.is_finite() && body.size_scale > 0.0) {
            return Err(OrreryError::InvalidParameter(format!(
                "cannot focus '{}' with size {}",
                name, body.size_scale
            )));
        }

        self.state.focus = body.name.clone();
        self.state.scale_factor = body.size_scale / self.reference_size;
        self.state.orbit_radius = self
            .state
            .orbit_radius
            .clamp(self.min_radius, self.max_radius);

        log::info!(
            "Camera focused on '{}' (scale factor {:.4})",
            name,
            self.state.scale_factor
        );
        Ok(())
    }

    /// Orbit around the focus by a cursor delta
    pub fn apply_drag(&mut self, dx: f64, dy: f64, sensitivity: f64) {
        let (d_azimuth, d_polar) = (dx * sensitivity, dy * sensitivity);
        if !(d_azimuth.is_finite() && d_polar.is_finite()) {
            log::warn!("Ignoring non-finite drag ({dx}, {dy}) x {sensitivity}");
            return;
        }

        self.state.azimuth_angle = (self.state.azimuth_angle + d_azimuth) % TAU;
        self.state.polar_angle =
            (self.state.polar_angle + d_polar).clamp(POLAR_MARGIN, PI - POLAR_MARGIN);
    }

    /// [`apply_drag`](Self::apply_drag) with the configured sensitivity
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.apply_drag(dx, dy, self.sensitivity);
    }

    pub fn apply_zoom(&mut self, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        self.state.orbit_radius =
            (self.state.orbit_radius + delta).clamp(self.min_radius, self.max_radius);
    }

    /// Scroll wheel notches; positive moves closer
    pub fn scroll(&mut self, notches: f64) {
        self.apply_zoom(-notches * self.zoom_step);
    }

    /// Eye position around `focus_translation`; pure function of the state
    pub fn eye_pose(&self, focus_translation: DVec3) -> EyePose {
        let offset = spherical_to_cartesian(
            self.state.orbit_radius * self.state.scale_factor,
            self.state.polar_angle,
            self.state.azimuth_angle,
        );
        EyePose {
            position: focus_translation + offset,
            centre: focus_translation,
        }
    }

    /// Pose anchored on the focus body's current world translation
    pub fn follow(&self, engine: &OrbitalTransformEngine) -> OrreryResult<EyePose> {
        let anchor = engine.world_translation(&self.state.focus)?;
        Ok(self.eye_pose(anchor))
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn focus(&self) -> &str {
        &self.state.focus
    }

    pub fn radius_limits(&self) -> (f64, f64) {
        (self.min_radius, self.max_radius)
    }
}
