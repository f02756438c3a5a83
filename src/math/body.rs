/// Static description of a celestial body in the orrery
use std::sync::Arc;

use crate::graphics::Mesh;

/// Index of a body inside a finalized hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A star, planet, moon or ring attached to the scene
#[derive(Debug, Clone)]
pub struct CelestialBody {
    /// Unique name, also used as the lookup key
    pub name: String,

    /// Name of the body this one orbits, `None` for the root star
    pub parent: Option<String>,

    /// Shared unit-sized geometry
    pub mesh: Arc<Mesh>,

    /// Texture/material identifier handed to the renderer
    pub material: String,

    /// Sidereal rotation period in days; negative spins retrograde,
    /// zero or infinite means no spin
    pub rotation_period: f64,

    /// Revolution period in days; zero or infinite means no orbit
    pub revolution_period: f64,

    /// Orbit radius in scene units
    pub orbital_radius: f64,

    /// Axial tilt in radians
    pub axial_tilt: f64,

    /// Tilt of the orbital plane relative to the parent, in radians
    pub orbital_plane_tilt: f64,

    /// Scale applied to the unit mesh
    pub size_scale: f64,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            mesh,
            material: String::new(),
            rotation_period: 0.0,
            revolution_period: 0.0,
            orbital_radius: 0.0,
            axial_tilt: 0.0,
            orbital_plane_tilt: 0.0,
            size_scale: 1.0,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_rotation(mut self, period: f64, axial_tilt: f64) -> Self {
        self.rotation_period = period;
        self.axial_tilt = axial_tilt;
        self
    }

    pub fn with_orbit(mut self, period: f64, radius: f64, plane_tilt: f64) -> Self {
        self.revolution_period = period;
        self.orbital_radius = radius;
        self.orbital_plane_tilt = plane_tilt;
        self
    }

    pub fn with_size(mut self, size_scale: f64) -> Self {
        self.size_scale = size_scale;
        self
    }

    /// Whether the body spins about its own axis
    pub fn spins(&self) -> bool {
        is_periodic(self.rotation_period)
    }

    /// Whether the body moves along an orbit
    pub fn revolves(&self) -> bool {
        is_periodic(self.revolution_period)
    }
}

/// A period takes part in phase advancement only when finite and nonzero
#[inline]
pub fn is_periodic(period: f64) -> bool {
    period.is_finite() && period != 0.0
}
