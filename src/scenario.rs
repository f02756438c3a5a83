use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    OrreryResult,
    graphics::{MeshCache, MeshSpec},
    math::CelestialBody,
    orbits::OrbitalTransformEngine,
};

/// Number of bodies reachable through the numeric focus keys
pub const FOCUS_KEYS: usize = 10;

const BUILTIN_SCENARIO: &str = include_str!("../scenarios/solar_system.ron");

fn default_size() -> f64 {
    1.0
}

fn default_selectable() -> bool {
    true
}

/// One row of the body table as written in a scenario file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub mesh: MeshSpec,
    #[serde(default)]
    pub material: String,
    /// Days; `None` for no spin
    #[serde(default)]
    pub rotation_period: Option<f64>,
    /// Days; `None` for no orbit
    #[serde(default)]
    pub revolution_period: Option<f64>,
    #[serde(default)]
    pub orbital_radius: f64,
    #[serde(default)]
    pub axial_tilt_deg: f64,
    #[serde(default)]
    pub orbital_plane_tilt_deg: f64,
    #[serde(default = "default_size")]
    pub size_scale: f64,
    /// Whether a focus key can select this body
    #[serde(default = "default_selectable")]
    pub selectable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub bodies: Vec<BodySpec>,
}

impl Scenario {
    pub fn parse(content: &str) -> OrreryResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> OrreryResult<Self> {
        let path = path.as_ref();
        let scenario = Self::parse(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded scenario '{}' with {} bodies from {}",
            scenario.name,
            scenario.bodies.len(),
            path.display()
        );
        Ok(scenario)
    }

    /// The solar system shipped with the crate
    pub fn builtin() -> OrreryResult<Self> {
        Self::parse(BUILTIN_SCENARIO)
    }

    /// Turn the table into engine bodies, generating each distinct mesh once
    pub fn build_bodies(&self, cache: &mut MeshCache) -> OrreryResult<Vec<CelestialBody>> {
        self.bodies
            .iter()
            .map(|spec| -> OrreryResult<CelestialBody> {
                let mesh = cache.get_or_build(&spec.mesh)?;
                let mut body = CelestialBody::new(spec.name.clone(), mesh)
                    .with_material(spec.material.clone())
                    .with_rotation(
                        spec.rotation_period.unwrap_or(0.0),
                        spec.axial_tilt_deg.to_radians(),
                    )
                    .with_orbit(
                        spec.revolution_period.unwrap_or(0.0),
                        spec.orbital_radius,
                        spec.orbital_plane_tilt_deg.to_radians(),
                    )
                    .with_size(spec.size_scale);
                body.parent = spec.parent.clone();
                Ok(body)
            })
            .collect()
    }

    /// Build and finalize an engine for this scenario
    pub fn build_engine(
        &self,
        cache: &mut MeshCache,
        time_scale: f64,
    ) -> OrreryResult<OrbitalTransformEngine> {
        let bodies = self.build_bodies(cache)?;
        let engine = OrbitalTransformEngine::from_bodies(bodies, time_scale)?;
        log::info!(
            "Scenario '{}' ready: {} bodies sharing {} meshes",
            self.name,
            engine.len(),
            cache.len()
        );
        Ok(engine)
    }

    /// Names bound to focus keys 0-9, in table order
    pub fn focus_order(&self) -> Vec<String> {
        self.bodies
            .iter()
            .filter(|spec| spec.selectable)
            .take(FOCUS_KEYS)
            .map(|spec| spec.name.clone())
            .collect()
    }
}
