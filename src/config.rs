/// Runtime configuration with defaults and RON loading
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::OrreryResult;
use crate::graphics::DEFAULT_RING_SEGMENTS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub camera: CameraConfig,
    pub meshes: MeshConfig,
    pub headless: HeadlessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated days per second of frame time; also the reset value
    pub time_scale: f64,
    /// Factor applied by the speed-up key and divided out by slow-down
    pub speed_factor: f64,
    /// Start with the clocks frozen
    pub start_paused: bool,
}

/// Orbital camera
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Body focused at startup
    pub initial_focus: String,
    /// Body whose size defines a scale factor of 1
    pub reference_body: String,
    /// Radians per pixel of cursor drag
    pub drag_sensitivity: f64,
    /// Radius change per scroll notch, in camera units
    pub zoom_step: f64,
    /// Starting distance, in camera units (scaled by the focus size)
    pub initial_radius: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Starting polar angle from +Y, radians
    pub initial_polar: f64,
    /// Starting azimuth in the XZ plane, radians
    pub initial_azimuth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Segment count for rings that don't specify one
    pub ring_segments: u32,
}

/// Fixed-step loop for the headless binary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Number of frames to simulate
    pub frames: u32,
    /// Frames per second used to derive the fixed timestep
    pub frame_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            speed_factor: 2.0,
            start_paused: false,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_focus: "Sun".to_string(),
            reference_body: "Sun".to_string(),
            drag_sensitivity: std::f64::consts::PI / 200.0,
            zoom_step: 0.25,
            initial_radius: 4.0,
            min_radius: 1.5,
            max_radius: 40.0,
            initial_polar: std::f64::consts::FRAC_PI_3,
            initial_azimuth: 0.0,
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            ring_segments: DEFAULT_RING_SEGMENTS,
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_rate: 60.0,
        }
    }
}

impl HeadlessConfig {
    pub fn timestep(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate.max(1.0))
    }
}

impl Config {
    /// Missing fields take their defaults
    pub fn from_ron_str(content: &str) -> OrreryResult<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> OrreryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrreryError;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.simulation.time_scale, 1.0);
        assert_eq!(config.camera.reference_body, "Sun");
        assert_eq!(config.meshes.ring_segments, 128);
        assert!(config.camera.min_radius < config.camera.max_radius);
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let config = Config::from_ron_str(
            r#"(
                simulation: (time_scale: 5.0),
                camera: (initial_focus: "Earth"),
            )"#,
        )
        .unwrap();

        assert_eq!(config.simulation.time_scale, 5.0);
        assert_eq!(config.simulation.speed_factor, 2.0);
        assert_eq!(config.camera.initial_focus, "Earth");
        assert_eq!(config.camera.reference_body, "Sun");
        assert_eq!(config.headless, HeadlessConfig::default());
    }

    #[test]
    fn test_bad_ron_is_config_error() {
        assert!(matches!(
            Config::from_ron_str("(simulation: (time_scale: \"fast\"))"),
            Err(OrreryError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Config::load("/nonexistent/orrery.ron"),
            Err(OrreryError::Io(_))
        ));
    }

    #[test]
    fn test_timestep() {
        let headless = HeadlessConfig {
            frames: 1,
            frame_rate: 50.0,
        };
        assert!((headless.timestep().as_secs_f64() - 0.02).abs() < 1e-9);
    }
}
