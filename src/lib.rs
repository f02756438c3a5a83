pub mod app;
pub mod config;
pub mod graphics;
pub mod input;
pub mod math;
pub mod orbits;
pub mod renderer;
pub mod scenario;

pub use app::OrreryApp;
pub use config::Config;
pub use orbits::OrbitalTransformEngine;
pub use renderer::CameraRig;

#[derive(thiserror::Error, Debug)]
pub enum OrreryError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Body not found: {0}")]
    NotFound(String),
    #[error("Body hierarchy not initialized: {0}")]
    NotInitialized(String),
    #[error("Invalid body hierarchy: {0}")]
    InvalidHierarchy(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type OrreryResult<T> = Result<T, OrreryError>;
