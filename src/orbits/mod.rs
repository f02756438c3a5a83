/// Hierarchical orbital motion
/// Circular orbits with designer-chosen periods; no gravitation
pub mod clock;
pub mod engine;
pub mod hierarchy;

pub use clock::SimulationClock;
pub use engine::{MIN_TIME_SCALE, OrbitalTransformEngine};
pub use hierarchy::Hierarchy;
