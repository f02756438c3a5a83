//! Procedural geometry for the orrery
//! Meshes are unit-sized and shared between bodies
pub mod cache;
pub mod mesh;
pub mod primitives;

pub use cache::{MeshCache, MeshSpec};
pub use mesh::{Mesh, MeshVertex};
pub use primitives::*;
