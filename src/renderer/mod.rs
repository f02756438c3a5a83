/// Rendering boundary
/// The core hands out (mesh, model matrix, material) triples plus a camera
/// pose; how they reach the screen is up to the back end
pub mod camera;
pub mod headless;

use std::sync::Arc;

use glam::Mat4;

use crate::{OrreryResult, graphics::Mesh, math::BodyId};

pub use camera::{CameraRig, CameraState, EyePose};
pub use headless::{FrameStats, HeadlessBackend};

/// One body's worth of drawing for the current frame
#[derive(Debug, Clone)]
pub struct DrawCall<'a> {
    pub body: BodyId,
    pub name: &'a str,
    pub mesh: &'a Arc<Mesh>,
    /// Model matrix, narrowed to f32 for the GPU
    pub model: Mat4,
    pub material: &'a str,
}

/// Something that can draw a frame of bodies
pub trait RenderBackend {
    fn begin_frame(&mut self, eye: &EyePose) -> OrreryResult<()>;

    fn draw(&mut self, call: DrawCall<'_>) -> OrreryResult<()>;

    fn end_frame(&mut self) -> OrreryResult<()>;
}
