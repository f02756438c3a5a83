/// Back end that draws nothing and records what it was given
use std::collections::HashSet;

use glam::{DMat4, Vec3};

use super::{DrawCall, EyePose, RenderBackend};
use crate::{OrreryError, OrreryResult};

/// Summary of one submitted frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub triangles: usize,
    /// Distinct meshes referenced this frame
    pub unique_meshes: usize,
    pub eye: Option<EyePose>,
    /// Per-body world positions in submission order
    pub positions: Vec<(String, Vec3)>,
}

#[derive(Default)]
pub struct HeadlessBackend {
    frames_rendered: u64,
    current: Option<FrameStats>,
    mesh_ptrs: HashSet<usize>,
    last_frame: Option<FrameStats>,
    view: Option<DMat4>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last_frame.as_ref()
    }

    /// View matrix of the last frame begun
    pub fn view_matrix(&self) -> Option<DMat4> {
        self.view
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self, eye: &EyePose) -> OrreryResult<()> {
        if self.current.is_some() {
            return Err(OrreryError::InvalidParameter(
                "begin_frame called twice without end_frame".to_string(),
            ));
        }
        self.current = Some(FrameStats {
            eye: Some(*eye),
            ..FrameStats::default()
        });
        self.mesh_ptrs.clear();
        self.view = Some(eye.view_matrix());
        Ok(())
    }

    fn draw(&mut self, call: DrawCall<'_>) -> OrreryResult<()> {
        let frame = self.current.as_mut().ok_or_else(|| {
            OrreryError::InvalidParameter("draw called outside of a frame".to_string())
        })?;

        frame.draw_calls += 1;
        frame.triangles += call.mesh.triangle_count();
        if self.mesh_ptrs.insert(std::sync::Arc::as_ptr(call.mesh) as usize) {
            frame.unique_meshes += 1;
        }
        let position = call.model.w_axis.truncate();
        frame.positions.push((call.name.to_string(), position));

        log::trace!(
            "draw '{}' material '{}' at ({:.3}, {:.3}, {:.3})",
            call.name,
            call.material,
            position.x,
            position.y,
            position.z
        );
        Ok(())
    }

    fn end_frame(&mut self) -> OrreryResult<()> {
        let frame = self.current.take().ok_or_else(|| {
            OrreryError::InvalidParameter("end_frame called without begin_frame".to_string())
        })?;
        self.frames_rendered += 1;
        log::trace!(
            "frame {} submitted: {} draws, {} triangles",
            self.frames_rendered,
            frame.draw_calls,
            frame.triangles
        );
        self.last_frame = Some(frame);
        Ok(())
    }
}
