/// Mesh data structures and utilities
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Interleaved vertex layout for GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Immutable triangle-list geometry: three consecutive vertices per
/// triangle, no index buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    tex_coords: Vec<Vec2>,
}

impl Mesh {
    pub(crate) fn from_parts(positions: Vec<Vec3>, tex_coords: Vec<Vec2>) -> Self {
        debug_assert_eq!(positions.len(), tex_coords.len());
        debug_assert_eq!(positions.len() % 3, 0);
        Self {
            positions,
            tex_coords,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn tex_coords(&self) -> &[Vec2] {
        &self.tex_coords
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Triangles as position triples in emission order
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Interleave positions and texture coordinates for a vertex buffer
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.tex_coords)
            .map(|(position, tex_coord)| MeshVertex {
                position: position.to_array(),
                tex_coord: tex_coord.to_array(),
            })
            .collect()
    }

    /// Raw bytes of the interleaved vertex data
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_layout() {
        let mesh = Mesh::from_parts(
            vec![Vec3::X, Vec3::Y, Vec3::Z],
            vec![Vec2::ZERO, Vec2::X, Vec2::ONE],
        );

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        let vertices = mesh.interleaved();
        assert_eq!(vertices[1].position, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[2].tex_coord, [1.0, 1.0]);

        assert_eq!(std::mem::size_of::<MeshVertex>(), 20);
        assert_eq!(mesh.vertex_bytes().len(), 3 * 20);
    }

    #[test]
    fn test_triangles_iterator() {
        let mesh = Mesh::from_parts(
            vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z],
            vec![Vec2::ZERO; 6],
        );
        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1], [Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z]);
    }
}
