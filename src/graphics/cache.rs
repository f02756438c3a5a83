/// Shared mesh storage
/// Each distinct tessellation is generated once and handed out as `Arc<Mesh>`
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::mesh::Mesh;
use super::primitives::{DEFAULT_RING_SEGMENTS, build_ring, build_sphere};
use crate::OrreryResult;

/// Which template a body's geometry comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshSpec {
    Sphere {
        subdivisions: u32,
    },
    Ring {
        inner_radius_ratio: f64,
        outer_radius_ratio: f64,
        #[serde(default)]
        segments: Option<u32>,
    },
}

impl MeshSpec {
    pub fn sphere(subdivisions: u32) -> Self {
        Self::Sphere { subdivisions }
    }

    pub fn ring(inner_radius_ratio: f64, outer_radius_ratio: f64) -> Self {
        Self::Ring {
            inner_radius_ratio,
            outer_radius_ratio,
            segments: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MeshKey {
    Sphere(u32),
    // Radii keyed by bit pattern; specs come from config, not arithmetic
    Ring(u64, u64, u32),
}

pub struct MeshCache {
    meshes: HashMap<MeshKey, Arc<Mesh>>,
    default_ring_segments: u32,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::with_ring_segments(DEFAULT_RING_SEGMENTS)
    }

    /// Cache whose rings use `segments` when a spec doesn't name a count
    pub fn with_ring_segments(segments: u32) -> Self {
        Self {
            meshes: HashMap::new(),
            default_ring_segments: segments,
        }
    }

    /// Fetch the mesh for `spec`, generating it on first use
    pub fn get_or_build(&mut self, spec: &MeshSpec) -> OrreryResult<Arc<Mesh>> {
        let key = match *spec {
            MeshSpec::Sphere { subdivisions } => MeshKey::Sphere(subdivisions),
            MeshSpec::Ring {
                inner_radius_ratio,
                outer_radius_ratio,
                segments,
            } => MeshKey::Ring(
                inner_radius_ratio.to_bits(),
                outer_radius_ratio.to_bits(),
                segments.unwrap_or(self.default_ring_segments),
            ),
        };

        if let Some(mesh) = self.meshes.get(&key) {
            log::debug!("Mesh cache hit for {:?}", spec);
            return Ok(Arc::clone(mesh));
        }

        let mesh = match key {
            MeshKey::Sphere(subdivisions) => build_sphere(subdivisions)?,
            MeshKey::Ring(inner, outer, segments) => {
                build_ring(f64::from_bits(inner), f64::from_bits(outer), segments)?
            }
        };

        let mesh = Arc::new(mesh);
        self.meshes.insert(key, Arc::clone(&mesh));
        Ok(mesh)
    }

    /// Number of distinct meshes generated so far
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl Default for MeshCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OrreryError;

    #[test]
    fn test_cache_shares_meshes() {
        let mut cache = MeshCache::new();
        let a = cache.get_or_build(&MeshSpec::sphere(8)).unwrap();
        let b = cache.get_or_build(&MeshSpec::sphere(8)).unwrap();
        let c = cache.get_or_build(&MeshSpec::sphere(9)).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_ring_default_segments() {
        let mut cache = MeshCache::with_ring_segments(32);
        let implicit = cache.get_or_build(&MeshSpec::ring(1.2, 2.0)).unwrap();
        let explicit = cache
            .get_or_build(&MeshSpec::Ring {
                inner_radius_ratio: 1.2,
                outer_radius_ratio: 2.0,
                segments: Some(32),
            })
            .unwrap();

        assert!(Arc::ptr_eq(&implicit, &explicit));
        assert_eq!(implicit.triangle_count(), 64);
    }

    #[test]
    fn test_cache_propagates_errors() {
        let mut cache = MeshCache::new();
        assert!(matches!(
            cache.get_or_build(&MeshSpec::sphere(2)),
            Err(OrreryError::InvalidParameter(_))
        ));
        assert!(cache.is_empty());
    }
}
