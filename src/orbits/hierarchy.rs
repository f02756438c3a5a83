/// Parent resolution and update ordering for the body arena
use std::collections::HashMap;

use crate::math::{BodyId, CelestialBody};
use crate::{OrreryError, OrreryResult};

/// Resolved parent links plus the fixed order bodies are updated in
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    pub parents: Vec<Option<BodyId>>,
    pub depths: Vec<usize>,
    /// Every body appears after its parent
    pub order: Vec<BodyId>,
    pub index: HashMap<String, BodyId>,
}

impl Hierarchy {
    /// Resolve parent names to indices and sort bodies by depth.
    ///
    /// Fails on duplicate names, parents that don't exist, and cycles.
    pub fn build(bodies: &[CelestialBody]) -> OrreryResult<Self> {
        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if index.insert(body.name.clone(), BodyId(i)).is_some() {
                return Err(OrreryError::InvalidHierarchy(format!(
                    "duplicate body name '{}'",
                    body.name
                )));
            }
        }

        let parents = bodies
            .iter()
            .map(|body| match &body.parent {
                None => Ok(None),
                Some(parent) => index.get(parent).copied().map(Some).ok_or_else(|| {
                    OrreryError::InvalidHierarchy(format!(
                        "body '{}' references unknown parent '{}'",
                        body.name, parent
                    ))
                }),
            })
            .collect::<OrreryResult<Vec<_>>>()?;

        let depths = (0..bodies.len())
            .map(|i| {
                let mut depth = 0;
                let mut cursor = parents[i];
                while let Some(parent) = cursor {
                    depth += 1;
                    // A chain longer than the arena must revisit a body
                    if depth > bodies.len() {
                        return Err(OrreryError::InvalidHierarchy(format!(
                            "cycle in parent chain of '{}'",
                            bodies[i].name
                        )));
                    }
                    cursor = parents[parent.index()];
                }
                Ok(depth)
            })
            .collect::<OrreryResult<Vec<_>>>()?;

        let mut order: Vec<BodyId> = (0..bodies.len()).map(BodyId).collect();
        // Stable sort keeps table order within a depth level
        order.sort_by_key(|id| depths[id.index()]);

        Ok(Self {
            parents,
            depths,
            order,
            index,
        })
    }

    pub fn max_depth(&self) -> usize {
        self.depths.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Mesh;
    use std::sync::Arc;

    fn body(name: &str, parent: Option<&str>) -> CelestialBody {
        let body = CelestialBody::new(name, Arc::new(Mesh::default()));
        match parent {
            Some(parent) => body.with_parent(parent),
            None => body,
        }
    }

    #[test]
    fn test_children_sorted_after_parents() {
        // Declared child-first on purpose
        let bodies = vec![
            body("Moon", Some("Earth")),
            body("Earth", Some("Sun")),
            body("Sun", None),
            body("Mars", Some("Sun")),
        ];
        let hierarchy = Hierarchy::build(&bodies).unwrap();

        let names: Vec<&str> = hierarchy
            .order
            .iter()
            .map(|id| bodies[id.index()].name.as_str())
            .collect();
        assert_eq!(names, ["Sun", "Earth", "Mars", "Moon"]);
        assert_eq!(hierarchy.max_depth(), 2);
        assert_eq!(hierarchy.parents[0], Some(BodyId(1)));
    }

    #[test]
    fn test_dangling_parent() {
        let bodies = vec![body("Sun", None), body("Moon", Some("Earth"))];
        assert!(matches!(
            Hierarchy::build(&bodies),
            Err(OrreryError::InvalidHierarchy(_))
        ));
    }

    #[test]
    fn test_cycle_detected() {
        let bodies = vec![body("A", Some("B")), body("B", Some("A"))];
        assert!(matches!(
            Hierarchy::build(&bodies),
            Err(OrreryError::InvalidHierarchy(_))
        ));

        let selfish = vec![body("A", Some("A"))];
        assert!(Hierarchy::build(&selfish).is_err());
    }

    #[test]
    fn test_duplicate_name() {
        let bodies = vec![body("Sun", None), body("Sun", None)];
        assert!(matches!(
            Hierarchy::build(&bodies),
            Err(OrreryError::InvalidHierarchy(_))
        ));
    }
}
