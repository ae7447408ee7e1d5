//! Render-side scene graph.
//!
//! Every spawned object is a [`MeshNode`] root keyed by its [`ObjectId`]. Roots are posed in
//! render space. Their direct children carry local offsets and, for mesh children, the raw
//! vertex positions the convex hulls are derived from.

use shared::{ActiveBody, ObjectId, Quat, Vec3, to_render};
use std::collections::HashMap;

/// A direct child of a loaded root.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshChild {
    pub name: String,
    /// Offset from the parent, in the parent's unscaled local frame.
    pub translation: Vec3,
    pub rotation: Quat,
    pub kind: ChildKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ChildKind {
    /// Geometry with a flat `[x0, y0, z0, x1, ...]` position buffer.
    Mesh { positions: Vec<f32> },
    /// An empty transform node (light, marker, group). Never gets a collider.
    Group,
}

impl MeshChild {
    pub fn mesh(name: impl Into<String>, translation: Vec3, positions: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            translation,
            rotation: Quat::identity(),
            kind: ChildKind::Mesh { positions },
        }
    }

    pub fn group(name: impl Into<String>, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            translation,
            rotation: Quat::identity(),
            kind: ChildKind::Group,
        }
    }

    /// The position buffer, for mesh children.
    pub fn positions(&self) -> Option<&[f32]> {
        match &self.kind {
            ChildKind::Mesh { positions } => Some(positions),
            ChildKind::Group => None,
        }
    }
}

/// Root of one loaded asset.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshNode {
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    /// Per-axis scale. Applies to vertices and to child offsets, never to rotations.
    pub scale: Vec3,
    pub children: Vec<MeshChild>,
}

impl MeshNode {
    pub fn new(name: impl Into<String>, children: Vec<MeshChild>) -> Self {
        Self {
            name: name.into(),
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::repeat(1.0),
            children,
        }
    }
}

/// Spawned objects by id.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<ObjectId, MeshNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object_id: ObjectId, node: MeshNode) {
        if self.nodes.insert(object_id, node).is_some() {
            log::warn!("Object {object_id} replaced an existing scene node");
        }
    }

    #[inline]
    pub fn get(&self, object_id: ObjectId) -> Option<&MeshNode> {
        self.nodes.get(&object_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &MeshNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Writes an active-body report into the scene, converting translations back to render
    /// space. Entries for ids the scene does not know are dropped one by one; the rest of the
    /// report still applies. Returns how many entries were applied.
    pub fn apply_active(&mut self, report: &[ActiveBody], physics_scale: f32) -> usize {
        let mut applied = 0;
        for body in report {
            let Some(node) = self.nodes.get_mut(&body.object_id) else {
                log::debug!("Active report for unknown object {}", body.object_id);
                continue;
            };
            node.translation = to_render(body.translation, physics_scale);
            node.rotation = body.rotation;
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn active(object_id: ObjectId, translation: Vec3) -> ActiveBody {
        ActiveBody {
            object_id,
            translation,
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 0.5),
        }
    }

    #[test]
    fn active_report_is_converted_to_render_space() {
        let mut scene = SceneGraph::new();
        scene.insert(1, MeshNode::new("a", vec![]));

        let applied = scene.apply_active(&[active(1, Vec3::new(0.5, 0.0, -0.25))], 0.001);

        assert_eq!(applied, 1);
        let node = scene.get(1).unwrap();
        assert_relative_eq!(node.translation, Vec3::new(500.0, 0.0, -250.0), epsilon = 1.0e-3);
        assert_relative_eq!(node.rotation.angle(), 0.5, epsilon = 1.0e-6);
    }

    #[test]
    fn unknown_ids_are_dropped_per_entry() {
        let mut scene = SceneGraph::new();
        scene.insert(2, MeshNode::new("b", vec![]));

        let report = [active(7, Vec3::x()), active(2, Vec3::y())];
        assert_eq!(scene.apply_active(&report, 1.0), 1);

        assert_eq!(scene.len(), 1);
        assert_relative_eq!(scene.get(2).unwrap().translation, Vec3::y());
    }

    #[test]
    fn group_children_have_no_positions() {
        let group = MeshChild::group("light", Vec3::zeros());
        let mesh = MeshChild::mesh("hull", Vec3::zeros(), vec![0.0; 12]);

        assert!(group.positions().is_none());
        assert_eq!(mesh.positions().map(<[f32]>::len), Some(12));
    }
}
