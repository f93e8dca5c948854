use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::scene::material::SharedMaterial;

/// A renderable mesh attachment: one material slot per primitive.
///
/// Multi-primitive meshes carry several slots; the flow scan inspects
/// each slot independently.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub materials: Vec<SharedMaterial>,
}

/// One node of a parsed model, stored flat and referencing children by
/// index into [`ModelDocument::nodes`].
#[derive(Debug, Clone, Default)]
pub struct ModelNode {
    pub name: Option<String>,
    pub children: Vec<usize>,
    pub mesh: Option<Mesh>,
}

/// A parsed scene graph as delivered by a model decoder.
///
/// Pure data, safe to share across tasks. Geometry and skinning payloads
/// stay with the decoder/renderer; this document carries exactly what the
/// animation manager binds: the node hierarchy with names, material slots,
/// and the model's animation clips.
#[derive(Debug, Clone, Default)]
pub struct ModelDocument {
    /// Model identity, taken from the load descriptor.
    pub name: String,
    pub nodes: Vec<ModelNode>,
    /// Root node indices of the default scene.
    pub roots: Vec<usize>,
    pub clips: Vec<Arc<AnimationClip>>,
}

impl ModelDocument {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Depth-first visit of every node carrying a mesh.
    pub fn visit_meshes(&self, mut visit: impl FnMut(&ModelNode, &Mesh)) {
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            let Some(node) = self.nodes.get(index) else {
                continue;
            };
            if let Some(mesh) = &node.mesh {
                visit(node, mesh);
            }
            stack.extend(node.children.iter().rev().copied());
        }
    }
}
