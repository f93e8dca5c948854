//! glTF-backed model decoder.
//!
//! Extracts the slice of a glTF document that the animation manager
//! consumes: the node hierarchy with names, per-primitive material slots
//! with texture-map presence, and animation clips with their durations.
//! Geometry, skinning and image payloads are the renderer's concern and
//! are not imported here.

use std::sync::Arc;

use glam::Vec2;

use crate::animation::clip::AnimationClip;
use crate::assets::decoder::ModelDecoder;
use crate::errors::Result;
use crate::scene::material::{Material, SharedMaterial, TextureMap};
use crate::scene::model::{Mesh, ModelDocument, ModelNode};

#[derive(Debug, Clone, Copy, Default)]
pub struct GltfDecoder;

impl GltfDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ModelDecoder for GltfDecoder {
    fn decode(&self, name: &str, bytes: &[u8]) -> Result<ModelDocument> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        let document = gltf.document;

        // One shared material per glTF material index, reused across
        // every primitive that references it. Flow keying depends on
        // that sharing.
        let materials: Vec<SharedMaterial> = document
            .materials()
            .map(|material| {
                let map = material
                    .pbr_metallic_roughness()
                    .base_color_texture()
                    .map(|info| {
                        let offset = info
                            .texture_transform()
                            .map_or(Vec2::ZERO, |transform| Vec2::from(transform.offset()));
                        TextureMap::with_offset(offset)
                    });
                Material {
                    name: material.name().map(str::to_owned),
                    map,
                }
                .shared()
            })
            .collect();

        let mut nodes = Vec::with_capacity(document.nodes().len());
        for node in document.nodes() {
            let mesh = node.mesh().map(|mesh| Mesh {
                materials: mesh
                    .primitives()
                    .map(|primitive| match primitive.material().index() {
                        Some(index) => Arc::clone(&materials[index]),
                        // The glTF default material, one instance per slot
                        None => Material::default().shared(),
                    })
                    .collect(),
            });

            nodes.push(ModelNode {
                name: node.name().map(str::to_owned),
                children: node.children().map(|child| child.index()).collect(),
                mesh,
            });
        }

        let roots = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .map(|scene| scene.nodes().map(|node| node.index()).collect())
            .unwrap_or_default();

        let clips = document
            .animations()
            .map(|animation| {
                let duration = animation
                    .channels()
                    .map(|channel| sampler_end_time(&channel.sampler().input()))
                    .fold(0.0_f32, f32::max);
                Arc::new(AnimationClip::new(
                    animation.name().unwrap_or_default(),
                    duration,
                ))
            })
            .collect();

        Ok(ModelDocument {
            name: name.to_owned(),
            nodes,
            roots,
            clips,
        })
    }
}

/// Last keyframe time of a sampler input accessor, read from the
/// accessor's `max` bound so buffer data never needs to be resolved.
fn sampler_end_time(accessor: &gltf::Accessor<'_>) -> f32 {
    accessor
        .max()
        .and_then(|value| value.get(0).and_then(serde_json::Value::as_f64))
        .map_or(0.0, |max| max as f32)
}
