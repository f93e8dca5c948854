use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;

/// A material's color texture, as far as this subsystem cares:
/// a UV offset that flow animation advances, and a dirty flag the
/// renderer consumes to re-upload the sampler state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextureMap {
    pub offset: Vec2,
    pub needs_upload: bool,
}

impl TextureMap {
    #[must_use]
    pub fn with_offset(offset: Vec2) -> Self {
        Self {
            offset,
            needs_upload: false,
        }
    }
}

/// Minimal material surface.
///
/// The map is optional: textures may finish loading after the material
/// is registered for flow animation, so a missing map is a normal state,
/// not an error.
#[derive(Debug, Clone, Default)]
pub struct Material {
    pub name: Option<String>,
    pub map: Option<TextureMap>,
}

/// Materials are shared between mesh primitives and the flow controller;
/// identity (the allocation, not the contents) is what keys flow entries.
pub type SharedMaterial = Arc<Mutex<Material>>;

impl Material {
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            map: None,
        }
    }

    #[must_use]
    pub fn with_map(name: Option<&str>, offset: Vec2) -> Self {
        Self {
            name: name.map(str::to_owned),
            map: Some(TextureMap::with_offset(offset)),
        }
    }

    #[must_use]
    pub fn shared(self) -> SharedMaterial {
        Arc::new(Mutex::new(self))
    }
}
