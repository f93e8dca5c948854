pub mod material;
pub mod model;

pub use material::{Material, SharedMaterial, TextureMap};
pub use model::{Mesh, ModelDocument, ModelNode};
