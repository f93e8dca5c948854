#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod assets;
pub mod config;
pub mod errors;
pub mod scene;
pub mod utils;

pub use animation::{
    AnimationAction, AnimationClip, AnimationManager, AnimationMixer, AnimationRegistry,
    AnimationScheduler, LoopMode, MaterialFlowController, SharedAnimationManager, bind_model,
};
#[cfg(feature = "gltf")]
pub use assets::GltfDecoder;
pub use assets::{
    AssetPipeline, AssetStorage, BatchState, DecoderGate, DecoderHandle, ModelDecoder,
    ModelHandle, decoder_gate,
};
pub use config::{ModelDescriptor, ModelManifest};
pub use errors::{AtriumError, Result};
pub use scene::{Material, Mesh, ModelDocument, ModelNode, SharedMaterial, TextureMap};
pub use utils::Clock;
