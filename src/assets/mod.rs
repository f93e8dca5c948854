pub mod decoder;
pub mod io;
pub mod loaders;
pub mod pipeline;
pub mod storage;

pub use decoder::{DecoderGate, DecoderHandle, DecoderState, ModelDecoder, decoder_gate};
pub use io::{AssetReader, AssetReaderVariant, FileAssetReader};
#[cfg(feature = "http")]
pub use io::HttpAssetReader;
#[cfg(feature = "gltf")]
pub use loaders::GltfDecoder;
pub use pipeline::{
    AssetPipeline, BatchState, DEFAULT_DECODER_WAIT, ModelHandle, SUPPORTED_FORMATS,
};
pub use storage::AssetStorage;
