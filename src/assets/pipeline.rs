use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::new_key_type;
use tokio::runtime::Runtime;

use crate::animation::binder;
use crate::animation::manager::SharedAnimationManager;
use crate::assets::decoder::{DecoderGate, ModelDecoder};
use crate::assets::io::AssetReaderVariant;
use crate::assets::storage::AssetStorage;
use crate::config::ModelDescriptor;
use crate::errors::{AtriumError, Result};
use crate::scene::model::ModelDocument;

fn asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create asset loader runtime"))
}

new_key_type! {
    pub struct ModelHandle;
}

/// The closed set of recognized binary scene formats. Descriptors with
/// any other `type` tag are skipped, not rejected.
pub const SUPPORTED_FORMATS: &[&str] = &[".glb", ".gltf"];

/// Default bound on the decoder-readiness wait before a batch proceeds
/// degraded.
pub const DEFAULT_DECODER_WAIT: Duration = Duration::from_secs(10);

/// Lifecycle of the most recent batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

type ProgressFn = dyn Fn(f32) + Send + Sync;

/// Batch model loader.
///
/// Fans out one fetch-and-decode operation per accepted descriptor and
/// fans back in with all-or-nothing completion: a single failure fails
/// the whole batch. Each successful item is bound into the shared
/// animation manager and reported through the caller's per-item callback
/// before the batch completes.
pub struct AssetPipeline {
    decoder: Arc<dyn ModelDecoder>,
    gate: DecoderGate,
    animation: SharedAnimationManager,
    /// Parsed documents, addressable by handle or by model name.
    pub models: Arc<AssetStorage<ModelHandle, ModelDocument>>,
    state: Mutex<BatchState>,
    progress: Mutex<Option<Arc<ProgressFn>>>,
    decoder_wait: Duration,
}

impl AssetPipeline {
    #[must_use]
    pub fn new(
        decoder: Arc<dyn ModelDecoder>,
        gate: DecoderGate,
        animation: SharedAnimationManager,
    ) -> Self {
        Self {
            decoder,
            gate,
            animation,
            models: Arc::new(AssetStorage::new()),
            state: Mutex::new(BatchState::Idle),
            progress: Mutex::new(None),
            decoder_wait: DEFAULT_DECODER_WAIT,
        }
    }

    /// Overrides the decoder-readiness wait bound.
    #[must_use]
    pub fn with_decoder_wait(mut self, wait: Duration) -> Self {
        self.decoder_wait = wait;
        self
    }

    /// Installs the percentage listener (0-100, monotonic per batch) fed
    /// to the loading UI.
    pub fn set_progress_listener(&self, listener: impl Fn(f32) + Send + Sync + 'static) {
        *self.progress.lock() = Some(Arc::new(listener));
    }

    #[must_use]
    pub fn batch_state(&self) -> BatchState {
        *self.state.lock()
    }

    #[must_use]
    pub fn is_supported(descriptor: &ModelDescriptor) -> bool {
        SUPPORTED_FORMATS.contains(&descriptor.format.as_str())
    }

    /// Loads a batch of models.
    ///
    /// `on_item` runs once per accepted descriptor as its model finishes
    /// decoding and binding. Resolves `Ok(())` only after every accepted
    /// descriptor succeeded; any failure rejects the batch as a whole.
    pub async fn load_models<F>(&self, descriptors: &[ModelDescriptor], on_item: F) -> Result<()>
    where
        F: FnMut(ModelHandle, Arc<ModelDocument>, &str) + Send,
    {
        self.set_state(BatchState::Loading);

        // Best-effort: a decoder that never comes up degrades the batch,
        // it does not fail it.
        if let Err(err) = self.gate.wait_ready(self.decoder_wait).await {
            log::warn!("decoder readiness not confirmed, loading anyway: {err}");
        }

        let accepted: Vec<&ModelDescriptor> = descriptors
            .iter()
            .filter(|descriptor| {
                let supported = Self::is_supported(descriptor);
                if !supported {
                    log::debug!(
                        "skipping model {:?}: unsupported format {:?}",
                        descriptor.name,
                        descriptor.format
                    );
                }
                supported
            })
            .collect();

        let total = accepted.len();
        let last_pct = Mutex::new(0.0_f32);
        self.emit_progress(0.0, &last_pct);

        if total == 0 {
            self.emit_progress(100.0, &last_pct);
            self.set_state(BatchState::Loaded);
            return Ok(());
        }

        let completed = AtomicUsize::new(0);
        let on_item = Mutex::new(on_item);

        let operations: Vec<_> = accepted
            .iter()
            .map(|descriptor| {
                let descriptor: &ModelDescriptor = *descriptor;
                let completed = &completed;
                let last_pct = &last_pct;
                let on_item = &on_item;
                async move {
                    let bytes = Self::fetch(&descriptor.path).await?;
                    let document = self.decode(descriptor, bytes).await?;

                    let (handle, stored) = self.models.add_named(&descriptor.name, document);
                    binder::bind_model(&stored, &mut self.animation.lock());

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    self.emit_progress((done as f32 / total as f32) * 100.0, last_pct);

                    {
                        let mut on_item = on_item.lock();
                        (*on_item)(handle, Arc::clone(&stored), &descriptor.name);
                    }
                    log::info!("model {:?} loaded ({done}/{total})", descriptor.name);
                    Ok::<(), AtriumError>(())
                }
            })
            .collect();

        match futures::future::try_join_all(operations).await {
            Ok(_) => {
                self.set_state(BatchState::Loaded);
                Ok(())
            }
            Err(err) => {
                self.set_state(BatchState::Failed);
                log::warn!("model batch failed: {err}");
                Err(err)
            }
        }
    }

    /// Blocking wrapper over [`load_models`](Self::load_models) on a
    /// shared loader runtime.
    pub fn load_models_blocking<F>(&self, descriptors: &[ModelDescriptor], on_item: F) -> Result<()>
    where
        F: FnMut(ModelHandle, Arc<ModelDocument>, &str) + Send,
    {
        asset_runtime().block_on(self.load_models(descriptors, on_item))
    }

    async fn fetch(path: &str) -> Result<Vec<u8>> {
        let reader = AssetReaderVariant::from_source(path)?;
        let filename = AssetReaderVariant::source_filename(path);
        reader.read_bytes(filename).await
    }

    /// Decoding is CPU-bound; offload it to the blocking pool.
    async fn decode(&self, descriptor: &ModelDescriptor, bytes: Vec<u8>) -> Result<ModelDocument> {
        let decoder = Arc::clone(&self.decoder);
        let name = descriptor.name.clone();
        tokio::task::spawn_blocking(move || decoder.decode(&name, &bytes)).await?
    }

    fn set_state(&self, state: BatchState) {
        *self.state.lock() = state;
    }

    fn emit_progress(&self, pct: f32, last_pct: &Mutex<f32>) {
        let pct = pct.clamp(0.0, 100.0);
        // Clone the listener out first: the callback must never run
        // under the listener slot's lock, or a listener that swaps
        // itself out would deadlock.
        let listener = self.progress.lock().clone();
        let mut last = last_pct.lock();
        if pct < *last {
            return;
        }
        *last = pct;
        if let Some(listener) = listener {
            listener(pct);
        }
    }
}
