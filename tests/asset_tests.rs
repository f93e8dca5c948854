//! Asset pipeline tests
//!
//! Tests for:
//! - AssetStorage: add, get, named dedup
//! - DecoderGate: one-shot readiness, failure, bounded waits
//! - AssetPipeline: format filtering, fan-out/fan-in completion,
//!   all-or-nothing batch failure, monotonic progress, binding on load

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use glam::Vec2;
use parking_lot::Mutex;
use slotmap::new_key_type;

use atrium::animation::clip::AnimationClip;
use atrium::assets::decoder::{DecoderGate, ModelDecoder, decoder_gate};
use atrium::assets::storage::AssetStorage;
use atrium::{
    AnimationManager, AssetPipeline, AtriumError, BatchState, Material, Mesh, ModelDescriptor,
    ModelDocument, ModelNode, SharedAnimationManager,
};

new_key_type! { struct TestHandle; }

/// Capture log output per test (`RUST_LOG=debug` to see diagnostics).
fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// AssetStorage
// ============================================================================

#[test]
fn storage_add_and_get() {
    let storage = AssetStorage::<TestHandle, String>::new();
    let handle = storage.add("hello".to_owned());
    let value = storage.get(handle).unwrap();
    assert_eq!(&**value, "hello");
}

#[test]
fn storage_named_dedup_keeps_first() {
    let storage = AssetStorage::<TestHandle, String>::new();

    let (h1, v1) = storage.add_named("pump", "first".to_owned());
    let (h2, v2) = storage.add_named("pump", "second".to_owned());

    assert_eq!(h1, h2, "same name must return the same handle");
    assert_eq!(&**v1, "first");
    assert_eq!(&**v2, "first", "value must not be overwritten");
    assert_eq!(storage.len(), 1);
}

#[test]
fn storage_lookup_by_name() {
    let storage = AssetStorage::<TestHandle, i32>::new();
    let (handle, _) = storage.add_named("crane", 7);

    assert_eq!(storage.get_handle("crane"), Some(handle));
    assert_eq!(*storage.get_by_name("crane").unwrap(), 7);
    assert!(storage.get_by_name("missing").is_none());
    assert!(storage.get_handle("missing").is_none());
}

// ============================================================================
// DecoderGate
// ============================================================================

#[tokio::test]
async fn gate_resolves_when_marked_ready() {
    let (handle, gate) = decoder_gate();

    let waiter = tokio::spawn({
        let gate = gate.clone();
        async move { gate.wait_ready(Duration::from_secs(1)).await }
    });
    handle.mark_ready();

    assert!(waiter.await.unwrap().is_ok());
}

#[tokio::test]
async fn gate_reports_producer_failure() {
    let (handle, gate) = decoder_gate();
    handle.mark_failed("wasm init failed");

    let err = gate.wait_ready(Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, AtriumError::DecoderUnavailable(_)));
}

#[tokio::test]
async fn gate_wait_is_bounded() {
    let (_handle, gate) = decoder_gate();

    let err = gate
        .wait_ready(Duration::from_millis(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AtriumError::DecoderUnavailable(_)));
}

#[tokio::test]
async fn open_gate_resolves_immediately() {
    let gate = DecoderGate::open();
    assert!(gate.wait_ready(Duration::from_millis(10)).await.is_ok());
}

// ============================================================================
// AssetPipeline
// ============================================================================

/// Decoder stub: any payload starting with "bad" is corrupt; everything
/// else becomes a one-clip document with one flow surface.
struct StubDecoder;

impl ModelDecoder for StubDecoder {
    fn decode(&self, name: &str, bytes: &[u8]) -> atrium::Result<ModelDocument> {
        if bytes.starts_with(b"bad") {
            return Err(AtriumError::Decode(format!("{name}: corrupt payload")));
        }

        let mut doc = ModelDocument::new(name);
        doc.clips.push(Arc::new(AnimationClip::new("spin", 2.0)));
        doc.nodes.push(ModelNode {
            name: Some("conveyor_move".to_owned()),
            children: Vec::new(),
            mesh: Some(Mesh {
                materials: vec![Material::with_map(Some("belt"), Vec2::ZERO).shared()],
            }),
        });
        doc.roots.push(0);
        Ok(doc)
    }
}

fn temp_model_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("atrium_pipeline_{}_{tag}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_model(dir: &Path, file: &str, contents: &[u8]) -> String {
    let path = dir.join(file);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn pipeline() -> (AssetPipeline, SharedAnimationManager) {
    let manager = AnimationManager::new().into_shared();
    let pipeline = AssetPipeline::new(
        Arc::new(StubDecoder),
        DecoderGate::open(),
        Arc::clone(&manager),
    );
    (pipeline, manager)
}

#[tokio::test]
async fn unsupported_formats_are_filtered_not_failed() {
    init_logs();
    let dir = temp_model_dir("filter");
    let glb = write_model(&dir, "pump.glb", b"stub");

    let descriptors = vec![
        ModelDescriptor::new("pump", glb, ".glb"),
        ModelDescriptor::new("legacy", "does/not/matter.fbx", ".fbx"),
    ];

    let (pipeline, _manager) = pipeline();
    let items = AtomicUsize::new(0);
    let result = pipeline
        .load_models(&descriptors, |_, _, name| {
            assert_eq!(name, "pump");
            items.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(items.load(Ordering::SeqCst), 1);
    assert_eq!(pipeline.batch_state(), BatchState::Loaded);
}

#[tokio::test]
async fn empty_batch_completes_immediately() {
    let descriptors = vec![ModelDescriptor::new("legacy", "scene.obj", ".obj")];

    let (pipeline, _manager) = pipeline();
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        pipeline.set_progress_listener(move |pct| seen.lock().push(pct));
    }

    let items = AtomicUsize::new(0);
    let result = pipeline
        .load_models(&descriptors, |_, _, _| {
            items.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(items.load(Ordering::SeqCst), 0);
    assert_eq!(pipeline.batch_state(), BatchState::Loaded);
    assert_eq!(seen.lock().last().copied(), Some(100.0));
}

#[tokio::test]
async fn batch_failure_is_atomic() {
    init_logs();
    let dir = temp_model_dir("atomic");
    let a = write_model(&dir, "a.glb", b"stub");
    let b = write_model(&dir, "b.glb", b"stub");

    let descriptors = vec![
        ModelDescriptor::new("a", a, ".glb"),
        ModelDescriptor::new("missing", dir.join("missing.glb").to_string_lossy(), ".glb"),
        ModelDescriptor::new("b", b, ".glb"),
    ];

    let (pipeline, _manager) = pipeline();
    let result = pipeline.load_models(&descriptors, |_, _, _| {}).await;

    assert!(result.is_err());
    assert_eq!(pipeline.batch_state(), BatchState::Failed);
}

#[tokio::test]
async fn decode_failure_fails_the_batch() {
    let dir = temp_model_dir("decode");
    let good = write_model(&dir, "good.glb", b"stub");
    let corrupt = write_model(&dir, "corrupt.glb", b"bad-bytes");

    let descriptors = vec![
        ModelDescriptor::new("good", good, ".glb"),
        ModelDescriptor::new("corrupt", corrupt, ".glb"),
    ];

    let (pipeline, _manager) = pipeline();
    let result = pipeline.load_models(&descriptors, |_, _, _| {}).await;

    assert!(matches!(result, Err(AtriumError::Decode(_))));
    assert_eq!(pipeline.batch_state(), BatchState::Failed);
}

#[tokio::test]
async fn progress_is_monotonic_from_zero_to_hundred() {
    let dir = temp_model_dir("progress");
    let descriptors: Vec<ModelDescriptor> = (0..3)
        .map(|i| {
            let path = write_model(&dir, &format!("m{i}.glb"), b"stub");
            ModelDescriptor::new(format!("m{i}"), path, ".glb")
        })
        .collect();

    let (pipeline, _manager) = pipeline();
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        pipeline.set_progress_listener(move |pct| seen.lock().push(pct));
    }

    pipeline.load_models(&descriptors, |_, _, _| {}).await.unwrap();

    let seen = seen.lock();
    assert_eq!(seen.first().copied(), Some(0.0));
    assert_eq!(seen.last().copied(), Some(100.0));
    assert!(
        seen.windows(2).all(|w| w[0] <= w[1]),
        "progress regressed: {seen:?}"
    );
}

#[tokio::test]
async fn unresolved_gate_degrades_to_warning_but_loads() {
    init_logs();
    let dir = temp_model_dir("gate");
    let glb = write_model(&dir, "pump.glb", b"stub");
    let descriptors = vec![ModelDescriptor::new("pump", glb, ".glb")];

    let manager = AnimationManager::new().into_shared();
    let (_handle, gate) = decoder_gate(); // never resolved
    let pipeline = AssetPipeline::new(Arc::new(StubDecoder), gate, Arc::clone(&manager))
        .with_decoder_wait(Duration::from_millis(20));

    let result = pipeline.load_models(&descriptors, |_, _, _| {}).await;
    assert!(result.is_ok(), "decoder wait must degrade, not fail");
}

#[tokio::test]
async fn successful_load_binds_clips_and_flows() {
    let dir = temp_model_dir("bind");
    let glb = write_model(&dir, "pump.glb", b"stub");
    let descriptors = vec![ModelDescriptor::new("pump", glb, ".glb")];

    let (pipeline, manager) = pipeline();
    pipeline.load_models(&descriptors, |_, _, _| {}).await.unwrap();

    let manager = manager.lock();
    assert_eq!(manager.keys(), vec!["spin"]);
    assert!(!manager.is_playing("spin"), "loading must not auto-play");
    assert!(manager.scheduler.is_active(), "registration pre-warms loop");
    assert_eq!(manager.flows.len(), 1);
}

#[tokio::test]
async fn listener_may_reenter_the_pipeline() {
    let dir = temp_model_dir("reenter");
    let glb = write_model(&dir, "pump.glb", b"stub");
    let descriptors = vec![ModelDescriptor::new("pump", glb, ".glb")];

    let (pipeline, _manager) = pipeline();
    let pipeline = Arc::new(pipeline);
    let swapped = Arc::new(AtomicUsize::new(0));
    {
        let p = Arc::clone(&pipeline);
        let swapped = Arc::clone(&swapped);
        // A listener that replaces itself mid-batch must not deadlock
        pipeline.set_progress_listener(move |pct| {
            if pct >= 100.0 {
                swapped.fetch_add(1, Ordering::SeqCst);
                p.set_progress_listener(|_| {});
            }
        });
    }

    pipeline.load_models(&descriptors, |_, _, _| {}).await.unwrap();

    assert_eq!(pipeline.batch_state(), BatchState::Loaded);
    assert_eq!(swapped.load(Ordering::SeqCst), 1);
}

#[cfg(feature = "http")]
#[test]
fn http_reader_reachable_from_assets() {
    use atrium::assets::HttpAssetReader;

    let reader = HttpAssetReader::new("http://example.com/models/scene.glb").unwrap();
    assert_eq!(reader.root_url().as_str(), "http://example.com/models/");
}

#[tokio::test]
async fn loaded_models_addressable_by_name_and_handle() {
    let dir = temp_model_dir("storage");
    let glb = write_model(&dir, "pump.glb", b"stub");
    let descriptors = vec![ModelDescriptor::new("pump", glb, ".glb")];

    let (pipeline, _manager) = pipeline();
    let delivered = Mutex::new(None);
    pipeline
        .load_models(&descriptors, |handle, doc, _| {
            *delivered.lock() = Some((handle, doc));
        })
        .await
        .unwrap();

    let (handle, doc) = delivered.into_inner().unwrap();
    assert_eq!(doc.name, "pump");
    assert!(Arc::ptr_eq(&pipeline.models.get(handle).unwrap(), &doc));
    assert!(Arc::ptr_eq(
        &pipeline.models.get_by_name("pump").unwrap(),
        &doc
    ));
}

#[test]
fn blocking_wrapper_loads_on_shared_runtime() {
    let dir = temp_model_dir("blocking");
    let glb = write_model(&dir, "pump.glb", b"stub");
    let descriptors = vec![ModelDescriptor::new("pump", glb, ".glb")];

    let (pipeline, manager) = pipeline();
    let items = AtomicUsize::new(0);
    pipeline
        .load_models_blocking(&descriptors, |_, _, _| {
            items.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert_eq!(items.load(Ordering::SeqCst), 1);
    assert_eq!(manager.lock().keys(), vec!["spin"]);
}

// ============================================================================
// Manifest parsing
// ============================================================================

#[test]
fn manifest_parses_descriptor_tables() {
    let json = r#"{
        "models": [
            { "name": "A001B001", "path": "inDoor/A001B001/F01.glb", "type": ".glb" },
            { "name": "outDoor", "path": "outDoor/scene.gltf", "type": ".gltf" }
        ]
    }"#;

    let manifest = atrium::ModelManifest::from_json(json).unwrap();
    assert_eq!(manifest.models.len(), 2);
    assert_eq!(manifest.models[0].name, "A001B001");
    assert_eq!(manifest.models[1].format, ".gltf");
}

#[test]
fn manifest_rejects_malformed_json() {
    assert!(matches!(
        atrium::ModelManifest::from_json("{ not json"),
        Err(AtriumError::Json(_))
    ));
}
