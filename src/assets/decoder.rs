//! The external-decoder seam.
//!
//! Compressed scene formats need a binary decoder that initializes
//! asynchronously. The loading pipeline never polls for it: the producer
//! resolves a [`DecoderGate`] exactly once, and every batch awaits that
//! single signal with a bounded wait.

use std::time::Duration;

use tokio::sync::watch;

use crate::errors::{AtriumError, Result};
use crate::scene::model::ModelDocument;

/// Parses one model's raw bytes into the document shape the animation
/// manager consumes.
pub trait ModelDecoder: Send + Sync {
    fn decode(&self, name: &str, bytes: &[u8]) -> Result<ModelDocument>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderState {
    Initializing,
    Ready,
    Failed(String),
}

/// Producer side: resolved exactly once.
pub struct DecoderHandle {
    tx: watch::Sender<DecoderState>,
}

/// Consumer side: cheap to clone, awaited per batch.
#[derive(Clone)]
pub struct DecoderGate {
    rx: watch::Receiver<DecoderState>,
}

/// Creates a readiness gate pair.
#[must_use]
pub fn decoder_gate() -> (DecoderHandle, DecoderGate) {
    let (tx, rx) = watch::channel(DecoderState::Initializing);
    (DecoderHandle { tx }, DecoderGate { rx })
}

impl DecoderHandle {
    pub fn mark_ready(&self) {
        let _ = self.tx.send(DecoderState::Ready);
    }

    pub fn mark_failed(&self, reason: impl Into<String>) {
        let _ = self.tx.send(DecoderState::Failed(reason.into()));
    }
}

impl DecoderGate {
    /// A gate that is already open, for decoders without an async
    /// initialization phase.
    #[must_use]
    pub fn open() -> Self {
        let (handle, gate) = decoder_gate();
        handle.mark_ready();
        gate
    }

    #[must_use]
    pub fn state(&self) -> DecoderState {
        self.rx.borrow().clone()
    }

    /// Waits until the producer signals readiness, at most `timeout`.
    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let mut rx = self.rx.clone();
        let wait = rx.wait_for(|state| *state != DecoderState::Initializing);
        match tokio::time::timeout(timeout, wait).await {
            Ok(Ok(state)) => match &*state {
                DecoderState::Ready => Ok(()),
                DecoderState::Failed(reason) => {
                    Err(AtriumError::DecoderUnavailable(reason.clone()))
                }
                DecoderState::Initializing => Err(AtriumError::DecoderUnavailable(
                    "still initializing".to_owned(),
                )),
            },
            Ok(Err(_)) => Err(AtriumError::DecoderUnavailable(
                "producer dropped before signalling readiness".to_owned(),
            )),
            Err(_) => Err(AtriumError::DecoderUnavailable(format!(
                "readiness wait timed out after {timeout:?}"
            ))),
        }
    }
}
