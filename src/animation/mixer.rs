use std::sync::Arc;

use parking_lot::Mutex;

use crate::animation::action::AnimationAction;
use crate::animation::clip::AnimationClip;

/// An action handle shared between the mixer that advances it and the
/// registry entry that owns its playback state.
pub type SharedAction = Arc<Mutex<AnimationAction>>;

/// Mixer handle; one model's registry entries all reference the same
/// allocation, and dedup in the scheduler goes by pointer identity.
pub type SharedMixer = Arc<Mutex<AnimationMixer>>;

/// Time-driven evaluator for all actions bound to one model's hierarchy.
///
/// One mixer per model, not per clip: the scheduler must advance a mixer
/// at most once per tick however many registry entries reference it.
#[derive(Debug, Default)]
pub struct AnimationMixer {
    /// Name of the model root this mixer drives (diagnostics only).
    root: String,
    actions: Vec<SharedAction>,
    /// Accumulated evaluator time.
    pub time: f32,
    /// Number of `update` calls received, for asserting the
    /// once-per-tick guarantee.
    pub updates: u64,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Creates an action for `clip` and attaches it to this mixer.
    pub fn clip_action(&mut self, clip: Arc<AnimationClip>) -> SharedAction {
        let action = Arc::new(Mutex::new(AnimationAction::new(clip)));
        self.actions.push(Arc::clone(&action));
        action
    }

    #[must_use]
    pub fn actions(&self) -> &[SharedAction] {
        &self.actions
    }

    /// Advances every running action by `dt`.
    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        self.updates += 1;
        for action in &self.actions {
            action.lock().update(dt);
        }
    }

    #[must_use]
    pub fn shared(self) -> SharedMixer {
        Arc::new(Mutex::new(self))
    }
}
