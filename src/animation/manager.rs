use std::sync::Arc;

use parking_lot::Mutex;

use crate::animation::flow::MaterialFlowController;
use crate::animation::registry::AnimationRegistry;
use crate::animation::scheduler::AnimationScheduler;
use crate::utils::time::Clock;

/// Manager handle shared with the loading pipeline, which binds freshly
/// decoded models between frames.
pub type SharedAnimationManager = Arc<Mutex<AnimationManager>>;

/// Owns the shared clock and every animation subsystem for one scene
/// runtime.
///
/// Constructed at runtime start and injected into collaborators; dropped
/// at scene teardown. There is no ambient global instance.
pub struct AnimationManager {
    pub registry: AnimationRegistry,
    pub scheduler: AnimationScheduler,
    pub flows: MaterialFlowController,
    clock: Clock,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: AnimationRegistry::new(),
            scheduler: AnimationScheduler::new(),
            flows: MaterialFlowController::new(),
            clock: Clock::new(),
        }
    }

    #[must_use]
    pub fn into_shared(self) -> SharedAnimationManager {
        Arc::new(Mutex::new(self))
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Per-frame entry point: ticks the clock and advances everything by
    /// the measured delta. Runs after command processing, before render.
    pub fn update(&mut self) {
        self.clock.tick();
        let dt = self.clock.dt_seconds();
        self.advance(dt);
    }

    /// Advances clip playback and flow surfaces by an explicit delta.
    /// Zero or non-finite deltas skip the tick entirely.
    pub fn advance(&mut self, delta: f32) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        self.scheduler.update(&self.registry, delta);
        // Flow surfaces tick every frame, not gated on the activity flag
        self.flows.tick(delta);
    }

    /// Plays a registered animation and activates the shared tick loop.
    pub fn play(&mut self, key: &str) -> bool {
        if self.registry.play(key) {
            self.scheduler.set_active(true);
            true
        } else {
            false
        }
    }

    pub fn pause(&mut self, key: &str) -> bool {
        self.registry.pause(key)
    }

    pub fn stop(&mut self, key: &str) -> bool {
        self.registry.stop(key)
    }

    #[must_use]
    pub fn is_playing(&self, key: &str) -> bool {
        self.registry.is_playing(key)
    }

    /// Registered animation keys in registration order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.registry.keys().map(str::to_owned).collect()
    }
}
