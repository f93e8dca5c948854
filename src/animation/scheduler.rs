use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::animation::mixer::SharedMixer;
use crate::animation::registry::AnimationRegistry;

/// Minimum interval between "active but nothing runnable" warnings.
const IDLE_WARN_INTERVAL: f32 = 5.0;

/// Per-tick update loop over the registry, gated by a global activity
/// flag and deduplicated by mixer identity.
///
/// Deduplication exists because one model's clips share a single mixer:
/// naive per-entry updates would advance that mixer's time once per
/// entry in a single tick.
pub struct AnimationScheduler {
    active: bool,
    idle_warn_elapsed: f32,
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: false,
            // First idle warning fires immediately, later ones are throttled
            idle_warn_elapsed: IDLE_WARN_INTERVAL,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Runs one tick. A no-op unless the activity flag is set; skips the
    /// whole tick on a zero or non-finite delta.
    pub fn update(&mut self, registry: &AnimationRegistry, delta: f32) {
        if !self.active {
            return;
        }
        if delta == 0.0 || !delta.is_finite() {
            return;
        }

        // Entry-level filter, then dedup by mixer identity.
        let mut seen = FxHashSet::default();
        let mut mixers: Vec<&SharedMixer> = Vec::new();
        for (key, entry) in registry.iter() {
            if !entry.playing {
                continue;
            }
            {
                let action = entry.action.lock();
                if action.paused || !action.enabled {
                    continue;
                }
                if action.effective_weight() <= 0.0 || action.effective_time_scale() == 0.0 {
                    log::debug!("animation {key:?} has zero effective weight or time scale");
                    continue;
                }
            }
            if seen.insert(Arc::as_ptr(&entry.mixer) as usize) {
                mixers.push(&entry.mixer);
            }
        }

        if mixers.is_empty() {
            if !registry.is_empty() {
                self.idle_warn_elapsed += delta;
                if self.idle_warn_elapsed >= IDLE_WARN_INTERVAL {
                    log::warn!("animation loop is active but no entry is runnable");
                    self.idle_warn_elapsed = 0.0;
                }
            }
            return;
        }
        self.idle_warn_elapsed = IDLE_WARN_INTERVAL;

        // Exactly one update per distinct mixer; cross-mixer order is
        // unspecified.
        for mixer in mixers {
            mixer.lock().update(delta);
        }
    }
}
