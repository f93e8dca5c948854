use std::sync::Arc;

use crate::animation::clip::AnimationClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    Loop,
    PingPong,
}

/// A playable instance of one clip with independent playback state.
///
/// An action is exclusively owned by one registry entry; the mixer that
/// advances it may be shared with the model's other actions.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    /// In `Once` mode, hold the final pose instead of deactivating.
    pub clamp_when_finished: bool,
    pub paused: bool,
    pub enabled: bool,

    /// Set by `play()`, cleared by `stop()`. Inert actions keep their
    /// state but are never advanced by the mixer.
    running: bool,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Loop,
            clamp_when_finished: false,
            paused: false,
            enabled: true,
            running: false,
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts (or resumes) playback.
    pub fn play(&mut self) {
        self.running = true;
        self.paused = false;
    }

    /// Stops playback and resets to the initial pose.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
        self.time = 0.0;
    }

    /// Weight after accounting for the enabled flag.
    #[must_use]
    pub fn effective_weight(&self) -> f32 {
        if self.enabled { self.weight } else { 0.0 }
    }

    /// Time scale after accounting for the paused flag.
    #[must_use]
    pub fn effective_time_scale(&self) -> f32 {
        if self.paused { 0.0 } else { self.time_scale }
    }

    /// Core logic: advance time.
    pub fn update(&mut self, dt: f32) {
        if !self.running || self.paused || !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.paused = true;
                    if !self.clamp_when_finished {
                        self.running = false;
                    }
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.paused = true;
                }
            }
            LoopMode::Loop => {
                if self.time >= duration {
                    self.time %= duration;
                } else if self.time < 0.0 {
                    // Reverse playback wraps from the end
                    self.time = duration + (self.time % duration);
                }
            }
            LoopMode::PingPong => {
                let double_duration = duration * 2.0;
                // Normalize time into [0, 2*duration), reversed in the
                // second half of the cycle
                let mut t = self.time % double_duration;
                if t < 0.0 {
                    t += double_duration;
                }
                if t > duration {
                    t = double_duration - t;
                }
                self.time = t;
            }
        }
    }
}
