use rustc_hash::FxHashMap;

use crate::animation::mixer::{SharedAction, SharedMixer};

/// One named animation.
///
/// The action is exclusively owned by this entry; the mixer may be shared
/// with the same model's other entries.
pub struct AnimationEntry {
    pub mixer: SharedMixer,
    pub action: SharedAction,
    pub playing: bool,
}

/// Named animation entries with unique keys.
///
/// Keys are handed out by [`register`](AnimationRegistry::register) and
/// stay valid for the registry's lifetime; there is no removal path.
/// Playback operations on unknown keys are logged no-ops.
#[derive(Default)]
pub struct AnimationRegistry {
    entries: FxHashMap<String, AnimationEntry>,
    /// Keys in registration order.
    order: Vec<String>,
}

impl AnimationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new entry under `name`, suffixing `_1`, `_2`, ... until
    /// the key is free. Returns the key actually used. The entry starts
    /// registered but not playing.
    pub fn register(&mut self, name: &str, mixer: SharedMixer, action: SharedAction) -> String {
        let mut key = name.to_owned();
        let mut counter = 1;
        while self.entries.contains_key(&key) {
            key = format!("{name}_{counter}");
            counter += 1;
        }

        self.entries.insert(
            key.clone(),
            AnimationEntry {
                mixer,
                action,
                playing: false,
            },
        );
        self.order.push(key.clone());
        key
    }

    /// Starts (or resumes) the entry, fully re-enabling its action.
    /// Returns whether the key was known; the caller is expected to
    /// activate the shared tick loop on success.
    pub fn play(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            log::warn!(
                "animation {key:?} is not registered; known animations: {:?}",
                self.order
            );
            return false;
        };

        {
            let mut action = entry.action.lock();
            action.enabled = true;
            action.weight = 1.0;
            action.time_scale = 1.0;
            action.play();
        }
        entry.playing = true;
        true
    }

    /// Pauses the entry in place; does not disable or reset the action.
    pub fn pause(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            log::warn!("animation {key:?} is not registered");
            return false;
        };

        entry.action.lock().paused = true;
        entry.playing = false;
        true
    }

    /// Stops the entry and resets its action to the initial pose.
    pub fn stop(&mut self, key: &str) -> bool {
        let Some(entry) = self.entries.get_mut(key) else {
            log::warn!("animation {key:?} is not registered");
            return false;
        };

        entry.action.lock().stop();
        entry.playing = false;
        true
    }

    #[must_use]
    pub fn is_playing(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) => entry.playing,
            None => {
                log::debug!("animation {key:?} is not registered");
                false
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AnimationEntry> {
        self.entries.get(key)
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnimationEntry)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|entry| (key.as_str(), entry)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
