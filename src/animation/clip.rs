/// A named recording of keyframe data for one animation.
///
/// Track payloads stay with the decoder that evaluates them; the manager
/// only needs the clip's identity and duration to drive playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    /// Clip name as authored; may be empty, in which case the binder
    /// generates a fallback registry key.
    pub name: String,
    /// Length in seconds.
    pub duration: f32,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}
