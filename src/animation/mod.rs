pub mod action;
pub mod binder;
pub mod clip;
pub mod flow;
pub mod manager;
pub mod mixer;
pub mod registry;
pub mod scheduler;

pub use action::{AnimationAction, LoopMode};
pub use binder::{FLOW_MARKER, bind_model};
pub use clip::AnimationClip;
pub use flow::{DEFAULT_FLOW_SPEED, FlowEntry, MaterialFlowController};
pub use manager::{AnimationManager, SharedAnimationManager};
pub use mixer::{AnimationMixer, SharedAction, SharedMixer};
pub use registry::{AnimationEntry, AnimationRegistry};
pub use scheduler::AnimationScheduler;
