use std::sync::Arc;

use crate::animation::action::LoopMode;
use crate::animation::flow::DEFAULT_FLOW_SPEED;
use crate::animation::manager::AnimationManager;
use crate::animation::mixer::AnimationMixer;
use crate::scene::model::ModelDocument;

/// Meshes whose name contains this substring are flow surfaces.
pub const FLOW_MARKER: &str = "move";

/// Registers a loaded model with the animation manager: one shared mixer
/// for all of its clips, plus a scan for flow surfaces.
///
/// Returns the registry keys assigned to the model's clips. Nothing is
/// auto-played, but registering any clip activates the shared tick loop
/// so playback starts on the very next frame after a `play`.
pub fn bind_model(document: &ModelDocument, manager: &mut AnimationManager) -> Vec<String> {
    let mut keys = Vec::with_capacity(document.clips.len());

    if !document.clips.is_empty() {
        // One mixer per model, shared by every clip's entry.
        let mixer = AnimationMixer::new(document.name.as_str()).shared();

        for (index, clip) in document.clips.iter().enumerate() {
            let action = mixer.lock().clip_action(Arc::clone(clip));
            {
                let mut action = action.lock();
                action.loop_mode = LoopMode::Loop;
                action.clamp_when_finished = true;
            }

            let name = if clip.name.is_empty() {
                format!("animation_{}_{index}", document.name)
            } else {
                clip.name.clone()
            };
            let key = manager.registry.register(&name, Arc::clone(&mixer), action);
            log::info!(
                "registered animation {key:?} for model {:?} (not auto-played)",
                document.name
            );
            keys.push(key);
        }

        // Pre-warm the tick loop even though nothing is playing yet
        manager.scheduler.set_active(true);
    }

    bind_flow_surfaces(document, manager);
    keys
}

/// Scans the model's mesh subtree for flow surfaces and registers their
/// materials with the flow controller.
fn bind_flow_surfaces(document: &ModelDocument, manager: &mut AnimationManager) {
    document.visit_meshes(|node, mesh| {
        let Some(name) = node.name.as_deref() else {
            return;
        };
        if !name.contains(FLOW_MARKER) {
            return;
        }

        for material in &mesh.materials {
            // Only materials that already expose a texture map qualify
            if material.lock().map.is_some() {
                manager.flows.add_flow(material, DEFAULT_FLOW_SPEED);
                log::info!("registered flow surface on mesh {name:?}");
            }
        }
    });
}
