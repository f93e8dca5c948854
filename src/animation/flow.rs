use std::sync::Arc;

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::scene::material::SharedMaterial;

/// Horizontal flow speed applied to surfaces picked up by the model scan.
pub const DEFAULT_FLOW_SPEED: f32 = -0.0048;

/// Flow speeds are authored against a 60-updates-per-second cadence;
/// scaling by delta * 60 keeps the visual speed identical at any tick rate.
const REFERENCE_RATE: f32 = 60.0;

/// Flow state for one material.
#[derive(Debug, Clone, Copy)]
pub struct FlowEntry {
    pub speed_x: f32,
    /// Texture offset at first registration; never re-captured.
    pub original_offset: Vec2,
}

/// Texture-offset "flow" animation, independent of the clip scheduler.
///
/// At most one entry per material, keyed by the material allocation's
/// identity. Entries never expire on their own; teardown is explicit
/// via [`remove_flow`](Self::remove_flow) or [`clear`](Self::clear).
#[derive(Default)]
pub struct MaterialFlowController {
    flows: FxHashMap<usize, (SharedMaterial, FlowEntry)>,
}

impl MaterialFlowController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) a flow surface.
    ///
    /// The first registration captures the material's current offset as
    /// `original_offset`; later calls for the same material only update
    /// the speed.
    pub fn add_flow(&mut self, material: &SharedMaterial, speed_x: f32) {
        let key = Arc::as_ptr(material) as usize;
        if let Some((_, entry)) = self.flows.get_mut(&key) {
            entry.speed_x = speed_x;
            return;
        }

        let original_offset = material
            .lock()
            .map
            .as_ref()
            .map_or(Vec2::ZERO, |map| map.offset);
        self.flows.insert(
            key,
            (
                Arc::clone(material),
                FlowEntry {
                    speed_x,
                    original_offset,
                },
            ),
        );
    }

    /// Advances every flow surface by one tick.
    ///
    /// Materials whose texture map has not arrived yet are skipped; the
    /// offset accumulates without wraparound.
    pub fn tick(&mut self, delta: f32) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }

        for (material, entry) in self.flows.values() {
            let mut material = material.lock();
            let Some(map) = material.map.as_mut() else {
                continue;
            };
            map.offset.x += entry.speed_x * delta * REFERENCE_RATE;
            map.needs_upload = true;
        }
    }

    pub fn remove_flow(&mut self, material: &SharedMaterial) -> bool {
        self.flows.remove(&(Arc::as_ptr(material) as usize)).is_some()
    }

    pub fn clear(&mut self) {
        self.flows.clear();
    }

    #[must_use]
    pub fn get(&self, material: &SharedMaterial) -> Option<FlowEntry> {
        self.flows
            .get(&(Arc::as_ptr(material) as usize))
            .map(|(_, entry)| *entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
