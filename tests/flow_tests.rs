//! Material flow animation tests
//!
//! Tests for:
//! - Reference-rate normalized offset advancement
//! - One-shot original_offset capture per material
//! - Missing-texture skip behavior and late-arriving maps
//! - Explicit teardown via remove_flow/clear

use glam::Vec2;

use atrium::animation::flow::{DEFAULT_FLOW_SPEED, MaterialFlowController};
use atrium::{AnimationManager, Material, SharedMaterial, TextureMap};

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-6;

fn flow_material(offset: Vec2) -> SharedMaterial {
    Material::with_map(Some("belt"), offset).shared()
}

#[test]
fn tick_moves_offset_by_speed_normalized_to_60fps() {
    let mut flows = MaterialFlowController::new();
    let material = flow_material(Vec2::ZERO);

    flows.add_flow(&material, DEFAULT_FLOW_SPEED);
    flows.tick(DT);

    // speed * (1/60) * 60 == speed
    let offset = material.lock().map.unwrap().offset;
    assert!(
        (offset.x - DEFAULT_FLOW_SPEED).abs() < EPSILON,
        "expected {DEFAULT_FLOW_SPEED}, got {}",
        offset.x
    );
    assert!(offset.y.abs() < EPSILON, "vertical offset must not move");
}

#[test]
fn tick_marks_texture_for_reupload() {
    let mut flows = MaterialFlowController::new();
    let material = flow_material(Vec2::ZERO);

    flows.add_flow(&material, DEFAULT_FLOW_SPEED);
    flows.tick(DT);

    assert!(material.lock().map.unwrap().needs_upload);
}

#[test]
fn original_offset_captured_exactly_once() {
    let mut flows = MaterialFlowController::new();
    let material = flow_material(Vec2::new(0.25, 0.5));

    flows.add_flow(&material, DEFAULT_FLOW_SPEED);
    flows.tick(DT);
    flows.tick(DT);

    // Re-registering updates the speed but never re-captures the offset
    flows.add_flow(&material, 0.5);
    let entry = flows.get(&material).unwrap();
    assert_eq!(entry.original_offset, Vec2::new(0.25, 0.5));
    assert!((entry.speed_x - 0.5).abs() < EPSILON);
    assert_eq!(flows.len(), 1, "same material must not add a second entry");
}

#[test]
fn missing_map_is_skipped_until_texture_arrives() {
    let mut flows = MaterialFlowController::new();
    let material = Material::new(Some("belt")).shared();

    flows.add_flow(&material, DEFAULT_FLOW_SPEED);
    flows.tick(DT); // no map yet: silently skipped

    material.lock().map = Some(TextureMap::default());
    flows.tick(DT);

    let offset = material.lock().map.unwrap().offset;
    assert!((offset.x - DEFAULT_FLOW_SPEED).abs() < EPSILON);
}

#[test]
fn offset_accumulates_across_ticks() {
    let mut flows = MaterialFlowController::new();
    let material = flow_material(Vec2::ZERO);

    flows.add_flow(&material, DEFAULT_FLOW_SPEED);
    for _ in 0..10 {
        flows.tick(DT);
    }

    let offset = material.lock().map.unwrap().offset;
    assert!((offset.x - DEFAULT_FLOW_SPEED * 10.0).abs() < 10.0 * EPSILON);
}

#[test]
fn invalid_deltas_do_not_move_offsets() {
    let mut flows = MaterialFlowController::new();
    let material = flow_material(Vec2::ZERO);

    flows.add_flow(&material, DEFAULT_FLOW_SPEED);
    flows.tick(0.0);
    flows.tick(f32::NAN);
    flows.tick(f32::INFINITY);

    assert!(material.lock().map.unwrap().offset.x.abs() < EPSILON);
}

#[test]
fn remove_flow_and_clear_are_explicit_teardown() {
    let mut flows = MaterialFlowController::new();
    let a = flow_material(Vec2::ZERO);
    let b = flow_material(Vec2::ZERO);

    flows.add_flow(&a, DEFAULT_FLOW_SPEED);
    flows.add_flow(&b, DEFAULT_FLOW_SPEED);
    assert_eq!(flows.len(), 2);

    assert!(flows.remove_flow(&a));
    assert!(!flows.remove_flow(&a), "double remove reports absence");
    assert_eq!(flows.len(), 1);

    flows.tick(DT);
    assert!(a.lock().map.unwrap().offset.x.abs() < EPSILON);

    flows.clear();
    assert!(flows.is_empty());
}

#[test]
fn manager_ticks_flows_independent_of_clip_activity() {
    let mut manager = AnimationManager::new();
    let material = flow_material(Vec2::ZERO);
    manager.flows.add_flow(&material, DEFAULT_FLOW_SPEED);

    // No animation registered, scheduler inactive: flows still run
    assert!(!manager.scheduler.is_active());
    manager.advance(DT);

    let offset = material.lock().map.unwrap().offset;
    assert!((offset.x - DEFAULT_FLOW_SPEED).abs() < EPSILON);
}
