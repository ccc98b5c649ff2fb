//! undo stack behavior through scene-level operations

use skema::items::{Component, Item, ItemBody, ItemId};
use skema::scene::Scene;
use skema::transforms::{AngleDirection, Axis, Orientation, SSPoint};

fn component_at(x: i32, y: i32) -> Item {
    Item::new(
        SSPoint::new(x, y),
        ItemBody::Component(Component::two_port("resistor", "R", 10)),
    )
}

fn orientation(scene: &Scene, id: ItemId) -> Orientation {
    scene.schematic.item(id).unwrap().orientation
}

#[test]
fn undo_then_redo_restores_the_exact_state() {
    let mut scene = Scene::new();
    let id = scene.schematic.insert_new(component_at(0, 0));
    scene.rotate_items(&[id], AngleDirection::Clockwise);
    scene.mirror_items(&[id], Axis::Y);
    let after = orientation(&scene, id);

    assert!(scene.undo());
    assert!(scene.undo());
    assert_eq!(orientation(&scene, id), Orientation::default());

    assert!(scene.redo());
    assert!(scene.redo());
    assert_eq!(orientation(&scene, id), after);
    assert!(!scene.redo());
}

#[test]
fn a_new_operation_truncates_the_redo_future() {
    let mut scene = Scene::new();
    let id = scene.schematic.insert_new(component_at(0, 0));
    scene.rotate_items(&[id], AngleDirection::Clockwise);
    scene.rotate_items(&[id], AngleDirection::Clockwise);
    assert!(scene.undo());

    scene.mirror_items(&[id], Axis::X);
    assert!(!scene.redo());
    assert_eq!(scene.undo_stack.len(), 2);
}

#[test]
fn modified_flag_follows_the_clean_state() {
    let mut scene = Scene::new();
    let id = scene.schematic.insert_new(component_at(0, 0));
    assert!(!scene.is_modified());

    scene.rotate_items(&[id], AngleDirection::Clockwise);
    assert!(scene.is_modified());

    assert!(scene.undo());
    assert!(!scene.is_modified());

    assert!(scene.redo());
    scene.mark_saved();
    assert!(!scene.is_modified());

    assert!(scene.undo());
    assert!(scene.is_modified());
}

#[test]
fn deleting_several_items_is_one_undo_step() {
    let mut scene = Scene::new();
    let a = scene.schematic.insert_new(component_at(0, 0));
    let b = scene.schematic.insert_new(component_at(40, 0));
    let c = scene.schematic.insert_new(component_at(80, 0));
    scene.delete_items(&[a, b, c]);
    assert!(scene.schematic.is_empty());
    assert_eq!(scene.undo_stack.len(), 1);

    assert!(scene.undo());
    assert_eq!(scene.schematic.len(), 3);
    assert!(scene.schematic.item(b).is_some());
}
