//! batch editing operations over the selection

use pretty_assertions::assert_eq;

use skema::items::{Component, Item, ItemBody, ItemId, PortId};
use skema::scene::{Alignment, Distribution, Scene};
use skema::transforms::{AngleDirection, Orientation, SSPoint};

fn component_at(x: i32, y: i32) -> Item {
    Item::new(
        SSPoint::new(x, y),
        ItemBody::Component(Component::two_port("resistor", "R", 10)),
    )
}

fn scene_with(positions: &[(i32, i32)]) -> (Scene, Vec<ItemId>) {
    let mut scene = Scene::new();
    let ids = positions
        .iter()
        .map(|&(x, y)| {
            let id = scene.schematic.insert_new(component_at(x, y));
            scene.schematic.set_selected(id, true);
            id
        })
        .collect();
    (scene, ids)
}

fn pos(scene: &Scene, id: ItemId) -> SSPoint {
    scene.schematic.item(id).unwrap().pos
}

#[test]
fn align_left_moves_everything_to_the_leftmost_edge() {
    let (mut scene, ids) = scene_with(&[(0, 0), (10, 20), (30, -10)]);
    assert!(scene.align(Alignment::Left));
    // identical symbols, so aligned left edges mean equal x positions
    for &id in &ids {
        assert_eq!(pos(&scene, id).x, 0);
    }
    // y coordinates are untouched
    assert_eq!(pos(&scene, ids[1]).y, 20);
}

#[test]
fn align_requires_at_least_two_items() {
    let (mut scene, ids) = scene_with(&[(10, 0)]);
    assert!(!scene.align(Alignment::Left));
    assert_eq!(pos(&scene, ids[0]), SSPoint::new(10, 0));
    assert!(scene.undo_stack.is_empty());
}

#[test]
fn align_center_stacks_midpoints() {
    let (mut scene, ids) = scene_with(&[(0, 0), (40, 20)]);
    assert!(scene.align(Alignment::Center));
    assert_eq!(pos(&scene, ids[0]), pos(&scene, ids[1]));
}

#[test]
fn distribute_horizontal_centers_the_middle_item() {
    let (mut scene, ids) = scene_with(&[(0, 0), (10, 0), (100, 0)]);
    assert!(scene.distribute(Distribution::Horizontal));
    assert_eq!(pos(&scene, ids[0]).x, 0);
    assert_eq!(pos(&scene, ids[1]).x, 50);
    assert_eq!(pos(&scene, ids[2]).x, 100);
}

#[test]
fn distribute_requires_at_least_two_items() {
    let (mut scene, _) = scene_with(&[(0, 0)]);
    assert!(!scene.distribute(Distribution::Vertical));
}

#[test]
fn set_on_grid_is_a_noop_the_second_time() {
    let (mut scene, ids) = scene_with(&[(3, 4)]);
    scene.set_items_on_grid(&ids);
    assert_eq!(pos(&scene, ids[0]), SSPoint::new(0, 0));
    assert_eq!(scene.undo_stack.len(), 1);

    // everything already on grid: no macro is pushed at all
    scene.set_items_on_grid(&ids);
    assert_eq!(scene.undo_stack.len(), 1);
}

#[test]
fn toggle_active_twice_restores_the_original_flags() {
    let (mut scene, ids) = scene_with(&[(0, 0), (40, 0)]);
    let active = |scene: &Scene, id| {
        scene
            .schematic
            .item(id)
            .and_then(Item::component)
            .unwrap()
            .active
    };
    scene.toggle_active_status(&ids);
    assert!(!active(&scene, ids[0]));
    scene.toggle_active_status(&ids);
    assert!(active(&scene, ids[0]));
    assert!(active(&scene, ids[1]));
}

#[test]
fn rotate_sandwich_reconnects_on_undo() {
    let mut scene = Scene::new();
    // ports: a1 at (10, 0) coincides with b0 at (10, 0)
    let a = scene.schematic.insert_new(component_at(0, 0));
    let b = scene.schematic.insert_new(component_at(20, 0));
    scene.connect_items(&[a], false);
    let a1 = PortId::new(a, 1);
    let b0 = PortId::new(b, 0);
    assert!(scene.schematic.connectivity.is_connected(a1, b0));

    scene.rotate_items(&[a], AngleDirection::Clockwise);
    assert!(!scene.schematic.connectivity.is_connected(a1, b0));

    // one undo step reverses the whole disconnect-rotate-reconnect macro
    assert!(scene.undo());
    assert!(scene.schematic.connectivity.is_connected(a1, b0));
    assert_eq!(
        scene.schematic.item(a).unwrap().orientation,
        Orientation::default()
    );
}

#[test]
fn delete_and_undo_restores_items_and_connections() {
    let mut scene = Scene::new();
    let a = scene.schematic.insert_new(component_at(0, 0));
    let b = scene.schematic.insert_new(component_at(20, 0));
    scene.connect_items(&[a], false);

    scene.delete_items(&[a, b]);
    assert!(scene.schematic.is_empty());

    assert!(scene.undo());
    assert_eq!(scene.schematic.len(), 2);
    assert!(scene
        .schematic
        .connectivity
        .is_connected(PortId::new(a, 1), PortId::new(b, 0)));
}

#[test]
fn disconnecting_an_unconnected_item_records_nothing() {
    let (mut scene, ids) = scene_with(&[(0, 0)]);
    scene.disconnect_items(&ids, true);
    assert!(scene.undo_stack.is_empty());
}
