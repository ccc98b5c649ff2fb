//! copy, cut and paste through the scene

use skema::clipboard::ClipboardError;
use skema::event::{MouseButton, MouseEvent};
use skema::items::{Component, Item, ItemBody, Wire};
use skema::scene::{MouseAction, Scene};
use skema::transforms::{SSPoint, VSPoint};

fn populated_scene() -> Scene {
    let mut scene = Scene::new();
    let mut resistor = Item::new(
        SSPoint::new(0, 0),
        ItemBody::Component(Component::two_port("resistor", "R", 10)),
    );
    resistor.component_mut().unwrap().label = "R1".to_owned();
    let a = scene.schematic.insert_new(resistor);
    let b = scene.schematic.insert_new(Item::new(
        SSPoint::new(10, 0),
        ItemBody::Wire(Wire::from_points(&[
            SSPoint::new(0, 0),
            SSPoint::new(30, 0),
        ])),
    ));
    scene.schematic.set_selected(a, true);
    scene.schematic.set_selected(b, true);
    scene
}

#[test]
fn copy_paste_stamp_recreates_the_items() {
    let source = populated_scene();
    let xml = source.copy_selection().unwrap();

    let mut target = Scene::new();
    target.paste(&xml).unwrap();
    assert!(matches!(
        target.mouse_action(),
        MouseAction::InsertingItems(_)
    ));
    assert_eq!(target.insertibles().len(), 2);
    assert!(target.schematic.is_empty());

    // position the floating set, then stamp it with a left click
    target.mouse_event(&MouseEvent::moved(VSPoint::new(100.0, 100.0)));
    target.mouse_event(&MouseEvent::press(
        MouseButton::Left,
        VSPoint::new(100.0, 100.0),
    ));
    assert_eq!(target.schematic.len(), 2);
    assert_eq!(
        target
            .schematic
            .iter()
            .filter(|(_, item)| item.is_wire())
            .count(),
        1
    );
    // the insertibles stay armed for repeated stamping
    assert_eq!(target.insertibles().len(), 2);
}

#[test]
fn copy_with_nothing_selected_yields_nothing() {
    let scene = Scene::new();
    assert!(scene.copy_selection().is_none());
}

#[test]
fn cut_removes_the_selection() {
    let mut scene = populated_scene();
    let xml = scene.cut_selection().unwrap();
    assert!(scene.schematic.is_empty());
    assert!(xml.contains("resistor"));

    // the cut is a single undoable step
    assert!(scene.undo());
    assert_eq!(scene.schematic.len(), 2);
}

#[test]
fn paste_rejects_a_version_mismatch() {
    let source = populated_scene();
    let xml = source
        .copy_selection()
        .unwrap()
        .replace(env!("CARGO_PKG_VERSION"), "99.99.99");

    let mut target = Scene::new();
    let err = target.paste(&xml).unwrap_err();
    assert!(matches!(err, ClipboardError::VersionMismatch { .. }));
    // the failed paste left the scene untouched
    assert!(target.schematic.is_empty());
    assert!(matches!(target.mouse_action(), MouseAction::Normal(_)));
}

#[test]
fn paste_rejects_garbage() {
    let mut target = Scene::new();
    assert!(matches!(
        target.paste("<wrong-root/>"),
        Err(ClipboardError::MissingRoot)
    ));
    assert!(matches!(
        target.paste("not xml at all"),
        Err(ClipboardError::Parse(_))
    ));
}
