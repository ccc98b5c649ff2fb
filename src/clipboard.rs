//! XML clipboard exchange format
//!
//! Copy serializes the selected items into a small self-contained XML
//! document with a versioned root; paste parses it back. The format is an
//! exchange format between running instances, not the document file format,
//! so a strict version match is required.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::{Document, Node};
use smallvec::SmallVec;
use thiserror::Error;

use crate::items::{
    Component, Item, ItemBody, Painting, PaintingKind, Port, Wire, WireLine,
};
use crate::transforms::{Orientation, SSBox, SSPoint};

/// version stamped into the root element; paste rejects anything else
pub const CLIPBOARD_VERSION: &str = env!("CARGO_PKG_VERSION");

const ROOT: &str = "skema";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard XML is not well formed: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("clipboard XML has no <skema> root")]
    MissingRoot,
    #[error("clipboard version {found} does not match {expected}")]
    VersionMismatch { found: String, expected: String },
    #[error("malformed <{0}> element")]
    Malformed(&'static str),
    #[error("failed to serialize clipboard XML: {0}")]
    Serialize(String),
}

pub fn write_items(items: &[&Item]) -> Result<String, ClipboardError> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut root = BytesStart::new(ROOT);
    root.push_attribute(("version", CLIPBOARD_VERSION));
    emit(&mut w, Event::Start(root))?;
    for item in items {
        write_item(&mut w, item)?;
    }
    emit(&mut w, Event::End(BytesEnd::new(ROOT)))?;
    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

pub fn read_items(xml: &str) -> Result<Vec<Item>, ClipboardError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT {
        return Err(ClipboardError::MissingRoot);
    }
    let found = root.attribute("version").unwrap_or_default();
    if found != CLIPBOARD_VERSION {
        return Err(ClipboardError::VersionMismatch {
            found: found.to_owned(),
            expected: CLIPBOARD_VERSION.to_owned(),
        });
    }
    let mut items = Vec::new();
    for node in root.children().filter(Node::is_element) {
        match node.tag_name().name() {
            "component" => items.push(read_component(node)?),
            "wire" => items.push(read_wire(node)?),
            "painting" => items.push(read_painting(node)?),
            // unknown elements are skipped, not rejected
            _ => {}
        }
    }
    Ok(items)
}

fn emit<W: std::io::Write>(w: &mut Writer<W>, event: Event) -> Result<(), ClipboardError> {
    w.write_event(event)
        .map_err(|e| ClipboardError::Serialize(e.to_string()))
}

fn write_item<W: std::io::Write>(w: &mut Writer<W>, item: &Item) -> Result<(), ClipboardError> {
    match &item.body {
        ItemBody::Component(c) => {
            let mut el = BytesStart::new("component");
            push_placement(&mut el, item);
            el.push_attribute(("name", c.name.as_str()));
            el.push_attribute(("prefix", c.label_prefix.as_str()));
            el.push_attribute(("label", c.label.as_str()));
            el.push_attribute(("active", bool_str(c.active)));
            push_box(&mut el, &c.bounds);
            emit(w, Event::Start(el))?;
            for port in &c.ports {
                let mut pe = BytesStart::new("port");
                pe.push_attribute(("x", port.offset.x.to_string().as_str()));
                pe.push_attribute(("y", port.offset.y.to_string().as_str()));
                emit(w, Event::Empty(pe))?;
            }
            emit(w, Event::End(BytesEnd::new("component")))
        }
        ItemBody::Wire(wire) => {
            let mut el = BytesStart::new("wire");
            push_placement(&mut el, item);
            emit(w, Event::Start(el))?;
            for line in &wire.lines {
                let mut le = BytesStart::new("line");
                le.push_attribute(("x0", line.p0.x.to_string().as_str()));
                le.push_attribute(("y0", line.p0.y.to_string().as_str()));
                le.push_attribute(("x1", line.p1.x.to_string().as_str()));
                le.push_attribute(("y1", line.p1.y.to_string().as_str()));
                emit(w, Event::Empty(le))?;
            }
            emit(w, Event::End(BytesEnd::new("wire")))
        }
        ItemBody::Painting(p) => {
            let mut el = BytesStart::new("painting");
            push_placement(&mut el, item);
            el.push_attribute(("kind", p.kind_name()));
            push_box(&mut el, &p.rect);
            if let PaintingKind::Text(text) = &p.kind {
                emit(w, Event::Start(el))?;
                emit(w, Event::Text(BytesText::new(text)))?;
                emit(w, Event::End(BytesEnd::new("painting")))
            } else {
                emit(w, Event::Empty(el))
            }
        }
    }
}

fn push_placement(el: &mut BytesStart, item: &Item) {
    el.push_attribute(("x", item.pos.x.to_string().as_str()));
    el.push_attribute(("y", item.pos.y.to_string().as_str()));
    el.push_attribute(("quadrants", item.orientation.quadrants.to_string().as_str()));
    el.push_attribute(("mirrored", bool_str(item.orientation.mirrored)));
}

fn push_box(el: &mut BytesStart, b: &SSBox) {
    el.push_attribute(("x0", b.min.x.to_string().as_str()));
    el.push_attribute(("y0", b.min.y.to_string().as_str()));
    el.push_attribute(("x1", b.max.x.to_string().as_str()));
    el.push_attribute(("y1", b.max.y.to_string().as_str()));
}

fn bool_str(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn att_i32(node: Node, name: &str, el: &'static str) -> Result<i32, ClipboardError> {
    node.attribute(name)
        .and_then(|v| v.parse().ok())
        .ok_or(ClipboardError::Malformed(el))
}

fn att_bool(node: Node, name: &str, el: &'static str) -> Result<bool, ClipboardError> {
    match node.attribute(name) {
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        _ => Err(ClipboardError::Malformed(el)),
    }
}

fn att_box(node: Node, el: &'static str) -> Result<SSBox, ClipboardError> {
    Ok(SSBox::new(
        SSPoint::new(att_i32(node, "x0", el)?, att_i32(node, "y0", el)?),
        SSPoint::new(att_i32(node, "x1", el)?, att_i32(node, "y1", el)?),
    ))
}

fn read_placement(node: Node, el: &'static str) -> Result<(SSPoint, Orientation), ClipboardError> {
    let pos = SSPoint::new(att_i32(node, "x", el)?, att_i32(node, "y", el)?);
    let orientation = Orientation {
        quadrants: (att_i32(node, "quadrants", el)? % 4) as u8,
        mirrored: att_bool(node, "mirrored", el)?,
    };
    Ok((pos, orientation))
}

fn read_component(node: Node) -> Result<Item, ClipboardError> {
    const EL: &str = "component";
    let (pos, orientation) = read_placement(node, EL)?;
    let mut ports: SmallVec<[Port; 4]> = SmallVec::new();
    for pn in node.children().filter(|n| n.has_tag_name("port")) {
        ports.push(Port::new(att_i32(pn, "x", "port")?, att_i32(pn, "y", "port")?));
    }
    let mut component = Component::new(
        node.attribute("name").ok_or(ClipboardError::Malformed(EL))?,
        node.attribute("prefix").ok_or(ClipboardError::Malformed(EL))?,
        ports,
        att_box(node, EL)?,
    );
    component.label = node
        .attribute("label")
        .ok_or(ClipboardError::Malformed(EL))?
        .to_owned();
    component.active = att_bool(node, "active", EL)?;
    let mut item = Item::new(pos, ItemBody::Component(component));
    item.orientation = orientation;
    Ok(item)
}

fn read_wire(node: Node) -> Result<Item, ClipboardError> {
    const EL: &str = "wire";
    let (pos, orientation) = read_placement(node, EL)?;
    let mut lines = Vec::new();
    for ln in node.children().filter(|n| n.has_tag_name("line")) {
        lines.push(WireLine::new(
            SSPoint::new(att_i32(ln, "x0", "line")?, att_i32(ln, "y0", "line")?),
            SSPoint::new(att_i32(ln, "x1", "line")?, att_i32(ln, "y1", "line")?),
        ));
    }
    if lines.is_empty() {
        return Err(ClipboardError::Malformed(EL));
    }
    let mut item = Item::new(pos, ItemBody::Wire(Wire { lines }));
    item.orientation = orientation;
    Ok(item)
}

fn read_painting(node: Node) -> Result<Item, ClipboardError> {
    const EL: &str = "painting";
    let (pos, orientation) = read_placement(node, EL)?;
    let kind = match node.attribute("kind") {
        Some("line") => PaintingKind::Line,
        Some("rectangle") => PaintingKind::Rectangle,
        Some("ellipse") => PaintingKind::Ellipse,
        Some("arrow") => PaintingKind::Arrow,
        Some("text") => PaintingKind::Text(node.text().unwrap_or_default().to_owned()),
        _ => return Err(ClipboardError::Malformed(EL)),
    };
    let mut painting = Painting::new(kind);
    painting.rect = att_box(node, EL)?;
    let mut item = Item::new(pos, ItemBody::Painting(painting));
    item.orientation = orientation;
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::{AngleDirection, Axis};

    fn sample_items() -> Vec<Item> {
        let mut resistor = Item::new(
            SSPoint::new(20, -30),
            ItemBody::Component(Component::two_port("resistor", "R", 10)),
        );
        resistor.component_mut().unwrap().label = "R3".to_owned();
        resistor.rotate(AngleDirection::Clockwise);
        resistor.mirror(Axis::Y);

        let wire = Item::new(
            SSPoint::new(0, 0),
            ItemBody::Wire(Wire::from_points(&[
                SSPoint::new(0, 0),
                SSPoint::new(10, 0),
                SSPoint::new(10, 10),
            ])),
        );

        let mut label = Painting::new(PaintingKind::Text("hello".to_owned()));
        label.rect = SSBox::new(SSPoint::new(0, 0), SSPoint::new(40, 10));
        let painting = Item::new(SSPoint::new(-5, 5), ItemBody::Painting(label));

        vec![resistor, wire, painting]
    }

    #[test]
    fn round_trip_preserves_geometry() {
        let items = sample_items();
        let refs: Vec<&Item> = items.iter().collect();
        let xml = write_items(&refs).unwrap();
        let parsed = read_items(&xml).unwrap();
        assert_eq!(parsed.len(), 3);
        for (a, b) in items.iter().zip(&parsed) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.orientation, b.orientation);
            assert_eq!(a.body, b.body);
        }
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let xml = r#"<skema version="99.0.0"><wire x="0" y="0" quadrants="0" mirrored="false"><line x0="0" y0="0" x1="10" y1="0"/></wire></skema>"#;
        assert!(matches!(
            read_items(xml),
            Err(ClipboardError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn wrong_root_is_rejected() {
        assert!(matches!(
            read_items("<other/>"),
            Err(ClipboardError::MissingRoot)
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            read_items("definitely not xml"),
            Err(ClipboardError::Parse(_))
        ));
    }
}
