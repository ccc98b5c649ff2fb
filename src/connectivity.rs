//! port connectivity graph
//!
//! Connections are held in an undirected adjacency graph keyed by [`PortId`]
//! values rather than by references into items, so the graph never owns or
//! dangles. Symmetry is a structural property: an undirected edge is the
//! connection.

use std::collections::HashSet;

use petgraph::graphmap::UnGraphMap;

use crate::items::PortId;

#[derive(Clone, Debug, Default)]
pub struct Connectivity {
    graph: UnGraphMap<PortId, ()>,
}

impl Connectivity {
    pub fn new() -> Self {
        Connectivity::default()
    }

    /// connect two ports; adding an existing connection is a no-op
    pub fn connect(&mut self, a: PortId, b: PortId) {
        if a != b {
            self.graph.add_edge(a, b, ());
        }
    }

    /// sever one connection; severing an absent connection is a no-op
    pub fn disconnect(&mut self, a: PortId, b: PortId) {
        self.graph.remove_edge(a, b);
        // keep the node set tidy so neighbor queries reflect live ports only
        if self.connections(a).is_empty() {
            self.graph.remove_node(a);
        }
        if self.connections(b).is_empty() {
            self.graph.remove_node(b);
        }
    }

    pub fn is_connected(&self, a: PortId, b: PortId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// all ports directly connected to the given port
    pub fn connections(&self, port: PortId) -> Vec<PortId> {
        if !self.graph.contains_node(port) {
            return Vec::new();
        }
        self.graph.neighbors(port).collect()
    }

    pub fn any_connection(&self, port: PortId) -> Option<PortId> {
        if !self.graph.contains_node(port) {
            return None;
        }
        self.graph.neighbors(port).next()
    }

    pub fn has_connection(&self, port: PortId) -> bool {
        self.any_connection(port).is_some()
    }

    /// drop every connection an item's ports participate in; used when an
    /// item is destroyed without going through the undo stack
    pub fn remove_item(&mut self, item: crate::items::ItemId) {
        let nodes: Vec<PortId> = self
            .graph
            .nodes()
            .filter(|p| p.item == item)
            .collect();
        for n in nodes {
            self.graph.remove_node(n);
        }
    }

    /// the equipotential set reachable from a port through connections and
    /// through wires; `is_wire` tells which items short their two ports
    /// together electrically
    pub fn net_of(&self, start: PortId, is_wire: impl Fn(crate::items::ItemId) -> bool) -> HashSet<PortId> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        while let Some(p) = stack.pop() {
            if !seen.insert(p) {
                continue;
            }
            for n in self.connections(p) {
                stack.push(n);
            }
            if is_wire(p.item) {
                stack.push(PortId::new(p.item, p.index ^ 1));
            }
        }
        seen
    }
}
