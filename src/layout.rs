//! Node geometry: sizes per kind, connection handle anchors and controls.

use crate::geometry::{Point, Rect};
use crate::graph::{FlowGraph, Node, NodeKind};
use serde::Serialize;

/// Which border of a node a connection handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    Input,
    Output,
}

/// A named connection handle of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Port {
    pub name: &'static str,
    pub side: PortSide,
    /// Vertical position as a fraction of the node height.
    pub offset: f64,
}

pub const DEFAULT_INPUT: &str = "input";
pub const DEFAULT_OUTPUT: &str = "output";
/// Second input of agent nodes, where tools plug in.
pub const TOOLS_INPUT: &str = "tools";

const INPUT: Port = Port {
    name: DEFAULT_INPUT,
    side: PortSide::Input,
    offset: 0.5,
};
const OUTPUT: Port = Port {
    name: DEFAULT_OUTPUT,
    side: PortSide::Output,
    offset: 0.5,
};
const TOOLS: Port = Port {
    name: TOOLS_INPUT,
    side: PortSide::Input,
    offset: 0.8,
};

const AGENT_PORTS: [Port; 3] = [INPUT, TOOLS, OUTPUT];
const TRIGGER_PORTS: [Port; 1] = [OUTPUT];
const PASSTHROUGH_PORTS: [Port; 2] = [INPUT, OUTPUT];

/// Size of the delete control shown in the top-right corner of a selected node.
pub const DELETE_CONTROL_SIZE: f64 = 20.0;
const DELETE_CONTROL_MARGIN: f64 = 4.0;
/// Radius of the delete button drawn at the midpoint of a selected edge, in canvas units.
pub const EDGE_DELETE_RADIUS: f64 = 10.0;

/// Width and height of a node in canvas units.
pub fn node_size(kind: &NodeKind) -> (f64, f64) {
    match kind {
        NodeKind::Agent(_) => (280.0, 160.0),
        NodeKind::Webhook(_) => (240.0, 88.0),
        NodeKind::Observe(_) => (240.0, 96.0),
        NodeKind::Generic(_) => (220.0, 76.0),
    }
}

pub fn node_rect(node: &Node) -> Rect {
    let (width, height) = node_size(&node.kind);
    Rect::new(node.position, width, height)
}

/// Connection handles exposed by a node kind. Agents take tools on a second input.
pub fn ports(kind: &NodeKind) -> &'static [Port] {
    match kind {
        NodeKind::Agent(_) => &AGENT_PORTS,
        NodeKind::Webhook(_) => &TRIGGER_PORTS,
        NodeKind::Observe(_) | NodeKind::Generic(_) => &PASSTHROUGH_PORTS,
    }
}

pub fn port(kind: &NodeKind, name: &str) -> Option<Port> {
    ports(kind).iter().find(|p| p.name == name).copied()
}

/// Canvas position of a handle on `node`.
pub fn port_anchor(node: &Node, port: &Port) -> Point {
    let rect = node_rect(node);
    let x = match port.side {
        PortSide::Input => rect.origin.x,
        PortSide::Output => rect.right(),
    };
    Point::new(x, rect.origin.y + rect.height * port.offset)
}

/// Where an edge leaves `node`: the named output handle, or the right-centre.
pub fn source_anchor(node: &Node, handle: Option<&str>) -> Point {
    let port = handle
        .and_then(|name| port(&node.kind, name))
        .filter(|p| p.side == PortSide::Output)
        .unwrap_or(OUTPUT);
    port_anchor(node, &port)
}

/// Where an edge enters `node`: the named input handle, or the left-centre.
pub fn target_anchor(node: &Node, handle: Option<&str>) -> Point {
    let port = handle
        .and_then(|name| port(&node.kind, name))
        .filter(|p| p.side == PortSide::Input)
        .unwrap_or(INPUT);
    port_anchor(node, &port)
}

/// The delete control of a selected node, in canvas space.
pub fn delete_control(node: &Node) -> Rect {
    let rect = node_rect(node);
    Rect::new(
        Point::new(
            rect.right() - DELETE_CONTROL_SIZE - DELETE_CONTROL_MARGIN,
            rect.origin.y + DELETE_CONTROL_MARGIN,
        ),
        DELETE_CONTROL_SIZE,
        DELETE_CONTROL_SIZE,
    )
}

/// Bounding box of every node, or `None` for an empty graph.
pub fn graph_bounds(graph: &FlowGraph) -> Option<Rect> {
    graph
        .nodes()
        .iter()
        .map(node_rect)
        .reduce(|acc, rect| acc.union(&rect))
}
