use crate::graph::{Edge, EdgeId, Node, NodeId};
use serde::Serialize;

/// Receives selection notifications from a `FlowEditor`.
///
/// Notifications fire only when the selected node (or edge) actually changes,
/// including changes to "nothing selected".
pub trait SelectionListener {
    fn on_node_select(&mut self, _node: Option<&Node>) {}
    fn on_edge_select(&mut self, _edge: Option<&Edge>) {}
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullListener;

impl SelectionListener for NullListener {}

/// A single recorded notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SelectionEvent {
    Node(Option<NodeId>),
    Edge(Option<EdgeId>),
}

/// Listener that keeps every notification, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Vec<SelectionEvent>,
}

impl RecordingListener {
    pub fn events(&self) -> &[SelectionEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&SelectionEvent> {
        self.events.last()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SelectionListener for RecordingListener {
    fn on_node_select(&mut self, node: Option<&Node>) {
        self.events.push(SelectionEvent::Node(node.map(|n| n.id.clone())));
    }

    fn on_edge_select(&mut self, edge: Option<&Edge>) {
        self.events.push(SelectionEvent::Edge(edge.map(|e| e.id.clone())));
    }
}
