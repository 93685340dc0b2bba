//! Gesture state machine and selection state of the editor.

use crate::geometry::Point;
use crate::graph::{EdgeId, NodeId};
use crate::layout::PortSide;
use serde::{Deserialize, Serialize};

/// Mouse button that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A connection handle under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleHit {
    pub node: NodeId,
    pub port: &'static str,
    pub side: PortSide,
}

/// What a screen point lands on, in hit-test priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum HitTarget {
    Handle(HandleHit),
    NodeDelete(NodeId),
    EdgeDelete(EdgeId),
    Node(NodeId),
    Edge(EdgeId),
    Canvas,
}

/// The in-progress pointer gesture.
///
/// ```text
/// Idle --down(canvas)--> Panning      --up--> Idle (click if barely moved)
/// Idle --down(node)----> DraggingNode --up--> Idle
/// Idle --down(handle)--> Connecting   --up--> Idle (commit over another handle, else abort)
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Panning {
        /// Last pointer position, screen space.
        last: Point,
        /// Total pointer travel so far, screen px.
        travelled: f64,
    },
    DraggingNode {
        node: NodeId,
        last: Point,
    },
    Connecting {
        source: NodeId,
        port: &'static str,
        side: PortSide,
        /// Live pointer position, canvas space.
        cursor: Point,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    /// Returns `true` while the gesture holds a reference to `node`.
    pub fn involves(&self, node: &NodeId) -> bool {
        match self {
            Gesture::DraggingNode { node: n, .. } | Gesture::Connecting { source: n, .. } => {
                n == node
            }
            Gesture::Idle | Gesture::Panning { .. } => false,
        }
    }
}

/// The selected element. Node and edge selection exclude each other by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Node(NodeId),
    Edge(EdgeId),
}

impl Selection {
    pub fn node(&self) -> Option<&NodeId> {
        match self {
            Selection::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn edge(&self) -> Option<&EdgeId> {
        match self {
            Selection::Edge(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// Visibility of the panels around the canvas. Layout only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
    pub sidebar_visible: bool,
    pub config_panel_visible: bool,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            sidebar_visible: true,
            config_panel_visible: true,
        }
    }
}
