//! Render-packet derivation: turns editor state into plain, paintable data.

use crate::curve::{ArrowGlyph, CubicBezier};
use crate::editor::{FlowEditor, SelectionListener};
use crate::geometry::{Point, Rect, Vector};
use crate::graph::{EdgeId, NodeId, NodeRole};
use crate::interaction::PanelLayout;
use crate::layout::{self, PortSide};
use serde::Serialize;
use std::time::Instant;

mod svg;

pub use svg::SvgOptions;

/// A connection handle as drawn on a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandleView {
    pub name: &'static str,
    pub side: PortSide,
    pub anchor: Point,
}

/// Everything needed to paint one node, in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub type_tag: String,
    pub role: NodeRole,
    pub label: String,
    pub description: String,
    pub rect: Rect,
    pub selected: bool,
    pub handles: Vec<HandleView>,
    /// Present only on the selected node.
    pub delete_control: Option<Rect>,
}

/// Everything needed to paint one edge, in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub curve: CubicBezier,
    /// SVG path data of `curve`.
    pub path: String,
    pub selected: bool,
    /// Centre of the delete button, present only on the selected edge.
    pub delete_affordance: Option<Point>,
    /// Traveling arrow, present only while the edge animates.
    pub arrow: Option<ArrowGlyph>,
}

/// A snapshot of the canvas ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub zoom: f64,
    pub pan: Vector,
    pub panels: PanelLayout,
    pub nodes: Vec<NodeView>,
    /// Edges with unresolvable or non-finite endpoints are left out.
    pub edges: Vec<EdgeView>,
    /// Curve of the connection being drawn, if any.
    pub preview: Option<CubicBezier>,
}

impl Scene {
    /// Derives the scene of `editor` as it looks at `now`.
    pub fn derive<L: SelectionListener>(editor: &FlowEditor<L>, now: Instant) -> Self {
        let selection = editor.selection();
        let nodes = editor
            .graph()
            .nodes()
            .iter()
            .map(|node| {
                let selected = selection.node() == Some(&node.id);
                NodeView {
                    id: node.id.clone(),
                    type_tag: node.type_tag().to_string(),
                    role: node.role(),
                    label: node.label().to_string(),
                    description: node.kind.description().to_string(),
                    rect: layout::node_rect(node),
                    selected,
                    handles: layout::ports(&node.kind)
                        .iter()
                        .map(|port| HandleView {
                            name: port.name,
                            side: port.side,
                            anchor: layout::port_anchor(node, port),
                        })
                        .collect(),
                    delete_control: selected.then(|| layout::delete_control(node)),
                }
            })
            .collect();

        let edges = editor
            .graph()
            .edges()
            .iter()
            .filter_map(|edge| {
                let Some(curve) = editor.edge_curve(edge) else {
                    tracing::trace!(edge = %edge.id, "skipping unresolvable edge");
                    return None;
                };
                let selected = selection.edge() == Some(&edge.id);
                Some(EdgeView {
                    id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    path: curve.to_svg_path(),
                    selected,
                    delete_affordance: selected.then(|| curve.midpoint()),
                    arrow: editor.animation().arrow(edge.id.as_str(), &curve, now),
                    curve,
                })
            })
            .collect();

        Scene {
            zoom: editor.viewport().zoom(),
            pan: editor.viewport().pan(),
            panels: editor.panels(),
            nodes,
            edges,
            preview: editor.preview_curve(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn edge(&self, id: &str) -> Option<&EdgeView> {
        self.edges.iter().find(|e| e.id.as_str() == id)
    }

    pub fn animating_edges(&self) -> impl Iterator<Item = &EdgeView> {
        self.edges.iter().filter(|e| e.arrow.is_some())
    }
}

impl<L: SelectionListener> FlowEditor<L> {
    /// The scene at the current instant.
    pub fn scene(&self) -> Scene {
        Scene::derive(self, Instant::now())
    }

    pub fn scene_at(&self, now: Instant) -> Scene {
        Scene::derive(self, now)
    }
}
