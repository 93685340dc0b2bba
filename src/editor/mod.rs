//! The flow canvas editor: graph, viewport, gestures and selection in one place.

use crate::animation::{FlowAnimation, edges_to_animate};
use crate::config::EditorConfig;
use crate::curve::CubicBezier;
use crate::geometry::Point;
use crate::graph::{Edge, FlowGraph, Node, NodeId, NodeKind};
use crate::interaction::{
    Gesture, HandleHit, HitTarget, PanelLayout, PointerButton, Selection,
};
use crate::layout::{self, PortSide};
use crate::palette::PaletteItem;
use crate::viewport::Viewport;
use std::time::Instant;
use tracing::{debug, trace};

mod builder;
mod listener;

pub use builder::FlowEditorBuilder;
pub use listener::{NullListener, RecordingListener, SelectionEvent, SelectionListener};

/// Padding (screen px) kept around the graph by `fit_view`.
const FIT_PADDING: f64 = 40.0;

/// An interactive node/edge editor.
///
/// The host forwards pointer events in screen space and paints the scene derived
/// from the editor state. Every operation is synchronous; rejected operations are
/// logged and otherwise ignored.
pub struct FlowEditor<L = NullListener> {
    graph: FlowGraph,
    viewport: Viewport,
    animation: FlowAnimation,
    gesture: Gesture,
    selection: Selection,
    panels: PanelLayout,
    listener: L,
    config: EditorConfig,
}

impl FlowEditor<NullListener> {
    /// An editor seeded with the demonstration flow and default settings.
    pub fn new() -> Self {
        FlowEditorBuilder::new().assemble()
    }

    pub fn builder() -> FlowEditorBuilder<NullListener> {
        FlowEditorBuilder::new()
    }
}

impl Default for FlowEditor<NullListener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SelectionListener> FlowEditor<L> {
    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn animation(&self) -> &FlowAnimation {
        &self.animation
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn panels(&self) -> PanelLayout {
        self.panels
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection
            .node()
            .and_then(|id| self.graph.node(id.as_str()))
    }

    pub fn selected_edge(&self) -> Option<&Edge> {
        self.selection
            .edge()
            .and_then(|id| self.graph.edge(id.as_str()))
    }

    /// Hosts keep repainting at `FlowAnimation::TICK` while this is `true`.
    pub fn needs_animation_frames(&self) -> bool {
        self.animation.is_active()
    }

    // --- Pointer gestures ---

    pub fn pointer_down(&mut self, screen: Point, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        if !self.gesture.is_idle() {
            debug!(gesture = ?self.gesture, "pointer down while a gesture was active, resetting");
            self.gesture = Gesture::Idle;
        }

        match self.hit_test(screen) {
            HitTarget::Handle(hit) => {
                debug!(node = %hit.node, port = hit.port, "connection started");
                self.gesture = Gesture::Connecting {
                    source: hit.node,
                    port: hit.port,
                    side: hit.side,
                    cursor: self.viewport.to_canvas(screen),
                };
            }
            HitTarget::NodeDelete(id) => {
                self.delete_node(id.as_str());
            }
            HitTarget::EdgeDelete(id) => {
                self.delete_edge(id.as_str());
            }
            HitTarget::Node(id) => {
                self.select(Selection::Node(id.clone()));
                self.gesture = Gesture::DraggingNode {
                    node: id,
                    last: screen,
                };
            }
            HitTarget::Edge(id) => self.select(Selection::Edge(id)),
            HitTarget::Canvas => {
                self.gesture = Gesture::Panning {
                    last: screen,
                    travelled: 0.0,
                };
            }
        }
    }

    pub fn pointer_move(&mut self, screen: Point) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { last, travelled } => {
                let delta = screen - *last;
                self.viewport.pan_by(delta);
                *travelled += delta.length();
                *last = screen;
            }
            Gesture::DraggingNode { node, last } => {
                let delta = self.viewport.to_canvas_delta(screen - *last);
                match self.graph.move_node(node.as_str(), delta) {
                    Ok(position) => trace!(node = %node, %position, "node dragged"),
                    Err(e) => debug!(error = %e, "drag ignored"),
                }
                *last = screen;
            }
            Gesture::Connecting { cursor, .. } => {
                *cursor = self.viewport.to_canvas(screen);
            }
        }
    }

    pub fn pointer_up(&mut self, screen: Point) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Idle => {}
            Gesture::Panning { travelled, .. } => {
                if travelled <= self.config.click_slop {
                    self.clear_selection();
                }
            }
            Gesture::DraggingNode { node, .. } => {
                debug!(node = %node, "drag finished");
            }
            Gesture::Connecting {
                source, port, side, ..
            } => self.finish_connection(source, port, side, screen),
        }
    }

    /// A press and release at the same point.
    pub fn click(&mut self, screen: Point) {
        self.pointer_down(screen, PointerButton::Primary);
        self.pointer_up(screen);
    }

    /// Aborts any drag, pan or connection in progress.
    pub fn cancel_gesture(&mut self) {
        if !self.gesture.is_idle() {
            debug!(gesture = ?self.gesture, "gesture cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    fn finish_connection(
        &mut self,
        source: NodeId,
        port: &'static str,
        side: PortSide,
        screen: Point,
    ) {
        let Some(hit) = self.handle_at(screen).filter(|h| h.node != source) else {
            debug!(node = %source, "connection aborted");
            return;
        };
        let edge = match side {
            PortSide::Output => {
                let target_port = (hit.side == PortSide::Input).then_some(hit.port);
                Edge::new(source, hit.node).with_handles(Some(port), target_port)
            }
            PortSide::Input => {
                let source_port = (hit.side == PortSide::Output).then_some(hit.port);
                Edge::new(hit.node, source).with_handles(source_port, Some(port))
            }
        };
        match self.graph.add_edge(edge) {
            Ok(edge) => debug!(edge = %edge.id, "connection created"),
            Err(e) => debug!(error = %e, "connection rejected"),
        }
    }

    // --- Hit testing ---

    /// Resolves what lies under a screen point.
    pub fn hit_test(&self, screen: Point) -> HitTarget {
        if let Some(hit) = self.handle_at(screen) {
            return HitTarget::Handle(hit);
        }
        let canvas = self.viewport.to_canvas(screen);

        if let Some(node) = self.selected_node() {
            if layout::delete_control(node).contains(canvas) {
                return HitTarget::NodeDelete(node.id.clone());
            }
        }
        if let Some(edge) = self.selected_edge() {
            let on_button = self.edge_curve(edge).is_some_and(|curve| {
                curve.midpoint().distance_to(canvas) <= layout::EDGE_DELETE_RADIUS
            });
            if on_button {
                return HitTarget::EdgeDelete(edge.id.clone());
            }
        }
        if let Some(node) = self
            .graph
            .nodes()
            .iter()
            .rev()
            .find(|n| layout::node_rect(n).contains(canvas))
        {
            return HitTarget::Node(node.id.clone());
        }

        let tolerance = self.config.edge_hit_tolerance / self.viewport.zoom();
        self.graph
            .edges()
            .iter()
            .filter_map(|e| self.edge_curve(e).map(|c| (e, c.distance_to(canvas))))
            .filter(|(_, distance)| *distance <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(HitTarget::Canvas, |(e, _)| HitTarget::Edge(e.id.clone()))
    }

    /// The connection handle under a screen point, topmost node first.
    pub fn handle_at(&self, screen: Point) -> Option<HandleHit> {
        self.graph.nodes().iter().rev().find_map(|node| {
            layout::ports(&node.kind).iter().find_map(|port| {
                let anchor = self.viewport.to_screen(layout::port_anchor(node, port));
                (anchor.distance_to(screen) <= self.config.handle_radius).then(|| HandleHit {
                    node: node.id.clone(),
                    port: port.name,
                    side: port.side,
                })
            })
        })
    }

    /// The curve of an edge in canvas space, or `None` when an endpoint is missing
    /// or does not resolve to finite coordinates.
    pub fn edge_curve(&self, edge: &Edge) -> Option<CubicBezier> {
        let source = self.graph.node(edge.source.as_str())?;
        let target = self.graph.node(edge.target.as_str())?;
        let curve = CubicBezier::between(
            layout::source_anchor(source, edge.source_handle.as_deref()),
            layout::target_anchor(target, edge.target_handle.as_deref()),
            self.config.min_control_offset,
            self.config.control_offset_ratio,
        );
        curve.is_finite().then_some(curve)
    }

    /// The live curve of a connection being drawn.
    pub fn preview_curve(&self) -> Option<CubicBezier> {
        let Gesture::Connecting {
            source,
            port,
            side,
            cursor,
        } = &self.gesture
        else {
            return None;
        };
        let node = self.graph.node(source.as_str())?;
        let anchor = layout::port_anchor(node, &layout::port(&node.kind, port)?);
        let (start, end) = match side {
            PortSide::Output => (anchor, *cursor),
            PortSide::Input => (*cursor, anchor),
        };
        let curve = CubicBezier::between(
            start,
            end,
            self.config.min_control_offset,
            self.config.control_offset_ratio,
        );
        curve.is_finite().then_some(curve)
    }

    // --- Selection ---

    pub fn select_node(&mut self, id: &str) -> bool {
        match self.graph.node(id) {
            Some(node) => {
                let id = node.id.clone();
                self.select(Selection::Node(id));
                true
            }
            None => false,
        }
    }

    pub fn select_edge(&mut self, id: &str) -> bool {
        match self.graph.edge(id) {
            Some(edge) => {
                let id = edge.id.clone();
                self.select(Selection::Edge(id));
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.select(Selection::None);
    }

    /// Replaces the selection, notifies the listener of what changed and restarts
    /// the flow animation.
    fn select(&mut self, selection: Selection) {
        if self.selection == selection {
            return;
        }
        let previous = std::mem::replace(&mut self.selection, selection);

        if previous.node() != self.selection.node() {
            let node = self
                .selection
                .node()
                .and_then(|id| self.graph.node(id.as_str()));
            self.listener.on_node_select(node);
        }
        if previous.edge() != self.selection.edge() {
            let edge = self
                .selection
                .edge()
                .and_then(|id| self.graph.edge(id.as_str()));
            self.listener.on_edge_select(edge);
        }

        match self.selection.node() {
            Some(id) => {
                let edges = edges_to_animate(&self.graph, id);
                debug!(node = %id, animating = edges.len(), "node selected");
                self.animation.start(edges, Instant::now());
            }
            None => self.animation.clear(),
        }
    }

    // --- Graph edits ---

    /// Removes a node and its edges. Clears the selection if it pointed at either.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let (node, removed) = match self.graph.remove_node(id) {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "delete ignored");
                return false;
            }
        };
        if self.gesture.involves(&node.id) {
            self.gesture = Gesture::Idle;
        }
        let selection_gone = match &self.selection {
            Selection::Node(selected) => *selected == node.id,
            Selection::Edge(selected) => removed.iter().any(|e| e.id == *selected),
            Selection::None => false,
        };
        if selection_gone {
            self.clear_selection();
        } else {
            for edge in &removed {
                self.animation.forget(edge.id.as_str());
            }
        }
        true
    }

    /// Removes exactly one edge. Clears the selection if it was that edge.
    pub fn delete_edge(&mut self, id: &str) -> bool {
        if let Err(e) = self.graph.remove_edge(id) {
            debug!(error = %e, "delete ignored");
            return false;
        }
        if self.selection.edge().is_some_and(|selected| selected.as_str() == id) {
            self.clear_selection();
        }
        self.animation.forget(id);
        debug!(edge = id, "edge removed");
        true
    }

    /// Deletes whatever is selected.
    pub fn delete_selection(&mut self) -> bool {
        match self.selection.clone() {
            Selection::Node(id) => self.delete_node(id.as_str()),
            Selection::Edge(id) => self.delete_edge(id.as_str()),
            Selection::None => false,
        }
    }

    /// Links two nodes directly, with the same rules as a drawn connection.
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        match self.graph.connect(source, target) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "connection rejected");
                false
            }
        }
    }

    /// Creates a node from a palette drag payload dropped at a screen point.
    ///
    /// Malformed payloads are ignored and yield `None`.
    pub fn drop_payload(&mut self, payload: &str, screen: Point) -> Option<NodeId> {
        match PaletteItem::from_json(payload) {
            Ok(item) => self.drop_item(&item, screen),
            Err(e) => {
                debug!(error = %e, "ignoring drop payload");
                None
            }
        }
    }

    /// Creates a node for `item` with its top-left corner under the screen point.
    pub fn drop_item(&mut self, item: &PaletteItem, screen: Point) -> Option<NodeId> {
        let position = self.viewport.to_canvas(screen);
        let id = self.graph.unique_node_id(&item.id);
        let kind = NodeKind::from_palette(&item.id, &item.name, &item.description);
        match self.graph.add_node(Node::new(id.clone(), kind, position)) {
            Ok(()) => {
                debug!(node = %id, %position, "node dropped");
                Some(id)
            }
            Err(e) => {
                debug!(error = %e, "drop rejected");
                None
            }
        }
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Wheel-style zoom around a screen anchor.
    pub fn zoom_at(&mut self, factor: f64, anchor: Point) {
        self.viewport.zoom_at(factor, anchor);
    }

    /// Fits every node into a `width` x `height` screen area.
    pub fn fit_view(&mut self, width: f64, height: f64) {
        match layout::graph_bounds(&self.graph) {
            Some(bounds) => self.viewport.fit_to(bounds, width, height, FIT_PADDING),
            None => self.viewport.reset(),
        }
    }

    // --- Panels ---

    pub fn set_sidebar_visible(&mut self, visible: bool) {
        self.panels.sidebar_visible = visible;
    }

    pub fn set_config_panel_visible(&mut self, visible: bool) {
        self.panels.config_panel_visible = visible;
    }

    pub fn toggle_sidebar(&mut self) {
        self.panels.sidebar_visible = !self.panels.sidebar_visible;
    }

    pub fn toggle_config_panel(&mut self) {
        self.panels.config_panel_visible = !self.panels.config_panel_visible;
    }
}
