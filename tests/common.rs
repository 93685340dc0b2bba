//! Common test utilities for building editors and locating things on screen.
use kairo::layout;
use kairo::prelude::*;

/// A point on the default viewport that lies on no node, handle or edge.
#[allow(dead_code)]
pub const EMPTY_CANVAS: Point = Point::new(1400.0, 900.0);

/// Creates an editor on the demonstration flow that records selection notifications.
#[allow(dead_code)]
pub fn demo_editor() -> FlowEditor<RecordingListener> {
    FlowEditor::builder()
        .with_listener(RecordingListener::default())
        .build()
        .expect("default config is valid")
}

/// Creates a recording editor on a custom graph.
#[allow(dead_code)]
pub fn editor_with_graph(graph: FlowGraph) -> FlowEditor<RecordingListener> {
    FlowEditor::builder()
        .with_graph(graph)
        .with_listener(RecordingListener::default())
        .build()
        .expect("default config is valid")
}

/// Screen position of the centre of a node.
#[allow(dead_code)]
pub fn node_center<L: SelectionListener>(editor: &FlowEditor<L>, id: &str) -> Point {
    let node = editor.graph().node(id).expect("node exists");
    editor.viewport().to_screen(layout::node_rect(node).center())
}

/// Screen position of a named connection handle of a node.
#[allow(dead_code)]
pub fn handle_point<L: SelectionListener>(editor: &FlowEditor<L>, id: &str, port: &str) -> Point {
    let node = editor.graph().node(id).expect("node exists");
    let port = layout::port(&node.kind, port).expect("port exists");
    editor.viewport().to_screen(layout::port_anchor(node, &port))
}

/// Screen position of the midpoint of an edge curve.
#[allow(dead_code)]
pub fn edge_midpoint<L: SelectionListener>(editor: &FlowEditor<L>, id: &str) -> Point {
    let edge = editor.graph().edge(id).expect("edge exists");
    let curve = editor.edge_curve(edge).expect("edge is drawable");
    editor.viewport().to_screen(curve.midpoint())
}

/// Presses at `from`, moves to `to` and releases there.
#[allow(dead_code)]
pub fn drag<L: SelectionListener>(editor: &mut FlowEditor<L>, from: Point, to: Point) {
    editor.pointer_down(from, PointerButton::Primary);
    editor.pointer_move(to);
    editor.pointer_up(to);
}

/// A small generic node at the given canvas position.
#[allow(dead_code)]
pub fn generic_node(id: &str, x: f64, y: f64) -> Node {
    Node::new(
        id,
        NodeKind::from_palette("passthrough", id, ""),
        Point::new(x, y),
    )
}

/// Three generic nodes in a row, no edges.
#[allow(dead_code)]
pub fn create_line_graph() -> FlowGraph {
    FlowGraph::from_parts(
        vec![
            generic_node("a", 0.0, 0.0),
            generic_node("b", 400.0, 0.0),
            generic_node("c", 800.0, 0.0),
        ],
        vec![],
    )
    .expect("valid graph")
}
