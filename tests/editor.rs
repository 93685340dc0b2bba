//! End-to-end tests of the editor driven through screen-space pointer events.
mod common;
use common::*;
use kairo::layout::{DEFAULT_INPUT, DEFAULT_OUTPUT, TOOLS_INPUT};
use kairo::prelude::*;
use pretty_assertions::assert_eq;

fn node_event(id: Option<&str>) -> SelectionEvent {
    SelectionEvent::Node(id.map(NodeId::from))
}

fn edge_event(id: Option<&str>) -> SelectionEvent {
    SelectionEvent::Edge(id.map(EdgeId::from))
}

// --- Start-up and selection ---

#[test]
fn test_startup_state() {
    let editor = demo_editor();
    assert_eq!(editor.graph().node_count(), 9);
    assert_eq!(editor.graph().edge_count(), 8);
    assert_eq!(editor.viewport().zoom(), 1.0);
    assert_eq!(editor.viewport().pan(), Vector::ZERO);
    assert!(editor.selection().is_none());
    assert!(editor.gesture().is_idle());
    assert!(!editor.needs_animation_frames());
    assert_eq!(editor.panels(), PanelLayout::default());
    assert!(editor.listener().events().is_empty());
}

#[test]
fn test_clicking_agent_selects_and_animates_all_its_edges() {
    let mut editor = demo_editor();
    let center = node_center(&editor, "agent");
    assert_eq!(center, Point::new(560.0, 360.0));

    editor.click(center);

    assert_eq!(editor.selection(), &Selection::Node(NodeId::from("agent")));
    assert_eq!(editor.listener().events(), &[node_event(Some("agent"))]);
    assert_eq!(editor.animation().edges().len(), 8);
    assert!(editor.needs_animation_frames());
    // A plain click never moves the node.
    assert_eq!(
        editor.graph().node("agent").unwrap().position,
        Point::new(420.0, 280.0)
    );
}

#[test]
fn test_animation_rules_per_role() {
    let mut editor = demo_editor();

    editor.select_node("webhook");
    let animated: Vec<_> = editor.animation().edges().iter().cloned().collect();
    assert_eq!(animated, vec![EdgeId::from("e-webhook-agent")]);

    editor.select_node("calculator");
    assert!(editor.animation().is_animating("e-calculator-agent"));
    assert_eq!(editor.animation().edges().len(), 1);

    editor.select_node("email-sender");
    assert!(editor.animation().is_animating("e-agent-email-sender"));
    assert_eq!(editor.animation().edges().len(), 1);

    editor.clear_selection();
    assert!(!editor.needs_animation_frames());
}

#[test]
fn test_unrelated_node_has_no_animation() {
    let mut editor = demo_editor();
    let id = editor
        .drop_payload(
            r#"{"id":"slack-notify","name":"Slack","description":""}"#,
            Point::new(1200.0, 700.0),
        )
        .unwrap();
    editor.select_node(id.as_str());
    assert!(!editor.needs_animation_frames());
    assert!(editor.animation().edges().is_empty());
}

#[test]
fn test_reselecting_same_node_does_not_notify() {
    let mut editor = demo_editor();
    editor.click(node_center(&editor, "agent"));
    editor.click(node_center(&editor, "agent"));
    assert!(editor.select_node("agent"));
    assert_eq!(editor.listener().events().len(), 1);
}

#[test]
fn test_switching_from_node_to_edge_notifies_both_in_order() {
    let mut editor = demo_editor();
    editor.select_node("agent");
    let midpoint = edge_midpoint(&editor, "e-agent-slack-notify");
    editor.click(midpoint);

    assert_eq!(
        editor.selection(),
        &Selection::Edge(EdgeId::from("e-agent-slack-notify"))
    );
    assert_eq!(
        editor.listener().events(),
        &[
            node_event(Some("agent")),
            node_event(None),
            edge_event(Some("e-agent-slack-notify")),
        ]
    );
    assert!(!editor.needs_animation_frames());
}

#[test]
fn test_select_unknown_ids_is_rejected() {
    let mut editor = demo_editor();
    assert!(!editor.select_node("nope"));
    assert!(!editor.select_edge("nope"));
    assert!(editor.selection().is_none());
    assert!(editor.listener().events().is_empty());
}

#[test]
fn test_canvas_click_clears_selection() {
    let mut editor = demo_editor();
    editor.click(node_center(&editor, "agent"));
    editor.click(EMPTY_CANVAS);

    assert!(editor.selection().is_none());
    assert_eq!(
        editor.listener().events(),
        &[node_event(Some("agent")), node_event(None)]
    );
    assert!(!editor.needs_animation_frames());
    assert_eq!(editor.viewport().pan(), Vector::ZERO);
}

#[test]
fn test_panning_keeps_selection() {
    let mut editor = demo_editor();
    editor.select_node("agent");
    drag(&mut editor, EMPTY_CANVAS, EMPTY_CANVAS + Vector::new(40.0, 20.0));

    assert_eq!(editor.selection(), &Selection::Node(NodeId::from("agent")));
    assert_eq!(editor.viewport().pan(), Vector::new(40.0, 20.0));
}

#[test]
fn test_edge_hit_selects_closest_edge() {
    let editor = demo_editor();
    let midpoint = edge_midpoint(&editor, "e-agent-slack-notify");
    assert_eq!(
        editor.hit_test(midpoint + Vector::new(0.0, 4.0)),
        HitTarget::Edge(EdgeId::from("e-agent-slack-notify"))
    );
    assert_eq!(
        editor.hit_test(midpoint + Vector::new(0.0, 20.0)),
        HitTarget::Canvas
    );
}

// --- Deletion ---

#[test]
fn test_edge_select_then_delete_button() {
    let mut editor = demo_editor();
    let midpoint = edge_midpoint(&editor, "e-agent-slack-notify");

    editor.click(midpoint);
    assert_eq!(
        editor.selected_edge().map(|e| e.id.as_str()),
        Some("e-agent-slack-notify")
    );

    editor.click(midpoint);
    assert_eq!(editor.graph().edge_count(), 7);
    assert!(editor.graph().edge("e-agent-slack-notify").is_none());
    assert!(editor.selection().is_none());
    assert_eq!(
        editor.listener().events(),
        &[edge_event(Some("e-agent-slack-notify")), edge_event(None)]
    );
    // Only that edge went away.
    assert_eq!(editor.graph().node_count(), 9);
}

#[test]
fn test_edge_delete_button_scales_with_zoom() {
    let mut zoomed_in = demo_editor();
    for _ in 0..10 {
        zoomed_in.zoom_in();
    }
    zoomed_in.select_edge("e-agent-slack-notify");
    // 18 screen px is 9 canvas units at zoom 2, inside the drawn button.
    let near_rim = edge_midpoint(&zoomed_in, "e-agent-slack-notify") + Vector::new(0.0, 18.0);
    assert_eq!(
        zoomed_in.hit_test(near_rim),
        HitTarget::EdgeDelete(EdgeId::from("e-agent-slack-notify"))
    );
    zoomed_in.click(near_rim);
    assert!(zoomed_in.graph().edge("e-agent-slack-notify").is_none());

    let mut zoomed_out = demo_editor();
    for _ in 0..10 {
        zoomed_out.zoom_out();
    }
    zoomed_out.select_edge("e-agent-slack-notify");
    // 8 screen px is 16 canvas units at zoom 0.5, outside the drawn button.
    let outside = edge_midpoint(&zoomed_out, "e-agent-slack-notify") + Vector::new(0.0, 8.0);
    assert!(!matches!(
        zoomed_out.hit_test(outside),
        HitTarget::EdgeDelete(_)
    ));
    zoomed_out.click(outside);
    assert_eq!(zoomed_out.graph().edge_count(), 8);
}

#[test]
fn test_node_delete_control_cascades() {
    let mut editor = demo_editor();
    let control = Point::new(686.0, 294.0);

    // Without a selection the corner is just part of the node.
    editor.click(control);
    assert_eq!(editor.selection(), &Selection::Node(NodeId::from("agent")));
    assert!(matches!(editor.hit_test(control), HitTarget::NodeDelete(_)));

    editor.click(control);
    assert!(editor.graph().node("agent").is_none());
    assert_eq!(editor.graph().node_count(), 8);
    assert_eq!(editor.graph().edge_count(), 0);
    assert!(editor.selection().is_none());
    assert_eq!(editor.listener().last(), Some(&node_event(None)));
    assert!(!editor.needs_animation_frames());
}

#[test]
fn test_deleting_endpoint_of_selected_edge_clears_it() {
    let mut editor = demo_editor();
    editor.select_edge("e-webhook-agent");
    assert!(editor.delete_node("webhook"));

    assert!(editor.selection().is_none());
    assert_eq!(editor.listener().last(), Some(&edge_event(None)));
    assert_eq!(editor.graph().edge_count(), 7);
}

#[test]
fn test_deleting_other_node_keeps_selection_and_drops_its_animation() {
    let mut editor = demo_editor();
    editor.select_node("agent");
    assert!(editor.delete_node("webhook"));

    assert_eq!(editor.selection(), &Selection::Node(NodeId::from("agent")));
    assert!(!editor.animation().is_animating("e-webhook-agent"));
    assert_eq!(editor.animation().edges().len(), 7);
    assert_eq!(editor.listener().events().len(), 1);
}

#[test]
fn test_delete_selection() {
    let mut editor = demo_editor();
    assert!(!editor.delete_selection());

    editor.select_edge("e-agent-observe");
    assert!(editor.delete_selection());
    assert_eq!(editor.graph().edge_count(), 7);

    editor.select_node("observe");
    assert!(editor.delete_selection());
    assert!(!editor.graph().contains_node("observe"));
}

#[test]
fn test_delete_unknown_is_ignored() {
    let mut editor = demo_editor();
    assert!(!editor.delete_node("ghost"));
    assert!(!editor.delete_edge("ghost"));
    assert_eq!(editor.graph().node_count(), 9);
    assert_eq!(editor.graph().edge_count(), 8);
}

// --- Dragging and panning ---

#[test]
fn test_drag_node_at_unit_zoom() {
    let mut editor = demo_editor();
    let start = node_center(&editor, "agent");
    drag(&mut editor, start, start + Vector::new(40.0, 20.0));

    assert_eq!(
        editor.graph().node("agent").unwrap().position,
        Point::new(460.0, 300.0)
    );
    assert!(editor.gesture().is_idle());
    assert_eq!(editor.selection(), &Selection::Node(NodeId::from("agent")));
}

#[test]
fn test_drag_node_divides_by_zoom() {
    let mut editor = demo_editor();
    for _ in 0..10 {
        editor.zoom_in();
    }
    assert_eq!(editor.viewport().zoom(), 2.0);

    let start = node_center(&editor, "agent");
    assert_eq!(start, Point::new(1120.0, 720.0));
    drag(&mut editor, start, start + Vector::new(40.0, 20.0));

    assert_eq!(
        editor.graph().node("agent").unwrap().position,
        Point::new(440.0, 290.0)
    );
}

#[test]
fn test_dragged_edges_follow_their_nodes() {
    let mut editor = demo_editor();
    let before = editor
        .edge_curve(editor.graph().edge("e-agent-observe").unwrap())
        .unwrap();
    let start = node_center(&editor, "agent");
    drag(&mut editor, start, start + Vector::new(0.0, 50.0));
    let after = editor
        .edge_curve(editor.graph().edge("e-agent-observe").unwrap())
        .unwrap();

    assert_eq!(after.start, before.start + Vector::new(0.0, 50.0));
    assert_eq!(after.end, before.end);
}

#[test]
fn test_pan_adds_screen_delta_at_any_zoom() {
    let mut editor = demo_editor();
    for _ in 0..10 {
        editor.zoom_in();
    }
    editor.pointer_down(EMPTY_CANVAS, PointerButton::Primary);
    editor.pointer_move(EMPTY_CANVAS + Vector::new(20.0, 10.0));
    editor.pointer_move(EMPTY_CANVAS + Vector::new(40.0, 20.0));
    editor.pointer_up(EMPTY_CANVAS + Vector::new(40.0, 20.0));

    assert_eq!(editor.viewport().pan(), Vector::new(40.0, 20.0));
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_secondary_button_is_ignored() {
    let mut editor = demo_editor();
    editor.pointer_down(node_center(&editor, "agent"), PointerButton::Secondary);
    assert!(editor.gesture().is_idle());
    assert!(editor.selection().is_none());
}

#[test]
fn test_move_without_press_does_nothing() {
    let mut editor = demo_editor();
    editor.pointer_move(Point::new(10.0, 10.0));
    editor.pointer_up(Point::new(10.0, 10.0));
    assert_eq!(editor.viewport().pan(), Vector::ZERO);
    assert!(editor.listener().events().is_empty());
}

// --- Connections ---

#[test]
fn test_connect_output_to_input() {
    let mut editor = demo_editor();
    let from = handle_point(&editor, "webhook", DEFAULT_OUTPUT);
    let to = handle_point(&editor, "observe", DEFAULT_INPUT);
    drag(&mut editor, from, to);

    let edge = editor.graph().edge("e-webhook-observe").expect("edge created");
    assert_eq!(edge.source.as_str(), "webhook");
    assert_eq!(edge.target.as_str(), "observe");
    assert_eq!(edge.source_handle.as_deref(), Some(DEFAULT_OUTPUT));
    assert_eq!(edge.target_handle.as_deref(), Some(DEFAULT_INPUT));
    assert_eq!(editor.graph().edge_count(), 9);
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_connect_from_input_side_reverses_direction() {
    let mut editor = demo_editor();
    let from = handle_point(&editor, "slack-notify", DEFAULT_INPUT);
    let to = handle_point(&editor, "schedule", DEFAULT_OUTPUT);
    drag(&mut editor, from, to);

    let edge = editor
        .graph()
        .edge("e-schedule-slack-notify")
        .expect("edge created");
    assert_eq!(edge.source.as_str(), "schedule");
    assert_eq!(edge.target.as_str(), "slack-notify");
}

#[test]
fn test_connect_into_agent_tools_handle() {
    let mut editor = demo_editor();
    let id = editor
        .drop_payload(
            r#"{"id":"code-interpreter","name":"Code Interpreter","description":"Run code"}"#,
            Point::new(60.0, 740.0),
        )
        .unwrap();
    let from = handle_point(&editor, id.as_str(), DEFAULT_OUTPUT);
    let to = handle_point(&editor, "agent", TOOLS_INPUT);
    drag(&mut editor, from, to);

    let edge = editor
        .graph()
        .edges()
        .iter()
        .find(|e| e.source == id)
        .expect("edge created");
    assert_eq!(edge.target.as_str(), "agent");
    assert_eq!(edge.target_handle.as_deref(), Some(TOOLS_INPUT));

    let curve = editor.edge_curve(edge).unwrap();
    assert_eq!(curve.end, Point::new(420.0, 408.0));
}

#[test]
fn test_duplicate_connection_is_rejected_in_reverse_direction() {
    let mut editor = demo_editor();
    let from = handle_point(&editor, "agent", DEFAULT_INPUT);
    let to = handle_point(&editor, "webhook", DEFAULT_OUTPUT);
    drag(&mut editor, from, to);

    assert_eq!(editor.graph().edge_count(), 8);
    assert!(editor.gesture().is_idle());
}

#[test]
fn test_connection_released_off_handle_is_aborted() {
    let mut editor = demo_editor();
    let from = handle_point(&editor, "webhook", DEFAULT_OUTPUT);
    editor.pointer_down(from, PointerButton::Primary);
    editor.pointer_move(EMPTY_CANVAS);

    let preview = editor.preview_curve().expect("preview while connecting");
    assert_eq!(preview.start, Point::new(300.0, 84.0));
    assert_eq!(preview.end, EMPTY_CANVAS);

    editor.pointer_up(EMPTY_CANVAS);
    assert_eq!(editor.graph().edge_count(), 8);
    assert!(editor.preview_curve().is_none());
}

#[test]
fn test_connection_to_same_node_is_aborted() {
    let mut editor = demo_editor();
    let from = handle_point(&editor, "agent", DEFAULT_INPUT);
    let to = handle_point(&editor, "agent", DEFAULT_OUTPUT);
    drag(&mut editor, from, to);
    assert_eq!(editor.graph().edge_count(), 8);
}

#[test]
fn test_cancel_gesture_aborts_connection() {
    let mut editor = demo_editor();
    let from = handle_point(&editor, "webhook", DEFAULT_OUTPUT);
    let to = handle_point(&editor, "observe", DEFAULT_INPUT);
    editor.pointer_down(from, PointerButton::Primary);
    editor.pointer_move(to);
    editor.cancel_gesture();
    editor.pointer_up(to);

    assert!(editor.graph().edge("e-webhook-observe").is_none());
}

#[test]
fn test_handle_press_does_not_change_selection() {
    let mut editor = demo_editor();
    editor.select_node("observe");
    let from = handle_point(&editor, "webhook", DEFAULT_OUTPUT);
    editor.pointer_down(from, PointerButton::Primary);
    assert!(matches!(editor.gesture(), Gesture::Connecting { .. }));
    assert_eq!(editor.selection(), &Selection::Node(NodeId::from("observe")));
}

#[test]
fn test_programmatic_connect_follows_graph_rules() {
    let mut editor = editor_with_graph(create_line_graph());
    assert!(editor.connect("a", "b"));
    assert!(!editor.connect("b", "a"));
    assert!(!editor.connect("a", "a"));
    assert!(!editor.connect("a", "z"));
    assert_eq!(editor.graph().edge_count(), 1);
}

// --- Palette drops ---

#[test]
fn test_drop_creates_node_at_pointer() {
    let mut editor = demo_editor();
    let payload = r#"{"id":"email-sender","name":"Email Sender","description":"Send emails"}"#;
    let id = editor
        .drop_payload(payload, Point::new(1000.0, 700.0))
        .expect("node created");

    assert!(id.as_str().starts_with("email-sender-"));
    assert_eq!(id.as_str().len(), "email-sender-".len() + 8);
    let node = editor.graph().node(id.as_str()).unwrap();
    assert_eq!(node.type_tag(), "email-sender");
    assert_eq!(node.label(), "Email Sender");
    assert_eq!(node.kind.description(), "Send emails");
    assert_eq!(node.position, Point::new(1000.0, 700.0));
    assert_eq!(editor.graph().node_count(), 10);
    assert_eq!(editor.graph().edge_count(), 8);
    assert!(editor.graph().edges().iter().all(|e| !e.touches(&id)));
}

#[test]
fn test_drop_converts_through_viewport() {
    let mut editor = demo_editor();
    for _ in 0..10 {
        editor.zoom_in();
    }
    drag(&mut editor, EMPTY_CANVAS, EMPTY_CANVAS + Vector::new(100.0, 50.0));

    let id = editor
        .drop_payload(
            r#"{"id":"agent","name":"Second Agent"}"#,
            Point::new(300.0, 250.0),
        )
        .unwrap();
    let node = editor.graph().node(id.as_str()).unwrap();
    assert_eq!(node.position, Point::new(100.0, 100.0));
    assert!(matches!(node.kind, NodeKind::Agent(_)));
}

#[test]
fn test_repeated_drops_get_distinct_ids() {
    let mut editor = demo_editor();
    let payload = r#"{"id":"calculator","name":"Calculator"}"#;
    let first = editor.drop_payload(payload, Point::new(10.0, 10.0)).unwrap();
    let second = editor.drop_payload(payload, Point::new(10.0, 10.0)).unwrap();
    assert_ne!(first, second);
    assert_eq!(editor.graph().node_count(), 11);
}

#[test]
fn test_malformed_drop_payload_is_ignored() {
    let mut editor = demo_editor();
    for payload in [
        "",
        "not json",
        r#"{"name":"Missing id"}"#,
        r#"{"id":"   ","name":"Blank id"}"#,
        r#"["webhook"]"#,
    ] {
        assert_eq!(editor.drop_payload(payload, Point::new(0.0, 0.0)), None);
    }
    assert_eq!(editor.graph().node_count(), 9);
}

// --- View controls ---

#[test]
fn test_zoom_buttons_and_reset() {
    let mut editor = demo_editor();
    for _ in 0..20 {
        editor.zoom_out();
    }
    assert_eq!(editor.viewport().zoom(), 0.5);
    drag(&mut editor, EMPTY_CANVAS, EMPTY_CANVAS + Vector::new(30.0, 30.0));

    editor.reset_view();
    assert_eq!(editor.viewport().zoom(), 1.0);
    assert_eq!(editor.viewport().pan(), Vector::ZERO);
}

#[test]
fn test_fit_view_shows_every_node() {
    let mut editor = demo_editor();
    editor.fit_view(800.0, 600.0);

    for node in editor.graph().nodes() {
        let rect = kairo::layout::node_rect(node);
        let top_left = editor.viewport().to_screen(rect.origin);
        let bottom_right =
            editor
                .viewport()
                .to_screen(Point::new(rect.right(), rect.bottom()));
        assert!(top_left.x >= 0.0 && top_left.y >= 0.0, "{} off screen", node.id);
        assert!(
            bottom_right.x <= 800.0 && bottom_right.y <= 600.0,
            "{} off screen",
            node.id
        );
    }
}

#[test]
fn test_custom_zoom_limits() {
    let mut editor = FlowEditor::builder()
        .with_zoom_limits(0.8, 1.2)
        .build()
        .unwrap();
    for _ in 0..10 {
        editor.zoom_in();
    }
    assert!((editor.viewport().zoom() - 1.2).abs() < 1e-9);
}

#[test]
fn test_invalid_config_is_rejected_by_builder() {
    let result = FlowEditor::builder().with_zoom_limits(2.0, 0.5).build();
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_panel_toggles() {
    let mut editor = FlowEditor::new();
    editor.toggle_sidebar();
    assert!(!editor.panels().sidebar_visible);
    assert!(editor.panels().config_panel_visible);
    editor.toggle_config_panel();
    editor.set_sidebar_visible(true);
    assert_eq!(
        editor.panels(),
        PanelLayout {
            sidebar_visible: true,
            config_panel_visible: false,
        }
    );
}
