//! The demonstration flow the editor is seeded with on start-up.
//!
//! Five inputs (two triggers, three tools) feed a single support agent, which
//! fans out to three downstream nodes.

use super::{AgentData, Edge, FlowGraph, GenericData, Node, NodeKind, ObserveData, WebhookData};
use crate::geometry::Point;
use crate::layout;

pub const AGENT_ID: &str = "agent";

fn generic(id: &str, type_tag: &str, label: &str, description: &str, x: f64, y: f64) -> Node {
    Node::new(
        id,
        NodeKind::Generic(GenericData {
            type_tag: type_tag.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }),
        Point::new(x, y),
    )
}

/// Nodes of the demonstration flow, in paint order.
pub fn demo_nodes() -> Vec<Node> {
    vec![
        Node::new(
            "webhook",
            NodeKind::Webhook(WebhookData {
                label: "Webhook Trigger".to_string(),
                description: "Receives incoming support requests".to_string(),
                path: "/hooks/support".to_string(),
            }),
            Point::new(60.0, 40.0),
        ),
        generic(
            "schedule",
            "schedule",
            "Daily Schedule",
            "Runs every morning at 9:00",
            60.0,
            180.0,
        ),
        generic(
            "web-search",
            "web-search",
            "Web Search",
            "Search the web for answers",
            60.0,
            340.0,
        ),
        generic(
            "knowledge-base",
            "knowledge-base",
            "Knowledge Base",
            "Query internal documentation",
            60.0,
            470.0,
        ),
        generic(
            "calculator",
            "calculator",
            "Calculator",
            "Evaluate arithmetic expressions",
            60.0,
            600.0,
        ),
        Node::new(
            AGENT_ID,
            NodeKind::Agent(AgentData {
                label: "Support Agent".to_string(),
                description: "Answers customer questions".to_string(),
                instructions: "You are a helpful support agent. Use the available tools \
                               to research answers before replying."
                    .to_string(),
                memory: true,
                tools_enabled: true,
            }),
            Point::new(420.0, 280.0),
        ),
        Node::new(
            "observe",
            NodeKind::Observe(ObserveData {
                label: "Observe".to_string(),
                description: "Trace agent activity".to_string(),
                log_inputs: true,
            }),
            Point::new(840.0, 120.0),
        ),
        generic(
            "slack-notify",
            "slack-notify",
            "Slack Notification",
            "Post a summary to #support",
            840.0,
            320.0,
        ),
        generic(
            "email-sender",
            "email-sender",
            "Email Sender",
            "Send emails",
            840.0,
            500.0,
        ),
    ]
}

/// Edges of the demonstration flow: every input into the agent, the agent into every output.
/// Tools plug into the agent's `tools` handle.
pub fn demo_edges() -> Vec<Edge> {
    let triggers = ["webhook", "schedule"];
    let tools = ["web-search", "knowledge-base", "calculator"];
    let outputs = ["observe", "slack-notify", "email-sender"];
    triggers
        .iter()
        .map(|source| Edge::new(*source, AGENT_ID))
        .chain(tools.iter().map(|source| {
            Edge::new(*source, AGENT_ID).with_handles(None, Some(layout::TOOLS_INPUT))
        }))
        .chain(outputs.iter().map(|target| Edge::new(AGENT_ID, *target)))
        .collect()
}

/// The complete demonstration flow (9 nodes, 8 edges).
pub fn demo_flow() -> FlowGraph {
    let mut graph = FlowGraph::new();
    for node in demo_nodes() {
        if let Err(e) = graph.add_node(node) {
            tracing::warn!(error = %e, "skipping seed node");
        }
    }
    for edge in demo_edges() {
        if let Err(e) = graph.add_edge(edge) {
            tracing::warn!(error = %e, "skipping seed edge");
        }
    }
    graph
}
