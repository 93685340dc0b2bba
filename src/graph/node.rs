use crate::geometry::Point;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Unique identifier of a node within a `FlowGraph`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The part a node plays in a flow. Drives which edges animate on selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Starts a flow (webhooks, schedules).
    Trigger,
    /// Capability handed to a processor (search, knowledge base, ...).
    Tool,
    /// Consumes triggers and tools and feeds downstream nodes.
    Processor,
    /// Receives the output of a processor.
    Sink,
}

/// Payload of an `agent` node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentData {
    pub label: String,
    pub description: String,
    pub instructions: String,
    pub memory: bool,
    pub tools_enabled: bool,
}

/// Payload of a `webhook` trigger node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookData {
    pub label: String,
    pub description: String,
    pub path: String,
}

/// Payload of an `observe` node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObserveData {
    pub label: String,
    pub description: String,
    pub log_inputs: bool,
}

/// Payload of any passthrough node type. The type tag is kept alongside.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenericData {
    #[serde(skip)]
    pub type_tag: String,
    pub label: String,
    pub description: String,
}

/// The closed set of node kinds, discriminated by the node's `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Agent(AgentData),
    Webhook(WebhookData),
    Observe(ObserveData),
    Generic(GenericData),
}

impl NodeKind {
    pub const AGENT: &'static str = "agent";
    pub const WEBHOOK: &'static str = "webhook";
    pub const OBSERVE: &'static str = "observe";

    /// Builds the kind for a freshly dropped palette item. Known tags get their
    /// typed payload with the remaining fields defaulted.
    pub fn from_palette(type_tag: &str, label: &str, description: &str) -> Self {
        match type_tag {
            Self::AGENT => NodeKind::Agent(AgentData {
                label: label.to_string(),
                description: description.to_string(),
                ..AgentData::default()
            }),
            Self::WEBHOOK => NodeKind::Webhook(WebhookData {
                label: label.to_string(),
                description: description.to_string(),
                ..WebhookData::default()
            }),
            Self::OBSERVE => NodeKind::Observe(ObserveData {
                label: label.to_string(),
                description: description.to_string(),
                ..ObserveData::default()
            }),
            other => NodeKind::Generic(GenericData {
                type_tag: other.to_string(),
                label: label.to_string(),
                description: description.to_string(),
            }),
        }
    }

    pub fn type_tag(&self) -> &str {
        match self {
            NodeKind::Agent(_) => Self::AGENT,
            NodeKind::Webhook(_) => Self::WEBHOOK,
            NodeKind::Observe(_) => Self::OBSERVE,
            NodeKind::Generic(data) => &data.type_tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeKind::Agent(data) => &data.label,
            NodeKind::Webhook(data) => &data.label,
            NodeKind::Observe(data) => &data.label,
            NodeKind::Generic(data) => &data.label,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            NodeKind::Agent(data) => &data.description,
            NodeKind::Webhook(data) => &data.description,
            NodeKind::Observe(data) => &data.description,
            NodeKind::Generic(data) => &data.description,
        }
    }

    pub fn role(&self) -> NodeRole {
        match self {
            NodeKind::Agent(_) => NodeRole::Processor,
            NodeKind::Webhook(_) => NodeRole::Trigger,
            NodeKind::Observe(_) => NodeRole::Sink,
            NodeKind::Generic(data) => role_for_tag(&data.type_tag),
        }
    }

    fn serialize_data<T: SerializeStruct>(&self, state: &mut T) -> Result<(), T::Error> {
        match self {
            NodeKind::Agent(data) => state.serialize_field("data", data),
            NodeKind::Webhook(data) => state.serialize_field("data", data),
            NodeKind::Observe(data) => state.serialize_field("data", data),
            NodeKind::Generic(data) => state.serialize_field("data", data),
        }
    }
}

/// Role of a passthrough node, inferred from its type tag.
fn role_for_tag(tag: &str) -> NodeRole {
    match tag {
        "webhook" | "schedule" => NodeRole::Trigger,
        "knowledge-base" | "calculator" | "code-interpreter" => NodeRole::Tool,
        "agent" => NodeRole::Processor,
        t if t.ends_with("-trigger") => NodeRole::Trigger,
        t if t.ends_with("-search") || t.ends_with("-tool") => NodeRole::Tool,
        _ => NodeRole::Sink,
    }
}

/// A positioned node on the canvas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawNode")]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Top-left corner in canvas space.
    pub position: Point,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, position: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
        }
    }

    pub fn type_tag(&self) -> &str {
        self.kind.type_tag()
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }

    pub fn role(&self) -> NodeRole {
        self.kind.role()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.type_tag())?;
        state.serialize_field("position", &self.position)?;
        self.kind.serialize_data(&mut state)?;
        state.end()
    }
}

/// Wire shape of a node: `{ id, type, position, data }` with an untyped data bag.
#[derive(Deserialize)]
struct RawNode {
    id: NodeId,
    #[serde(rename = "type")]
    type_tag: String,
    position: Point,
    #[serde(default)]
    data: serde_json::Value,
}

impl TryFrom<RawNode> for Node {
    type Error = serde_json::Error;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let data = if raw.data.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            raw.data
        };
        let kind = match raw.type_tag.as_str() {
            NodeKind::AGENT => NodeKind::Agent(serde_json::from_value(data)?),
            NodeKind::WEBHOOK => NodeKind::Webhook(serde_json::from_value(data)?),
            NodeKind::OBSERVE => NodeKind::Observe(serde_json::from_value(data)?),
            _ => {
                let mut generic: GenericData = serde_json::from_value(data)?;
                generic.type_tag = raw.type_tag;
                NodeKind::Generic(generic)
            }
        };
        Ok(Node {
            id: raw.id,
            kind,
            position: raw.position,
        })
    }
}
