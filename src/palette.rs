use crate::error::PayloadError;
use serde::{Deserialize, Serialize};

/// The descriptor a sidebar item carries through a drag-and-drop transfer.
///
/// On the wire it is the JSON string `{"id": ..., "name": ..., "description": ...}`,
/// where `id` becomes the dropped node's type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl PaletteItem {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Decodes a drop payload. The type tag must not be blank.
    pub fn from_json(payload: &str) -> Result<Self, PayloadError> {
        let item: PaletteItem =
            serde_json::from_str(payload).map_err(|e| PayloadError::Json(e.to_string()))?;
        if item.id.trim().is_empty() {
            return Err(PayloadError::EmptyField("id"));
        }
        Ok(item)
    }

    /// Encodes the item as a drag payload.
    pub fn to_json(&self) -> Result<String, PayloadError> {
        serde_json::to_string(self).map_err(|e| PayloadError::Json(e.to_string()))
    }
}

/// A titled group of palette items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteCategory {
    pub title: String,
    pub items: Vec<PaletteItem>,
}

/// The node catalog shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub categories: Vec<PaletteCategory>,
}

impl Default for Palette {
    fn default() -> Self {
        let category = |title: &str, items: &[(&str, &str, &str)]| PaletteCategory {
            title: title.to_string(),
            items: items
                .iter()
                .map(|(id, name, description)| PaletteItem::new(id, name, description))
                .collect(),
        };
        Self {
            categories: vec![
                category(
                    "Triggers",
                    &[
                        ("webhook", "Webhook", "Start a flow from an HTTP request"),
                        ("schedule", "Schedule", "Start a flow on a timer"),
                    ],
                ),
                category(
                    "Agents",
                    &[("agent", "AI Agent", "Reason over inputs with a language model")],
                ),
                category(
                    "Tools",
                    &[
                        ("web-search", "Web Search", "Search the web"),
                        ("knowledge-base", "Knowledge Base", "Query internal documents"),
                        ("calculator", "Calculator", "Evaluate arithmetic"),
                        ("code-interpreter", "Code Interpreter", "Run sandboxed code"),
                    ],
                ),
                category(
                    "Outputs",
                    &[
                        ("observe", "Observe", "Trace and log activity"),
                        ("slack-notify", "Slack Notification", "Post to a channel"),
                        ("email-sender", "Email Sender", "Send emails"),
                    ],
                ),
            ],
        }
    }
}

impl Palette {
    pub fn items(&self) -> impl Iterator<Item = &PaletteItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    pub fn find(&self, id: &str) -> Option<&PaletteItem> {
        self.items().find(|item| item.id == id)
    }

    /// Case-insensitive search over item names and descriptions, as the sidebar filter does.
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a PaletteItem> {
        let query = query.trim().to_lowercase();
        self.items()
            .filter(|item| {
                query.is_empty()
                    || item.name.to_lowercase().contains(&query)
                    || item.description.to_lowercase().contains(&query)
            })
            .collect()
    }
}
