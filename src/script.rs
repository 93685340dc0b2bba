//! Serializable editor events, for replaying recorded sessions against an editor.

use crate::editor::{FlowEditor, SelectionListener};
use crate::geometry::Point;
use crate::interaction::PointerButton;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One host-originated event. Coordinates are in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    Click {
        x: f64,
        y: f64,
    },
    /// Press at `from`, move to `to`, release.
    Drag {
        from: Point,
        to: Point,
    },
    ZoomIn,
    ZoomOut,
    ResetView,
    ZoomAt {
        factor: f64,
        x: f64,
        y: f64,
    },
    FitView {
        width: f64,
        height: f64,
    },
    /// A palette drop; `payload` is the raw drag-transfer string.
    Drop {
        payload: String,
        x: f64,
        y: f64,
    },
    SelectNode {
        id: String,
    },
    SelectEdge {
        id: String,
    },
    ClearSelection,
    DeleteSelection,
    Cancel,
    ToggleSidebar,
    ToggleConfigPanel,
}

impl EditorEvent {
    /// Parses a JSON array of events.
    pub fn parse_script(json: &str) -> Result<Vec<EditorEvent>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<L: SelectionListener> FlowEditor<L> {
    /// Applies a single event.
    pub fn apply(&mut self, event: &EditorEvent) {
        debug!(?event, "applying event");
        match event {
            EditorEvent::PointerDown { x, y, button } => {
                self.pointer_down(Point::new(*x, *y), *button)
            }
            EditorEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            EditorEvent::PointerUp { x, y } => self.pointer_up(Point::new(*x, *y)),
            EditorEvent::Click { x, y } => self.click(Point::new(*x, *y)),
            EditorEvent::Drag { from, to } => {
                self.pointer_down(*from, PointerButton::Primary);
                self.pointer_move(*to);
                self.pointer_up(*to);
            }
            EditorEvent::ZoomIn => self.zoom_in(),
            EditorEvent::ZoomOut => self.zoom_out(),
            EditorEvent::ResetView => self.reset_view(),
            EditorEvent::ZoomAt { factor, x, y } => self.zoom_at(*factor, Point::new(*x, *y)),
            EditorEvent::FitView { width, height } => self.fit_view(*width, *height),
            EditorEvent::Drop { payload, x, y } => {
                self.drop_payload(payload, Point::new(*x, *y));
            }
            EditorEvent::SelectNode { id } => {
                self.select_node(id);
            }
            EditorEvent::SelectEdge { id } => {
                self.select_edge(id);
            }
            EditorEvent::ClearSelection => self.clear_selection(),
            EditorEvent::DeleteSelection => {
                self.delete_selection();
            }
            EditorEvent::Cancel => self.cancel_gesture(),
            EditorEvent::ToggleSidebar => self.toggle_sidebar(),
            EditorEvent::ToggleConfigPanel => self.toggle_config_panel(),
        }
    }

    /// Applies events in order.
    pub fn replay<'a>(&mut self, events: impl IntoIterator<Item = &'a EditorEvent>) {
        for event in events {
            self.apply(event);
        }
    }
}
