//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kairo crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let config = EditorConfig::from_file("path/to/editor.json")?;
//! let mut editor = FlowEditor::builder().with_config(config).build()?;
//!
//! editor.zoom_in();
//! editor.pointer_down(Point::new(100.0, 100.0), PointerButton::Primary);
//! editor.pointer_move(Point::new(140.0, 120.0));
//! editor.pointer_up(Point::new(140.0, 120.0));
//!
//! println!("Pan is now {:?}", editor.viewport().pan());
//! # Ok(())
//! # }
//! ```

// Editor and its collaborators
pub use crate::editor::{
    FlowEditor, FlowEditorBuilder, NullListener, RecordingListener, SelectionEvent,
    SelectionListener,
};
pub use crate::interaction::{Gesture, HitTarget, PanelLayout, PointerButton, Selection};
pub use crate::script::EditorEvent;

// Graph model
pub use crate::graph::{
    AgentData, Edge, EdgeId, FlowGraph, GenericData, Node, NodeId, NodeKind, NodeRole,
    ObserveData, WebhookData,
};

// Geometry, viewport and rendering
pub use crate::curve::{ArrowGlyph, CubicBezier};
pub use crate::geometry::{Point, Rect, Vector};
pub use crate::render::{Scene, SvgOptions};
pub use crate::viewport::Viewport;

// Palette and configuration
pub use crate::config::EditorConfig;
pub use crate::palette::{Palette, PaletteItem};

// Error types
pub use crate::error::{ConfigError, GraphError, PayloadError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
