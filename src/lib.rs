//! # Kairo - Flow Canvas Editor Engine
//!
//! **Kairo** is the engine behind a drag-and-drop flow editor for node-based agent
//! builders. It owns the node/edge graph, the pan/zoom viewport, the pointer gesture
//! state machine and selection, and derives a paintable scene from them. It is
//! framework-agnostic: a host UI forwards pointer events in screen coordinates and
//! paints the `Scene` it gets back.
//!
//! ## Core Workflow
//!
//! 1.  **Create an Editor**: `FlowEditor::builder()` seeds the demonstration flow (or a
//!     graph of your own) and takes an optional `SelectionListener`.
//! 2.  **Forward Events**: Call `pointer_down`, `pointer_move` and `pointer_up` with
//!     screen coordinates. The editor pans, drags nodes, draws connections, and selects
//!     or deletes elements depending on what lies under the pointer.
//! 3.  **Drop From the Palette**: Pass the sidebar's JSON drag payload to `drop_payload`
//!     to create a node where it was released.
//! 4.  **Paint**: `scene_at(now)` returns node rectangles, edge curves, the live
//!     connection preview and animated arrows. `Scene::to_svg` renders it directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Build an editor on the demonstration flow, recording selection changes.
//!     let mut editor = FlowEditor::builder()
//!         .with_listener(RecordingListener::default())
//!         .build()?;
//!
//!     // 2. Click the agent node: it becomes selected and its edges start animating.
//!     editor.click(Point::new(560.0, 360.0));
//!     println!("Selected: {:?}", editor.selection());
//!     println!("Notifications: {:?}", editor.listener().events());
//!
//!     // 3. Drop a new node from the palette.
//!     let payload = r#"{"id":"email-sender","name":"Email Sender","description":"Send emails"}"#;
//!     if let Some(id) = editor.drop_payload(payload, Point::new(1000.0, 700.0)) {
//!         println!("Created node {}", id);
//!     }
//!
//!     // 4. Paint the result.
//!     let svg = editor.scene().to_svg(&SvgOptions::default());
//!     std::fs::write("flow.svg", svg)?;
//!     Ok(())
//! }
//! ```

pub mod animation;
pub mod config;
pub mod curve;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod palette;
pub mod prelude;
pub mod render;
pub mod script;
pub mod viewport;
