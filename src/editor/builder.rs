use super::{FlowEditor, NullListener, SelectionListener};
use crate::animation::FlowAnimation;
use crate::config::EditorConfig;
use crate::error::ConfigError;
use crate::graph::{FlowGraph, seed};
use crate::interaction::{Gesture, PanelLayout, Selection};
use crate::viewport::Viewport;

/// Configures and creates a `FlowEditor`.
pub struct FlowEditorBuilder<L = NullListener> {
    config: EditorConfig,
    graph: Option<FlowGraph>,
    panels: PanelLayout,
    listener: L,
}

impl FlowEditorBuilder<NullListener> {
    pub fn new() -> Self {
        Self {
            config: EditorConfig::default(),
            graph: None,
            panels: PanelLayout::default(),
            listener: NullListener,
        }
    }
}

impl Default for FlowEditorBuilder<NullListener> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SelectionListener> FlowEditorBuilder<L> {
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.config.min_zoom = min_zoom;
        self.config.max_zoom = max_zoom;
        self
    }

    /// Starts from `graph` instead of the demonstration flow.
    pub fn with_graph(mut self, graph: FlowGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn with_panels(mut self, panels: PanelLayout) -> Self {
        self.panels = panels;
        self
    }

    /// Replaces the selection listener.
    pub fn with_listener<M: SelectionListener>(self, listener: M) -> FlowEditorBuilder<M> {
        FlowEditorBuilder {
            config: self.config,
            graph: self.graph,
            panels: self.panels,
            listener,
        }
    }

    /// Validates the config and creates the editor.
    pub fn build(self) -> Result<FlowEditor<L>, ConfigError> {
        self.config.validate()?;
        Ok(self.assemble())
    }

    pub(super) fn assemble(self) -> FlowEditor<L> {
        FlowEditor {
            graph: self.graph.unwrap_or_else(seed::demo_flow),
            viewport: Viewport::from_config(&self.config),
            animation: FlowAnimation::new(self.config.animation_cycle()),
            gesture: Gesture::Idle,
            selection: Selection::None,
            panels: self.panels,
            listener: self.listener,
            config: self.config,
        }
    }
}
