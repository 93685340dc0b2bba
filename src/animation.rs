use crate::curve::{ArrowGlyph, CubicBezier};
use crate::graph::{EdgeId, FlowGraph, NodeId, NodeRole};
use ahash::AHashSet;
use std::time::{Duration, Instant};

/// The traveling-arrow effect shown on edges related to the selected node.
///
/// Purely cosmetic: the set is replaced on every selection change and the phase is a
/// function of the time elapsed since it was started.
#[derive(Debug, Clone)]
pub struct FlowAnimation {
    edges: AHashSet<EdgeId>,
    started_at: Option<Instant>,
    cycle: Duration,
}

impl FlowAnimation {
    /// Repaint interval hosts should use while an animation is active (~60 Hz).
    pub const TICK: Duration = Duration::from_micros(16_667);

    pub fn new(cycle: Duration) -> Self {
        Self {
            edges: AHashSet::new(),
            started_at: None,
            cycle: cycle.max(Duration::from_millis(1)),
        }
    }

    pub fn start(&mut self, edges: AHashSet<EdgeId>, now: Instant) {
        if edges.is_empty() {
            self.clear();
            return;
        }
        self.edges = edges;
        self.started_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.started_at = None;
    }

    /// Stops animating a single edge, e.g. after it was deleted.
    pub fn forget(&mut self, edge: &str) {
        self.edges.remove(edge);
        if self.edges.is_empty() {
            self.started_at = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_animating(&self, edge: &str) -> bool {
        self.edges.contains(edge)
    }

    pub fn edges(&self) -> &AHashSet<EdgeId> {
        &self.edges
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// Position in the current cycle, in `[0, 1)`. Zero when inactive.
    pub fn phase(&self, now: Instant) -> f64 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(start).as_secs_f64();
        let cycle = self.cycle.as_secs_f64();
        (elapsed % cycle) / cycle
    }

    /// The arrow for `edge` at `now`, if that edge is animating.
    pub fn arrow(&self, edge: &str, curve: &CubicBezier, now: Instant) -> Option<ArrowGlyph> {
        self.is_animating(edge).then(|| curve.arrow_at(self.phase(now)))
    }
}

/// Edges to animate when `node` becomes selected.
///
/// * a processor lights up its trigger/tool inputs and every outgoing edge,
/// * a trigger or tool lights up its edges into processors,
/// * a sink lights up the edges it receives from processors.
pub fn edges_to_animate(graph: &FlowGraph, node: &NodeId) -> AHashSet<EdgeId> {
    let Some(selected) = graph.node(node.as_str()) else {
        return AHashSet::new();
    };
    let role_of = |id: &NodeId| graph.node(id.as_str()).map(|n| n.role());

    match selected.role() {
        NodeRole::Processor => graph
            .incoming(node)
            .filter(|e| {
                matches!(
                    role_of(&e.source),
                    Some(NodeRole::Trigger) | Some(NodeRole::Tool)
                )
            })
            .chain(graph.outgoing(node))
            .map(|e| e.id.clone())
            .collect(),
        NodeRole::Trigger | NodeRole::Tool => graph
            .outgoing(node)
            .filter(|e| role_of(&e.target) == Some(NodeRole::Processor))
            .map(|e| e.id.clone())
            .collect(),
        NodeRole::Sink => graph
            .incoming(node)
            .filter(|e| role_of(&e.source) == Some(NodeRole::Processor))
            .map(|e| e.id.clone())
            .collect(),
    }
}
