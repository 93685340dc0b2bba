use crate::error::GraphError;
use crate::geometry::{Point, Vector};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

mod edge;
mod node;
pub mod seed;

pub use edge::*;
pub use node::*;

/// The node/edge graph edited on the canvas.
///
/// The graph upholds three invariants on every mutation:
/// * node ids are unique,
/// * no two edges link the same unordered pair of nodes,
/// * every edge references existing nodes (removing a node cascades to its edges).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip)]
    index: AHashMap<NodeId, usize>,
}

#[derive(Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TryFrom<RawGraph> for FlowGraph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> Result<Self, Self::Error> {
        FlowGraph::from_parts(raw.nodes, raw.edges)
    }
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from raw parts, checking every invariant.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        if let Some(dup) = nodes.iter().map(|n| &n.id).duplicates().next() {
            return Err(GraphError::DuplicateNode(dup.clone()));
        }
        let mut graph = FlowGraph::new();
        for node in nodes {
            graph.add_node(node)?;
        }
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id.as_str() == id)
    }

    /// Returns `true` if an edge links `a` and `b` in either direction.
    pub fn are_connected(&self, a: &NodeId, b: &NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Edges whose source or target is `node`.
    pub fn edges_touching<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(node))
    }

    pub fn incoming<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == *node)
    }

    pub fn outgoing<'a>(&'a self, node: &'a NodeId) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == *node)
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        ensure_finite(&node.id, node.position)?;
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a node and every edge referencing it. Returns the node and the removed edges.
    pub fn remove_node(&mut self, id: &str) -> Result<(Node, Vec<Edge>), GraphError> {
        let position = self
            .index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))?;
        let node = self.nodes.remove(position);
        self.reindex();

        let (removed, kept): (Vec<Edge>, Vec<Edge>) = std::mem::take(&mut self.edges)
            .into_iter()
            .partition(|e| e.touches(&node.id));
        self.edges = kept;

        debug!(node = %node.id, cascaded = removed.len(), "removed node");
        Ok((node, removed))
    }

    /// Offsets a node by `delta` (canvas units) and returns its new position.
    pub fn move_node(&mut self, id: &str, delta: Vector) -> Result<Point, GraphError> {
        let node = self.node_mut(id)?;
        let moved = node.position + delta;
        ensure_finite(&node.id, moved)?;
        node.position = moved;
        Ok(moved)
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        ensure_finite(&node.id, position)?;
        node.position = position;
        Ok(())
    }

    /// Inserts an edge after checking endpoints, self-loops and unordered duplicates.
    ///
    /// A conventional `e-{source}-{target}` id already held by another node pair
    /// (e.g. `a -> b-c` versus `a-b -> c`) is replaced by a fresh one. Any other
    /// id clash is an error.
    pub fn add_edge(&mut self, mut edge: Edge) -> Result<&Edge, GraphError> {
        if edge.source == edge.target {
            return Err(GraphError::SelfLoop(edge.source));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint.as_str()) {
                return Err(GraphError::NodeNotFound(endpoint.clone()));
            }
        }
        if self.are_connected(&edge.source, &edge.target) {
            return Err(GraphError::DuplicateEdge {
                first: edge.source,
                second: edge.target,
            });
        }
        if self.edge(edge.id.as_str()).is_some() {
            if edge.id != EdgeId::between(&edge.source, &edge.target) {
                return Err(GraphError::DuplicateEdgeId(edge.id));
            }
            let fresh = self.unique_edge_id(edge.id.as_str());
            debug!(taken = %edge.id, id = %fresh, "conventional edge id taken, renamed");
            edge.id = fresh;
        }
        self.edges.push(edge);
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Connects two nodes with a conventionally named edge and returns its id.
    pub fn connect(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
    ) -> Result<EdgeId, GraphError> {
        self.add_edge(Edge::new(source, target)).map(|e| e.id.clone())
    }

    pub fn remove_edge(&mut self, id: &str) -> Result<Edge, GraphError> {
        let position = self
            .edges
            .iter()
            .position(|e| e.id.as_str() == id)
            .ok_or_else(|| GraphError::EdgeNotFound(EdgeId::from(id)))?;
        Ok(self.edges.remove(position))
    }

    /// Generates a node id that is not yet used, of the form `{prefix}-{suffix}`.
    pub fn unique_node_id(&self, prefix: &str) -> NodeId {
        loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let candidate = NodeId::new(format!("{}-{}", prefix, &suffix[..8]));
            if !self.contains_node(candidate.as_str()) {
                return candidate;
            }
        }
    }

    fn unique_edge_id(&self, prefix: &str) -> EdgeId {
        loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let candidate = EdgeId::new(format!("{}-{}", prefix, &suffix[..8]));
            if self.edge(candidate.as_str()).is_none() {
                return candidate;
            }
        }
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node, GraphError> {
        let position = self
            .index
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::from(id)))?;
        Ok(&mut self.nodes[position])
    }

    fn reindex(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }
}

fn ensure_finite(id: &NodeId, position: Point) -> Result<(), GraphError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(GraphError::NonFinitePosition {
            node_id: id.clone(),
            x: position.x,
            y: position.y,
        })
    }
}
