//! # Graph Document
//!
//! `GraphDocument` is the single owner of the workflow: its name, the live
//! `GraphState` and the undo history. Every mutation goes through it, and
//! every mutation is reported as a `DocumentEvent` that the host drains to
//! refresh whatever presents the document.
//!
//! Structural mutations (add, duplicate, delete, connect, disconnect, import)
//! record one history snapshot each. Property edits (`update_node`) and
//! intermediate drag moves (`set_node_position`) do not; the caller records
//! them with `commit` when the edit is complete.

use glam::Vec2;
use tracing::{debug, info};

use crate::config::CanvasConfig;
use crate::error::{CanvasError, Result};
use crate::history::HistoryManager;
use crate::model::{Connection, ConnectionId, GraphState, Node, NodeId, NodeUpdate};
use crate::palette::NodeTemplate;

/// Name given to a fresh document.
pub const DEFAULT_WORKFLOW_NAME: &str = "Workflow mới";

/// Change notifications emitted by the document.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentEvent {
    NodeAdded(NodeId),
    NodeUpdated(NodeId),
    NodeMoved(NodeId),
    /// A node was deleted together with the listed connections.
    NodeRemoved {
        id: NodeId,
        connections: Vec<ConnectionId>,
    },
    ConnectionAdded(ConnectionId),
    ConnectionRemoved(ConnectionId),
    Renamed(String),
    /// The whole graph was replaced from a workflow file.
    Imported { name: String },
    /// The live state was replaced by an undo or redo.
    HistoryRestored { index: usize },
}

#[derive(Clone, Debug)]
pub struct GraphDocument {
    name: String,
    graph: GraphState,
    history: HistoryManager<GraphState>,
    duplicate_offset: f32,
    events: Vec<DocumentEvent>,
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self::new(DEFAULT_WORKFLOW_NAME)
    }
}

impl GraphDocument {
    /// Creates an empty document using the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &CanvasConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: &CanvasConfig) -> Self {
        Self::from_graph(name, GraphState::default(), config)
    }

    /// Wraps an existing graph. The graph becomes the first history entry.
    pub fn from_graph(name: impl Into<String>, graph: GraphState, config: &CanvasConfig) -> Self {
        let mut history = HistoryManager::new(config.max_history);
        history.push(graph.clone());
        Self {
            name: name.into(),
            graph,
            history,
            duplicate_offset: config.duplicate_offset,
            events: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.events.push(DocumentEvent::Renamed(self.name.clone()));
    }

    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.graph.connections
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.graph.connection(id)
    }

    pub fn history(&self) -> &HistoryManager<GraphState> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Takes the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.events)
    }

    /// Appends a node and records a snapshot.
    pub fn add_node(&mut self, node: Node) -> Result<NodeId> {
        validate_node(&node)?;
        if self.graph.contains_node(&node.id) {
            return Err(CanvasError::DuplicateNodeId(node.id));
        }
        let id = node.id.clone();
        debug!(node_id = %id, kind = %node.kind, x = node.x, y = node.y, "Node added");
        self.graph.insert_node(node);
        self.events.push(DocumentEvent::NodeAdded(id.clone()));
        self.commit();
        Ok(id)
    }

    /// Stamps `template` at `position` (logical space, already snapped).
    pub fn add_node_from_template(
        &mut self,
        template: &NodeTemplate,
        position: Vec2,
    ) -> Result<NodeId> {
        self.add_node(template.instantiate(position))
    }

    /// Copies a node under a fresh id, offset down-right, with " (copy)" appended to the label.
    pub fn duplicate_node(&mut self, id: &NodeId) -> Result<NodeId> {
        let source = self
            .graph
            .node(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        let mut copy = source.clone();
        copy.id = NodeId::generate();
        copy.x += self.duplicate_offset;
        copy.y += self.duplicate_offset;
        copy.label = format!("{} (copy)", source.label);
        self.add_node(copy)
    }

    /// Deletes a node and every connection touching it.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<Node> {
        let (node, removed) = self
            .graph
            .remove_node(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        debug!(node_id = %id, removed_connections = removed.len(), "Node deleted");
        self.events.push(DocumentEvent::NodeRemoved {
            id: id.clone(),
            connections: removed.into_iter().map(|c| c.id).collect(),
        });
        self.commit();
        Ok(node)
    }

    /// Connects the bottom of `from` to the top of `to`.
    pub fn connect(&mut self, from: &NodeId, to: &NodeId) -> Result<ConnectionId> {
        self.add_connection(Connection::new(from.clone(), to.clone()))
    }

    /// Appends a connection after checking its endpoints, and records a snapshot.
    pub fn add_connection(&mut self, connection: Connection) -> Result<ConnectionId> {
        validate_connection(&self.graph, &connection)?;
        if self.graph.connection(&connection.id).is_some() {
            return Err(CanvasError::DuplicateConnectionId(connection.id));
        }
        let id = connection.id.clone();
        debug!(connection_id = %id, from = %connection.from, to = %connection.to, "Connection added");
        self.graph.connections.push(connection);
        self.events.push(DocumentEvent::ConnectionAdded(id.clone()));
        self.commit();
        Ok(id)
    }

    pub fn delete_connection(&mut self, id: &ConnectionId) -> Result<Connection> {
        let connection = self
            .graph
            .remove_connection(id)
            .ok_or_else(|| CanvasError::ConnectionNotFound(id.clone()))?;
        debug!(connection_id = %id, "Connection deleted");
        self.events.push(DocumentEvent::ConnectionRemoved(id.clone()));
        self.commit();
        Ok(connection)
    }

    /// Applies a partial update to a node without recording a snapshot.
    ///
    /// The update is rejected as a whole if it would leave the node with a
    /// non-positive size or a non-finite position.
    pub fn update_node(&mut self, id: &NodeId, update: &NodeUpdate) -> Result<()> {
        let node = self
            .graph
            .node_mut(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        let mut patched = node.clone();
        update.apply_to(&mut patched);
        validate_node(&patched)?;
        *node = patched;
        self.events.push(DocumentEvent::NodeUpdated(id.clone()));
        Ok(())
    }

    /// Moves a node without recording a snapshot. Used for intermediate drag positions.
    pub fn set_node_position(&mut self, id: &NodeId, position: Vec2) -> Result<()> {
        if !position.is_finite() {
            return Err(CanvasError::NonFinitePosition(id.clone()));
        }
        let node = self
            .graph
            .node_mut(id)
            .ok_or_else(|| CanvasError::NodeNotFound(id.clone()))?;
        if node.position() != position {
            node.set_position(position);
            self.events.push(DocumentEvent::NodeMoved(id.clone()));
        }
        Ok(())
    }

    /// Records the live state as a new history entry.
    pub fn commit(&mut self) {
        self.history.push(self.graph.clone());
    }

    /// Restores the previous snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.graph = snapshot.clone();
                self.restored();
                true
            }
            None => false,
        }
    }

    /// Restores the next snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.graph = snapshot.clone();
                self.restored();
                true
            }
            None => false,
        }
    }

    fn restored(&mut self) {
        let index = self.history.index();
        debug!(index, "History restored");
        self.events.push(DocumentEvent::HistoryRestored { index });
    }

    /// Swaps in an already validated graph and records a snapshot.
    pub(crate) fn replace(&mut self, name: String, graph: GraphState) {
        info!(
            name = %name,
            nodes = graph.nodes.len(),
            connections = graph.connections.len(),
            "Workflow imported"
        );
        self.name = name.clone();
        self.graph = graph;
        self.events.push(DocumentEvent::Imported { name });
        self.commit();
    }
}

/// Checks node geometry: finite position, strictly positive finite size.
pub(crate) fn validate_node(node: &Node) -> Result<()> {
    if !node.x.is_finite() || !node.y.is_finite() {
        return Err(CanvasError::NonFinitePosition(node.id.clone()));
    }
    let size_ok = |v: f32| v.is_finite() && v > 0.0;
    if !size_ok(node.width) || !size_ok(node.height) {
        return Err(CanvasError::InvalidNodeSize {
            id: node.id.clone(),
            width: node.width,
            height: node.height,
        });
    }
    Ok(())
}

/// Checks that both endpoints exist and differ.
pub(crate) fn validate_connection(graph: &GraphState, connection: &Connection) -> Result<()> {
    if connection.from == connection.to {
        return Err(CanvasError::SelfLoop(connection.from.clone()));
    }
    for endpoint in [&connection.from, &connection.to] {
        if !graph.contains_node(endpoint) {
            return Err(CanvasError::DanglingConnection {
                connection: connection.id.clone(),
                node: endpoint.clone(),
            });
        }
    }
    Ok(())
}
