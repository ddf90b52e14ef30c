//! # Core Data Models
//!
//! Plain data records for the workflow graph: nodes, connections and the
//! `GraphState` that holds both. Records are replaced or patched through the
//! document; they carry no behavior beyond geometry helpers.
//!
//! Field names follow the workflow file format (`shapeType`, `strokeColor`,
//! `fromSide`, ...), so these types serialize directly into exported files.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::math::Rect;
use crate::shapes::ShapeType;

/// Unique identifier for a Node, stable across export and import.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

/// Unique identifier for a Connection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl NodeId {
    /// Generates a fresh `node_<uuid>` identifier.
    pub fn generate() -> Self {
        Self(format!("node_{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ConnectionId {
    /// Generates a fresh `conn_<uuid>` identifier.
    pub fn generate() -> Self {
        Self(format!("conn_{}", uuid::Uuid::new_v4().simple()))
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

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The functional kind of a node. Drives which inspector form is shown.
///
/// Serialized as the plain `type` string. Strings outside the known set are
/// kept verbatim in `Generic` so they survive a round trip.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Start,
    End,
    Process,
    Decision,
    Input,
    Output,
    Database,
    Connector,
    Notification,
    Generic(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Database => "database",
            NodeKind::Connector => "connector",
            NodeKind::Notification => "notification",
            NodeKind::Generic(other) => other,
        }
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "start" => NodeKind::Start,
            "end" => NodeKind::End,
            "process" => NodeKind::Process,
            "decision" => NodeKind::Decision,
            "input" => NodeKind::Input,
            "output" => NodeKind::Output,
            "database" => NodeKind::Database,
            "connector" => NodeKind::Connector,
            "notification" => NodeKind::Notification,
            _ => NodeKind::Generic(value),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Generic(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific node settings, keyed by field id.
pub type NodeConfig = BTreeMap<String, Value>;

/// A Node in the workflow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub shape_type: ShapeType,
    /// Fill color, `#rrggbb`.
    pub color: String,
    /// Stroke color, `#rrggbb`.
    pub stroke_color: String,
    /// Logical position of the top-left corner (unscaled, unpanned).
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub config: NodeConfig,
}

impl Node {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position(), self.size())
    }

    /// Logical point in the middle of the given edge.
    pub fn anchor(&self, side: Side) -> Vec2 {
        match side {
            Side::Top => Vec2::new(self.x + self.width / 2.0, self.y),
            Side::Right => Vec2::new(self.x + self.width, self.y + self.height / 2.0),
            Side::Bottom => Vec2::new(self.x + self.width / 2.0, self.y + self.height),
            Side::Left => Vec2::new(self.x, self.y + self.height / 2.0),
        }
    }
}

/// Edge of a node a connection attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Unit vector pointing out of the node through this side (y grows downwards).
    pub fn normal(self) -> Vec2 {
        match self {
            Side::Top => Vec2::new(0.0, -1.0),
            Side::Right => Vec2::new(1.0, 0.0),
            Side::Bottom => Vec2::new(0.0, 1.0),
            Side::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// A directed Connection between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
    pub from_side: Side,
    pub to_side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    /// A connection leaving the bottom of `from` and entering the top of `to`.
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            id: ConnectionId::generate(),
            from,
            to,
            from_side: Side::Bottom,
            to_side: Side::Top,
            label: None,
        }
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        &self.from == node || &self.to == node
    }
}

/// Partial update of a node. `None` fields are left untouched.
///
/// Config entries in `config` are merged key by key; keys listed in
/// `remove_config` are deleted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeUpdate {
    pub label: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub stroke_color: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub config: NodeConfig,
    pub remove_config: Vec<String>,
}

impl NodeUpdate {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn config_entry(key: impl Into<String>, value: Value) -> Self {
        let mut config = NodeConfig::new();
        config.insert(key.into(), value);
        Self {
            config,
            ..Default::default()
        }
    }

    /// Writes the update into `node`. Size validation is the caller's job.
    pub fn apply_to(&self, node: &mut Node) {
        if let Some(label) = &self.label {
            node.label = label.clone();
        }
        if let Some(description) = &self.description {
            node.description = if description.is_empty() {
                None
            } else {
                Some(description.clone())
            };
        }
        if let Some(color) = &self.color {
            node.color = color.clone();
        }
        if let Some(stroke) = &self.stroke_color {
            node.stroke_color = stroke.clone();
        }
        if let Some(x) = self.x {
            node.x = x;
        }
        if let Some(y) = self.y {
            node.y = y;
        }
        if let Some(width) = self.width {
            node.width = width;
        }
        if let Some(height) = self.height {
            node.height = height;
        }
        for (key, value) in &self.config {
            node.config.insert(key.clone(), value.clone());
        }
        for key in &self.remove_config {
            node.config.remove(key);
        }
    }
}

/// The entire state of the graph, and the unit of undo/redo.
///
/// Nodes are kept in insertion order, which is also the draw order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl GraphState {
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn insert_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Removes a node and every connection incident to it.
    ///
    /// Returns the node and the removed connections, or `None` if the node
    /// does not exist (in which case nothing changes).
    pub fn remove_node(&mut self, id: &NodeId) -> Option<(Node, Vec<Connection>)> {
        let index = self.nodes.iter().position(|n| &n.id == id)?;
        let node = self.nodes.remove(index);
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| c.touches(id));
        self.connections = kept;
        Some((node, removed))
    }

    pub fn remove_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|c| &c.id == id)?;
        Some(self.connections.remove(index))
    }
}
