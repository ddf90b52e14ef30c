//! # Workflow Files
//!
//! Export and import of a whole document as JSON:
//!
//! ```json
//! { "name": "...", "nodes": [...], "connections": [...], "version": "1.0" }
//! ```
//!
//! Import is all-or-nothing: the file is parsed and validated in full before
//! the document is touched.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::document::{GraphDocument, validate_connection, validate_node};
use crate::error::{CanvasError, Result};
use crate::model::{Connection, GraphState, Node};

/// Version tag written into every exported file.
pub const WORKFLOW_FORMAT_VERSION: &str = "1.0";

/// Name used when an imported file has none.
pub const IMPORTED_WORKFLOW_NAME: &str = "Imported Workflow";

/// A serializable snapshot of a workflow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkflow {
    pub name: String,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub version: String,
}

/// The shape accepted on import: every top-level key is optional.
#[derive(Debug, Default, Deserialize)]
struct WorkflowFile {
    name: Option<String>,
    nodes: Option<Vec<Node>>,
    connections: Option<Vec<Connection>>,
    version: Option<String>,
}

impl GraphDocument {
    pub fn export(&self) -> SavedWorkflow {
        SavedWorkflow {
            name: self.name().to_string(),
            nodes: self.nodes().to_vec(),
            connections: self.connections().to_vec(),
            version: WORKFLOW_FORMAT_VERSION.to_string(),
        }
    }

    /// Pretty-printed JSON of [`GraphDocument::export`].
    pub fn export_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(&self.export())?;
        info!(
            name = %self.name(),
            nodes = self.nodes().len(),
            connections = self.connections().len(),
            "Workflow exported"
        );
        Ok(json)
    }

    /// Suggested download name: whitespace runs become `_`, plus `.json`.
    pub fn export_file_name(&self) -> String {
        let stem = self.name().split_whitespace().collect::<Vec<_>>().join("_");
        format!("{stem}.json")
    }

    /// Replaces the document with the workflow in `json`.
    ///
    /// Missing `nodes` / `connections` mean an empty list; a missing `name`
    /// becomes [`IMPORTED_WORKFLOW_NAME`]. On error the document is unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let result = parse_workflow(json);
        match result {
            Ok((name, graph)) => {
                self.replace(name, graph);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Workflow import rejected");
                Err(err)
            }
        }
    }

    /// Replaces the document with an already deserialized workflow, after validation.
    pub fn import(&mut self, saved: SavedWorkflow) -> Result<()> {
        check_version(Some(&saved.version))?;
        let graph = GraphState {
            nodes: saved.nodes,
            connections: saved.connections,
        };
        validate_graph(&graph)?;
        self.replace(imported_name(Some(saved.name)), graph);
        Ok(())
    }
}

fn parse_workflow(json: &str) -> Result<(String, GraphState)> {
    let file: WorkflowFile = serde_json::from_str(json)?;
    check_version(file.version.as_deref())?;
    let graph = GraphState {
        nodes: file.nodes.unwrap_or_default(),
        connections: file.connections.unwrap_or_default(),
    };
    validate_graph(&graph)?;
    Ok((imported_name(file.name), graph))
}

fn imported_name(name: Option<String>) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| IMPORTED_WORKFLOW_NAME.to_string())
}

fn check_version(version: Option<&str>) -> Result<()> {
    match version {
        None => Ok(()),
        Some(v) if v == WORKFLOW_FORMAT_VERSION => Ok(()),
        Some(v) => Err(CanvasError::UnsupportedVersion(v.to_string())),
    }
}

/// Unique ids, sane geometry, and connections between distinct existing nodes.
fn validate_graph(graph: &GraphState) -> Result<()> {
    let mut node_ids = HashSet::new();
    for node in &graph.nodes {
        validate_node(node)?;
        if !node_ids.insert(&node.id) {
            return Err(CanvasError::DuplicateNodeId(node.id.clone()));
        }
    }

    let mut connection_ids = HashSet::new();
    for connection in &graph.connections {
        validate_connection(graph, connection)?;
        if !connection_ids.insert(&connection.id) {
            return Err(CanvasError::DuplicateConnectionId(connection.id.clone()));
        }
    }
    Ok(())
}
