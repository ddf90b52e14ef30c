//! # MAMCG Inspector
//!
//! This crate provides the headless logic for the node property inspector.
//! It turns the selected node into a form (see [`schema`]), validates edits
//! and writes them back to the document as partial updates.
//!
//! Edits are continuous (one per keystroke or toggle), so they are applied
//! without recording history; the host commits when the edit session ends.

pub mod schema;

use schema::{FieldTarget, FieldType, VisualField};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};
use workflow_canvas::document::GraphDocument;
use workflow_canvas::model::{Node, NodeId, NodeKind, NodeUpdate};
use workflow_canvas::{Canvas, CanvasError};

/// Value used when `x` or `y` cannot be parsed.
const FALLBACK_POSITION: f64 = 0.0;
const FALLBACK_WIDTH: f64 = 100.0;
const FALLBACK_HEIGHT: f64 = 60.0;

#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' is read-only")]
    ReadOnly(String),

    #[error("field '{0}' is required")]
    Required(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// What the inspector shows for the current selection.
#[derive(Debug)]
pub enum InspectorPanel {
    /// Nothing selected: no fields.
    Placeholder,
    Form(InspectorState),
}

impl InspectorPanel {
    pub fn for_selection(node: Option<&Node>) -> Self {
        match node {
            Some(node) => InspectorPanel::Form(InspectorState::for_node(node)),
            None => InspectorPanel::Placeholder,
        }
    }

    /// The panel for whatever node `canvas` has selected in `doc`.
    pub fn for_canvas(canvas: &Canvas, doc: &GraphDocument) -> Self {
        Self::for_selection(canvas.selected_node(doc))
    }

    pub fn fields(&self) -> &[VisualField] {
        match self {
            InspectorPanel::Placeholder => &[],
            InspectorPanel::Form(state) => &state.fields,
        }
    }
}

/// The state of the inspector for a specific node.
#[derive(Debug)]
pub struct InspectorState {
    pub node_id: NodeId,
    pub kind: NodeKind,
    /// The fields to display in the UI.
    pub fields: Vec<VisualField>,
    /// The current values of each field.
    pub values: HashMap<String, Value>,
    /// Validation errors for each field.
    pub errors: HashMap<String, String>,
}

impl InspectorState {
    /// Builds the form for `node`, reading current values from its
    /// properties and config (falling back to field defaults).
    pub fn for_node(node: &Node) -> Self {
        let fields = schema::fields_for_kind(&node.kind);
        let values = fields
            .iter()
            .filter_map(|field| current_value(node, field).map(|v| (field.id.clone(), v)))
            .collect();
        Self {
            node_id: node.id.clone(),
            kind: node.kind.clone(),
            fields,
            values,
            errors: HashMap::new(),
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&VisualField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }

    /// Updates the value of a field and performs validation.
    ///
    /// On success the value is stored and the matching partial update is
    /// returned; on failure the error is also recorded in `errors`.
    pub fn update_value(
        &mut self,
        field_id: &str,
        value: Value,
    ) -> Result<NodeUpdate, InspectorError> {
        let normalized = self.check(field_id, value)?;
        let update = self.build(field_id, &normalized)?;
        self.accept(field_id, normalized);
        Ok(update)
    }

    /// Validates an edit and writes it to the node. No history entry is recorded.
    ///
    /// The form keeps its previous value if the document rejects the update.
    pub fn apply(
        &mut self,
        doc: &mut GraphDocument,
        field_id: &str,
        value: Value,
    ) -> Result<(), InspectorError> {
        let normalized = self.check(field_id, value)?;
        let update = self.build(field_id, &normalized)?;
        if let Err(err) = doc.update_node(&self.node_id, &update) {
            let err = InspectorError::from(err);
            self.reject(field_id, &err);
            return Err(err);
        }
        self.accept(field_id, normalized);
        debug!(node_id = %self.node_id, field = field_id, "Node property updated");
        Ok(())
    }

    fn check(&mut self, field_id: &str, value: Value) -> Result<Value, InspectorError> {
        let field = self
            .field(field_id)
            .ok_or_else(|| InspectorError::UnknownField(field_id.to_string()))?;
        let result = validate(field, value);
        if let Err(err) = &result {
            self.reject(field_id, err);
        }
        result
    }

    fn build(&self, field_id: &str, value: &Value) -> Result<NodeUpdate, InspectorError> {
        self.field(field_id)
            .map(|field| build_update(field, value.clone()))
            .ok_or_else(|| InspectorError::UnknownField(field_id.to_string()))
    }

    fn accept(&mut self, field_id: &str, value: Value) {
        self.errors.remove(field_id);
        self.values.insert(field_id.to_string(), value);
    }

    fn reject(&mut self, field_id: &str, err: &InspectorError) {
        warn!(
            node_id = %self.node_id,
            field = field_id,
            error = %err,
            "Invalid inspector edit"
        );
        self.errors.insert(field_id.to_string(), err.to_string());
    }

    /// Deletes the inspected node through the canvas (cascading its
    /// connections) and clears the selection.
    pub fn delete(
        &self,
        canvas: &mut Canvas,
        doc: &mut GraphDocument,
    ) -> Result<Node, InspectorError> {
        let node = canvas.delete_node(doc, &self.node_id)?;
        canvas.clear_selection();
        Ok(node)
    }

    /// Returns true if all fields are valid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn current_value(node: &Node, field: &VisualField) -> Option<Value> {
    match &field.target {
        FieldTarget::Id => Some(Value::from(node.id.as_str())),
        FieldTarget::Label => Some(Value::from(node.label.as_str())),
        FieldTarget::Description => {
            Some(Value::from(node.description.clone().unwrap_or_default()))
        }
        // Positions are shown rounded; sizes as stored.
        FieldTarget::X => Some(Value::from(f64::from(node.x).round())),
        FieldTarget::Y => Some(Value::from(f64::from(node.y).round())),
        FieldTarget::Width => Some(Value::from(f64::from(node.width))),
        FieldTarget::Height => Some(Value::from(f64::from(node.height))),
        FieldTarget::Config(key) => node
            .config
            .get(key)
            .cloned()
            .or_else(|| field.default_value.clone()),
    }
}

/// Checks `value` against the field and returns it in canonical form.
fn validate(field: &VisualField, value: Value) -> Result<Value, InspectorError> {
    let invalid = |reason: &str| InspectorError::InvalidValue {
        field: field.id.clone(),
        reason: reason.to_string(),
    };

    if field.read_only {
        return Err(InspectorError::ReadOnly(field.id.clone()));
    }

    match &field.field_type {
        FieldType::Text | FieldType::TextArea => {
            let Value::String(text) = value else {
                return Err(invalid("expected text"));
            };
            if field.required && text.trim().is_empty() {
                return Err(InspectorError::Required(field.id.clone()));
            }
            Ok(Value::String(text))
        }
        FieldType::Boolean => match value {
            Value::Bool(_) => Ok(value),
            _ => Err(invalid("expected true or false")),
        },
        FieldType::Select { options } => {
            let known = value
                .as_str()
                .is_some_and(|choice| options.iter().any(|o| o == choice));
            if known {
                Ok(value)
            } else {
                Err(invalid("not one of the options"))
            }
        }
        FieldType::Number => {
            let parsed = parse_number(&value);
            // Node geometry is stored as f32.
            if parsed.is_some_and(|n| n.abs() > f64::from(f32::MAX)) {
                return Err(invalid("out of range"));
            }
            let number = match (&field.target, parsed) {
                (FieldTarget::X | FieldTarget::Y, n) => n.unwrap_or(FALLBACK_POSITION),
                (FieldTarget::Width, n) => positive(n.unwrap_or(FALLBACK_WIDTH))
                    .ok_or_else(|| invalid("must be positive"))?,
                (FieldTarget::Height, n) => positive(n.unwrap_or(FALLBACK_HEIGHT))
                    .ok_or_else(|| invalid("must be positive"))?,
                (_, Some(n)) if n >= 0.0 => n,
                (_, Some(_)) => return Err(invalid("must not be negative")),
                (_, None) => return Err(invalid("expected a number")),
            };
            Ok(Value::from(number))
        }
    }
}

/// Accepts JSON numbers and numeric strings, like a form input does.
fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn positive(n: f64) -> Option<f64> {
    (n > 0.0).then_some(n)
}

fn build_update(field: &VisualField, value: Value) -> NodeUpdate {
    let number = || value.as_f64().map(|n| n as f32);
    let text = || value.as_str().map(str::to_string);
    match &field.target {
        // Rejected as read-only before getting here.
        FieldTarget::Id => NodeUpdate::default(),
        FieldTarget::Label => NodeUpdate {
            label: text(),
            ..Default::default()
        },
        FieldTarget::Description => NodeUpdate {
            description: text(),
            ..Default::default()
        },
        FieldTarget::X => NodeUpdate {
            x: number(),
            ..Default::default()
        },
        FieldTarget::Y => NodeUpdate {
            y: number(),
            ..Default::default()
        },
        FieldTarget::Width => NodeUpdate {
            width: number(),
            ..Default::default()
        },
        FieldTarget::Height => NodeUpdate {
            height: number(),
            ..Default::default()
        },
        FieldTarget::Config(key) => NodeUpdate::config_entry(key.clone(), value.clone()),
    }
}
