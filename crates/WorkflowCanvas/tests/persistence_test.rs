use glam::Vec2;
use serde_json::{Value, json};
use workflow_canvas::CanvasError;
use workflow_canvas::document::{DocumentEvent, GraphDocument};
use workflow_canvas::model::NodeKind;
use workflow_canvas::palette::find_template;
use workflow_canvas::persistence::{IMPORTED_WORKFLOW_NAME, WORKFLOW_FORMAT_VERSION};

fn sample_document() -> GraphDocument {
    let mut doc = GraphDocument::new("Ingest pipeline");
    let start = doc
        .add_node_from_template(&find_template("start").unwrap(), Vec2::new(100.0, 40.0))
        .unwrap();
    let process = doc
        .add_node_from_template(&find_template("process").unwrap(), Vec2::new(80.0, 200.0))
        .unwrap();
    doc.connect(&start, &process).unwrap();
    doc
}

fn node_json(id: &str) -> Value {
    json!({
        "id": id,
        "type": "process",
        "label": id,
        "shapeType": "process",
        "color": "#fbbf24",
        "strokeColor": "#d97706",
        "x": 0.0,
        "y": 0.0,
        "width": 140.0,
        "height": 70.0
    })
}

#[test]
fn test_export_import_round_trip() {
    let doc = sample_document();
    let json = doc.export_json().unwrap();

    let mut restored = GraphDocument::default();
    restored.import_json(&json).unwrap();

    assert_eq!(restored.name(), "Ingest pipeline");
    assert_eq!(restored.graph(), doc.graph());
}

#[test]
fn test_export_uses_file_format_keys() {
    let doc = sample_document();
    let value: Value = serde_json::from_str(&doc.export_json().unwrap()).unwrap();

    assert_eq!(value["version"], json!(WORKFLOW_FORMAT_VERSION));
    assert_eq!(value["name"], json!("Ingest pipeline"));

    let node = &value["nodes"][0];
    assert_eq!(node["type"], json!("start"));
    assert_eq!(node["shapeType"], json!("oval"));
    assert_eq!(node["strokeColor"], json!("#be185d"));
    assert!(node.get("config").is_none());

    let connection = &value["connections"][0];
    assert_eq!(connection["fromSide"], json!("bottom"));
    assert_eq!(connection["toSide"], json!("top"));
}

#[test]
fn test_import_name_only_gives_empty_graph() {
    let mut doc = sample_document();
    doc.import_json(r#"{"name":"X"}"#).unwrap();

    assert_eq!(doc.name(), "X");
    assert!(doc.nodes().is_empty());
    assert!(doc.connections().is_empty());
}

#[test]
fn test_import_without_name_uses_default() {
    let mut doc = GraphDocument::default();
    doc.import_json(r#"{"nodes":[]}"#).unwrap();
    assert_eq!(doc.name(), IMPORTED_WORKFLOW_NAME);
}

#[test]
fn test_typed_import_with_empty_name_uses_default() {
    let mut saved = sample_document().export();
    saved.name = String::new();

    let mut doc = GraphDocument::new("Old");
    doc.import(saved).unwrap();

    assert_eq!(doc.name(), IMPORTED_WORKFLOW_NAME);
    assert_eq!(doc.nodes().len(), 2);
}

#[test]
fn test_import_rejects_unsupported_version() {
    let mut doc = sample_document();
    let before = doc.graph().clone();

    let result = doc.import_json(r#"{"name":"Y","nodes":[],"version":"2.0"}"#);

    assert!(matches!(result, Err(CanvasError::UnsupportedVersion(v)) if v == "2.0"));
    assert_eq!(doc.graph(), &before);
    assert_eq!(doc.name(), "Ingest pipeline");
}

#[test]
fn test_import_rejects_malformed_json() {
    let mut doc = sample_document();
    let before = doc.graph().clone();

    let result = doc.import_json("{ not json");

    assert!(matches!(result, Err(CanvasError::Parse(_))));
    assert_eq!(doc.graph(), &before);
}

#[test]
fn test_import_rejects_dangling_connection() {
    let mut doc = sample_document();
    let before = doc.graph().clone();
    let file = json!({
        "name": "Broken",
        "nodes": [node_json("a")],
        "connections": [
            {"id": "c1", "from": "a", "to": "missing", "fromSide": "bottom", "toSide": "top"}
        ],
        "version": "1.0"
    });

    let result = doc.import_json(&file.to_string());

    assert!(matches!(result, Err(CanvasError::DanglingConnection { .. })));
    assert_eq!(doc.graph(), &before);
}

#[test]
fn test_import_rejects_duplicate_node_ids() {
    let mut doc = GraphDocument::default();
    let file = json!({"nodes": [node_json("a"), node_json("a")]});

    let result = doc.import_json(&file.to_string());

    assert!(matches!(result, Err(CanvasError::DuplicateNodeId(_))));
    assert!(doc.nodes().is_empty());
}

#[test]
fn test_import_rejects_unknown_shape() {
    let mut doc = GraphDocument::default();
    let mut node = node_json("a");
    node["shapeType"] = json!("hexagon");
    let file = json!({ "nodes": [node] });

    assert!(matches!(
        doc.import_json(&file.to_string()),
        Err(CanvasError::Parse(_))
    ));
}

#[test]
fn test_unknown_node_type_survives_round_trip() {
    let mut doc = GraphDocument::default();
    let mut node = node_json("a");
    node["type"] = json!("webhook");
    node["config"] = json!({"url": "https://example.org/hook"});
    doc.import_json(&json!({ "nodes": [node] }).to_string()).unwrap();

    let imported = &doc.nodes()[0];
    assert_eq!(imported.kind, NodeKind::Generic("webhook".into()));

    let value: Value = serde_json::from_str(&doc.export_json().unwrap()).unwrap();
    assert_eq!(value["nodes"][0]["type"], json!("webhook"));
    assert_eq!(
        value["nodes"][0]["config"]["url"],
        json!("https://example.org/hook")
    );
}

#[test]
fn test_import_is_undoable() {
    let mut doc = sample_document();
    let before = doc.graph().clone();
    doc.drain_events();

    doc.import_json(r#"{"name":"Empty"}"#).unwrap();
    assert_eq!(
        doc.drain_events(),
        vec![DocumentEvent::Imported {
            name: "Empty".into()
        }]
    );

    assert!(doc.undo());
    assert_eq!(doc.graph(), &before);
}

#[test]
fn test_export_file_name_replaces_whitespace() {
    let doc = GraphDocument::new("Ingest  media pipeline");
    assert_eq!(doc.export_file_name(), "Ingest_media_pipeline.json");
    assert_eq!(GraphDocument::default().export_file_name(), "Workflow_mới.json");
}
