use glam::Vec2;
use serde_json::json;
use workflow_canvas::CanvasError;
use workflow_canvas::document::{DocumentEvent, GraphDocument};
use workflow_canvas::model::{Connection, GraphState, Node, NodeId, NodeUpdate, Side};
use workflow_canvas::palette::find_template;

fn node_at(template: &str, x: f32, y: f32) -> Node {
    find_template(template)
        .expect("built-in template")
        .instantiate(Vec2::new(x, y))
}

fn doc_with_nodes(count: usize) -> (GraphDocument, Vec<NodeId>) {
    let mut doc = GraphDocument::default();
    let ids = (0..count)
        .map(|i| {
            doc.add_node(node_at("process", 100.0, 100.0 + 200.0 * i as f32))
                .unwrap()
        })
        .collect();
    (doc, ids)
}

#[test]
fn test_new_document_is_empty() {
    let doc = GraphDocument::default();
    assert_eq!(doc.name(), "Workflow mới");
    assert!(doc.nodes().is_empty());
    assert!(doc.connections().is_empty());
    assert!(!doc.can_undo());
    assert!(!doc.can_redo());
}

#[test]
fn test_duplicate_offsets_and_renames() {
    let mut doc = GraphDocument::default();
    let id = doc.add_node(node_at("process", 100.0, 100.0)).unwrap();
    let history_before = doc.history().len();

    let copy_id = doc.duplicate_node(&id).unwrap();

    assert_ne!(copy_id, id);
    let copy = doc.node(&copy_id).unwrap();
    assert_eq!(copy.position(), Vec2::new(120.0, 120.0));
    assert_eq!(copy.label, "Xử lý (copy)");
    assert_eq!(copy.size(), Vec2::new(140.0, 70.0));
    assert_eq!(doc.history().len(), history_before + 1);
    // Source untouched
    assert_eq!(doc.node(&id).unwrap().label, "Xử lý");
}

#[test]
fn test_duplicate_unknown_node_fails() {
    let mut doc = GraphDocument::default();
    let result = doc.duplicate_node(&NodeId::from("missing"));
    assert!(matches!(result, Err(CanvasError::NodeNotFound(_))));
}

#[test]
fn test_delete_node_cascades_connections() {
    let (mut doc, ids) = doc_with_nodes(3);
    let (a, b, c) = (&ids[0], &ids[1], &ids[2]);
    doc.connect(a, b).unwrap();
    doc.connect(b, c).unwrap();
    let a_to_c = doc.connect(a, c).unwrap();

    doc.delete_node(b).unwrap();

    assert_eq!(doc.nodes().len(), 2);
    assert!(doc.node(b).is_none());
    assert_eq!(doc.connections().len(), 1);
    assert_eq!(doc.connections()[0].id, a_to_c);
}

#[test]
fn test_connect_uses_bottom_to_top() {
    let (mut doc, ids) = doc_with_nodes(2);
    let id = doc.connect(&ids[0], &ids[1]).unwrap();
    let connection = doc.connection(&id).unwrap();
    assert_eq!(connection.from_side, Side::Bottom);
    assert_eq!(connection.to_side, Side::Top);
    assert!(connection.label.is_none());
}

#[test]
fn test_self_loop_rejected() {
    let (mut doc, ids) = doc_with_nodes(1);
    let history_before = doc.history().len();

    let result = doc.connect(&ids[0], &ids[0]);

    assert!(matches!(result, Err(CanvasError::SelfLoop(_))));
    assert!(doc.connections().is_empty());
    assert_eq!(doc.history().len(), history_before);
}

#[test]
fn test_connection_to_unknown_node_rejected() {
    let (mut doc, ids) = doc_with_nodes(1);
    let result = doc.connect(&ids[0], &NodeId::from("ghost"));
    assert!(matches!(
        result,
        Err(CanvasError::DanglingConnection { .. })
    ));
}

#[test]
fn test_delete_connection_keeps_nodes() {
    let (mut doc, ids) = doc_with_nodes(2);
    let id = doc.connect(&ids[0], &ids[1]).unwrap();

    let removed = doc.delete_connection(&id).unwrap();

    assert_eq!(removed.id, id);
    assert!(doc.connections().is_empty());
    assert_eq!(doc.nodes().len(), 2);
    assert!(doc.delete_connection(&id).is_err());
}

#[test]
fn test_update_node_is_partial_and_not_recorded() {
    let (mut doc, ids) = doc_with_nodes(1);
    let id = &ids[0];
    let history_before = doc.history().len();

    let update = NodeUpdate {
        label: Some("Transcode".into()),
        width: Some(200.0),
        ..Default::default()
    };
    doc.update_node(id, &update).unwrap();

    let node = doc.node(id).unwrap();
    assert_eq!(node.label, "Transcode");
    assert_eq!(node.width, 200.0);
    assert_eq!(node.height, 70.0);
    assert_eq!(node.position(), Vec2::new(100.0, 100.0));
    assert_eq!(doc.history().len(), history_before);

    doc.update_node(id, &NodeUpdate::config_entry("processType", json!("thumbnail")))
        .unwrap();
    assert_eq!(
        doc.node(id).unwrap().config.get("processType"),
        Some(&json!("thumbnail"))
    );
}

#[test]
fn test_update_node_rejects_non_positive_size() {
    let (mut doc, ids) = doc_with_nodes(1);
    let id = &ids[0];
    let update = NodeUpdate {
        label: Some("Changed".into()),
        height: Some(0.0),
        ..Default::default()
    };

    let result = doc.update_node(id, &update);

    assert!(matches!(result, Err(CanvasError::InvalidNodeSize { .. })));
    // Nothing from the rejected update is applied.
    assert_eq!(doc.node(id).unwrap().label, "Xử lý");
    assert_eq!(doc.node(id).unwrap().height, 70.0);
}

#[test]
fn test_add_node_rejects_duplicate_id() {
    let (mut doc, ids) = doc_with_nodes(1);
    let mut clash = node_at("end", 0.0, 0.0);
    clash.id = ids[0].clone();
    assert!(matches!(
        doc.add_node(clash),
        Err(CanvasError::DuplicateNodeId(_))
    ));
    assert_eq!(doc.nodes().len(), 1);
}

#[test]
fn test_set_node_position_rejects_non_finite() {
    let (mut doc, ids) = doc_with_nodes(1);
    let result = doc.set_node_position(&ids[0], Vec2::new(f32::NAN, 0.0));
    assert!(matches!(result, Err(CanvasError::NonFinitePosition(_))));
}

#[test]
fn test_undo_redo_are_inverse() {
    let mut doc = GraphDocument::default();
    let initial = doc.graph().clone();

    let a = doc.add_node(node_at("start", 100.0, 0.0)).unwrap();
    let b = doc.add_node(node_at("process", 100.0, 200.0)).unwrap();
    doc.connect(&a, &b).unwrap();
    doc.duplicate_node(&b).unwrap();
    doc.delete_node(&a).unwrap();
    let final_state = doc.graph().clone();

    let mut undone = 0;
    while doc.undo() {
        undone += 1;
    }
    assert_eq!(undone, 5);
    assert_eq!(doc.graph(), &initial);

    while doc.redo() {}
    assert_eq!(doc.graph(), &final_state);
}

#[test]
fn test_undo_at_start_is_noop() {
    let mut doc = GraphDocument::default();
    assert!(!doc.undo());
    assert!(!doc.redo());
    assert_eq!(doc.graph(), &GraphState::default());
}

#[test]
fn test_new_mutation_after_undo_discards_redo() {
    let (mut doc, _) = doc_with_nodes(2);
    assert!(doc.undo());
    assert!(doc.can_redo());

    doc.add_node(node_at("end", 0.0, 0.0)).unwrap();

    assert!(!doc.can_redo());
    assert_eq!(doc.nodes().len(), 2);
}

#[test]
fn test_commit_records_property_edits() {
    let (mut doc, ids) = doc_with_nodes(1);
    doc.update_node(&ids[0], &NodeUpdate::label("Renamed")).unwrap();
    doc.commit();

    doc.update_node(&ids[0], &NodeUpdate::label("Again")).unwrap();
    doc.commit();

    assert!(doc.undo());
    assert_eq!(doc.node(&ids[0]).unwrap().label, "Renamed");
}

#[test]
fn test_events_report_mutations() {
    let mut doc = GraphDocument::default();
    let a = doc.add_node(node_at("start", 0.0, 0.0)).unwrap();
    let b = doc.add_node(node_at("end", 0.0, 200.0)).unwrap();
    let c = doc.connect(&a, &b).unwrap();
    doc.delete_node(&b).unwrap();

    let events = doc.drain_events();
    assert_eq!(
        events,
        vec![
            DocumentEvent::NodeAdded(a.clone()),
            DocumentEvent::NodeAdded(b.clone()),
            DocumentEvent::ConnectionAdded(c.clone()),
            DocumentEvent::NodeRemoved {
                id: b,
                connections: vec![c],
            },
        ]
    );
    assert!(doc.drain_events().is_empty());
}

#[test]
fn test_add_connection_keeps_explicit_sides() {
    let (mut doc, ids) = doc_with_nodes(2);
    let mut connection = Connection::new(ids[0].clone(), ids[1].clone());
    connection.from_side = Side::Right;
    connection.to_side = Side::Left;
    connection.label = Some("yes".into());

    let id = doc.add_connection(connection).unwrap();

    let stored = doc.connection(&id).unwrap();
    assert_eq!(stored.from_side, Side::Right);
    assert_eq!(stored.to_side, Side::Left);
    assert_eq!(stored.label.as_deref(), Some("yes"));
}
