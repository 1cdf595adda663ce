//! References to objects the client has not seen yet.

use serde_json::json;

use joueur_shared::{FieldValue, ObjectId, RemoteWorldManager, SyncConfig, SyncError};
use joueur_test::{assert_references_resolve, init_logger, reference, units_protocol, DeltaBuilder};

fn manager() -> RemoteWorldManager {
    init_logger();
    RemoteWorldManager::new(units_protocol(), SyncConfig::default()).unwrap()
}

#[test]
fn forward_reference_in_the_same_delta_is_fully_populated() {
    let mut manager = manager();
    let report = manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("1", "Archer", json!({"health": 10, "target": reference("2")}))
                .create("2", "Knight", json!({"health": 30, "mounted": true}))
                .build(),
        )
        .unwrap();
    assert!(report.placeholders.is_empty());

    let graph = manager.current_graph();
    let target = graph.get("1").unwrap().reference("target").unwrap().unwrap();
    assert!(!target.is_placeholder());
    assert_eq!(target.type_tag(), Some("Knight"));
    assert!(target.get_bool("mounted").unwrap());
    assert_eq!(graph.placeholders().count(), 0);
}

#[test]
fn placeholder_is_visible_until_populated() {
    let mut manager = manager();
    let report = manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("1", "Archer", json!({"target": reference("2")}))
                .build(),
        )
        .unwrap();
    assert_eq!(report.placeholders, vec![ObjectId::from("2")]);

    let graph = manager.current_graph();
    let placeholder = graph.get("2").unwrap();
    assert!(placeholder.is_placeholder());
    assert_eq!(placeholder.type_tag(), Some("Unit"));
    assert_eq!(placeholder.object().fields().count(), 0);
    assert_eq!(
        placeholder.get_int("health"),
        Err(SyncError::FieldMissing {
            id: ObjectId::from("2"),
            field: "health".to_string(),
        })
    );
    assert_references_resolve!(graph);

    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("2", "Knight", json!({"health": 5}))
                .build(),
        )
        .unwrap();

    // the old view still pins the previous snapshot
    assert!(graph.get("2").unwrap().is_placeholder());

    let graph = manager.current_graph();
    let knight = graph.get("1").unwrap().reference("target").unwrap().unwrap();
    assert!(!knight.is_placeholder());
    assert_eq!(knight.type_tag(), Some("Knight"));
    assert_eq!(knight.get_int("health").unwrap(), 5);
}

#[test]
fn cyclic_references_resolve_in_any_order() {
    let mut manager = manager();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("1", "Knight", json!({"target": reference("2"), "allies": [reference("1")]}))
                .create("2", "Knight", json!({"target": reference("1")}))
                .build(),
        )
        .unwrap();

    let graph = manager.current_graph();
    let first = graph.get("1").unwrap();
    let second = first.reference("target").unwrap().unwrap();
    assert_eq!(second.reference("target").unwrap().unwrap(), first);
    assert_eq!(first.references("allies").unwrap(), vec![first]);
}

#[test]
fn placeholder_is_refined_to_a_subtype() {
    let mut manager = manager();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("1", "Tower", json!({"garrison": reference("3")}))
                .build(),
        )
        .unwrap();
    manager
        .apply_delta(&DeltaBuilder::new().create("3", "Archer", json!({"arrows": 12})).build())
        .unwrap();

    let graph = manager.current_graph();
    let archer = graph.get("3").unwrap();
    assert!(archer.is_kind_of("Unit"));
    assert_eq!(archer.get_int("arrows").unwrap(), 12);
}

#[test]
fn placeholder_under_an_unrelated_type_conflicts() {
    let mut manager = manager();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("1", "Archer", json!({"target": reference("2")}))
                .build(),
        )
        .unwrap();

    let err = manager
        .apply_delta(&DeltaBuilder::new().create("2", "Tower", json!({})).build())
        .unwrap_err();
    assert!(matches!(err, SyncError::IdentifierConflict { .. }));
    assert!(err.is_fatal());
    assert!(manager.is_poisoned());
}

#[test]
fn nested_record_and_map_updates_merge() {
    let mut manager = manager();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create(
                    "1",
                    "Knight",
                    json!({"stats": {"wins": 1, "losses": 0}, "notes": {"a": "charge"}}),
                )
                .build(),
        )
        .unwrap();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .update("1", json!({"stats": {"wins": 2}, "notes": {"a": "&RM", "b": "hold"}}))
                .build(),
        )
        .unwrap();

    let graph = manager.current_graph();
    let knight = graph.get("1").unwrap();
    let stats = knight.record("stats").unwrap();
    assert_eq!(stats.get("wins"), Some(&FieldValue::Int(2)));
    assert_eq!(stats.get("losses"), Some(&FieldValue::Int(0)));
    let notes = knight.record("notes").unwrap();
    assert_eq!(notes.get("a"), None);
    assert_eq!(notes.get("b"), Some(&FieldValue::Str("hold".to_string())));
}

#[test]
fn list_delta_resizes_a_reference_list() {
    let mut manager = manager();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("1", "Knight", json!({"allies": [reference("2"), reference("3")]}))
                .create("2", "Archer", json!({}))
                .create("3", "Archer", json!({}))
                .build(),
        )
        .unwrap();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .update("1", json!({"allies": {"&LEN": 3, "0": reference("3"), "2": reference("4")}}))
                .create("4", "Knight", json!({}))
                .build(),
        )
        .unwrap();

    let graph = manager.current_graph();
    let allies: Vec<String> = graph
        .get("1")
        .unwrap()
        .references("allies")
        .unwrap()
        .iter()
        .map(|ally| ally.id().to_string())
        .collect();
    assert_eq!(allies, vec!["3", "3", "4"]);
    assert_references_resolve!(graph);
}

#[test]
fn game_fields_arrive_at_the_top_level() {
    let mut manager = manager();
    manager
        .apply_delta(&DeltaBuilder::new().game(json!({"round": 1})).build())
        .unwrap();
    manager
        .apply_delta(&DeltaBuilder::new().game(json!({"round": 2})).build())
        .unwrap();

    let graph = manager.current_graph();
    let arena = graph.game().unwrap();
    assert_eq!(arena.type_tag(), Some("Arena"));
    assert_eq!(arena.get_int("round").unwrap(), 2);
}
