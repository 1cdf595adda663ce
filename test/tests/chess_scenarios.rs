//! The chess move history scenarios: one Piece shared by several Moves.

use serde_json::json;

use joueur_client::games::{
    chess::{Move, Piece},
    GameObjectType,
};
use joueur_shared::{ObjectId, RemoteWorldManager, SyncConfig, SyncError};
use joueur_test::{assert_references_resolve, chess_protocol, init_logger, reference, DeltaBuilder};

fn manager() -> RemoteWorldManager {
    init_logger();
    RemoteWorldManager::new(chess_protocol(), SyncConfig::default()).unwrap()
}

fn pawn_and_first_move() -> serde_json::Value {
    DeltaBuilder::new()
        .create("7", "Piece", json!({"type": "Pawn", "file": "e", "rank": 2}))
        .create(
            "1",
            "Move",
            json!({
                "piece": reference("7"), "captured": null,
                "fromFile": "e", "fromRank": 2, "toFile": "e", "toRank": 4,
                "promotion": "", "san": "e4"
            }),
        )
        .build()
}

#[test]
fn move_piece_is_the_same_instance_as_the_piece() {
    let mut manager = manager();
    manager.apply_delta(&pawn_and_first_move()).unwrap();

    let graph = manager.current_graph();
    let first = Move::get(&graph, "1").unwrap();
    let piece = Piece::get(&graph, "7").unwrap();
    assert_eq!(first.piece().unwrap(), piece);
    assert_eq!(first.piece().unwrap().object().handle(), piece.object().handle());
    assert_eq!(first.piece().unwrap().file().unwrap(), "e");
    assert_references_resolve!(graph);
}

#[test]
fn second_move_reuses_the_existing_piece() {
    let mut manager = manager();
    manager.apply_delta(&pawn_and_first_move()).unwrap();

    let report = manager
        .apply_delta(
            &DeltaBuilder::new()
                .create(
                    "2",
                    "Move",
                    json!({
                        "piece": reference("12"), "captured": reference("7"),
                        "fromFile": "d", "fromRank": 5, "toFile": "e", "toRank": 4,
                        "promotion": "", "san": "dxe4"
                    }),
                )
                .create("12", "Piece", json!({"type": "Pawn", "file": "e", "rank": 4}))
                .update("7", json!({"captured": true}))
                .build(),
        )
        .unwrap();

    assert_eq!(
        report.created,
        vec![ObjectId::from("2"), ObjectId::from("12")]
    );
    assert_eq!(report.updated, vec![ObjectId::from("7")]);
    assert!(report.placeholders.is_empty());

    let graph = manager.current_graph();
    let capture = Move::get(&graph, "2").unwrap();
    let captured = capture.captured().unwrap().unwrap();
    assert_eq!(captured, Move::get(&graph, "1").unwrap().piece().unwrap());
    assert!(captured.captured().unwrap());
    assert_eq!(capture.piece().unwrap().rank().unwrap(), 4);
    assert_eq!(graph.objects_of_type("Piece").count(), 2);
}

#[test]
fn unknown_type_is_skipped_and_the_rest_applied() {
    let mut manager = manager();
    manager.apply_delta(&pawn_and_first_move()).unwrap();

    let report = manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("9", "Unicorn", json!({"horn": 1}))
                .create(
                    "3",
                    "Move",
                    json!({
                        "piece": reference("7"), "fromFile": "e", "fromRank": 4,
                        "toFile": "e", "toRank": 5, "promotion": "", "san": "e5"
                    }),
                )
                .build(),
        )
        .unwrap();

    assert!(!report.is_clean());
    assert_eq!(
        report.skipped,
        vec![SyncError::UnknownType {
            id: ObjectId::from("9"),
            tag: "Unicorn".to_string(),
            index: 0,
        }]
    );
    assert_eq!(report.created, vec![ObjectId::from("3")]);

    let graph = manager.current_graph();
    assert_eq!(Move::get(&graph, "3").unwrap().san().unwrap(), "e5");
    assert!(!graph.contains("9"));
    assert_eq!(
        graph.get("9").unwrap_err(),
        SyncError::ObjectNotFound { id: ObjectId::from("9") }
    );
}

#[test]
fn promotion_reads_as_absent_when_empty() {
    let mut manager = manager();
    manager.apply_delta(&pawn_and_first_move()).unwrap();
    manager
        .apply_delta(&DeltaBuilder::new().update("1", json!({"promotion": "Queen"})).build())
        .unwrap();

    let graph = manager.current_graph();
    assert_eq!(Move::get(&graph, "1").unwrap().promotion().unwrap(), Some("Queen"));
}
