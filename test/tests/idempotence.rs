//! Re-applying a pure overwrite delta leaves the graph unchanged.

use serde_json::json;

use joueur_shared::{RemoteWorldManager, SyncConfig};
use joueur_test::{chess_protocol, field_dump, init_logger, reference, DeltaBuilder};

#[test]
fn overwrite_delta_applied_twice_equals_once() {
    init_logger();
    let mut manager = RemoteWorldManager::new(chess_protocol(), SyncConfig::default()).unwrap();
    manager
        .apply_delta(
            &DeltaBuilder::new()
                .create("0", "Player", json!({"color": "White"}))
                .create("7", "Piece", json!({"type": "Rook", "file": "a", "rank": 1}))
                .build(),
        )
        .unwrap();

    let overwrite = DeltaBuilder::new()
        .update("7", json!({"file": "a", "rank": 4, "owner": reference("0"), "hasMoved": true}))
        .update("0", json!({"pieces": [reference("7")]}))
        .game(json!({"currentTurn": 3, "fen": "8/8/8/8/R7/8/8/8 w - - 0 1"}))
        .build();

    manager.apply_delta(&overwrite).unwrap();
    let once = field_dump(&manager.current_graph());

    let report = manager.apply_delta(&overwrite).unwrap();
    let twice = field_dump(&manager.current_graph());

    assert_eq!(once, twice);
    assert!(report.created.is_empty());
    assert_eq!(report.updated.len(), 3);
}
