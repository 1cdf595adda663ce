//! A full client session fed through a channel.

use std::sync::mpsc;

use serde_json::json;

use joueur_client::{
    games::{chess::Game, GameObjectType},
    Client, ClientConfig, ClientError, SyncEvent,
};
use joueur_shared::{ObjectId, SyncConfig, SyncError};
use joueur_test::{chess_protocol, init_logger, reference, DeltaBuilder};

fn client() -> Client {
    init_logger();
    let config = ClientConfig {
        sync: SyncConfig::default(),
        log_deltas: true,
    };
    Client::new(chess_protocol(), config).unwrap()
}

#[test]
fn channel_source_feeds_the_session() {
    let mut client = client();
    let (sender, mut receiver) = mpsc::channel::<String>();

    sender
        .send(
            DeltaBuilder::new()
                .create("0", "Player", json!({"color": "White", "name": "alice"}))
                .create("1", "Player", json!({"color": "Black", "opponent": reference("0")}))
                .game(json!({"players": [reference("0"), reference("1")], "currentTurn": 0}))
                .to_message(),
        )
        .unwrap();
    assert_eq!(client.receive(&mut receiver).unwrap(), 1);
    assert_eq!(client.receive(&mut receiver).unwrap(), 0);

    let graph = client.graph();
    let game = Game::current(&graph).unwrap();
    let players = game.players().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[1].opponent().unwrap(), Some(players[0]));
    assert_eq!(game.id().as_str(), "game");

    let events = client.take_events();
    assert!(events.contains(&SyncEvent::Created(ObjectId::from("0"))));
    assert!(events.contains(&SyncEvent::Created(ObjectId::from("game"))));

    drop(sender);
    assert!(matches!(client.receive(&mut receiver), Err(ClientError::SourceClosed)));
}

#[test]
fn skipped_instructions_surface_as_events() {
    let mut client = client();
    client
        .apply_value(
            &DeltaBuilder::new()
                .create("5", "Bishop", json!({}))
                .create("0", "Player", json!({}))
                .build(),
        )
        .unwrap();

    let events = client.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], SyncEvent::Created(ObjectId::from("0")));
    assert!(matches!(
        &events[1],
        SyncEvent::InstructionSkipped(SyncError::UnknownType { tag, .. }) if tag == "Bishop"
    ));
}

#[test]
fn fatal_error_ends_the_session() {
    let mut client = client();
    client
        .apply_value(&DeltaBuilder::new().create("0", "Player", json!({})).build())
        .unwrap();

    let err = client
        .apply_value(&DeltaBuilder::new().create("0", "Piece", json!({})).build())
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        client.apply_value(&json!({})),
        Err(ClientError::Sync(SyncError::SessionPoisoned))
    ));

    client.disconnect();
    assert!(client.graph().is_empty());
}
