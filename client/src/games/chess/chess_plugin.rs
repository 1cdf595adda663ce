use joueur_shared::{FieldKind, ObjectShape, Protocol, ProtocolPlugin};

/// Registers the chess game objects with a [`Protocol`].
pub struct ChessPlugin;

impl ProtocolPlugin for ChessPlugin {
    fn build(&self, protocol: &mut Protocol) {
        let player = || FieldKind::reference("Player");
        let piece = || FieldKind::reference("Piece");
        let chess_move = || FieldKind::reference("Move");

        protocol
            .add_type(
                ObjectShape::game_object("Game")
                    .field("fen", FieldKind::Str)
                    .field("history", FieldKind::list_of(FieldKind::Str))
                    .field("moves", FieldKind::list_of(chess_move()))
                    .field("pieces", FieldKind::list_of(piece()))
                    .field("players", FieldKind::list_of(player()))
                    .field("currentPlayer", player())
                    .field("currentTurn", FieldKind::Int)
                    .field("maxTurns", FieldKind::Int)
                    .field("turnsToDraw", FieldKind::Int)
                    .field("session", FieldKind::Str),
            )
            .add_type(
                ObjectShape::game_object("Player")
                    .field("name", FieldKind::Str)
                    .field("clientType", FieldKind::Str)
                    .field("color", FieldKind::Str)
                    .field("inCheck", FieldKind::Bool)
                    .field("madeMove", FieldKind::Bool)
                    .field("lost", FieldKind::Bool)
                    .field("won", FieldKind::Bool)
                    .field("reasonLost", FieldKind::Str)
                    .field("reasonWon", FieldKind::Str)
                    .field("opponent", player())
                    .field("pieces", FieldKind::list_of(piece()))
                    .field("rankDirection", FieldKind::Int)
                    .field("timeRemaining", FieldKind::Float),
            )
            .add_type(
                ObjectShape::game_object("Piece")
                    .field("type", FieldKind::Str)
                    .field("file", FieldKind::Str)
                    .field("rank", FieldKind::Int)
                    .field("captured", FieldKind::Bool)
                    .field("hasMoved", FieldKind::Bool)
                    .field("owner", player())
                    .field("lastMove", chess_move()),
            )
            .add_type(
                ObjectShape::game_object("Move")
                    .field("piece", piece())
                    .field("captured", piece())
                    .field("fromFile", FieldKind::Str)
                    .field("fromRank", FieldKind::Int)
                    .field("toFile", FieldKind::Str)
                    .field("toRank", FieldKind::Int)
                    .field("promotion", FieldKind::Str)
                    .field("san", FieldKind::Str),
            )
            .game_type("Game");
    }
}
