use joueur_shared::{GraphView, SyncError};

use crate::games::{
    chess::{chess_object, Move, Piece, Player},
    list, optional, GameObjectType,
};

chess_object!(Game, "Game");

impl<'g> Game<'g> {
    /// The game singleton, once the server has sent it.
    pub fn current(graph: &'g GraphView) -> Option<Game<'g>> {
        graph.game().and_then(|object| Self::try_from_ref(object).ok())
    }

    /// Forsyth-Edwards Notation of the current board.
    pub fn fen(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("fen")
    }

    pub fn current_player(&self) -> Result<Option<Player<'g>>, SyncError> {
        optional(&self.object, "currentPlayer")
    }

    pub fn current_turn(&self) -> Result<i64, SyncError> {
        self.object.get_int("currentTurn")
    }

    pub fn max_turns(&self) -> Result<i64, SyncError> {
        self.object.get_int("maxTurns")
    }

    pub fn players(&self) -> Result<Vec<Player<'g>>, SyncError> {
        list(&self.object, "players")
    }

    pub fn pieces(&self) -> Result<Vec<Piece<'g>>, SyncError> {
        list(&self.object, "pieces")
    }

    /// Every Move made so far, oldest first.
    pub fn moves(&self) -> Result<Vec<Move<'g>>, SyncError> {
        list(&self.object, "moves")
    }

    pub fn last_move(&self) -> Result<Option<Move<'g>>, SyncError> {
        Ok(self.moves()?.pop())
    }

    /// SAN of every move so far.
    pub fn history(&self) -> Result<Vec<&'g str>, SyncError> {
        self.object
            .list("history")?
            .iter()
            .map(|value| {
                value.as_str().ok_or_else(|| SyncError::FieldType {
                    id: self.object.id().clone(),
                    field: "history".to_string(),
                    expected: "list of strings",
                })
            })
            .collect()
    }
}
