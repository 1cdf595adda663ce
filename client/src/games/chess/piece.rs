use joueur_shared::SyncError;

use crate::games::{
    chess::{chess_object, Move, Player},
    optional, GameObjectType,
};

chess_object!(Piece, "Piece");

impl<'g> Piece<'g> {
    /// "King", "Queen", "Knight", "Rook", "Bishop" or "Pawn".
    pub fn piece_type(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("type")
    }

    pub fn file(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("file")
    }

    pub fn rank(&self) -> Result<i64, SyncError> {
        self.object.get_int("rank")
    }

    pub fn captured(&self) -> Result<bool, SyncError> {
        self.object.get_bool("captured")
    }

    pub fn has_moved(&self) -> Result<bool, SyncError> {
        self.object.get_bool("hasMoved")
    }

    pub fn owner(&self) -> Result<Option<Player<'g>>, SyncError> {
        optional(&self.object, "owner")
    }

    /// The Move that last moved this Piece, if any.
    pub fn last_move(&self) -> Result<Option<Move<'g>>, SyncError> {
        optional(&self.object, "lastMove")
    }

    pub fn is_placeholder(&self) -> bool {
        self.object().is_placeholder()
    }
}
