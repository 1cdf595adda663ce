use joueur_shared::SyncError;

use crate::games::{chess::chess_object, chess::Piece, optional, required, GameObjectType};

chess_object!(Move, "Move");

/// Contains all details about a Piece's move in the game.
impl<'g> Move<'g> {
    /// The Piece that was moved.
    pub fn piece(&self) -> Result<Piece<'g>, SyncError> {
        required(&self.object, "piece")
    }

    /// The Piece captured by this Move, `None` if no capture.
    pub fn captured(&self) -> Result<Option<Piece<'g>>, SyncError> {
        optional(&self.object, "captured")
    }

    pub fn from_file(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("fromFile")
    }

    pub fn from_rank(&self) -> Result<i64, SyncError> {
        self.object.get_int("fromRank")
    }

    pub fn to_file(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("toFile")
    }

    pub fn to_rank(&self) -> Result<i64, SyncError> {
        self.object.get_int("toRank")
    }

    /// The Piece type a Pawn was promoted to, `None` if no promotion occurred.
    pub fn promotion(&self) -> Result<Option<&'g str>, SyncError> {
        match self.object.field("promotion") {
            None => Ok(None),
            Some(_) => {
                let promotion = self.object.get_str("promotion")?;
                Ok((!promotion.is_empty()).then_some(promotion))
            }
        }
    }

    /// Standard algebraic notation of the move.
    pub fn san(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("san")
    }

    pub fn is_placeholder(&self) -> bool {
        self.object().is_placeholder()
    }
}
