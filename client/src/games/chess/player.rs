use joueur_shared::SyncError;

use crate::games::{
    chess::{chess_object, Piece},
    list, optional,
};

chess_object!(Player, "Player");

impl<'g> Player<'g> {
    pub fn name(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("name")
    }

    /// "White" or "Black".
    pub fn color(&self) -> Result<&'g str, SyncError> {
        self.object.get_str("color")
    }

    pub fn in_check(&self) -> Result<bool, SyncError> {
        self.object.get_bool("inCheck")
    }

    pub fn lost(&self) -> Result<bool, SyncError> {
        self.object.get_bool("lost")
    }

    pub fn won(&self) -> Result<bool, SyncError> {
        self.object.get_bool("won")
    }

    pub fn opponent(&self) -> Result<Option<Player<'g>>, SyncError> {
        optional(&self.object, "opponent")
    }

    /// The Pieces this Player still owns.
    pub fn pieces(&self) -> Result<Vec<Piece<'g>>, SyncError> {
        list(&self.object, "pieces")
    }

    /// +1 when this Player's pawns advance towards higher ranks, -1 otherwise.
    pub fn rank_direction(&self) -> Result<i64, SyncError> {
        self.object.get_int("rankDirection")
    }

    pub fn time_remaining(&self) -> Result<f64, SyncError> {
        self.object.get_float("timeRemaining")
    }
}
