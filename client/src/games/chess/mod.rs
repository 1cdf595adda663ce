//! The chess game objects, as sent by the game server.

mod chess_move;
mod chess_plugin;
mod game;
mod piece;
mod player;

pub use chess_move::Move;
pub use chess_plugin::ChessPlugin;
pub use game::Game;
pub use piece::Piece;
pub use player::Player;

/// Generates the typed wrapper boilerplate for one chess object type.
macro_rules! chess_object {
    ($name:ident, $tag:literal) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<'g> {
            object: joueur_shared::ObjectRef<'g>,
        }

        impl<'g> crate::games::GameObjectType<'g> for $name<'g> {
            const TAG: &'static str = $tag;

            fn wrap(object: joueur_shared::ObjectRef<'g>) -> Self {
                Self { object }
            }

            fn object(&self) -> joueur_shared::ObjectRef<'g> {
                self.object
            }
        }

        impl<'g> TryFrom<joueur_shared::ObjectRef<'g>> for $name<'g> {
            type Error = joueur_shared::SyncError;

            fn try_from(object: joueur_shared::ObjectRef<'g>) -> Result<Self, Self::Error> {
                <Self as crate::games::GameObjectType<'g>>::try_from_ref(object)
            }
        }
    };
}

pub(crate) use chess_object;
