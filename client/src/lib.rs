//! # Joueur Client
//! A game-playing client session: applies the server's deltas to a
//! synchronized object graph and exposes typed, read-only game objects to
//! decision logic.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod games;

mod client;
mod client_config;
mod delta_source;
mod error;
mod events;

pub use client::Client;
pub use client_config::ClientConfig;
pub use delta_source::DeltaSource;
pub use error::ClientError;
pub use events::{SyncEvent, SyncEvents};

pub use joueur_shared::{
    FieldKind, FieldValue, GraphView, ObjectId, ObjectRef, ObjectShape, Protocol, ProtocolError,
    ProtocolPlugin, SnapshotReader, SyncConfig, SyncError,
};
