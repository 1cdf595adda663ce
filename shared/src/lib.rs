//! # Joueur Shared
//! Game object synchronization core shared by joueur clients: the type
//! registry, the delta decoder and the versioned object graph.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub mod constants;
mod protocol;
mod types;
mod world;

pub use protocol::{Protocol, ProtocolError, ProtocolPlugin};
pub use types::{DeltaIndex, InstructionIndex};
pub use world::{
    graph::{
        graph_view::GraphView,
        object_graph::ObjectGraph,
        object_ref::ObjectRef,
        snapshot::{Snapshot, SnapshotReader},
    },
    object::{
        field_value::FieldValue,
        game_object::GameObject,
        object_handle::ObjectHandle,
        object_id::ObjectId,
        object_kinds::ObjectKinds,
        object_map::{ObjectMap, ObjectRecord, ObjectState, Registration},
        object_shape::{FieldKind, ObjectShape},
    },
    remote::{
        config::SyncConfig,
        delta_decoder::{DecodedDelta, DeltaDecoder},
        delta_report::DeltaReport,
        error::{DecodeLocation, SyncError},
        instruction::{FieldUpdate, Instruction, RawValue},
        placeholder_waitlist::PlaceholderWaitlist,
        reference_resolver::{ReferenceResolver, ResolvedValue},
        remote_world_manager::RemoteWorldManager,
    },
};
