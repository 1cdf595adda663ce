use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;

use crate::{
    constants::{GAME_ID, ID_FIELD, TYPE_TAG_FIELD},
    protocol::{Protocol, ProtocolError},
    types::DeltaIndex,
    world::{
        graph::{
            graph_view::GraphView,
            object_graph::ObjectGraph,
            snapshot::{Snapshot, SnapshotReader},
        },
        object::{
            field_value::FieldValue, object_handle::ObjectHandle, object_id::ObjectId,
            object_kinds::ObjectKinds, object_map::Registration,
        },
        remote::{
            config::SyncConfig,
            delta_decoder::DeltaDecoder,
            delta_report::DeltaReport,
            error::{DecodeLocation, SyncError},
            instruction::Instruction,
            placeholder_waitlist::PlaceholderWaitlist,
            reference_resolver::ReferenceResolver,
        },
    },
};

/// Owns the client's view of the server's game objects.
///
/// Each delta is decoded against the published graph, applied to a private
/// copy and published only once every instruction went through. Readers
/// therefore never observe a partially applied delta.
pub struct RemoteWorldManager {
    kinds: Arc<ObjectKinds>,
    game_type: Option<String>,
    config: SyncConfig,
    waitlist: PlaceholderWaitlist,
    snapshot: Snapshot,
    poisoned: bool,
}

impl RemoteWorldManager {
    /// Locks `protocol` if needed and starts an empty session.
    pub fn new(mut protocol: Protocol, config: SyncConfig) -> Result<Self, ProtocolError> {
        if !protocol.is_locked() {
            protocol.try_lock()?;
        }
        let kinds = Arc::new(protocol.object_kinds);
        Ok(Self {
            snapshot: Snapshot::new(ObjectGraph::new(kinds.clone())),
            waitlist: PlaceholderWaitlist::new(config.placeholder_ttl),
            game_type: protocol.game_type,
            kinds,
            config,
            poisoned: false,
        })
    }

    pub fn kinds(&self) -> &ObjectKinds {
        &self.kinds
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn current_graph(&self) -> GraphView {
        self.snapshot.current_graph()
    }

    pub fn reader(&self) -> SnapshotReader {
        self.snapshot.reader()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Number of placeholders still waiting for their create instruction.
    pub fn pending_placeholders(&self) -> usize {
        self.waitlist.len()
    }

    /// Parses and applies one delta message given as text.
    pub fn apply_delta_str(&mut self, message: &str) -> Result<DeltaReport, SyncError> {
        if self.poisoned {
            return Err(SyncError::SessionPoisoned);
        }
        let raw: Value = serde_json::from_str(message).map_err(|err| {
            let err = SyncError::decode(format!("invalid JSON: {}", err), DecodeLocation::message());
            warn!("Discarding delta: {}", err);
            err
        })?;
        self.apply_delta(&raw)
    }

    /// Applies one delta message atomically.
    ///
    /// A decode error leaves the published graph untouched. A fatal error
    /// also leaves it untouched, and poisons the manager.
    pub fn apply_delta(&mut self, raw: &Value) -> Result<DeltaReport, SyncError> {
        if self.poisoned {
            return Err(SyncError::SessionPoisoned);
        }

        let current = self.snapshot.current_graph();
        let decoded = DeltaDecoder::new(
            &self.kinds,
            self.game_type.as_deref(),
            current.graph().object_map(),
        )
        .with_max_list_len(self.config.max_list_len)
        .decode(raw)
        .map_err(|err| {
            if err.is_fatal() {
                error!("Fatal synchronization error while decoding: {}", err);
                self.poisoned = true;
            } else {
                warn!("Discarding delta: {}", err);
            }
            err
        })?;

        let mut graph = current.graph().clone();
        let mut waitlist = self.waitlist.clone();
        let delta_index = graph.delta_index() + 1;
        graph.set_delta_index(delta_index);

        let mut report = DeltaReport::new(delta_index);
        report.skipped = decoded.skipped;

        let applied = self
            .apply_instructions(&mut graph, &mut waitlist, decoded.instructions, &mut report)
            .and_then(|()| Self::check_expired(&graph, &mut waitlist, delta_index));
        if let Err(err) = applied {
            if err.is_fatal() {
                error!("Fatal synchronization error in delta {}: {}", delta_index, err);
                self.poisoned = true;
            } else {
                warn!("Discarding delta {}: {}", delta_index, err);
            }
            return Err(err);
        }

        report.placeholders.retain(|id| {
            graph
                .object_map()
                .handle(id)
                .map_or(false, |handle| waitlist.is_waiting(handle))
        });

        self.waitlist = waitlist;
        self.snapshot.publish(graph);
        info!(
            "Applied delta {}: {} created, {} updated, {} deleted, {} skipped",
            delta_index,
            report.created.len(),
            report.updated.len(),
            report.deleted.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Ends the session: publishes an empty graph and forgets every identifier.
    pub fn reset(&mut self) {
        info!("Resetting synchronized state");
        self.waitlist.clear();
        self.snapshot.publish(ObjectGraph::new(self.kinds.clone()));
        self.poisoned = false;
    }

    fn apply_instructions(
        &self,
        graph: &mut ObjectGraph,
        waitlist: &mut PlaceholderWaitlist,
        instructions: Vec<Instruction>,
        report: &mut DeltaReport,
    ) -> Result<(), SyncError> {
        for instruction in instructions {
            match instruction {
                Instruction::Delete { index, id } => {
                    let Some(handle) = graph.split_mut().1.remove(&id) else {
                        debug!("Instruction {}: delete of unknown object {} ignored", index, id);
                        continue;
                    };
                    graph.remove_object(handle);
                    waitlist.complete(handle);
                    report.deleted.push(id);
                }
                Instruction::CreateOrUpdate {
                    index,
                    id,
                    type_tag,
                    fields,
                } => {
                    let (kinds, object_map) = graph.split_mut();
                    let (handle, registration) = object_map.register(kinds, &id, &type_tag, index)?;
                    match registration {
                        Registration::Created => report.created.push(id.clone()),
                        Registration::Completed => {
                            waitlist.complete(handle);
                            report.created.push(id.clone());
                        }
                        Registration::Existing => report.updated.push(id.clone()),
                    }
                    if registration != Registration::Existing {
                        Self::stamp_identity(graph, handle, &id, &type_tag);
                    }
                    if id.as_str() == GAME_ID && self.game_type.as_deref() == Some(type_tag.as_str()) {
                        graph.set_game(handle);
                    }

                    let mut resolver = ReferenceResolver::new(graph, index);
                    let mut resolved = Vec::with_capacity(fields.len());
                    for update in fields {
                        resolved.push((update.name, resolver.resolve(update.value)?));
                    }
                    for placeholder in resolver.into_placeholders() {
                        waitlist.queue(placeholder, graph.delta_index());
                        if let Some(record) = graph.object_map().record(placeholder) {
                            report.placeholders.push(record.id().clone());
                        }
                    }

                    if let Some(object) = graph.object_mut(handle) {
                        let record = object.fields_mut();
                        for (name, value) in resolved {
                            value.apply_to_record(record, name).map_err(|err| {
                                SyncError::decode(
                                    format!("list cannot be allocated: {}", err),
                                    DecodeLocation::object(&id).at(index),
                                )
                            })?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn stamp_identity(graph: &mut ObjectGraph, handle: ObjectHandle, id: &ObjectId, type_tag: &str) {
        if let Some(object) = graph.object_mut(handle) {
            let fields = object.fields_mut();
            fields.insert(ID_FIELD.to_string(), FieldValue::Str(id.to_string()));
            fields.insert(TYPE_TAG_FIELD.to_string(), FieldValue::Str(type_tag.to_string()));
        }
    }

    fn check_expired(
        graph: &ObjectGraph,
        waitlist: &mut PlaceholderWaitlist,
        now: DeltaIndex,
    ) -> Result<(), SyncError> {
        let Some((handle, created)) = waitlist.check_expired(now) else {
            return Ok(());
        };
        let id = graph
            .object_map()
            .record(handle)
            .map(|record| record.id().clone())
            .unwrap_or_else(|| ObjectId::new(format!("#{}", handle.index())));
        Err(SyncError::PlaceholderExpired {
            id,
            created,
            ttl: waitlist.ttl(),
        })
    }
}
