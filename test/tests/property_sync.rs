/// PROPERTY-BASED TESTS: Synchronization invariants
///
/// Uses proptest to verify graph properties hold across random delta sequences.
///
/// Key invariants:
/// 1. Every reference on every object resolves to a registered object
/// 2. Well-formed sequences never poison the session
/// 3. Re-applying a pure overwrite delta changes nothing

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use serde_json::{json, Value};

use joueur_shared::{RemoteWorldManager, SyncConfig, SyncError};
use joueur_test::{dangling_references, field_dump, reference, units_protocol, DeltaBuilder};

#[derive(Clone, Debug)]
enum Op {
    Create { id: u8, knight: bool, target: Option<u8> },
    Update { id: u8, health: i64, target: Option<u8> },
    Delete { id: u8 },
}

#[derive(Clone, Copy, PartialEq)]
enum Known {
    Live,
    Removed,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12, any::<bool>(), prop::option::of(0u8..12))
            .prop_map(|(id, knight, target)| Op::Create { id, knight, target }),
        (0u8..12, -5i64..50, prop::option::of(0u8..12))
            .prop_map(|(id, health, target)| Op::Update { id, health, target }),
        (0u8..12).prop_map(|id| Op::Delete { id }),
    ]
}

fn deltas_strategy() -> impl Strategy<Value = Vec<Vec<Op>>> {
    prop::collection::vec(prop::collection::vec(op_strategy(), 0..6), 1..12)
}

fn target_field(target: Option<u8>) -> Value {
    match target {
        Some(target) => reference(&target.to_string()),
        None => Value::Null,
    }
}

/// Keeps the operations a consistent server could send, and builds the message.
fn build_delta(ops: &[Op], model: &mut HashMap<u8, Known>) -> Value {
    let mut touched = HashSet::new();
    let mut created = HashSet::new();
    let mut kept = Vec::new();
    for op in ops {
        let id = match op {
            Op::Create { id, .. } | Op::Update { id, .. } | Op::Delete { id } => *id,
        };
        if !touched.insert(id) {
            continue;
        }
        let valid = match op {
            Op::Create { .. } => !model.contains_key(&id),
            Op::Update { .. } => model.get(&id) == Some(&Known::Live),
            Op::Delete { .. } => model.get(&id) == Some(&Known::Live),
        };
        if !valid {
            continue;
        }
        if let Op::Create { .. } = op {
            created.insert(id);
        }
        kept.push(op.clone());
    }

    // only reference objects the client knows or that this delta creates
    let resolvable = |target: Option<u8>| match target {
        Some(target) if !model.contains_key(&target) && !created.contains(&target) => None,
        other => other,
    };

    let mut builder = DeltaBuilder::new();
    let mut changes = Vec::new();
    for op in kept {
        builder = match op {
            Op::Create { id, knight, target } => {
                changes.push((id, Known::Live));
                let tag = if knight { "Knight" } else { "Archer" };
                builder.create(&id.to_string(), tag, json!({"target": target_field(resolvable(target))}))
            }
            Op::Update { id, health, target } => builder.update(
                &id.to_string(),
                json!({"health": health, "target": target_field(resolvable(target))}),
            ),
            Op::Delete { id } => {
                changes.push((id, Known::Removed));
                builder.delete(&id.to_string())
            }
        };
    }
    for (id, known) in changes {
        model.insert(id, known);
    }
    builder.build()
}

proptest! {
    /// Every reference stays resolvable through creations, updates and deletions
    #[test]
    fn prop_references_always_resolve(deltas in deltas_strategy()) {
        let mut manager = RemoteWorldManager::new(units_protocol(), SyncConfig::default()).unwrap();
        let mut model = HashMap::new();

        for ops in &deltas {
            let delta = build_delta(ops, &mut model);
            let report = manager.apply_delta(&delta);
            prop_assert!(report.is_ok(), "delta {} failed: {:?}", delta, report);

            let graph = manager.current_graph();
            prop_assert!(dangling_references(&graph).is_empty());
            for object in graph.objects() {
                match object.reference("target") {
                    Ok(_) | Err(SyncError::ObjectRemoved { .. }) => {}
                    Err(err) => prop_assert!(false, "unexpected read error {}", err),
                }
            }
            for (id, known) in &model {
                prop_assert_eq!(graph.is_removed(id.to_string().as_str()), *known == Known::Removed);
            }
        }
        prop_assert!(!manager.is_poisoned());
        prop_assert_eq!(manager.pending_placeholders(), 0);
    }

    /// Applying the same pure-overwrite delta twice yields the same graph as once
    #[test]
    fn prop_overwrite_is_idempotent(
        setup in prop::collection::vec(op_strategy(), 1..10),
        healths in prop::collection::vec(-5i64..50, 12),
    ) {
        let mut manager = RemoteWorldManager::new(units_protocol(), SyncConfig::default()).unwrap();
        let mut model = HashMap::new();
        manager.apply_delta(&build_delta(&setup, &mut model)).unwrap();

        let mut overwrite = DeltaBuilder::new();
        for (id, known) in &model {
            if *known == Known::Live {
                overwrite = overwrite.update(
                    &id.to_string(),
                    json!({"health": healths[*id as usize], "stats": {"wins": 1}}),
                );
            }
        }
        let overwrite = overwrite.game(json!({"round": 1})).build();

        manager.apply_delta(&overwrite).unwrap();
        let once = field_dump(&manager.current_graph());
        manager.apply_delta(&overwrite).unwrap();
        let twice = field_dump(&manager.current_graph());

        prop_assert_eq!(once, twice);
    }
}
