/// Count of deltas applied in the current session. The first applied delta is 1.
pub type DeltaIndex = u64;

/// Position of an instruction within one decoded delta.
pub type InstructionIndex = usize;
