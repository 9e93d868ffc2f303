use crate::state::AccumulatedState;
use ecosafety_core::NodeRow;
use std::thread;
use tracing::{debug, warn};

/// Contribution of one row: `(ratio * Q, ratio)`.
pub fn contribution(row: &NodeRow) -> AccumulatedState {
    let ratio = row.load_ratio();
    AccumulatedState {
        state_mass: ratio * row.q_cms,
        state_risk: ratio,
    }
}

/// Folds one row into `prev`.
pub fn step(row: &NodeRow, prev: &AccumulatedState) -> AccumulatedState {
    let next = *prev + contribution(row);
    debug!(
        node_id = %row.node_id,
        contaminant = %row.contaminant,
        state_mass = next.state_mass,
        state_risk = next.state_risk,
        "CPVM step"
    );
    next
}

/// Reference semantics: rows folded in list order starting from `initial`.
pub fn accumulate(rows: &[NodeRow], initial: AccumulatedState) -> AccumulatedState {
    let state = rows.iter().fold(initial, |state, row| step(row, &state));
    if !state.is_finite() {
        warn!(
            state_mass = state.state_mass,
            state_risk = state.state_risk,
            "CPVM state is no longer finite"
        );
    }
    state
}

/// Sums partitions of at least `chunk_size` rows on scoped worker threads and
/// merges the partial sums in partition order. Partitions are widened so no
/// more than [`thread::available_parallelism`] workers are spawned.
///
/// The logical total equals [`accumulate`] from [`AccumulatedState::ZERO`];
/// floating-point rounding may differ because the summation order changes.
pub fn accumulate_partitioned(rows: &[NodeRow], chunk_size: usize) -> AccumulatedState {
    let chunk_size = partition_len(rows.len(), chunk_size, max_workers());
    if rows.len() <= chunk_size {
        return accumulate(rows, AccumulatedState::ZERO);
    }

    thread::scope(|scope| {
        let workers: Vec<_> = rows
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .fold(AccumulatedState::ZERO, |acc, row| acc + contribution(row))
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|w| match w.join() {
                Ok(partial) => partial,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .fold(AccumulatedState::ZERO, AccumulatedState::merge)
    })
}

fn max_workers() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

/// Partition length that keeps the partition count at or under `workers`.
pub(crate) fn partition_len(rows: usize, chunk_size: usize, workers: usize) -> usize {
    chunk_size.max(rows.div_ceil(workers.max(1))).max(1)
}
