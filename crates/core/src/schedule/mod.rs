//! Schedules: the recorded interleaving of transaction operations.
//!
//! A schedule is viewed as a matrix of `k` steps. Each step holds cells that
//! are either an [`Operation`](types::Operation) or a gap. Operations in an
//! earlier step precede every operation of a later step; operations sharing a
//! step are unordered.

use alloc::vec::Vec;

use hashbrown::HashSet;

use self::types::{Operation, OperationId, Step};

pub mod display;
pub mod error;
pub mod types;

/// Iterates over the present operations of a schedule in execution order.
///
/// Steps are visited by index; within a step, cells are visited left to
/// right and gaps are skipped. Each operation is paired with its position in
/// the step matrix.
pub fn flatten<'a, Txn, Item>(
    schedule: &'a [Step<Txn, Item>],
) -> impl Iterator<Item = (OperationId, &'a Operation<Txn, Item>)> {
    schedule.iter().enumerate().flat_map(|(step, cells)| {
        cells
            .iter()
            .enumerate()
            .filter_map(move |(column, cell)| {
                cell.as_ref()
                    .map(|operation| (OperationId { step, column }, operation))
            })
    })
}

/// Returns every distinct transaction id of the schedule, in order of first
/// appearance.
#[must_use]
pub fn transactions<Txn, Item>(schedule: &[Step<Txn, Item>]) -> Vec<Txn>
where
    Txn: Eq + core::hash::Hash + Clone,
{
    let mut seen: HashSet<&Txn> = HashSet::new();
    flatten(schedule)
        .filter(|&(_, operation)| seen.insert(&operation.transaction))
        .map(|(_, operation)| operation.transaction.clone())
        .collect()
}
