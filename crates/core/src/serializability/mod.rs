use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use self::error::Error;
use crate::precedence::PrecedenceGraph;
use crate::schedule::types::Step;

pub mod error;
pub mod witness;

pub use witness::Witness;

/// Returns `true` if `schedule` is conflict-serializable, i.e. its
/// precedence graph has no cycle.
#[must_use]
pub fn is_conflict_serializable<Txn, Item>(schedule: &[Step<Txn, Item>]) -> bool
where
    Txn: Hash + Eq + Clone + Debug + Ord,
    Item: Eq + Debug,
{
    PrecedenceGraph::new(schedule).is_conflict_serializable()
}

/// Returns every serial order of the transactions of `schedule` that is
/// conflict-equivalent to it.
///
/// The result is empty if and only if the schedule is not
/// conflict-serializable. A schedule without operations has exactly one
/// serial order, the empty one.
#[must_use]
pub fn all_serial_orders<Txn, Item>(schedule: &[Step<Txn, Item>]) -> Vec<Vec<Txn>>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
    Item: Eq + Debug,
{
    PrecedenceGraph::new(schedule).serial_orders()
}

/// Check whether `schedule` is conflict-serializable.
///
/// On success, returns a [`Witness`] holding the precedence graph and every
/// equivalent serial order.
///
/// # Errors
///
/// Returns [`Error::Cycle`] with the precedence graph and one of its cycles
/// if the schedule is not conflict-serializable.
pub fn check<Txn, Item>(schedule: &[Step<Txn, Item>]) -> Result<Witness<Txn>, Error<Txn>>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
    Item: Eq + Debug,
{
    tracing::debug!(steps = schedule.len(), "checking conflict serializability");

    let graph = PrecedenceGraph::new(schedule);

    if let Some(cycle) = graph.find_cycle() {
        tracing::debug!(?cycle, "precedence graph has a cycle");
        return Err(Error::Cycle { cycle, graph });
    }

    let serial_orders = graph.serial_orders();
    tracing::debug!(
        orders = serial_orders.len(),
        "schedule is conflict serializable"
    );

    Ok(Witness {
        graph,
        serial_orders,
    })
}
