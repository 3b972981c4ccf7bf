use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::precedence::PrecedenceGraph;

/// Evidence that a schedule is conflict-serializable.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness<Txn>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
{
    /// The acyclic precedence graph of the schedule.
    pub graph: PrecedenceGraph<Txn>,
    /// Every serial order consistent with the graph, in lexicographic order.
    /// Never empty: a schedule without transactions has the empty order.
    pub serial_orders: Vec<Vec<Txn>>,
}
