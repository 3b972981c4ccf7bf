use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::precedence::PrecedenceGraph;

/// Error returned when a schedule is not conflict-serializable.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<Txn>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
{
    /// The precedence graph has a cycle.
    /// `cycle` lists its transactions in edge order; the last one precedes the first.
    Cycle {
        cycle: Vec<Txn>,
        graph: PrecedenceGraph<Txn>,
    },
}
