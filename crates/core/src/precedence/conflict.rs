use crate::schedule::types::{Access, Operation};

/// The kind of dependency a conflicting pair creates, named after the
/// accesses in execution order (earlier access first).
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Conflict {
    /// A read followed by a write of the same item (anti-dependency).
    ReadWrite,
    /// A write followed by a read of the same item (read dependency).
    WriteRead,
    /// Two writes of the same item (output dependency).
    WriteWrite,
}

/// Returns `true` if the two operations conflict.
///
/// Operations conflict when they belong to different transactions, touch the
/// same item, and at least one of them is a write. The relation is symmetric.
pub fn conflicts<Txn, Item>(first: &Operation<Txn, Item>, second: &Operation<Txn, Item>) -> bool
where
    Txn: Eq,
    Item: Eq,
{
    first.transaction != second.transaction
        && first.item == second.item
        && (first.is_write() || second.is_write())
}

/// Classifies the conflict between `earlier` and `later`, or returns `None`
/// if they do not [`conflict`](conflicts).
pub fn classify<Txn, Item>(
    earlier: &Operation<Txn, Item>,
    later: &Operation<Txn, Item>,
) -> Option<Conflict>
where
    Txn: Eq,
    Item: Eq,
{
    if !conflicts(earlier, later) {
        return None;
    }
    Some(match (earlier.access, later.access) {
        (Access::Read, Access::Write) => Conflict::ReadWrite,
        (Access::Write, Access::Read) => Conflict::WriteRead,
        (Access::Write, Access::Write) => Conflict::WriteWrite,
        (Access::Read, Access::Read) => unreachable!("two reads never conflict"),
    })
}
