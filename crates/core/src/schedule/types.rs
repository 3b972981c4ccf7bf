use alloc::vec::Vec;
use core::fmt::{Debug, Display, Formatter, Result};

use crate::schedule::error::OperationError;

/// Whether an operation reads or writes its item.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Short mnemonic used by the schedule text format.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
        }
    }
}

/// A single read or write step performed by a transaction on an item.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[cfg_attr(feature = "schemars", derive(::schemars::JsonSchema))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operation<Txn, Item> {
    pub transaction: Txn,
    pub access: Access,
    pub item: Item,
}

impl<Txn, Item> Operation<Txn, Item> {
    pub const fn new(transaction: Txn, access: Access, item: Item) -> Self {
        Self {
            transaction,
            access,
            item,
        }
    }

    pub const fn read(transaction: Txn, item: Item) -> Self {
        Self::new(transaction, Access::Read, item)
    }

    pub const fn write(transaction: Txn, item: Item) -> Self {
        Self::new(transaction, Access::Write, item)
    }

    #[must_use]
    pub const fn is_write(&self) -> bool {
        self.access.is_write()
    }
}

impl<Txn, Item> Operation<Txn, Item>
where
    Txn: AsRef<str>,
    Item: AsRef<str>,
{
    /// Builds an operation from textual identifiers, rejecting empty ones.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::EmptyTransactionId`] or
    /// [`OperationError::EmptyItem`] when the corresponding identifier is
    /// the empty string.
    pub fn try_new(
        transaction: Txn,
        access: Access,
        item: Item,
    ) -> core::result::Result<Self, OperationError> {
        if transaction.as_ref().is_empty() {
            return Err(OperationError::EmptyTransactionId);
        }
        if item.as_ref().is_empty() {
            return Err(OperationError::EmptyItem);
        }
        Ok(Self::new(transaction, access, item))
    }
}

impl<Txn, Item> Debug for Operation<Txn, Item>
where
    Txn: Debug,
    Item: Debug,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{:?}.{}({:?})",
            self.transaction,
            self.access.mnemonic(),
            self.item
        )
    }
}

impl<Txn, Item> Display for Operation<Txn, Item>
where
    Txn: Display,
    Item: Display,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(
            f,
            "{}.{}({})",
            self.transaction,
            self.access.mnemonic(),
            self.item
        )
    }
}

/// One row of a schedule.
///
/// Cells are unordered with respect to each other; `None` is a gap. At most
/// one operation per transaction is expected in a step.
pub type Step<Txn, Item> = Vec<Option<Operation<Txn, Item>>>;

/// An ordered sequence of steps. Every operation in step `i` executes
/// before every operation in step `j` whenever `i < j`.
pub type Schedule<Txn, Item> = Vec<Step<Txn, Item>>;

/// Position of an operation inside the step matrix.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId {
    /// 0-based step (row) index.
    pub step: usize,
    /// 0-based cell (column) index within the step.
    pub column: usize,
}
