/// Error constructing an [`Operation`](super::types::Operation) from textual identifiers.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// The transaction id is the empty string.
    EmptyTransactionId,
    /// The item id is the empty string.
    EmptyItem,
}
