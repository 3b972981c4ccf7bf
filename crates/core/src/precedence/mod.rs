//! Precedence graphs of schedules.
//!
//! The precedence graph has one vertex per transaction and an edge
//! `T_a -> T_b` whenever some operation of `T_a` conflicts with a later
//! operation of `T_b`. Any serial schedule equivalent to the recorded one
//! must run `T_a` before `T_b`.
//!
//! Construction happens in two phases. First every transaction that appears
//! in the schedule gets a vertex with no edges; the vertex set never changes
//! afterwards. Then every ordered pair of operations in the flattened
//! schedule is tested with [`conflicts`](conflict::conflicts), and each
//! conflicting pair contributes an edge. Duplicate edges collapse, and since
//! conflicts need two distinct transactions there are no self-loops.
//!
//! Once built, the graph is never modified.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;
use core::ops::ControlFlow;

use crate::graph::digraph::DiGraph;
use crate::schedule::types::{Operation, OperationId, Step};
use crate::schedule::{flatten, transactions};

pub mod conflict;
pub mod display;

use self::conflict::classify;

/// Directed graph of "must execute before" constraints between transactions.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceGraph<Txn>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
{
    graph: DiGraph<Txn>,
}

impl<Txn, Item> From<&[Step<Txn, Item>]> for PrecedenceGraph<Txn>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
    Item: Eq + Debug,
{
    fn from(schedule: &[Step<Txn, Item>]) -> Self {
        let mut graph = DiGraph::default();
        for txn in transactions(schedule) {
            graph.add_vertex(txn);
        }

        let operations: Vec<(OperationId, &Operation<Txn, Item>)> = flatten(schedule).collect();
        for (i, &(earlier_id, earlier)) in operations.iter().enumerate() {
            for &(later_id, later) in &operations[i + 1..] {
                let Some(kind) = classify(earlier, later) else {
                    continue;
                };
                if graph.add_edge(&earlier.transaction, later.transaction.clone()) {
                    tracing::trace!(
                        source = ?earlier.transaction,
                        target = ?later.transaction,
                        item = ?earlier.item,
                        ?kind,
                        ?earlier_id,
                        ?later_id,
                        "precedence edge"
                    );
                }
            }
        }

        tracing::debug!(
            operations = operations.len(),
            transactions = graph.vertex_count(),
            edges = graph.edge_count(),
            "built precedence graph"
        );

        Self { graph }
    }
}

impl<Txn> PrecedenceGraph<Txn>
where
    Txn: Hash + Eq + Clone + Debug + Ord,
{
    /// Builds the precedence graph of `schedule`.
    #[must_use]
    pub fn new<Item>(schedule: &[Step<Txn, Item>]) -> Self
    where
        Item: Eq + Debug,
    {
        Self::from(schedule)
    }

    /// The underlying adjacency graph.
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<Txn> {
        &self.graph
    }

    /// All transactions of the schedule, ascending.
    #[must_use]
    pub fn transactions(&self) -> Vec<&Txn> {
        self.graph.sorted_vertices()
    }

    /// Returns `true` if some conflict forces `source` to run before `target`.
    #[must_use]
    pub fn precedes(&self, source: &Txn, target: &Txn) -> bool {
        self.graph.has_edge(source, target)
    }

    #[must_use]
    pub fn has_cycle(&self) -> bool {
        self.graph.has_cycle()
    }

    /// One cycle of transactions, if any; see [`DiGraph::find_cycle`].
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<Txn>> {
        self.graph.find_cycle()
    }

    /// A schedule is conflict-serializable iff its precedence graph is acyclic.
    #[must_use]
    pub fn is_conflict_serializable(&self) -> bool {
        !self.has_cycle()
    }

    /// Every serial order of the transactions that respects all edges, in
    /// lexicographic order. Empty if the graph has a cycle.
    #[must_use]
    pub fn serial_orders(&self) -> Vec<Vec<Txn>> {
        self.graph.all_topological_sorts()
    }

    /// Streams serial orders to `visitor`; see
    /// [`DiGraph::visit_topological_sorts`].
    pub fn visit_serial_orders<F>(&self, visitor: F) -> ControlFlow<()>
    where
        F: FnMut(&[&Txn]) -> ControlFlow<()>,
    {
        self.graph.visit_topological_sorts(visitor)
    }

    #[must_use]
    pub fn count_serial_orders(&self) -> usize {
        self.graph.count_topological_sorts()
    }
}
