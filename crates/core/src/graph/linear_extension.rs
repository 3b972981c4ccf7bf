//! Enumeration of every linear extension (topological ordering) of a DAG.
//!
//! Where Kahn's algorithm commits to one ordering, this module explores
//! *every* elimination order by backtracking:
//!
//! 1. Count, for every vertex, its predecessors that are not yet placed.
//! 2. At each level, a vertex is eligible iff it is unplaced and that count
//!    is zero, i.e. no unplaced vertex has an edge into it.
//! 3. For each eligible vertex, in ascending order:
//!    a. place it: mark it placed, append it to the ordering and decrement
//!    the counts of its successors;
//!    b. recurse;
//!    c. backtrack: restore the successor counts, pop the ordering and
//!    unmark it.
//! 4. When every vertex is placed, hand the ordering to the visitor.
//!
//! Eligibility is read from the counts as they stand for the current partial
//! ordering, never from a snapshot taken up front. A graph with `V` vertices
//! yields a search tree of depth `V`; a graph with no edges yields `V!`
//! orderings, so callers that need bounded work stop the search from the
//! visitor.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;
use core::ops::ControlFlow;

use hashbrown::{HashMap, HashSet};

use crate::graph::digraph::DiGraph;

/// Backtracking state for one enumeration. Owned by the call that created it.
struct ExtensionSearch<'a, T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    graph: &'a DiGraph<T>,
    /// All vertices, ascending; fixes the order in which candidates are tried.
    vertices: Vec<&'a T>,
    /// Number of predecessors of each vertex that are not yet placed.
    unplaced_parents: HashMap<&'a T, usize>,
    placed: HashSet<&'a T>,
    ordering: Vec<&'a T>,
}

impl<'a, T> ExtensionSearch<'a, T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    fn new(graph: &'a DiGraph<T>) -> Self {
        let vertices = graph.sorted_vertices();
        let mut unplaced_parents: HashMap<&'a T, usize> =
            vertices.iter().map(|vertex| (*vertex, 0)).collect();
        for targets in graph.adj_map.values() {
            for target in targets {
                *unplaced_parents
                    .get_mut(target)
                    .expect("edge target must be a vertex") += 1;
            }
        }
        Self {
            graph,
            placed: HashSet::with_capacity(vertices.len()),
            ordering: Vec::with_capacity(vertices.len()),
            vertices,
            unplaced_parents,
        }
    }

    fn is_eligible(&self, vertex: &T) -> bool {
        !self.placed.contains(vertex) && self.unplaced_parents[vertex] == 0
    }

    fn place(&mut self, vertex: &'a T) {
        let graph = self.graph;
        self.placed.insert(vertex);
        self.ordering.push(vertex);
        for child in graph.successors(vertex).into_iter().flatten() {
            let count = self
                .unplaced_parents
                .get_mut(child)
                .expect("all vertices are expected in unplaced parents");
            *count -= 1;
        }
    }

    fn unplace(&mut self, vertex: &'a T) {
        let graph = self.graph;
        for child in graph.successors(vertex).into_iter().flatten() {
            *self
                .unplaced_parents
                .get_mut(child)
                .expect("all vertices are expected in unplaced parents") += 1;
        }
        let last = self.ordering.pop();
        assert_eq!(last, Some(vertex), "backtracked out of order");
        self.placed.remove(vertex);
    }

    fn search<F>(&mut self, visitor: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&[&T]) -> ControlFlow<()>,
    {
        if self.ordering.len() == self.vertices.len() {
            tracing::trace!(ordering = ?self.ordering, "topological ordering");
            return visitor(&self.ordering);
        }

        for index in 0..self.vertices.len() {
            let vertex = self.vertices[index];
            if !self.is_eligible(vertex) {
                continue;
            }

            self.place(vertex);
            let flow = self.search(visitor);
            self.unplace(vertex);

            if flow.is_break() {
                return flow;
            }
        }

        ControlFlow::Continue(())
    }
}

impl<T> DiGraph<T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    /// Feeds every topological ordering of the graph to `visitor`.
    ///
    /// Orderings arrive in lexicographic order of their vertices. Returning
    /// [`ControlFlow::Break`] from the visitor stops the search, and the break
    /// is returned. A cyclic graph has no orderings: the visitor is never
    /// called.
    pub fn visit_topological_sorts<F>(&self, mut visitor: F) -> ControlFlow<()>
    where
        F: FnMut(&[&T]) -> ControlFlow<()>,
    {
        if self.has_cycle() {
            return ControlFlow::Continue(());
        }
        ExtensionSearch::new(self).search(&mut visitor)
    }

    /// Returns every topological ordering of the graph.
    ///
    /// Empty if the graph has a cycle. An empty graph has exactly one
    /// ordering, the empty one.
    #[must_use]
    pub fn all_topological_sorts(&self) -> Vec<Vec<T>> {
        let mut orderings = Vec::new();
        let _ = self.visit_topological_sorts(|ordering| {
            orderings.push(ordering.iter().map(|v| (*v).clone()).collect());
            ControlFlow::Continue(())
        });
        orderings
    }

    /// Counts the topological orderings of the graph without collecting them.
    #[must_use]
    pub fn count_topological_sorts(&self) -> usize {
        let mut count = 0;
        let _ = self.visit_topological_sorts(|_| {
            count += 1;
            ControlFlow::Continue(())
        });
        count
    }
}
