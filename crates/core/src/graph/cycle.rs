//! Cycle detection by depth-first search with three vertex states.
//!
//! A vertex is *unvisited* (absent from the color map), *in-stack* (on the
//! current DFS path) or *done* (fully explored, no cycle through it). Meeting
//! an in-stack vertex along an edge closes a cycle; meeting a done vertex is
//! skipped since nothing reachable from it can close one.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::graph::digraph::DiGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    InStack,
    Done,
}

/// Search state for a single cycle query. Owned by the query, never shared.
struct CycleSearch<'a, T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    graph: &'a DiGraph<T>,
    color: HashMap<&'a T, Color>,
    path: Vec<&'a T>,
}

impl<'a, T> CycleSearch<'a, T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    fn new(graph: &'a DiGraph<T>) -> Self {
        Self {
            graph,
            color: HashMap::with_capacity(graph.vertex_count()),
            path: Vec::new(),
        }
    }

    fn run(mut self) -> Option<Vec<T>> {
        let graph = self.graph;
        for vertex in graph.sorted_vertices() {
            if self.color.contains_key(vertex) {
                continue;
            }
            if let Some(cycle) = self.visit(vertex) {
                return Some(cycle);
            }
        }
        None
    }

    fn visit(&mut self, vertex: &'a T) -> Option<Vec<T>> {
        let graph = self.graph;
        self.color.insert(vertex, Color::InStack);
        self.path.push(vertex);

        for next in graph.sorted_successors(vertex) {
            match self.color.get(next).copied() {
                Some(Color::InStack) => {
                    let start = self
                        .path
                        .iter()
                        .position(|v| *v == next)
                        .expect("in-stack vertex must be on the current path");
                    return Some(self.path[start..].iter().map(|v| (*v).clone()).collect());
                }
                Some(Color::Done) => {}
                None => {
                    if let Some(cycle) = self.visit(next) {
                        return Some(cycle);
                    }
                }
            }
        }

        self.path.pop();
        self.color.insert(vertex, Color::Done);
        None
    }
}

impl<T> DiGraph<T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    /// Returns the vertices of one cycle, or `None` if the graph is acyclic.
    ///
    /// The cycle `[a, b, ..., z]` is listed in edge order: the graph has edges
    /// `a -> b -> ... -> z -> a`. A self-loop is reported as `[a]`. Roots and
    /// successors are explored in ascending order, so the reported cycle is
    /// the same on every run.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<T>> {
        CycleSearch::new(self).run()
    }

    /// Detects if the graph contains a cycle.
    /// Time complexity: O(V log V + E log E)
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Returns `true` if the graph has no cycles.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        !self.has_cycle()
    }
}
