use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// Directed graph backed by an adjacency map.
///
/// Each vertex of type `T` maps to the set of its outgoing neighbors, so
/// vertices never hold references to each other. Unlike a free-form graph,
/// vertices must be registered with [`add_vertex`](Self::add_vertex) before an
/// edge may touch them; the vertex set is expected to be fixed before the
/// first edge is inserted.
///
/// Used by `sercheck_core` to represent the precedence relation between
/// transactions.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    /// Maps each vertex to the set of vertices it has edges to.
    pub adj_map: HashMap<T, HashSet<T>>,
}

impl<T> Default for DiGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    fn default() -> Self {
        Self {
            adj_map: HashMap::default(),
        }
    }
}

impl<T> DiGraph<T>
where
    T: Hash + Eq + Clone + Debug,
{
    /// Adds a vertex with no outgoing edges (if not already present).
    pub fn add_vertex(&mut self, source: T) {
        self.adj_map.entry(source).or_default();
    }

    /// Inserts a directed edge from `source` to `target`.
    ///
    /// Returns `true` if the edge was not present before.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint has not been added as a vertex. Edges are
    /// only ever derived from vertices registered up front, so a missing
    /// endpoint is a bug in the caller.
    pub fn add_edge(&mut self, source: &T, target: T) -> bool {
        assert!(
            self.adj_map.contains_key(&target),
            "edge target {target:?} is not a vertex of the graph"
        );
        self.adj_map
            .get_mut(source)
            .unwrap_or_else(|| panic!("edge source {source:?} is not a vertex of the graph"))
            .insert(target)
    }

    /// Returns `true` if `vertex` belongs to the graph.
    pub fn has_vertex(&self, vertex: &T) -> bool {
        self.adj_map.contains_key(vertex)
    }

    /// Returns `true` if an edge from `source` to `target` exists.
    pub fn has_edge(&self, source: &T, target: &T) -> bool {
        self.adj_map
            .get(source)
            .is_some_and(|neighbor| neighbor.contains(target))
    }

    /// Returns the outgoing neighbors of `source`, or `None` if it is not a vertex.
    pub fn successors(&self, source: &T) -> Option<&HashSet<T>> {
        self.adj_map.get(source)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adj_map.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adj_map.values().map(HashSet::len).sum()
    }

    /// Returns all edges as a list of (source, target) pairs.
    #[must_use]
    pub fn to_edge_list(&self) -> Vec<(T, T)> {
        let mut edges = Vec::new();
        for (src, dsts) in &self.adj_map {
            for dst in dsts {
                edges.push((src.clone(), dst.clone()));
            }
        }
        edges
    }
}

impl<T> DiGraph<T>
where
    T: Hash + Eq + Clone + Debug + Ord,
{
    /// Returns every vertex in ascending order.
    #[must_use]
    pub fn sorted_vertices(&self) -> Vec<&T> {
        let mut vertices: Vec<&T> = self.adj_map.keys().collect();
        vertices.sort_unstable();
        vertices
    }

    /// Returns the outgoing neighbors of `source` in ascending order.
    ///
    /// An unknown `source` has no neighbors.
    #[must_use]
    pub fn sorted_successors(&self, source: &T) -> Vec<&T> {
        let mut successors: Vec<&T> = self
            .adj_map
            .get(source)
            .map(|dsts| dsts.iter().collect())
            .unwrap_or_default();
        successors.sort_unstable();
        successors
    }
}
