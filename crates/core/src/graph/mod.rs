//! Directed graphs keyed by vertex value, with cycle detection and
//! enumeration of topological orderings.

pub mod cycle;
pub mod digraph;
pub mod linear_extension;
