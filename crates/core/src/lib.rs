//! Conflict-serializability analysis for recorded transaction schedules.
//!
//! `sercheck_core` decides whether an interleaved execution of transactions
//! (a *schedule*) is conflict-serializable, and if so, enumerates every serial
//! order of the transactions that is equivalent to it. The analysis runs in
//! three stages:
//!
//! 1. **Precedence graph** -- one vertex per transaction, and an edge
//!    `T_a -> T_b` whenever an operation of `T_a` conflicts with a later
//!    operation of `T_b` (same item, different transactions, at least one
//!    write).
//! 2. **Cycle detection** -- a depth-first search with three vertex states.
//!    The schedule is conflict-serializable iff the graph is acyclic.
//! 3. **Enumeration** -- a backtracking search over every topological order
//!    of the acyclic graph.
//!
//! A schedule is a sequence of steps. Every operation in a step runs before
//! every operation of the following steps; operations inside one step are
//! unordered. The core does not validate that a schedule is well formed.
//!
//! # Entry point
//!
//! The main entry point is [`check()`], which takes a slice of steps and
//! returns either a [`Witness`](serializability::Witness) with the graph and
//! all serial orders, or an [`Error`](serializability::error::Error) carrying
//! an offending cycle.
//!
//! ```rust,ignore
//! use sercheck_core::check;
//! use sercheck_core::schedule::types::Operation;
//!
//! let schedule = vec![
//!     vec![Some(Operation::write("T1", "A")), Some(Operation::read("T2", "D"))],
//!     vec![Some(Operation::read("T3", "A")), None],
//! ];
//! match check(&schedule) {
//!     Ok(witness) => println!("serializable: {:?}", witness.serial_orders),
//!     Err(err) => println!("not serializable: {err:?}"),
//! }
//! ```
//!
//! # Crate features
//!
//! - **`serde`** -- enables `Serialize`/`Deserialize` derives on the schedule
//!   model, `DiGraph`, `PrecedenceGraph`, `Witness` and `Error`.
//! - **`schemars`** -- derives `JsonSchema` for the schedule model.
//!
//! This crate is `no_std` compatible (requires `alloc`). The text parser lives
//! in the separate `sercheck_parser` crate.

#![cfg_attr(not(any(test, feature = "schemars")), no_std)]
extern crate alloc;

pub mod graph;
pub mod precedence;
pub mod schedule;
pub mod serializability;

pub use serializability::{all_serial_orders, check, is_conflict_serializable};
