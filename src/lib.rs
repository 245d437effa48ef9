//! Exact graph coloring: computes the chromatic number of a simple
//! undirected graph with a DSATUR-based branch-and-bound, and returns a
//! proper coloring together with a machine-checkable optimality proof
//! (a lower bound equal to the number of colors used).
//!
//! The caller supplies the graph as a borrowed CSR view
//! ([`graph::CsrGraph`]) and picks one of three strategies
//! ([`search::dsatur_bnb::Strategy`]): classic DSATUR branching, Sewell
//! tie-breaking, or Furini-style per-node reduced-graph bounding.
//! Targets the DIMACS benchmark regime: graphs up to a few thousand
//! vertices whose optimum lies below 63 colors.

// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]

/// coloring types, solutions and checker
pub mod color;

/// fixed-width set of color indices
pub mod color_set;

/// contract violations and unsupported-instance errors
pub mod error;

/// borrowed CSR graph view and owned CSR storage
pub mod graph;

/// mutable state of one branch-and-bound descent
mod state;

/// search algorithms: initial bounds and the branch-and-bound driver
pub mod search;
