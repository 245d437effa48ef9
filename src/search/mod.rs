//! Search algorithms for the exact coloring engine.

/// greedy that finds a clique of "large" size (initial lower bound)
pub mod greedy_clique;

/// greedy DSATUR coloring (initial upper bound)
pub mod greedy_dsatur;

/// DSATUR branch-and-bound driver and branching strategies
pub mod dsatur_bnb;

/// per-node reduced-graph lower bound
pub(crate) mod reduced_graph;
