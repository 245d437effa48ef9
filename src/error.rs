use thiserror::Error;

use crate::color::VertexId;

/** Structured errors of the solve entry points.

Contract violations are detected before any search work happens and no
coloring is produced. Running out of time is not an error: the solve
returns its best coloring with the timeout flag set. */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// the row-offset and degree arrays do not describe the same vertex set
    #[error("csr arrays disagree: {0} row offsets for {1} degrees")]
    MismatchedArrays(usize, usize),
    /// a vertex's neighbor range falls outside the flat adjacency array
    #[error("vertex {0}: neighbor range exceeds the adjacency array")]
    RowOutOfBounds(VertexId),
    /// a neighbor list is not sorted strictly ascending
    #[error("vertex {0}: neighbor list is not sorted strictly ascending")]
    UnsortedAdjacency(VertexId),
    /// a vertex lists itself as a neighbor
    #[error("vertex {0}: self-loop")]
    SelfLoop(VertexId),
    /// a neighbor index is outside the vertex range
    #[error("vertex {0}: neighbor {1} out of range")]
    NeighborOutOfRange(VertexId, VertexId),
    /// an edge is listed by only one of its endpoints
    #[error("edge {{{0}, {1}}}: missing reverse entry")]
    AsymmetricEdge(VertexId, VertexId),
    /// the initial coloring needs more colors than the engine can branch on
    #[error("initial coloring uses {0} colors, above the supported maximum")]
    TooManyColors(usize),
}
