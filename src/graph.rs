use crate::color::VertexId;
use crate::error::SolveError;

/** Borrowed CSR view of a simple undirected graph, immutable for the life
of a solve. The neighbor lists are concatenated in `adj`, each sorted
strictly ascending; `start[v]` and `deg[v]` delimit the list of vertex v.

The view does not own the arrays: the caller keeps them alive for the whole
solve. [`CsrGraph::new`] checks the representation contract and fails fast
on violations. */
#[derive(Debug, Clone, Copy)]
pub struct CsrGraph<'a> {
    /// nb vertices
    n: usize,
    /// flat adjacency, sorted per vertex
    adj: &'a [VertexId],
    /// start[v]: first index of v's neighbors in adj
    start: &'a [usize],
    /// deg[v]: degree of vertex v
    deg: &'a [usize],
}

impl<'a> CsrGraph<'a> {
    /** builds a view over caller-owned CSR arrays.

    Checks the engine contract: offsets and degrees consistent with `adj`,
    neighbor lists sorted strictly ascending (no duplicates), no self-loops,
    neighbors in range, and every edge listed by both endpoints. */
    pub fn new(
        adj: &'a [VertexId],
        start: &'a [usize],
        deg: &'a [usize],
    ) -> Result<Self, SolveError> {
        let n = deg.len();
        if start.len() != n {
            return Err(SolveError::MismatchedArrays(start.len(), n));
        }
        for v in 0..n {
            let lo = start[v];
            let hi = lo
                .checked_add(deg[v])
                .ok_or(SolveError::RowOutOfBounds(v))?;
            if hi > adj.len() {
                return Err(SolveError::RowOutOfBounds(v));
            }
            let row = &adj[lo..hi];
            for (i, &w) in row.iter().enumerate() {
                if w >= n {
                    return Err(SolveError::NeighborOutOfRange(v, w));
                }
                if w == v {
                    return Err(SolveError::SelfLoop(v));
                }
                if i > 0 && row[i - 1] >= w {
                    return Err(SolveError::UnsortedAdjacency(v));
                }
            }
        }
        let graph = Self { n, adj, start, deg };
        for v in 0..n {
            for &w in graph.neighbors(v) {
                if !graph.is_adjacent(w, v) {
                    return Err(SolveError::AsymmetricEdge(v, w));
                }
            }
        }
        Ok(graph)
    }

    /// returns the number of vertices in the graph
    pub fn nb_vertices(&self) -> usize {
        self.n
    }

    /// returns the number of edges in the graph
    pub fn nb_edges(&self) -> usize {
        self.deg.iter().sum::<usize>() / 2
    }

    /// number of neighbors of vertex v
    pub fn degree(&self, v: VertexId) -> usize {
        self.deg[v]
    }

    /// returns the neighbors of vertex v, sorted ascending
    pub fn neighbors(&self, v: VertexId) -> &'a [VertexId] {
        &self.adj[self.start[v]..self.start[v] + self.deg[v]]
    }

    /// returns true iff u and v are adjacent (binary search in u's list)
    pub fn is_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// iterator over vertices of the graph
    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.n
    }
}

/** Owned CSR arrays, built from an edge list. Convenience for callers (and
tests) that do not already hold a CSR representation; the engine itself
only ever sees the borrowed [`CsrGraph`] view. */
#[derive(Debug, Clone, Default)]
pub struct CsrStorage {
    adj: Vec<VertexId>,
    start: Vec<usize>,
    deg: Vec<usize>,
}

impl CsrStorage {
    /** builds sorted, deduplicated, symmetric CSR arrays from an edge list
    on vertices `0..n`. Self-loops and repeated edges are dropped.

    # Panics
     - if an edge endpoint is outside `0..n`
    */
    pub fn from_edges(n: usize, edges: &[(VertexId, VertexId)]) -> Self {
        let mut adj_list: Vec<Vec<VertexId>> = vec![Vec::new(); n];
        for &(u, v) in edges {
            assert!(u < n && v < n, "edge ({},{}) outside the vertex range", u, v);
            if u == v {
                continue;
            }
            adj_list[u].push(v);
            adj_list[v].push(u);
        }
        let mut adj = Vec::new();
        let mut start = Vec::with_capacity(n);
        let mut deg = Vec::with_capacity(n);
        for list in adj_list.iter_mut() {
            list.sort_unstable();
            list.dedup();
            start.push(adj.len());
            deg.push(list.len());
            adj.extend_from_slice(list);
        }
        Self { adj, start, deg }
    }

    /// borrowed engine view over the stored arrays
    pub fn view(&self) -> CsrGraph<'_> {
        CsrGraph {
            n: self.deg.len(),
            adj: &self.adj,
            start: &self.start,
            deg: &self.deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges() {
        // square with one diagonal, a duplicate edge and a self-loop
        let storage = CsrStorage::from_edges(
            4,
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 0), (2, 2)],
        );
        let graph = storage.view();
        assert_eq!(graph.nb_vertices(), 4);
        assert_eq!(graph.nb_edges(), 5);
        assert_eq!(graph.neighbors(0), &[1, 2, 3]);
        assert_eq!(graph.degree(2), 3);
        assert!(graph.is_adjacent(0, 2));
        assert!(graph.is_adjacent(2, 0));
        assert!(!graph.is_adjacent(1, 3));
    }

    #[test]
    fn test_new_accepts_valid_csr() {
        let adj = [1, 2, 0, 0];
        let start = [0, 2, 3];
        let deg = [2, 1, 1];
        let graph = CsrGraph::new(&adj, &start, &deg).unwrap();
        assert_eq!(graph.nb_edges(), 2);
        assert!(graph.is_adjacent(0, 2));
    }

    #[test]
    fn test_new_rejects_unsorted() {
        let adj = [2, 1, 0, 0];
        let start = [0, 2, 3];
        let deg = [2, 1, 1];
        assert_eq!(
            CsrGraph::new(&adj, &start, &deg).unwrap_err(),
            SolveError::UnsortedAdjacency(0)
        );
    }

    #[test]
    fn test_new_rejects_self_loop() {
        let adj = [1, 1];
        let start = [0, 1];
        let deg = [1, 1];
        assert_eq!(
            CsrGraph::new(&adj, &start, &deg).unwrap_err(),
            SolveError::SelfLoop(1)
        );
    }

    #[test]
    fn test_new_rejects_asymmetric_edge() {
        // 0 lists 1, but 1 has no neighbors
        let adj = [1];
        let start = [0, 1];
        let deg = [1, 0];
        assert_eq!(
            CsrGraph::new(&adj, &start, &deg).unwrap_err(),
            SolveError::AsymmetricEdge(0, 1)
        );
    }

    #[test]
    fn test_new_rejects_bad_offsets() {
        let adj = [1, 0];
        let start = [0, 1];
        let deg = [1, 2];
        assert_eq!(
            CsrGraph::new(&adj, &start, &deg).unwrap_err(),
            SolveError::RowOutOfBounds(1)
        );
    }
}
