use crate::color::VertexId;
use crate::color_set::ColorSet;
use crate::graph::CsrGraph;

/** Mutable state of one branch-and-bound descent: the partial coloring,
the per-vertex forbidden colors with their saturation degrees, the global
bounds, the incumbent coloring and the search counters.

Invariant maintained by [`assign`](SearchState::assign) /
[`unassign`](SearchState::unassign): for every uncolored vertex v,
`forbidden[v]` is exactly the set of colors used by v's colored neighbors
and `dsat[v]` its cardinality. */
#[derive(Debug)]
pub(crate) struct SearchState {
    /// color[v]: current color of vertex v, `None` = uncolored
    pub(crate) color: Vec<Option<usize>>,
    /// forbidden[v]: colors used by at least one colored neighbor of v
    pub(crate) forbidden: Vec<ColorSet>,
    /// dsat[v]: saturation degree of vertex v
    pub(crate) dsat: Vec<usize>,
    /// global lower bound on the number of colors
    pub(crate) lb: usize,
    /// current best upper bound (nb colors of the incumbent)
    pub(crate) ub: usize,
    /// incumbent: complete proper coloring using `ub` colors
    pub(crate) best_color: Vec<usize>,
    /// nodes expanded so far
    pub(crate) nodes_visited: u64,
    /// subtrees pruned against the bounds
    pub(crate) branches_cut: u64,
    /// the time budget ran out during the descent
    pub(crate) timeout: bool,
    /// successive upper bounds, best last
    pub(crate) primal_list: Vec<usize>,
}

impl SearchState {
    /// fresh state: nothing colored, zero bounds and counters
    pub(crate) fn new(n: usize) -> Self {
        Self {
            color: vec![None; n],
            forbidden: vec![ColorSet::empty(); n],
            dsat: vec![0; n],
            lb: 0,
            ub: 0,
            best_color: Vec::new(),
            nodes_visited: 0,
            branches_cut: 0,
            timeout: false,
            primal_list: Vec::new(),
        }
    }

    /** assigns color c to vertex v and raises the saturation of the
    uncolored neighbors that did not see c yet */
    pub(crate) fn assign(&mut self, graph: &CsrGraph, v: VertexId, c: usize) {
        debug_assert!(self.color[v].is_none());
        self.color[v] = Some(c);
        for &w in graph.neighbors(v) {
            if self.color[w].is_some() {
                continue;
            }
            if !self.forbidden[w].contains(c) {
                self.forbidden[w].insert(c);
                self.dsat[w] += 1;
            }
        }
    }

    /** exact inverse of [`assign`](SearchState::assign). Forbidden sets are
    unions over colored neighbors, not multisets: c is cleared from a
    neighbor w only when no other colored neighbor of w still carries c. */
    pub(crate) fn unassign(&mut self, graph: &CsrGraph, v: VertexId, c: usize) {
        debug_assert_eq!(self.color[v], Some(c));
        self.color[v] = None;
        for &w in graph.neighbors(v) {
            if self.color[w].is_some() {
                continue;
            }
            if !self.forbidden[w].contains(c) {
                continue;
            }
            let still = graph
                .neighbors(w)
                .iter()
                .any(|&x| x != v && self.color[x] == Some(c));
            if !still {
                self.forbidden[w].remove(c);
                self.dsat[w] -= 1;
            }
        }
    }

    /** recomputes the forbidden set and saturation of every uncolored
    vertex from scratch and compares them with the incremental values */
    pub(crate) fn saturation_consistent(&self, graph: &CsrGraph) -> bool {
        for v in graph.vertices() {
            if self.color[v].is_some() {
                continue;
            }
            let mut fresh = ColorSet::empty();
            for &w in graph.neighbors(v) {
                if let Some(c) = self.color[w] {
                    fresh.insert(c);
                }
            }
            if fresh != self.forbidden[v] || fresh.len() != self.dsat[v] {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CsrStorage;

    fn snapshot(state: &SearchState) -> (Vec<Option<usize>>, Vec<ColorSet>, Vec<usize>) {
        (
            state.color.clone(),
            state.forbidden.clone(),
            state.dsat.clone(),
        )
    }

    #[test]
    fn test_assign_updates_saturation() {
        // path 0-1-2
        let storage = CsrStorage::from_edges(3, &[(0, 1), (1, 2)]);
        let graph = storage.view();
        let mut state = SearchState::new(3);
        state.assign(&graph, 0, 0);
        assert_eq!(state.dsat[1], 1);
        assert!(state.forbidden[1].contains(0));
        assert_eq!(state.dsat[2], 0);
        state.assign(&graph, 2, 0);
        // both neighbors of 1 use color 0: saturation counts distinct colors
        assert_eq!(state.dsat[1], 1);
        assert!(state.saturation_consistent(&graph));
    }

    #[test]
    fn test_unassign_keeps_color_seen_by_other_neighbor() {
        // triangle; 1 and 2 both see vertex 0's neighbors
        let storage = CsrStorage::from_edges(3, &[(0, 1), (0, 2), (1, 2)]);
        let graph = storage.view();
        let mut state = SearchState::new(3);
        state.assign(&graph, 1, 0);
        state.assign(&graph, 2, 0);
        // 0 sees color 0 through both 1 and 2
        assert_eq!(state.dsat[0], 1);
        state.unassign(&graph, 1, 0);
        // still through 2
        assert_eq!(state.dsat[0], 1);
        assert!(state.forbidden[0].contains(0));
        state.unassign(&graph, 2, 0);
        assert_eq!(state.dsat[0], 0);
        assert!(state.forbidden[0].is_empty());
        assert!(state.saturation_consistent(&graph));
    }

    #[test]
    fn test_assign_unassign_restores_state_exactly() {
        // wheel: hub 0 adjacent to a 4-cycle 1-2-3-4
        let storage = CsrStorage::from_edges(
            5,
            &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (2, 3), (3, 4), (4, 1)],
        );
        let graph = storage.view();
        let mut state = SearchState::new(5);
        state.assign(&graph, 1, 0);
        state.assign(&graph, 3, 1);
        let before = snapshot(&state);
        // arbitrary interleavings of matched pairs leave the state bit-identical
        state.assign(&graph, 0, 2);
        state.assign(&graph, 2, 1);
        state.unassign(&graph, 2, 1);
        state.assign(&graph, 4, 2);
        state.unassign(&graph, 4, 2);
        state.unassign(&graph, 0, 2);
        assert_eq!(snapshot(&state), before);
        assert!(state.saturation_consistent(&graph));
    }

    #[test]
    fn test_reconstruction_matches_incremental() {
        let storage = CsrStorage::from_edges(
            6,
            &[(0, 1), (0, 2), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (1, 4)],
        );
        let graph = storage.view();
        let mut state = SearchState::new(6);
        for (v, c) in [(0, 0), (1, 1), (2, 2), (3, 0)] {
            state.assign(&graph, v, c);
            assert!(state.saturation_consistent(&graph));
        }
        for (v, c) in [(3, 0), (2, 2), (1, 1), (0, 0)] {
            state.unassign(&graph, v, c);
            assert!(state.saturation_consistent(&graph));
        }
        assert!(state.forbidden.iter().all(|f| f.is_empty()));
        assert!(state.dsat.iter().all(|&d| d == 0));
    }
}
