use bit_set::BitSet;

use crate::color::VertexId;
use crate::color_set::ColorSet;
use crate::graph::CsrGraph;
use crate::state::SearchState;

/** Per-node lower bound from a reduced graph over the current partial
coloring, after Furini, Gabrel & Ternier.

The reduced graph R has one super-node per color class in use and one
ordinary node per uncolored vertex. Two super-nodes are linked iff some
uncolored vertex is forbidden from both classes; a super-node is linked to
an uncolored vertex iff the vertex is forbidden from the class; two
uncolored vertices are linked iff they are adjacent in G. Every clique of R
needs pairwise-distinct color resources, so a clique of size q certifies
that any completion uses at least q colors.

All buffers are allocated once per solve and reused across nodes. */
#[derive(Debug)]
pub(crate) struct ReducedGraphScratch {
    /// uncolored vertices of the current node
    uncolored: Vec<VertexId>,
    /// sees[c]: indices into `uncolored` of the vertices forbidden from class c
    sees: Vec<BitSet>,
    /// super_adj[c]: classes sharing a commonly-forbidden vertex with c
    super_adj: Vec<ColorSet>,
    /// degree in R of every node (classes first, then uncolored vertices)
    deg_r: Vec<usize>,
    /// node ids sorted by degree in R descending
    order: Vec<usize>,
    /// greedy clique under construction
    clique: Vec<usize>,
    /// induced degrees for the no-class-yet case
    sub_deg: Vec<usize>,
}

impl ReducedGraphScratch {
    /// allocates every buffer for an n-vertex instance
    pub(crate) fn new(n: usize) -> Self {
        Self {
            uncolored: Vec::with_capacity(n),
            sees: Vec::new(),
            super_adj: Vec::new(),
            deg_r: Vec::new(),
            order: Vec::new(),
            clique: Vec::new(),
            sub_deg: vec![0; n],
        }
    }

    /** greedy clique size of the reduced graph built from the current
    partial coloring with `k` classes in use: a valid lower bound on the
    number of colors of any completion. */
    pub(crate) fn lower_bound(
        &mut self,
        graph: &CsrGraph,
        state: &SearchState,
        k: usize,
    ) -> usize {
        self.uncolored.clear();
        self.uncolored
            .extend(graph.vertices().filter(|&v| state.color[v].is_none()));
        let nu = self.uncolored.len();
        if nu == 0 {
            return k;
        }
        if k == 0 {
            return self.uncolored_clique(graph, state);
        }

        // sees[c]: which uncolored vertices are adjacent to class c
        if self.sees.len() < k {
            self.sees.resize_with(k, BitSet::default);
        }
        for row in self.sees.iter_mut().take(k) {
            row.clear();
        }
        for (i, &u) in self.uncolored.iter().enumerate() {
            for c in state.forbidden[u].iter() {
                if c < k {
                    self.sees[c].insert(i);
                }
            }
        }

        // two classes conflict iff their `sees` rows intersect
        self.super_adj.clear();
        self.super_adj.resize(k, ColorSet::empty());
        for c in 0..k {
            for d in (c + 1)..k {
                if !self.sees[c].is_disjoint(&self.sees[d]) {
                    self.super_adj[c].insert(d);
                    self.super_adj[d].insert(c);
                }
            }
        }

        // degree in R of every node
        let total = k + nu;
        self.deg_r.clear();
        self.deg_r.resize(total, 0);
        for c in 0..k {
            self.deg_r[c] = self.super_adj[c].len() + self.sees[c].len();
        }
        for (i, &u) in self.uncolored.iter().enumerate() {
            let induced = graph
                .neighbors(u)
                .iter()
                .filter(|&&w| state.color[w].is_none())
                .count();
            self.deg_r[k + i] = state.forbidden[u].len() + induced;
        }

        // greedy clique over R, highest degree in R first
        self.order.clear();
        self.order.extend(0..total);
        let deg_r = &self.deg_r;
        self.order.sort_unstable_by(|a, b| deg_r[*b].cmp(&deg_r[*a]));

        self.clique.clear();
        for idx in 0..total {
            let a = self.order[idx];
            let ok = self.clique.iter().all(|&b| {
                reduced_adjacent(graph, &self.uncolored, &self.sees, &self.super_adj, k, a, b)
            });
            if ok {
                self.clique.push(a);
            }
        }
        self.clique.len()
    }

    /// no class in use yet: R is the subgraph induced by the uncolored
    /// vertices, so run the degree-ordered greedy clique directly on it
    fn uncolored_clique(&mut self, graph: &CsrGraph, state: &SearchState) -> usize {
        for &v in &self.uncolored {
            self.sub_deg[v] = graph
                .neighbors(v)
                .iter()
                .filter(|&&w| state.color[w].is_none())
                .count();
        }
        let sub_deg = &self.sub_deg;
        self.uncolored
            .sort_unstable_by(|a, b| sub_deg[*b].cmp(&sub_deg[*a]));
        self.clique.clear();
        for idx in 0..self.uncolored.len() {
            let v = self.uncolored[idx];
            let ok = self.clique.iter().all(|&u| graph.is_adjacent(v, u));
            if ok {
                self.clique.push(v);
            }
        }
        self.clique.len()
    }
}

/// adjacency in the reduced graph; node ids below k are color classes, the
/// rest index into `uncolored`
fn reduced_adjacent(
    graph: &CsrGraph,
    uncolored: &[VertexId],
    sees: &[BitSet],
    super_adj: &[ColorSet],
    k: usize,
    a: usize,
    b: usize,
) -> bool {
    match (a < k, b < k) {
        (true, true) => super_adj[a].contains(b),
        (true, false) => sees[a].contains(b - k),
        (false, true) => sees[b].contains(a - k),
        (false, false) => graph.is_adjacent(uncolored[a - k], uncolored[b - k]),
    }
}
