use std::cmp::Ordering;

use bit_set::BitSet;
use priority_queue::PriorityQueue;

use crate::color::VertexId;
use crate::graph::CsrGraph;

#[derive(PartialEq, Eq)]
struct DSatInfo {
    dsat: usize,
    degree: usize,
}

impl Ord for DSatInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dsat
            .cmp(&other.dsat)
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for DSatInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/** implements a greedy DSATUR coloring.
    1. choose an uncolored vertex that sees the most colors (break ties by the largest degree)
    2. assign it the smallest color not seen by its neighbors
    3. mark all its uncolored neighbors seeing this color
    4. repeat until a proper coloring is found

Returns the coloring (`coloring[v]`: color of vertex v) and the number of
colors it uses, a valid upper bound for the chromatic number. The color
range is unbounded here; the branch-and-bound driver enforces its own
ceiling after seeding. */
pub fn greedy_dsatur(graph: &CsrGraph) -> (Vec<usize>, usize) {
    let n = graph.nb_vertices();
    let mut remaining: PriorityQueue<VertexId, DSatInfo> = PriorityQueue::new();
    for v in graph.vertices() {
        remaining.push(
            v,
            DSatInfo {
                dsat: 0,
                degree: graph.degree(v),
            },
        );
    }
    let mut colors: Vec<Option<usize>> = vec![None; n]; // colors[v] -> color assigned to vertex v
    let mut adj_colors: Vec<BitSet> = vec![BitSet::default(); n]; // adj_colors[v] -> colors v sees
    let mut nb_colors: usize = 0;
    while let Some((current_vertex, _)) = remaining.pop() {
        // assign the smallest color not seen in the neighborhood
        let mut color: usize = 0;
        while adj_colors[current_vertex].contains(color) {
            color += 1;
        }
        colors[current_vertex] = Some(color);
        nb_colors = nb_colors.max(color + 1);
        // update saturation degree information
        for &neighbor in graph.neighbors(current_vertex) {
            if colors[neighbor].is_some() || adj_colors[neighbor].contains(color) {
                continue;
            }
            adj_colors[neighbor].insert(color);
            remaining.change_priority_by(&neighbor, |p| p.dsat += 1);
        }
    }
    let coloring: Vec<usize> = colors.into_iter().flatten().collect();
    debug_assert_eq!(coloring.len(), n);
    (coloring, nb_colors)
}
