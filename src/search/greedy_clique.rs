use crate::color::VertexId;
use crate::graph::CsrGraph;

/** implements a greedy algorithm that finds a "large" size clique.
Vertices are visited by degree descending; a vertex joins the clique iff it
is adjacent to every member admitted so far. The clique size is a valid
lower bound for the clique number, hence for the chromatic number. */
pub fn greedy_clique(graph: &CsrGraph) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = graph.vertices().collect();
    order.sort_unstable_by(|a, b| graph.degree(*b).cmp(&graph.degree(*a)));
    let mut clique: Vec<VertexId> = Vec::new();
    for v in order {
        if clique.iter().all(|&u| graph.is_adjacent(v, u)) {
            clique.push(v);
        }
    }
    clique
}
