use bit_set::BitSet;

use crate::graph::CsrGraph;

/** Vertex Id */
pub type VertexId = usize;

/** Solution of a graph coloring problem
(represented as a partition). */
pub type Solution = Vec<Vec<VertexId>>;

/** groups a flat coloring (`coloring[v]`: color of vertex v) into color
classes. Class `c` holds the vertices colored `c`, in ascending order. */
pub fn color_classes(coloring: &[usize]) -> Solution {
    let nb_colors = coloring.iter().map(|c| c + 1).max().unwrap_or(0);
    let mut res = vec![vec![]; nb_colors];
    for (v, &c) in coloring.iter().enumerate() {
        res[c].push(v);
    }
    res
}

/** checker result.
Returns the solution value if correct,
otherwise, provide an explanation on why the solution is incorrect.
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckerResult {
    /// solution is correct and provide its cost
    Ok(usize),
    /// a vertex is added twice in the solution
    VertexAddedTwice(VertexId),
    /// some vertex is not colored
    VertexNotColored(VertexId),
    /// conflicting edge
    ConflictingEdge(VertexId, VertexId),
}

/**
checks a candidate solution against the graph:
every vertex appears in exactly one class and no class contains an edge.
Returns the number of colors if the solution is feasible.
*/
pub fn checker(graph: &CsrGraph, sol: &[Vec<VertexId>]) -> CheckerResult {
    // check that all vertices are added
    let mut visited = BitSet::new();
    for class in sol {
        for &v in class {
            if visited.contains(v) {
                return CheckerResult::VertexAddedTwice(v);
            }
            visited.insert(v);
        }
    }
    if visited.len() != graph.nb_vertices() {
        for v in graph.vertices() {
            if !visited.contains(v) {
                return CheckerResult::VertexNotColored(v);
            }
        }
        panic!("checker: internal error");
    }
    // check conflicts
    for class in sol {
        for &v1 in class {
            for &v2 in class {
                if graph.is_adjacent(v1, v2) {
                    return CheckerResult::ConflictingEdge(v1, v2);
                }
            }
        }
    }
    // if ok: return the number of colors
    CheckerResult::Ok(sol.len())
}
