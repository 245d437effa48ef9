use std::time::Instant;

use dogs::search_algorithm::{StoppingCriterion, TimeStoppingCriterion};
use serde_json::json;

use crate::color::{checker, color_classes, CheckerResult, VertexId};
use crate::color_set::{ColorSet, MAX_COLORS};
use crate::error::SolveError;
use crate::graph::CsrGraph;
use crate::search::greedy_clique::greedy_clique;
use crate::search::greedy_dsatur::greedy_dsatur;
use crate::search::reduced_graph::ReducedGraphScratch;
use crate::state::SearchState;

/** Branching / pruning strategy of the branch-and-bound. All three share
the driver and the pruning against the incumbent; they differ in the
branching vertex choice and, for Furini, in an extra per-node bound. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// classic DSATUR selection: max saturation, ties by degree, then by index
    Dsatur,
    /// DSATUR selection with the Sewell tie-break: among tied vertices,
    /// prefer the one whose remaining color options overlap the most with
    /// its uncolored neighborhood
    Sewell,
    /// classic selection plus a reduced-graph lower bound recomputed at
    /// every node (Furini, Gabrel & Ternier)
    Furini,
}

/** solver parameters */
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// branching / pruning strategy
    pub strategy: Strategy,
    /// wall-clock budget in seconds
    pub time_limit: f32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sewell,
            time_limit: 86_400.,
        }
    }
}

/** snapshot handed to the progress callback. Purely observational: the
callback cannot touch the search. */
#[derive(Debug, Clone, Copy)]
pub struct SearchProgress {
    /// nodes expanded so far
    pub nodes_visited: u64,
    /// current best upper bound
    pub ub: usize,
    /// global lower bound
    pub lb: usize,
    /// seconds since the solve started
    pub elapsed: f32,
    /// subtrees pruned so far
    pub branches_cut: u64,
}

/// progress hook, fired on the first node and every 500th thereafter
pub type ProgressHandler<'a> = dyn FnMut(&SearchProgress) + 'a;

/// callback period, in nodes
const PROGRESS_PERIOD: u64 = 500;

/** outcome of a solve: the best coloring found, the bounds that frame it
and the search counters. `optimal` certifies `nb_colors` is the chromatic
number: the final lower bound matches it and the time budget was not hit. */
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// number of colors of the returned coloring (the final upper bound)
    pub nb_colors: usize,
    /// proper coloring, one color in `[0, nb_colors)` per vertex
    pub coloring: Vec<usize>,
    /// final lower bound; equals `nb_colors` iff the result is optimal
    pub lower_bound: usize,
    /// initial lower bound from the greedy clique
    pub clique_lb: usize,
    /// initial upper bound from the DSATUR heuristic
    pub dsatur_ub: usize,
    /// true iff the coloring is proven minimum
    pub optimal: bool,
    /// branch-and-bound nodes expanded
    pub nodes_visited: u64,
    /// subtrees pruned against the bounds
    pub branches_cut: u64,
    /// wall-clock seconds spent
    pub time_searched: f32,
    /// the time budget ran out before the search completed
    pub timeout: bool,
    /// successive upper bounds, starting with the DSATUR seed, best last
    pub primal_list: Vec<usize>,
}

impl SearchResult {
    /** search statistics as a JSON object (same shape as the performance
    logs of the heuristic solvers) */
    pub fn stats(&self) -> serde_json::Value {
        json!({
            "nb_colors": self.nb_colors,
            "lower_bound": self.lower_bound,
            "clique_lb": self.clique_lb,
            "dsatur_ub": self.dsatur_ub,
            "optimal": self.optimal,
            "nodes_visited": self.nodes_visited,
            "branches_cut": self.branches_cut,
            "primal_list": self.primal_list,
            "time_searched": self.time_searched,
            "timeout": self.timeout,
        })
    }
}

/** solves the instance to optimality within `config.time_limit` seconds.

Seeds the bounds with a greedy clique and a DSATUR coloring, then explores
the DSATUR branch-and-bound tree under the chosen strategy. On timeout the
best coloring found so far is returned with `optimal = false`. */
pub fn solve(
    graph: &CsrGraph,
    config: &SolverConfig,
    progress: Option<&mut ProgressHandler<'_>>,
) -> Result<SearchResult, SolveError> {
    solve_with_criterion(
        graph,
        config.strategy,
        TimeStoppingCriterion::new(config.time_limit),
        progress,
    )
}

/** solves the instance under an arbitrary stopping criterion, checked at
the top of every node. The criterion only interrupts the tree exploration:
the seeding heuristics always run to completion, so a coloring is returned
even when the criterion is already met on entry. */
pub fn solve_with_criterion<Stop: StoppingCriterion>(
    graph: &CsrGraph,
    strategy: Strategy,
    stop: Stop,
    progress: Option<&mut ProgressHandler<'_>>,
) -> Result<SearchResult, SolveError> {
    let started = Instant::now();
    let n = graph.nb_vertices();
    if n == 0 {
        return Ok(SearchResult {
            nb_colors: 0,
            coloring: Vec::new(),
            lower_bound: 0,
            clique_lb: 0,
            dsatur_ub: 0,
            optimal: true,
            nodes_visited: 0,
            branches_cut: 0,
            time_searched: started.elapsed().as_secs_f32(),
            timeout: false,
            primal_list: Vec::new(),
        });
    }

    let clique_lb = greedy_clique(graph).len();
    let (seed, dsatur_ub) = greedy_dsatur(graph);
    if dsatur_ub > MAX_COLORS {
        return Err(SolveError::TooManyColors(dsatur_ub));
    }

    let mut state = SearchState::new(n);
    state.lb = clique_lb;
    state.ub = dsatur_ub;
    state.best_color = seed;
    state.primal_list.push(dsatur_ub);

    if state.lb < state.ub {
        let mut explorer = Explorer {
            graph: *graph,
            strategy,
            state,
            scratch: ReducedGraphScratch::new(n),
            sewell_candidates: Vec::new(),
            stop,
            progress,
            started,
        };
        explorer.explore(0, 0);
        state = explorer.state;
    }
    if !state.timeout {
        // the whole tree was enumerated: the incumbent is proven minimum
        state.lb = state.ub;
    }

    let SearchState {
        lb,
        ub,
        best_color,
        nodes_visited,
        branches_cut,
        timeout,
        primal_list,
        ..
    } = state;
    Ok(SearchResult {
        nb_colors: ub,
        coloring: best_color,
        lower_bound: lb,
        clique_lb,
        dsatur_ub,
        optimal: lb == ub && !timeout,
        nodes_visited,
        branches_cut,
        time_searched: started.elapsed().as_secs_f32(),
        timeout,
        primal_list,
    })
}

/** depth-first exploration of the DSATUR branching tree */
struct Explorer<'g, 'p, 'h, Stop> {
    graph: CsrGraph<'g>,
    strategy: Strategy,
    state: SearchState,
    scratch: ReducedGraphScratch,
    sewell_candidates: Vec<VertexId>,
    stop: Stop,
    progress: Option<&'p mut (dyn FnMut(&SearchProgress) + 'h)>,
    started: Instant,
}

impl<Stop: StoppingCriterion> Explorer<'_, '_, '_, Stop> {
    /** explores the subtree rooted at the current partial coloring.
    `nb_col`: vertices colored so far; `k`: color classes in use
    (1 + the largest color assigned, or 0 at the root). */
    fn explore(&mut self, nb_col: usize, k: usize) {
        if self.stop.is_finished() {
            self.state.timeout = true;
            return;
        }
        self.state.nodes_visited += 1;
        self.maybe_progress();
        debug_assert!(self.state.saturation_consistent(&self.graph));

        // leaf: complete coloring
        if nb_col == self.graph.nb_vertices() {
            if k < self.state.ub {
                self.record_best(k);
            }
            return;
        }

        // every completion from here uses at least k+1 colors
        if k + 1 >= self.state.ub {
            self.state.branches_cut += 1;
            return;
        }
        if self.strategy == Strategy::Furini
            && self.scratch.lower_bound(&self.graph, &self.state, k) >= self.state.ub
        {
            self.state.branches_cut += 1;
            return;
        }

        let v = match self.select_vertex() {
            Some(v) => v,
            None => return,
        };

        // cap new colors one past the classes in use: unused labels are
        // interchangeable, and colors >= ub-1 cannot improve the incumbent
        let c_limit = (k + 1).min(self.state.ub - 1);
        for c in 0..c_limit {
            if self.state.forbidden[v].contains(c) {
                continue;
            }
            let new_k = k.max(c + 1);
            if new_k >= self.state.ub {
                continue;
            }

            self.state.assign(&self.graph, v, c);
            self.explore(nb_col + 1, new_k);
            self.state.unassign(&self.graph, v, c);

            if self.state.timeout || self.state.ub == self.state.lb {
                return;
            }
        }
    }

    /// new incumbent with k colors: tighten the upper bound and snapshot
    /// the coloring
    fn record_best(&mut self, k: usize) {
        self.state.ub = k;
        debug_assert!(self.state.color.iter().all(|c| c.is_some()));
        for (v, assigned) in self.state.color.iter().enumerate() {
            if let Some(c) = assigned {
                self.state.best_color[v] = *c;
            }
        }
        self.state.primal_list.push(k);
        debug_assert_eq!(
            checker(&self.graph, &color_classes(&self.state.best_color)),
            CheckerResult::Ok(k)
        );
    }

    fn select_vertex(&mut self) -> Option<VertexId> {
        match self.strategy {
            Strategy::Dsatur | Strategy::Furini => select_dsatur(&self.graph, &self.state),
            Strategy::Sewell => {
                select_sewell(&self.graph, &self.state, &mut self.sewell_candidates)
            }
        }
    }

    fn maybe_progress(&mut self) {
        let nodes = self.state.nodes_visited;
        if nodes != 1 && nodes % PROGRESS_PERIOD != 0 {
            return;
        }
        let snap = SearchProgress {
            nodes_visited: nodes,
            ub: self.state.ub,
            lb: self.state.lb,
            elapsed: self.started.elapsed().as_secs_f32(),
            branches_cut: self.state.branches_cut,
        };
        if let Some(callback) = self.progress.as_mut() {
            callback(&snap);
        }
    }
}

/// classic DSATUR choice: max saturation, ties by degree, then lowest index
fn select_dsatur(graph: &CsrGraph, state: &SearchState) -> Option<VertexId> {
    let mut best: Option<VertexId> = None;
    for v in graph.vertices() {
        if state.color[v].is_some() {
            continue;
        }
        best = match best {
            None => Some(v),
            Some(b) => {
                if state.dsat[v] > state.dsat[b]
                    || (state.dsat[v] == state.dsat[b] && graph.degree(v) > graph.degree(b))
                {
                    Some(v)
                } else {
                    Some(b)
                }
            }
        };
    }
    best
}

/// Sewell choice: max saturation, then max degree, then the candidate
/// whose remaining options overlap the most with those of its uncolored
/// neighbors. Falls back to the classic pick when the option sets no
/// longer fit the color bitset (`ub >= MAX_COLORS`).
fn select_sewell(
    graph: &CsrGraph,
    state: &SearchState,
    candidates: &mut Vec<VertexId>,
) -> Option<VertexId> {
    let uncolored = || graph.vertices().filter(|&v| state.color[v].is_none());
    let max_dsat = uncolored().map(|v| state.dsat[v]).max()?;
    let max_deg = uncolored()
        .filter(|&v| state.dsat[v] == max_dsat)
        .map(|v| graph.degree(v))
        .max()?;

    candidates.clear();
    candidates.extend(
        uncolored().filter(|&v| state.dsat[v] == max_dsat && graph.degree(v) == max_deg),
    );
    let first = *candidates.first()?;
    if candidates.len() <= 1 || state.ub >= MAX_COLORS {
        return Some(first);
    }

    let mask = ColorSet::below(state.ub);
    let mut best = first;
    let mut best_score = None;
    for &v in candidates.iter() {
        let opts_v = state.forbidden[v].complement_within(mask);
        let mut score = 0;
        for &u in graph.neighbors(v) {
            if state.color[u].is_some() {
                continue;
            }
            let opts_u = state.forbidden[u].complement_within(mask);
            score += opts_v.intersect(opts_u).len();
        }
        if best_score.map_or(true, |s| score > s) {
            best_score = Some(score);
            best = v;
        }
    }
    Some(best)
}
