use crate::graph::{Graph, VertexId, MAX_COLORS};
use crate::config::{Config, SearchStrategy, SortingHeuristic};
use crate::heuristics;

/// CHROMATIC sentinel meaning "no incumbent yet" (above any reachable color)
pub const UNBOUNDED: usize = 127;

/** mutable state threaded through every colorer frame.

Replaces the process-wide scalars of a classical implementation: the color
budget, the highest color used on the current branch, the best incumbent
of a descending search, the frontier into the vertex order and the
re-sorting tick all live here, together with the vertex order itself.
*/
#[derive(Debug)]
pub struct SearchContext {
    /// algorithm configuration
    pub config: Config,
    /// highest color allowed (colors are [0..max_color])
    pub max_color: usize,
    /// highest color used on the current branch (None: no color used yet)
    pub max_used: Option<usize>,
    /// best incumbent of the descending search, exclusive form:
    /// the chromatic number is at most chromatic+1
    pub chromatic: usize,
    /// index into the vertex order below which everything is settled
    pub frontier: usize,
    /// tick for the dynamic re-sort cadence
    pub sorting_counter: usize,
    /// current vertex ordering (positions, not numbers, move around)
    pub order: Vec<VertexId>,
    /// best full coloring found so far (descending search only)
    pub best_colors: Option<Vec<usize>>,
    /// print incumbent improvements
    pub trace: bool,
}

impl SearchContext {
    /** creates a fresh context over the graph: identity order, full color
    budget, no incumbent */
    pub fn new(graph: &Graph, config: Config) -> Self {
        Self {
            config,
            max_color: MAX_COLORS - 1,
            max_used: None,
            chromatic: UNBOUNDED,
            frontier: 0,
            sorting_counter: 0,
            order: (0..graph.n()).collect(),
            best_colors: None,
            trace: true,
        }
    }

    /// resets the per-attempt counters (branch state, frontier, tick)
    pub fn reset_counters(&mut self) {
        self.max_used = None;
        self.frontier = 0;
        self.sorting_counter = 0;
    }

    /// true when the search keeps improving an incumbent
    pub fn exhaustive(&self) -> bool {
        self.config.search == SearchStrategy::Exhaustive
    }

    /** gives every vertex the colors [0,k) and adjusts the budget */
    pub fn set_color_budget(&mut self, graph: &mut Graph, k: usize) {
        graph.set_available_colors(k);
        self.max_color = k.saturating_sub(1).min(MAX_COLORS - 1);
    }
}

/** per-frame change log: the vertices colored in the frame (branching
vertex plus everything forced by propagation) and, per touched vertex, the
mask of the domain bits removed. Replaying it in reverse undoes the frame.
*/
#[derive(Debug, Default)]
struct ChangeLog {
    /// vertices colored in this frame
    colored: Vec<VertexId>,
    /// (vertex, removed domain bits) for every vertex whose domain shrank
    changed: Vec<(VertexId, u64)>,
}

impl ChangeLog {
    /// merges a domain removal into the log
    fn record_change(&mut self, v: VertexId, bits: u64) {
        for (u, mask) in self.changed.iter_mut() {
            if *u == v { *mask |= bits; return; }
        }
        self.changed.push((v, bits));
    }
}

/// removes color from the domain of every neighbor of v that still has it
fn remove_neighbor_colors(graph: &mut Graph, v: VertexId, color: usize, log: &mut ChangeLog) {
    let bit = 1u64 << color;
    for i in 0..graph.degree(v) {
        let u = graph.vertex(v).adj()[i];
        if graph.vertex(u).domain() & bit != 0 {
            graph.remove_domain_bits(u, bit);
            log.record_change(u, bit);
        }
    }
}

/** unit propagation over the neighborhoods touched by the last
assignment. A worklist of vertices whose neighborhoods must be rescanned
replaces nested recursion, so dense graphs cannot blow the stack.

Every uncolored neighbor with an empty domain is a dead end (the failure
is charged to its conflict counter); every neighbor with a single
remaining color is forced, logged, and its own neighborhood queued. */
fn persist_colors(
    graph: &mut Graph, ctx: &mut SearchContext, v: VertexId, log: &mut ChangeLog,
) -> bool {
    let mut work = vec![v];
    while let Some(w) = work.pop() {
        for i in 0..graph.degree(w) {
            let u = graph.vertex(w).adj()[i];
            if graph.vertex(u).color().is_some() { continue; }
            let domain = graph.vertex(u).domain();
            if domain == 0 {
                graph.add_conflict(u);
                return false;
            }
            if domain.count_ones() == 1 {
                let forced = domain.trailing_zeros() as usize;
                graph.force_vertex_color(u, forced);
                if ctx.max_used.map_or(true, |m| forced > m) {
                    ctx.max_used = Some(forced);
                }
                log.colored.push(u);
                remove_neighbor_colors(graph, u, forced, log);
                work.push(u);
            }
        }
    }
    true
}

/// undoes a frame: uncolors the logged vertices and puts the removed
/// domain bits back (re-capped by the incumbent in a descending search)
fn restore(graph: &mut Graph, ctx: &SearchContext, log: &mut ChangeLog) {
    for v in log.colored.drain(..) { graph.clear_vertex_color(v); }
    let exhaustive = ctx.exhaustive();
    for (u, mask) in log.changed.drain(..) {
        graph.restore_domain_bits(u, mask);
        if exhaustive { graph.update_vertex_availability(u, ctx.chromatic); }
    }
}

/** extends the current partial coloring recursively.

Selects the next vertex under the configured ordering. When nothing is
left to color, the coloring is complete: a plain search reports success;
a descending search additionally tightens its incumbent, narrows every
domain below it, snapshots the witness and keeps going.

Otherwise the frame loops over the candidate colors of the selected
vertex (first-fit, bounded by MAX_USED+1 and the budget), propagates each
assignment, recurses, and rolls the change log back between candidates.
Returns false once the candidates are exhausted.
*/
pub fn color_graph(graph: &mut Graph, ctx: &mut SearchContext) -> bool {
    let old_frontier = ctx.frontier;
    match ctx.config.sorting {
        SortingHeuristic::Recolor => graph.decay_recolorings(ctx.config.decay_factor),
        SortingHeuristic::Conflict => graph.decay_conflicts(ctx.config.decay_factor),
        _ => {}
    }
    ctx.sorting_counter += 1;
    let selected = heuristics::select_next_vertex(graph, ctx);
    if !ctx.config.cs {
        ctx.frontier = selected.map_or(0, |pos| pos + 1);
    }
    let pos = match selected {
        None => { // complete coloring
            if ctx.exhaustive() {
                if let Some(used) = ctx.max_used {
                    if used < ctx.chromatic {
                        ctx.chromatic = used;
                        graph.update_availability(ctx.chromatic);
                        ctx.best_colors =
                            Some(graph.colors().iter().map(|c| c.unwrap_or(0)).collect());
                        if ctx.trace { println!("\tX(G)<={}", ctx.chromatic + 1); }
                    }
                }
            }
            return true;
        }
        Some(pos) => pos,
    };
    let vertex = ctx.order[pos];
    let mut log = ChangeLog::default();
    let saved_max_used = ctx.max_used;
    let mut next_color: Option<usize> = None;
    loop {
        // every color this frame could open is at or above the incumbent
        if ctx.exhaustive() && ctx.max_used.map_or(false, |m| m >= ctx.chromatic) {
            return true;
        }
        log.colored.push(vertex);
        let min_color = next_color.map_or(0, |c| c + 1);
        next_color = heuristics::find_color_ff(graph, ctx, vertex, min_color);
        graph.set_vertex_color(vertex, next_color);
        let color = match next_color {
            None => { // candidates exhausted, backtrack over the last choice
                ctx.frontier = old_frontier;
                return false;
            }
            Some(color) => color,
        };
        if ctx.max_used.map_or(true, |m| color > m) { ctx.max_used = Some(color); }
        remove_neighbor_colors(graph, vertex, color, &mut log);
        if persist_colors(graph, ctx, vertex, &mut log) {
            if ctx.exhaustive() {
                color_graph(graph, ctx);
            } else if color_graph(graph, ctx) {
                return true;
            }
        }
        ctx.max_used = saved_max_used;
        restore(graph, ctx, &mut log);
    }
}
