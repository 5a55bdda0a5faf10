use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::graph::{Graph, VertexId, MAX_COLORS};
use crate::config::SortingHeuristic;
use crate::coloring::SearchContext;

/// comparator over vertex numbers, picked once per sort
pub type VertexCmp = fn(&Graph, VertexId, VertexId) -> Ordering;

/*
 * VERTEX SORTING FUNCTIONS
 */

/// increasing vertex number
pub fn compare_by_vertex_number(_graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
    a.cmp(&b)
}

/// non-increasing degree, ties by increasing vertex number
pub fn compare_by_degree(graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
    graph.degree(b).cmp(&graph.degree(a)).then_with(|| a.cmp(&b))
}

/// non-increasing number of colored neighbors
pub fn compare_by_ido(graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
    let colored = |v: VertexId| graph.vertex(v).adj().iter()
        .filter(|u| graph.vertex(**u).color().is_some()).count();
    colored(b).cmp(&colored(a))
}

/** non-increasing saturation degree. The saturation of a vertex is the
number of forbidden colors, so the fewest available colors sort first.
Ties are broken by non-increasing degree. */
pub fn compare_by_saturation_degree(graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
    let available_a = graph.vertex(a).domain().count_ones();
    let available_b = graph.vertex(b).domain().count_ones();
    available_a.cmp(&available_b)
        .then_with(|| graph.degree(b).cmp(&graph.degree(a)))
}

/// non-increasing recoloring counter
pub fn compare_by_recolorings(graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
    OrderedFloat(graph.vertex(b).nb_recolorings())
        .cmp(&OrderedFloat(graph.vertex(a).nb_recolorings()))
}

/// non-increasing conflict counter
pub fn compare_by_conflicts(graph: &Graph, a: VertexId, b: VertexId) -> Ordering {
    OrderedFloat(graph.vertex(b).nb_conflicts())
        .cmp(&OrderedFloat(graph.vertex(a).nb_conflicts()))
}

/// comparator re-applied on the uncolored suffix during the search,
/// if the heuristic is a dynamic one
pub fn dynamic_comparator(sorting: SortingHeuristic) -> Option<VertexCmp> {
    match sorting {
        SortingHeuristic::Ido => Some(compare_by_ido),
        SortingHeuristic::Dsatur => Some(compare_by_saturation_degree),
        SortingHeuristic::Recolor => Some(compare_by_recolorings),
        SortingHeuristic::Conflict => Some(compare_by_conflicts),
        SortingHeuristic::Vertex | SortingHeuristic::Degree => None,
    }
}

/** sorts the whole vertex order before the search starts. The dynamic
heuristics start from the degree or counter orders they refine later. */
pub fn initial_sorting(graph: &Graph, ctx: &mut SearchContext) {
    let cmp: VertexCmp = match ctx.config.sorting {
        SortingHeuristic::Vertex => compare_by_vertex_number,
        SortingHeuristic::Degree
        | SortingHeuristic::Dsatur
        | SortingHeuristic::Ido => compare_by_degree,
        SortingHeuristic::Recolor => compare_by_recolorings,
        SortingHeuristic::Conflict => compare_by_conflicts,
    };
    ctx.order.sort_by(|a,b| cmp(graph, *a, *b));
}

/*
 * VERTEX AND COLOR SELECTION
 */

/// position of the first uncolored vertex at or after the frontier
pub fn select_next_vertex_ff(graph: &Graph, ctx: &SearchContext) -> Option<usize> {
    (ctx.frontier..ctx.order.len())
        .find(|i| graph.vertex(ctx.order[*i]).color().is_none())
}

/** position of the first uncolored vertex at or after the frontier that
has a colored neighbor. Falls back to first-fit when no such vertex
exists (fresh start, or a new connected component). Advances the frontier
past the colored prefix. */
pub fn select_next_vertex_cs(graph: &Graph, ctx: &mut SearchContext) -> Option<usize> {
    while ctx.frontier < ctx.order.len()
        && graph.vertex(ctx.order[ctx.frontier]).color().is_some() {
        ctx.frontier += 1;
    }
    for i in ctx.frontier..ctx.order.len() {
        let v = ctx.order[i];
        if graph.vertex(v).color().is_none() && graph.has_colored_neighbor(v) {
            return Some(i);
        }
    }
    select_next_vertex_ff(graph, ctx)
}

/** re-sorts the uncolored suffix when the cadence fires, then returns the
position of the next vertex to color according to the configuration. */
pub fn select_next_vertex(graph: &Graph, ctx: &mut SearchContext) -> Option<usize> {
    if ctx.config.sorting_rate != 0 && ctx.sorting_counter % ctx.config.sorting_rate == 0 {
        if let Some(cmp) = dynamic_comparator(ctx.config.sorting) {
            let start = ctx.frontier.min(ctx.order.len());
            ctx.order[start..].sort_by(|a,b| cmp(graph, *a, *b));
        }
    }
    if ctx.config.cs {
        select_next_vertex_cs(graph, ctx)
    } else {
        select_next_vertex_ff(graph, ctx)
    }
}

/** first available color of v at or after min_color.

The color is further constrained to MAX_USED+1 (an unused color label is
interchangeable with any other unused label, so only the first one is
tried) and to the color budget: at most MAX_COLOR, or strictly below
CHROMATIC when the search keeps improving an incumbent. */
pub fn find_color_ff(
    graph: &Graph, ctx: &SearchContext, v: VertexId, min_color: usize,
) -> Option<usize> {
    if min_color >= MAX_COLORS { return None; }
    let shifted = graph.vertex(v).domain() >> min_color;
    if shifted == 0 { return None; }
    let color = shifted.trailing_zeros() as usize + min_color;
    if color > ctx.max_used.map_or(0, |m| m + 1) { return None; }
    if ctx.exhaustive() {
        if color >= ctx.chromatic { return None; }
    } else if color > ctx.max_color {
        return None;
    }
    Some(color)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigOverrides, SearchStrategy};

    fn test_config(sorting: SortingHeuristic) -> Config {
        let over = ConfigOverrides {
            search: Some(SearchStrategy::Binary),
            sorting: Some(sorting),
            ..ConfigOverrides::default()
        };
        Config::decide(5, 0.3, 1., &over)
    }

    // path 0-1-2-3 plus a pendant 4 on vertex 1 (degrees 1,3,2,1,1)
    fn sample() -> Graph {
        Graph::from_edges(5, &[(0,1),(1,2),(2,3),(1,4)])
    }

    #[test]
    fn test_initial_sorting_degree() {
        let graph = sample();
        let mut ctx = SearchContext::new(&graph, test_config(SortingHeuristic::Degree));
        initial_sorting(&graph, &mut ctx);
        assert_eq!(ctx.order, vec![1,2,0,3,4]);
    }

    #[test]
    fn test_ido_prefers_colored_neighborhoods() {
        let mut graph = sample();
        graph.set_vertex_color(2, Some(0));
        assert_eq!(compare_by_ido(&graph, 3, 0), Ordering::Less); // 3 sees a color, 0 does not
    }

    #[test]
    fn test_saturation_orders_by_domain() {
        let mut graph = sample();
        graph.set_available_colors(3);
        graph.remove_domain_bits(3, 0b011);
        assert_eq!(compare_by_saturation_degree(&graph, 3, 0), Ordering::Less);
        // equal domains fall back to the degree
        assert_eq!(compare_by_saturation_degree(&graph, 1, 0), Ordering::Less);
    }

    #[test]
    fn test_select_ff_and_cs() {
        let mut graph = sample();
        let mut ctx = SearchContext::new(&graph, test_config(SortingHeuristic::Vertex));
        assert_eq!(select_next_vertex_ff(&graph, &ctx), Some(0));
        graph.set_vertex_color(0, Some(0));
        assert_eq!(select_next_vertex_ff(&graph, &ctx), Some(1));
        // connected sequence: prefers a vertex seeing the colored region
        assert_eq!(select_next_vertex_cs(&graph, &mut ctx), Some(1));
        assert_eq!(ctx.frontier, 1); // advanced past the colored prefix
        graph.reset_colors();
        graph.set_vertex_color(3, Some(0));
        ctx.frontier = 0;
        assert_eq!(select_next_vertex_cs(&graph, &mut ctx), Some(2));
    }

    #[test]
    fn test_find_color_ff_symmetry_break() {
        let mut graph = sample();
        graph.set_available_colors(4);
        let mut ctx = SearchContext::new(&graph, test_config(SortingHeuristic::Vertex));
        ctx.max_color = 3;
        // nothing used yet: only color 0 may be opened
        assert_eq!(find_color_ff(&graph, &ctx, 0, 0), Some(0));
        assert_eq!(find_color_ff(&graph, &ctx, 0, 1), None);
        ctx.max_used = Some(1);
        graph.remove_domain_bits(0, 0b001);
        assert_eq!(find_color_ff(&graph, &ctx, 0, 0), Some(1));
        assert_eq!(find_color_ff(&graph, &ctx, 0, 2), Some(2));
        assert_eq!(find_color_ff(&graph, &ctx, 0, 3), None); // 3 > MAX_USED+1
    }

    #[test]
    fn test_find_color_ff_budget() {
        let mut graph = sample();
        graph.set_available_colors(64);
        let mut ctx = SearchContext::new(&graph, test_config(SortingHeuristic::Vertex));
        ctx.max_color = 1;
        ctx.max_used = Some(1);
        assert_eq!(find_color_ff(&graph, &ctx, 0, 2), None); // above the budget
        assert_eq!(find_color_ff(&graph, &ctx, 0, 64), None); // above the domain cap
    }
}
