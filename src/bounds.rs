use crate::graph::{Graph, VertexId, MAX_COLORS};
use crate::config::BoundsKind;
use crate::heuristics::compare_by_degree;

/** an upper bound on the chromatic number, together with the coloring
that realizes it when a greedy produced one */
#[derive(Debug)]
pub struct Bound {
    /// number of colors
    pub nb_colors: usize,
    /// witness coloring, indexed by vertex number (greedy bounds only)
    pub coloring: Option<Vec<usize>>,
}

/** Brooks-style upper bound.

Returns max degree + 1 when the graph looks like an odd cycle or a
complete graph (odd vertex count, regular of degree 2 or n-1; or even
vertex count and complete) and the max degree otherwise. This is a
conservative approximation of Brooks' theorem: it is always a sound
upper bound for the flagged classes but does not recognize every graph
the theorem covers. */
pub fn brooks_upper_bound(graph: &Graph) -> usize {
    let n = graph.n();
    if n == 0 { return 0; }
    if n % 2 == 1 {
        let degree = graph.degree(0);
        if degree != 2 && degree != n-1 { return graph.max_degree(); }
        if (1..n).any(|v| graph.degree(v) != degree) { return graph.max_degree(); }
        graph.max_degree() + 1
    } else if (0..n).all(|v| graph.degree(v) == n-1) {
        graph.max_degree() + 1
    } else {
        graph.max_degree()
    }
}

/// degree-sorted vertex order used by the greedy bounds
fn degree_order(graph: &Graph) -> Vec<VertexId> {
    let mut order: Vec<VertexId> = (0..graph.n()).collect();
    order.sort_by(|a,b| compare_by_degree(graph, *a, *b));
    order
}

/// snapshot the greedy coloring, then put the graph back in its
/// uncolored state with fresh counters
fn take_coloring(graph: &mut Graph) -> Vec<usize> {
    let coloring = graph.colors().iter().map(|c| c.unwrap_or(0)).collect();
    graph.reset_colors();
    graph.reset_counters();
    coloring
}

/** Welsh-Powell greedy bound.

Vertices sorted by non-increasing degree; each round opens a color with
the first uncolored vertex and extends the class greedily with the first
remaining vertex that sees no vertex of the class. */
pub fn upper_bound_wp(graph: &mut Graph) -> (usize, Vec<usize>) {
    let order = degree_order(graph);
    let mut active_color = 0;
    while let Some(primary) = order.iter()
        .find(|v| graph.vertex(**v).color().is_none()).copied() {
        graph.set_vertex_color(primary, Some(active_color));
        let mut secondary: Vec<VertexId> = order.iter().copied()
            .filter(|v| graph.vertex(*v).color().is_none()
                && !graph.are_adjacent(primary, *v))
            .collect();
        while let Some(next) = secondary.first().copied() {
            graph.set_vertex_color(next, Some(active_color));
            secondary.retain(|v| *v != next && !graph.are_adjacent(next, *v));
        }
        active_color += 1;
    }
    (active_color, take_coloring(graph))
}

/** Recursive-largest-first greedy bound.

Each round picks the first uncolored vertex (by non-increasing degree) as
the primary of a new class and splits the remaining uncolored vertices
into U (adjacent to the primary) and V (not adjacent). While V is not
empty, the class is extended with the vertex of V seeing the most
vertices of U; ties go to the earliest position in V. The chosen vertex
and its V-neighbors move to U. */
pub fn upper_bound_rlf(graph: &mut Graph) -> (usize, Vec<usize>) {
    let order = degree_order(graph);
    let mut active_color = 0;
    while let Some(primary) = order.iter()
        .find(|v| graph.vertex(**v).color().is_none()).copied() {
        graph.set_vertex_color(primary, Some(active_color));
        let mut set_u: Vec<VertexId> = Vec::new();
        let mut set_v: Vec<VertexId> = Vec::new();
        for v in order.iter().copied() {
            if v == primary || graph.vertex(v).color().is_some() { continue; }
            if graph.are_adjacent(v, primary) { set_u.push(v); }
            else { set_v.push(v); }
        }
        while !set_v.is_empty() {
            let mut best_pos = 0;
            let mut best_count = 0;
            for (pos, v) in set_v.iter().enumerate() {
                let count = set_u.iter()
                    .filter(|u| graph.are_adjacent(*v, **u)).count();
                if pos == 0 || count > best_count {
                    best_pos = pos;
                    best_count = count;
                }
            }
            let secondary = set_v[best_pos];
            graph.set_vertex_color(secondary, Some(active_color));
            let (moved, kept): (Vec<VertexId>, Vec<VertexId>) = set_v.into_iter()
                .partition(|v| *v == secondary || graph.are_adjacent(*v, secondary));
            set_u.extend(moved);
            set_v = kept;
        }
        active_color += 1;
    }
    (active_color, take_coloring(graph))
}

/** computes the configured upper bound. NO yields the 64-color cap, not
a bound of the graph itself. */
pub fn upper_bound(graph: &mut Graph, bounds: BoundsKind, trace: bool) -> Bound {
    if trace { println!("\tMAX_DEGREE:\t{}", graph.max_degree()); }
    match bounds {
        BoundsKind::Brooks => {
            let nb_colors = brooks_upper_bound(graph);
            if trace { println!("\tBROOKS BOUND:\t{}\n", nb_colors); }
            Bound { nb_colors, coloring: None }
        }
        BoundsKind::Rlf => {
            let (nb_colors, coloring) = upper_bound_rlf(graph);
            if trace { println!("\tRLF BOUND:\t{}\n", nb_colors); }
            Bound { nb_colors, coloring: Some(coloring) }
        }
        BoundsKind::Wp => {
            let (nb_colors, coloring) = upper_bound_wp(graph);
            if trace { println!("\tWP BOUND:\t{}\n", nb_colors); }
            Bound { nb_colors, coloring: Some(coloring) }
        }
        BoundsKind::No => Bound { nb_colors: MAX_COLORS, coloring: None },
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::checker;

    fn cycle(n: usize) -> Graph {
        let edges: Vec<(usize,usize)> = (0..n).map(|i| (i, (i+1)%n)).collect();
        Graph::from_edges(n, &edges)
    }

    fn complete(n: usize) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n { for v in (u+1)..n { edges.push((u,v)); } }
        Graph::from_edges(n, &edges)
    }

    fn k33() -> Graph {
        let mut edges = Vec::new();
        for u in 0..3 { for v in 3..6 { edges.push((u,v)); } }
        Graph::from_edges(6, &edges)
    }

    #[test]
    fn test_brooks() {
        assert_eq!(brooks_upper_bound(&complete(5)), 5);
        assert_eq!(brooks_upper_bound(&complete(4)), 4);
        assert_eq!(brooks_upper_bound(&cycle(5)), 3);
        assert_eq!(brooks_upper_bound(&cycle(4)), 2);
        assert_eq!(brooks_upper_bound(&k33()), 3);
    }

    #[test]
    fn test_wp_known_graphs() {
        assert_eq!(upper_bound_wp(&mut cycle(5)).0, 3);
        assert_eq!(upper_bound_wp(&mut k33()).0, 2);
        assert_eq!(upper_bound_wp(&mut complete(4)).0, 4);
    }

    #[test]
    fn test_rlf_known_graphs() {
        assert_eq!(upper_bound_rlf(&mut cycle(5)).0, 3);
        assert_eq!(upper_bound_rlf(&mut k33()).0, 2);
        assert_eq!(upper_bound_rlf(&mut complete(4)).0, 4);
    }

    #[test]
    fn test_greedy_bounds_leave_a_clean_graph_and_a_witness() {
        let mut graph = k33();
        let (nb_colors, coloring) = upper_bound_wp(&mut graph);
        assert_eq!(checker(&graph, &coloring), Some(nb_colors));
        for v in 0..graph.n() {
            assert_eq!(graph.vertex(v).color(), None);
            assert_eq!(graph.vertex(v).nb_recolorings(), 0.);
        }
        let (nb_colors_rlf, coloring_rlf) = upper_bound_rlf(&mut graph);
        assert_eq!(checker(&graph, &coloring_rlf), Some(nb_colors_rlf));
    }
}
