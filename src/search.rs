use bit_set::BitSet;

use crate::graph::{Graph, MAX_COLORS};
use crate::config::{Config, SearchStrategy, BoundsKind};
use crate::coloring::{SearchContext, color_graph, UNBOUNDED};
use crate::bounds::upper_bound;
use crate::heuristics;
use crate::lowk;

/** outcome of a search. Witness colorings are expressed on vertex labels
so that they survive the renumbering done by compaction and component
extraction. */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// the chromatic number, with a witness coloring
    Chromatic {
        /// number of colors needed
        nb_colors: usize,
        /// (label, color) pairs covering the searched graph
        coloring: Vec<(usize, usize)>,
    },
    /// the graph admits a proper k-coloring
    Colorable {
        /// number of colors asked for
        k: usize,
        /// (label, color) pairs covering the searched graph
        coloring: Vec<(usize, usize)>,
    },
    /// the graph admits no proper k-coloring
    NotColorable {
        /// number of colors asked for
        k: usize,
    },
    /// more than 64 colors would be needed, beyond the domain cap
    TooManyColors,
}

/// (label, color) pairs for the current (complete) coloring of the graph
fn label_pairs(graph: &Graph) -> Vec<(usize, usize)> {
    (0..graph.n())
        .map(|v| (graph.vertex(v).label(), graph.vertex(v).color().unwrap_or(0)))
        .collect()
}

/** one colorer run under a budget of k colors: reset, budget, initial
sort, search. Returns the number of colors actually used and the witness
on success. */
fn attempt(graph: &mut Graph, config: &Config, k: usize) -> Option<(usize, Vec<(usize, usize)>)> {
    graph.reset_colors();
    let mut ctx = SearchContext::new(graph, *config);
    ctx.set_color_budget(graph, k);
    heuristics::initial_sorting(graph, &mut ctx);
    if color_graph(graph, &mut ctx) {
        Some((ctx.max_used.map_or(0, |m| m + 1), label_pairs(graph)))
    } else {
        None
    }
}

/// like attempt, but forces the plain (non-descending) colorer semantics;
/// used to materialize a witness for a count certified by a bound
fn materialize_witness(graph: &mut Graph, config: &Config, k: usize) -> Option<Vec<(usize, usize)>> {
    if k > MAX_COLORS {
        // only the complete-graph bound can exceed the cap: one color each
        return Some((0..graph.n()).map(|v| (graph.vertex(v).label(), v)).collect());
    }
    let mut plain = *config;
    plain.search = SearchStrategy::KColoring;
    attempt(graph, &plain, k).map(|(_, pairs)| pairs)
}

/** decides k-colorability. Trivial answers first (k=0 impossible, k at
least the vertex count always possible, k beyond the color cap refused),
then the low-k specialist for k in {2,3,4}, the plain colorer otherwise. */
pub fn k_coloring_search(graph: &mut Graph, config: &Config, k: usize) -> Outcome {
    if k == 0 { return Outcome::NotColorable { k }; }
    if k >= graph.n() {
        let coloring = (0..graph.n())
            .map(|v| (graph.vertex(v).label(), v)).collect();
        return Outcome::Colorable { k, coloring };
    }
    if k > MAX_COLORS { return Outcome::TooManyColors; }
    if (2..=4).contains(&k) {
        return match lowk::k_colorable(graph, k) {
            Some(coloring) => Outcome::Colorable { k, coloring },
            None => Outcome::NotColorable { k },
        };
    }
    match attempt(graph, config, k) {
        Some((_, coloring)) => Outcome::Colorable { k, coloring },
        None => Outcome::NotColorable { k },
    }
}

/** chromatic number by a single descending search over the whole graph.

An upper bound B seeds the incumbent; every complete coloring found
tightens it and the domains below it, until no better coloring exists.
The chromatic number is the final incumbent. */
pub fn exhaustive_search(graph: &mut Graph, config: &Config, trace: bool) -> Outcome {
    if graph.n() == 0 {
        return Outcome::Chromatic { nb_colors: 0, coloring: Vec::new() };
    }
    if trace { println!("\tSEARCH:"); }
    let bound = upper_bound(graph, config.bounds, trace);
    let nb_bound = bound.nb_colors.max(1); // a non-empty graph needs a color
    if config.bounds == BoundsKind::Brooks && nb_bound == graph.max_degree() + 1 {
        // complete graph or odd cycle: the bound is the chromatic number
        let coloring = materialize_witness(graph, config, nb_bound).unwrap_or_default();
        return Outcome::Chromatic { nb_colors: nb_bound, coloring };
    }
    graph.reset_colors();
    let mut ctx = SearchContext::new(graph, *config);
    ctx.trace = trace;
    if nb_bound < MAX_COLORS {
        ctx.chromatic = nb_bound - 1;
        ctx.set_color_budget(graph, nb_bound);
    } else {
        ctx.chromatic = UNBOUNDED;
        ctx.set_color_budget(graph, MAX_COLORS);
    }
    heuristics::initial_sorting(graph, &mut ctx);
    color_graph(graph, &mut ctx);
    if trace { println!(); }
    if ctx.chromatic >= MAX_COLORS { return Outcome::TooManyColors; }
    let nb_colors = ctx.chromatic + 1;
    let coloring = match ctx.best_colors {
        Some(colors) => colors.iter().enumerate()
            .map(|(v,c)| (graph.vertex(v).label(), *c)).collect(),
        // no improvement below the bound: the bound coloring is optimal
        None => match bound.coloring {
            Some(colors) => colors.iter().enumerate()
                .map(|(v,c)| (graph.vertex(v).label(), *c)).collect(),
            None => materialize_witness(graph, config, nb_colors).unwrap_or_default(),
        },
    };
    Outcome::Chromatic { nb_colors, coloring }
}

/** chromatic number of a connected graph by bracketing (GREEDY, BINARY
or GREBIN). Returns the count and a witness, or None when more than 64
colors would be needed. */
fn connected_search(
    graph: &mut Graph, config: &Config, trace: bool,
) -> Option<(usize, Vec<(usize, usize)>)> {
    if config.search == SearchStrategy::Greedy {
        let mut nb_colors = 1;
        if trace {
            println!("\tSEARCH:\n\tinterval:\t(0,infty)\t-> try {} colors", nb_colors);
        }
        loop {
            if nb_colors > MAX_COLORS {
                println!("\t-> too much colors");
                return None;
            }
            if let Some((_, pairs)) = attempt(graph, config, nb_colors) {
                if trace { println!(); }
                return Some((nb_colors, pairs));
            }
            if trace {
                println!("\tnew interval:\t({},infty)\t-> try {} colors",
                    nb_colors, nb_colors + 1);
            }
            nb_colors += 1;
        }
    }
    // bracketing searches start from an upper bound
    let bound = upper_bound(graph, config.bounds, trace);
    let nb_bound = bound.nb_colors.max(1); // a non-empty graph needs a color
    if config.bounds == BoundsKind::Brooks && nb_bound == graph.max_degree() + 1 {
        let witness = materialize_witness(graph, config, nb_bound).unwrap_or_default();
        return Some((nb_bound, witness));
    }
    let starting = nb_bound.min(MAX_COLORS);
    let mut lo = 0;
    let mut hi;
    let mut hi_witness: Option<Vec<(usize, usize)>> = bound.coloring.map(|colors| {
        colors.iter().enumerate()
            .map(|(v,c)| (graph.vertex(v).label(), *c)).collect()
    });
    match config.search {
        SearchStrategy::Binary => {
            hi = if starting < MAX_COLORS { starting } else { starting * 2 };
            if trace { println!("\tSEARCH:\n\tinterval:\t(0,{}]", hi); }
        }
        SearchStrategy::Grebin => {
            let mut probe = 1;
            if trace { println!("\tSEARCH:\n\tinterval:\t(0,{}?", probe); }
            loop {
                if trace { println!("\t-> try {} colors", probe); }
                if let Some((used, pairs)) = attempt(graph, config, probe) {
                    hi = used.min(probe);
                    hi_witness = Some(pairs);
                    if trace { println!("\tinterval:\t({},{}]", lo, hi); }
                    break;
                }
                lo = probe;
                if lo >= MAX_COLORS { println!("\t-> too much colors needed"); }
                if probe * 2 < nb_bound {
                    probe *= 2;
                } else {
                    hi = nb_bound;
                    if trace { println!("\tinterval:\t({},{}]", lo, hi); }
                    break;
                }
                if trace { println!("\tnew interval:\t({},{}?", lo, probe); }
            }
        }
        _ => unreachable!("connected_search only brackets"),
    }
    while hi > lo + 1 {
        let mid = (lo + hi) / 2;
        if mid > MAX_COLORS && trace { println!("\t-> too much colors needed"); }
        if trace { println!("\t-> try {} colors", mid); }
        match attempt(graph, config, mid) {
            Some((used, pairs)) => {
                hi = used.min(mid);
                hi_witness = Some(pairs);
            }
            None => { lo = mid; }
        }
        if trace { println!("\tnew interval:\t({},{}]", lo, hi); }
    }
    if trace { println!(); }
    if hi > MAX_COLORS { return None; }
    let witness = match hi_witness {
        Some(pairs) => pairs,
        None => materialize_witness(graph, config, hi).unwrap_or_default(),
    };
    Some((hi, witness))
}

/// first-fit coloring of a skipped component (its size bounds the colors)
fn greedy_fill(graph: &mut Graph) -> Vec<(usize, usize)> {
    graph.reset_colors();
    for v in 0..graph.n() {
        let mut used = vec![false; graph.degree(v) + 1];
        for u in graph.vertex(v).adj() {
            if let Some(color) = graph.vertex(*u).color() {
                if color < used.len() { used[color] = true; }
            }
        }
        let color = used.iter().position(|taken| !taken).unwrap_or(0);
        graph.force_vertex_color(v, color);
    }
    label_pairs(graph)
}

/** chromatic number of an arbitrary graph: peel connected components and
take the maximum over them. A component no larger than the best count so
far cannot raise the maximum and is only colored greedily for the
witness. */
pub fn decomposed_search(graph: &Graph, config: &Config, trace: bool) -> Outcome {
    let mut best = 0;
    let mut witness: Vec<(usize, usize)> = Vec::new();
    let mut rest = graph.clone();
    let mut announced = false;
    while rest.n() > 0 {
        let component = rest.component_of(0);
        let whole = component.len() == rest.n();
        if !whole && !announced {
            if trace { println!("disconnected"); }
            announced = true;
        }
        let mut sub = if whole {
            std::mem::replace(&mut rest, Graph::new(0))
        } else {
            rest.induced(&component)
        };
        if sub.n() <= best {
            witness.extend(greedy_fill(&mut sub));
        } else {
            match connected_search(&mut sub, config, trace) {
                Some((nb_colors, pairs)) => {
                    if nb_colors > best { best = nb_colors; }
                    witness.extend(pairs);
                }
                None => return Outcome::TooManyColors,
            }
        }
        if whole { break; }
        let mut keep = BitSet::default();
        for v in 0..rest.n() {
            if !component.contains(v) { keep.insert(v); }
        }
        rest = rest.induced(&keep);
    }
    Outcome::Chromatic { nb_colors: best, coloring: witness }
}

/** runs the configured search. KCOLORING consumes k; EXHAUSTIVE works on
the whole graph at once; the bracketing searches decompose into
components first. */
pub fn run(graph: &mut Graph, config: &Config, k: Option<usize>, trace: bool) -> Outcome {
    match config.search {
        SearchStrategy::KColoring => k_coloring_search(graph, config, k.unwrap_or(0)),
        SearchStrategy::Exhaustive => exhaustive_search(graph, config, trace),
        _ => decomposed_search(graph, config, trace),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::checker;
    use crate::config::{ConfigOverrides, SortingHeuristic};
    use crate::dynamic::chromatic_number_dp;
    use rand::{Rng, SeedableRng};
    use rand::rngs::StdRng;

    fn config_for(search: SearchStrategy, bounds: BoundsKind, sorting: SortingHeuristic) -> Config {
        let over = ConfigOverrides {
            search: Some(search),
            bounds: Some(bounds),
            sorting: Some(sorting),
            ..ConfigOverrides::default()
        };
        Config::decide(10, 0.3, 2., &over)
    }

    fn cycle(n: usize) -> Graph {
        let edges: Vec<(usize,usize)> = (0..n).map(|i| (i, (i+1)%n)).collect();
        Graph::from_edges(n, &edges)
    }

    fn complete(n: usize) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n { for v in (u+1)..n { edges.push((u,v)); } }
        Graph::from_edges(n, &edges)
    }

    fn petersen() -> Graph {
        Graph::from_edges(10, &[
            (0,1),(1,2),(2,3),(3,4),(4,0),
            (5,7),(7,9),(9,6),(6,8),(8,5),
            (0,5),(1,6),(2,7),(3,8),(4,9),
        ])
    }

    /// runs the search and checks the witness before returning the count
    fn chi(graph: &Graph, config: &Config) -> usize {
        let mut work = graph.clone();
        match run(&mut work, config, None, false) {
            Outcome::Chromatic { nb_colors, coloring } => {
                let mut colors = vec![usize::MAX; graph.n()];
                for (label, color) in coloring {
                    assert!(color < nb_colors);
                    colors[label] = color;
                }
                assert_eq!(checker(graph, &colors), Some(nb_colors));
                nb_colors
            }
            other => panic!("expected a chromatic number, got {:?}", other),
        }
    }

    #[test]
    fn test_known_graphs_all_strategies() {
        let cases: Vec<(Graph, usize)> = vec![
            (Graph::from_edges(3, &[(0,1),(1,2),(2,0)]), 3), // triangle
            (Graph::from_edges(4, &[(0,1),(1,2),(2,3)]), 2), // path
            (cycle(5), 3),
            (cycle(6), 2),
            (petersen(), 3),
            (complete(8), 8),
        ];
        let strategies = [
            SearchStrategy::Greedy,
            SearchStrategy::Binary,
            SearchStrategy::Grebin,
            SearchStrategy::Exhaustive,
        ];
        for (graph, expected) in &cases {
            for strategy in &strategies {
                let config = config_for(*strategy, BoundsKind::Wp, SortingHeuristic::Degree);
                assert_eq!(chi(graph, &config), *expected,
                    "strategy {:?} on a graph with {} vertices", strategy, graph.n());
            }
        }
    }

    #[test]
    fn test_same_chi_across_configurations() {
        let graph = petersen();
        let mut seen = Vec::new();
        for bounds in [BoundsKind::No, BoundsKind::Brooks, BoundsKind::Rlf, BoundsKind::Wp] {
            for sorting in [
                SortingHeuristic::Vertex, SortingHeuristic::Degree, SortingHeuristic::Ido,
                SortingHeuristic::Dsatur, SortingHeuristic::Recolor, SortingHeuristic::Conflict,
            ] {
                let config = config_for(SearchStrategy::Exhaustive, bounds, sorting);
                seen.push(chi(&graph, &config));
            }
        }
        assert!(seen.iter().all(|c| *c == 3), "{:?}", seen);
    }

    #[test]
    fn test_k33_bipartite() {
        let mut edges = Vec::new();
        for u in 0..3 { for v in 3..6 { edges.push((u,v)); } }
        let graph = Graph::from_edges(6, &edges);
        let config = config_for(SearchStrategy::Binary, BoundsKind::Wp, SortingHeuristic::Dsatur);
        assert_eq!(chi(&graph, &config), 2);
    }

    #[test]
    fn test_disconnected_components_max() {
        // a triangle, a K4 and a lone edge: the maximum wins
        let graph = Graph::from_edges(9, &[
            (0,1),(1,2),(2,0),
            (3,4),(3,5),(3,6),(4,5),(4,6),(5,6),
            (7,8),
        ]);
        let config = config_for(SearchStrategy::Greedy, BoundsKind::No, SortingHeuristic::Vertex);
        assert_eq!(chi(&graph, &config), 4);
        let config_bin = config_for(SearchStrategy::Binary, BoundsKind::Rlf, SortingHeuristic::Dsatur);
        assert_eq!(chi(&graph, &config_bin), 4);
    }

    #[test]
    fn test_brooks_shortcut_is_exact() {
        let config = config_for(SearchStrategy::Exhaustive, BoundsKind::Brooks, SortingHeuristic::Degree);
        assert_eq!(chi(&complete(6), &config), 6);
        assert_eq!(chi(&cycle(7), &config), 3);
    }

    #[test]
    fn test_k_coloring_decisions() {
        let config = config_for(SearchStrategy::KColoring, BoundsKind::No, SortingHeuristic::Vertex);
        let mut triangle = Graph::from_edges(3, &[(0,1),(1,2),(2,0)]);
        assert!(matches!(run(&mut triangle, &config, Some(2), false),
            Outcome::NotColorable { k: 2 }));
        assert!(matches!(run(&mut triangle, &config, Some(3), false),
            Outcome::Colorable { k: 3, .. }));
        assert!(matches!(run(&mut triangle, &config, Some(0), false),
            Outcome::NotColorable { k: 0 }));
        let mut k8 = complete(8);
        assert!(matches!(run(&mut k8, &config, Some(5), false),
            Outcome::NotColorable { k: 5 }));
        assert!(matches!(run(&mut k8, &config, Some(8), false),
            Outcome::Colorable { k: 8, .. }));
    }

    /// Erdos-Renyi style graph with a deterministic seed
    fn random_graph(rng: &mut StdRng, n: usize, p: f64) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u+1)..n {
                if rng.gen::<f64>() < p { edges.push((u,v)); }
            }
        }
        Graph::from_edges(n, &edges)
    }

    #[test]
    fn test_dp_and_search_agree_on_small_graphs() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let graph = random_graph(&mut rng, 8, 0.4);
            let expected = chromatic_number_dp(&graph);
            let config = config_for(SearchStrategy::Exhaustive, BoundsKind::Rlf, SortingHeuristic::Dsatur);
            assert_eq!(chi(&graph, &config), expected);
            let config_bin = config_for(SearchStrategy::Binary, BoundsKind::Wp, SortingHeuristic::Degree);
            assert_eq!(chi(&graph, &config_bin), expected);
        }
    }

    #[test]
    fn test_planted_clique_lower_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            let mut graph = random_graph(&mut rng, 10, 0.2);
            for u in 0..5usize { // plant a 5-clique
                for v in (u+1)..5 { graph.add_edge(u, v); }
            }
            graph.update_statistics();
            let config = config_for(SearchStrategy::Exhaustive, BoundsKind::Wp, SortingHeuristic::Dsatur);
            assert!(chi(&graph, &config) >= 5);
        }
    }

    #[test]
    fn test_brooks_soundness_on_random_connected_graphs() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let n = 9;
            let mut graph = random_graph(&mut rng, n, 0.35);
            for v in 1..n { graph.add_edge(v-1, v); } // spine keeps it connected
            graph.add_edge(0, 2); // a chord: neither a cycle nor complete unless dense
            graph.update_statistics();
            if graph.m() == n * (n-1) / 2 { continue; } // complete: Brooks does not apply
            let config = config_for(SearchStrategy::Binary, BoundsKind::Brooks, SortingHeuristic::Dsatur);
            assert!(chi(&graph, &config) <= graph.max_degree());
        }
    }

    #[test]
    fn test_determinism() {
        let graph = petersen();
        let config = config_for(SearchStrategy::Exhaustive, BoundsKind::Rlf, SortingHeuristic::Conflict);
        let mut first = graph.clone();
        let mut second = graph.clone();
        let outcome_a = run(&mut first, &config, None, false);
        let outcome_b = run(&mut second, &config, None, false);
        assert_eq!(outcome_a, outcome_b);
    }

    #[test]
    fn test_relabeling_keeps_chi() {
        let rng = fastrand::Rng::with_seed(3);
        let base = petersen();
        let mut permutation: Vec<usize> = (0..10).collect();
        rng.shuffle(&mut permutation);
        let edges: Vec<(usize,usize)> = (0..10)
            .flat_map(|u| base.vertex(u).adj().iter()
                .filter(move |v| u < **v)
                .map(|v| (permutation[u], permutation[*v]))
                .collect::<Vec<_>>())
            .collect();
        let permuted = Graph::from_edges(10, &edges);
        let config = config_for(SearchStrategy::Grebin, BoundsKind::Wp, SortingHeuristic::Dsatur);
        assert_eq!(chi(&base, &config), chi(&permuted, &config));
    }
}
