use bit_set::BitSet;

use crate::graph::Graph;

/** a coloring expressed on vertex labels: (label, color) pairs.

The specialists recurse on induced subgraphs whose vertices are
renumbered, so witnesses are carried on the stable labels instead. */
pub type LabelColoring = Vec<(usize, usize)>;

/** decides whether the graph is k-colorable for k in {2,3,4}.

Returns a witness coloring on success. 2-colorability is a bipartiteness
check; 3- and 4-colorability reduce to finding a maximal independent set
S such that the graph without S is (k-1)-colorable, enumerating the
candidate sets with Bron-Kerbosch on the complement graph.

Calling this with k outside {2,3,4} is a bug. */
pub fn k_colorable(graph: &Graph, k: usize) -> Option<LabelColoring> {
    assert!((2..=4).contains(&k), "low-k specialist called with k={}", k);
    k_colorable_components(graph, k)
}

/** component-wise k-colorability. A component with at most k vertices is
k-colorable outright (one color each); the others go through the
per-component decision. */
fn k_colorable_components(graph: &Graph, k: usize) -> Option<LabelColoring> {
    let mut witness = Vec::new();
    let mut rest = graph.clone();
    while rest.n() > 0 {
        let component = rest.component_of(0);
        let whole = component.len() == rest.n();
        let sub = if whole { rest.clone() } else { rest.induced(&component) };
        if sub.n() <= k {
            // small components take one color per vertex
            for v in 0..sub.n() {
                witness.push((sub.vertex(v).label(), v));
            }
        } else {
            witness.extend(k_coloring(&sub, k)?);
        }
        if whole { break; }
        let mut keep = BitSet::default();
        for v in 0..rest.n() {
            if !component.contains(v) { keep.insert(v); }
        }
        rest = rest.induced(&keep);
    }
    Some(witness)
}

/// k-colorability of a single graph: bipartiteness for k=2, maximal
/// independent set peeling for k in {3,4}
fn k_coloring(graph: &Graph, k: usize) -> Option<LabelColoring> {
    if k == 2 { return two_coloring(graph); }
    assert!(k == 3 || k == 4, "k={}", k);
    let complement = graph.complement();
    // vertices isolated in the complement are adjacent to everything:
    // no independent set of size two can hold them
    let mut p = BitSet::default();
    for v in 0..complement.n() {
        if complement.degree(v) > 0 { p.insert(v); }
    }
    bron_kerbosch(graph, &complement, &BitSet::default(), &p, &BitSet::default(), k)
}

/** Bron-Kerbosch with pivoting over the complement graph.

Each maximal clique of the complement is a maximal independent set S of
the graph; for each one, the base case strips S (coloring it k-1),
drops the vertices it isolates, and asks whether the remainder is
(k-1)-colorable. The first S that works short-circuits the enumeration.
The pivot is the highest-degree vertex of P in the complement. */
fn bron_kerbosch(
    graph: &Graph, complement: &Graph,
    r: &BitSet, p: &BitSet, x: &BitSet, k: usize,
) -> Option<LabelColoring> {
    if p.is_empty() {
        if !x.is_empty() { return None; } // R is not maximal
        let mut witness: LabelColoring = r.iter()
            .map(|v| (graph.vertex(v).label(), k-1)).collect();
        let mut keep = BitSet::default();
        for v in 0..graph.n() {
            if !r.contains(v) { keep.insert(v); }
        }
        let mut rest = graph.induced(&keep);
        for label in rest.remove_isolated_vertices() {
            witness.push((label, 0));
        }
        if rest.n() == 0 { return Some(witness); }
        witness.extend(k_colorable_components(&rest, k-1)?);
        return Some(witness);
    }
    let mut pivot = 0;
    let mut pivot_degree = 0;
    for v in p.iter() {
        if complement.degree(v) > pivot_degree {
            pivot_degree = complement.degree(v);
            pivot = v;
        }
    }
    let candidates: Vec<usize> = p.iter()
        .filter(|v| !complement.are_adjacent(pivot, *v)).collect();
    let mut p_rest = p.clone();
    let mut x_rest = x.clone();
    for v in candidates {
        let mut new_r = r.clone();
        new_r.insert(v);
        let mut new_p = p_rest.clone();
        new_p.intersect_with(complement.vertex(v).neighbors());
        let mut new_x = x_rest.clone();
        new_x.intersect_with(complement.vertex(v).neighbors());
        if let Some(witness) = bron_kerbosch(graph, complement, &new_r, &new_p, &new_x, k) {
            return Some(witness);
        }
        p_rest.remove(v);
        x_rest.insert(v);
    }
    None
}

/** two-colorability of a connected graph by alternating depth-first
coloring from vertex 0. Fails on the first monochromatic edge, which
exists iff the graph has an odd cycle. */
fn two_coloring(graph: &Graph) -> Option<LabelColoring> {
    if graph.n() == 0 { return Some(Vec::new()); }
    let mut colors: Vec<Option<usize>> = vec![None; graph.n()];
    colors[0] = Some(0);
    let mut stack = vec![0];
    while let Some(v) = stack.pop() {
        let color = colors[v].unwrap_or(0);
        for u in graph.vertex(v).adj() {
            match colors[*u] {
                Some(other) if other == color => return None,
                Some(_) => {}
                None => {
                    colors[*u] = Some(1 - color);
                    stack.push(*u);
                }
            }
        }
    }
    Some((0..graph.n())
        .map(|v| (graph.vertex(v).label(), colors[v].unwrap_or(0)))
        .collect())
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

    fn petersen() -> Graph {
        Graph::from_edges(10, &[
            (0,1),(1,2),(2,3),(3,4),(4,0),
            (5,7),(7,9),(9,6),(6,8),(8,5),
            (0,5),(1,6),(2,7),(3,8),(4,9),
        ])
    }

    // turns label pairs into a coloring vector (labels are 0..n here)
    fn as_coloring(n: usize, pairs: &LabelColoring) -> Vec<usize> {
        let mut colors = vec![usize::MAX; n];
        for (label, color) in pairs { colors[*label] = *color; }
        assert!(colors.iter().all(|c| *c != usize::MAX));
        colors
    }

    #[test]
    fn test_two_colorable() {
        assert!(k_colorable(&k33(), 2).is_some());
        assert!(k_colorable(&cycle(6), 2).is_some());
        assert!(k_colorable(&cycle(5), 2).is_none());
        assert!(k_colorable(&petersen(), 2).is_none());
    }

    #[test]
    fn test_three_colorable() {
        let graph = cycle(5);
        let pairs = k_colorable(&graph, 3).unwrap();
        let colors = as_coloring(5, &pairs);
        assert!(checker(&graph, &colors).unwrap() <= 3);
        assert!(k_colorable(&complete(4), 3).is_none());
        let pet = petersen();
        let pet_pairs = k_colorable(&pet, 3).unwrap();
        let pet_colors = as_coloring(10, &pet_pairs);
        assert!(checker(&pet, &pet_colors).unwrap() <= 3);
    }

    #[test]
    fn test_four_colorable() {
        let graph = complete(4);
        let pairs = k_colorable(&graph, 4).unwrap();
        let colors = as_coloring(4, &pairs);
        assert_eq!(checker(&graph, &colors), Some(4));
        assert!(k_colorable(&complete(5), 4).is_none());
    }

    #[test]
    fn test_disconnected_components() {
        // two triangles and an edge
        let graph = Graph::from_edges(8, &[(0,1),(1,2),(2,0),(3,4),(4,5),(5,3),(6,7)]);
        let pairs = k_colorable(&graph, 3).unwrap();
        let colors = as_coloring(8, &pairs);
        assert!(checker(&graph, &colors).unwrap() <= 3);
        assert!(k_colorable(&graph, 2).is_none());
    }

    #[test]
    #[should_panic]
    fn test_unexpected_k_is_a_bug() {
        k_colorable(&cycle(5), 5);
    }
}
