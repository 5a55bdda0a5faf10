use crate::graph::Graph;

/// the tables have 2^n entries, so the variant is reserved to small graphs
pub const MAX_DP_VERTICES: usize = 25;

/// true if no two vertices of the set are adjacent
fn independent_set(set: u32, neighbor_masks: &[u32]) -> bool {
    let mut rest = set;
    while rest != 0 {
        let v = rest.trailing_zeros() as usize;
        if neighbor_masks[v] & set != 0 { return false; }
        rest &= rest - 1;
    }
    true
}

/** computes the chromatic number by dynamic programming over vertex
subsets: T(empty) = 0 and T(W) = 1 + min T(W \ S) over the non-empty
independent subsets S of W. Subsets are processed by non-decreasing
popcount, so every T(W \ S) is ready when W is reached.

Panics if the graph has more than 25 vertices. */
pub fn chromatic_number_dp(graph: &Graph) -> usize {
    let n = graph.n();
    assert!(n <= MAX_DP_VERTICES, "subset DP limited to {} vertices", MAX_DP_VERTICES);
    if n == 0 { return 0; }
    let neighbor_masks: Vec<u32> = (0..n)
        .map(|v| graph.vertex(v).adj().iter().fold(0u32, |mask, u| mask | 1 << *u))
        .collect();
    let full: u32 = (1u32 << n) - 1;
    let mut order: Vec<u32> = (0..=full).collect();
    order.sort_by_key(|w| w.count_ones());
    let mut table = vec![0usize; (full as usize) + 1];
    for w in order.iter().skip(1).copied() {
        let mut minimum = n;
        let mut subset = w;
        loop { // walks every non-empty submask of w
            if independent_set(subset, &neighbor_masks) {
                let rest = table[(w & !subset) as usize];
                if rest < minimum { minimum = rest; }
            }
            subset = (subset - 1) & w;
            if subset == 0 { break; }
        }
        table[w as usize] = 1 + minimum;
    }
    table[full as usize]
}
