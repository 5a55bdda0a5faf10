use bit_set::BitSet;

/** Vertex Id (index into the vertex arena) */
pub type VertexId = usize;

/// hard cap of the color domain bitmask
pub const MAX_COLORS: usize = 64;

/** Solution of a graph coloring problem
(represented as a partition: one vertex list per color).
*/
pub type Solution = Vec<Vec<VertexId>>;

/** a vertex record: identity, adjacency, color state and adaptive counters.

The color domain is a 64-bit mask of the colors still allowed for the
vertex, which caps the solver at 64 colors.
*/
#[derive(Debug, Clone)]
pub struct Vertex {
    /// current index of the vertex (rewritten on compaction)
    number: VertexId,
    /// index of the vertex in the graph as it was loaded
    label: usize,
    /// current color (None: uncolored)
    color: Option<usize>,
    /// bitmask of the colors still available for this vertex
    domain: u64,
    /// adj[i]: vertices adjacent to this one
    adj: Vec<VertexId>,
    /// packed bitset of the adjacent vertices
    neighbors: BitSet,
    /// number of times this vertex was recolored (decayed by the heuristics)
    nb_recolorings: f64,
    /// number of empty-domain failures charged to this vertex
    nb_conflicts: f64,
}

impl Vertex {
    fn new(number: VertexId, label: usize) -> Self {
        Self {
            number, label,
            color: None,
            domain: 0,
            adj: Vec::new(),
            neighbors: BitSet::default(),
            nb_recolorings: 0.,
            nb_conflicts: 0.,
        }
    }

    /// current index of the vertex
    pub fn number(&self) -> VertexId { self.number }

    /// index of the vertex in the loaded graph (survives compaction)
    pub fn label(&self) -> usize { self.label }

    /// current color (None: uncolored)
    pub fn color(&self) -> Option<usize> { self.color }

    /// bitmask of the colors still available
    pub fn domain(&self) -> u64 { self.domain }

    /// degree of the vertex
    pub fn degree(&self) -> usize { self.adj.len() }

    /// list of adjacent vertices
    pub fn adj(&self) -> &[VertexId] { &self.adj }

    /// packed bitset of the adjacent vertices
    pub fn neighbors(&self) -> &BitSet { &self.neighbors }

    /// recoloring counter
    pub fn nb_recolorings(&self) -> f64 { self.nb_recolorings }

    /// conflict counter
    pub fn nb_conflicts(&self) -> f64 { self.nb_conflicts }
}

/** models an undirected simple graph as a vertex arena.

Global statistics (edge count, maximum and average degree, density and
balance) are recomputed whenever the vertex set changes.
*/
#[derive(Debug, Clone)]
pub struct Graph {
    /// vertices[i]: vertex currently numbered i
    vertices: Vec<Vertex>,
    /// nb edges
    m: usize,
    /// maximum degree
    max_degree: usize,
    /// average degree
    avg_degree: f64,
    /// density = avg_degree / n
    density: f64,
    /// balance = max_degree / avg_degree
    balance: f64,
}

impl Graph {
    /** creates a graph with n vertices and no edge */
    pub fn new(n: usize) -> Self {
        let vertices = (0..n).map(|i| Vertex::new(i, i)).collect();
        let mut res = Self { vertices, m:0, max_degree:0, avg_degree:0., density:0., balance:0. };
        res.update_statistics();
        res
    }

    /** creates a graph with n vertices and the given undirected edges */
    pub fn from_edges(n: usize, edges: &[(VertexId, VertexId)]) -> Self {
        let mut res = Self::new(n);
        for (u,v) in edges { res.add_edge(*u, *v); }
        res.update_statistics();
        res
    }

    /// number of vertices
    pub fn n(&self) -> usize { self.vertices.len() }

    /// number of edges
    pub fn m(&self) -> usize { self.m }

    /// maximum degree
    pub fn max_degree(&self) -> usize { self.max_degree }

    /// average degree
    pub fn avg_degree(&self) -> f64 { self.avg_degree }

    /// density = average degree / n
    pub fn density(&self) -> f64 { self.density }

    /// balance = maximum degree / average degree
    pub fn balance(&self) -> f64 { self.balance }

    /// vertex currently numbered v
    pub fn vertex(&self, v: VertexId) -> &Vertex { &self.vertices[v] }

    /// degree of vertex v
    pub fn degree(&self, v: VertexId) -> usize { self.vertices[v].adj.len() }

    /** returns true if u and v are adjacent (packed bitset lookup, O(1)) */
    pub fn are_adjacent(&self, u: VertexId, v: VertexId) -> bool {
        self.vertices[u].neighbors.contains(v)
    }

    /** adds the undirected edge (u,v). Returns false if the edge already
    exists or is a self-loop (nothing is added in this case). */
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if u == v || self.vertices[u].neighbors.contains(v) { return false; }
        self.vertices[u].adj.push(v);
        self.vertices[u].neighbors.insert(v);
        self.vertices[v].adj.push(u);
        self.vertices[v].neighbors.insert(u);
        self.m += 1;
        true
    }

    /** adds v to the adjacency of u only (matrix readers record one
    direction per matrix entry; a symmetric input provides the other). */
    pub fn add_arc(&mut self, u: VertexId, v: VertexId) -> bool {
        if u == v || self.vertices[u].neighbors.contains(v) { return false; }
        self.vertices[u].adj.push(v);
        self.vertices[u].neighbors.insert(v);
        true
    }

    /** recomputes edge count, degrees and the derived statistics */
    pub fn update_statistics(&mut self) {
        let n = self.n();
        let degree_sum: usize = self.vertices.iter().map(|v| v.adj.len()).sum();
        self.m = degree_sum / 2;
        self.max_degree = self.vertices.iter().map(|v| v.adj.len()).max().unwrap_or(0);
        if n == 0 {
            self.avg_degree = 0.;
            self.density = 0.;
            self.balance = 0.;
        } else {
            self.avg_degree = degree_sum as f64 / n as f64;
            self.density = self.avg_degree / n as f64;
            self.balance = self.max_degree as f64 / self.avg_degree;
        }
    }

    /// print statistics of the graph
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.n());
        println!("\t{} \t edges", self.m());
        println!("\t{} \t max degree", self.max_degree());
        println!("\t{:.3} \t avg degree", self.avg_degree());
        println!("\t{:.3} \t density", self.density());
        println!("\t{:.3} \t balance", self.balance());
    }

    /*
     * COLOR STATE
     */

    /// sets the color of v and increases its recoloring counter
    pub fn set_vertex_color(&mut self, v: VertexId, color: Option<usize>) {
        self.vertices[v].color = color;
        self.vertices[v].nb_recolorings += 1.;
    }

    /// sets the color of v without touching the counters (forced assignments)
    pub fn force_vertex_color(&mut self, v: VertexId, color: usize) {
        self.vertices[v].color = Some(color);
    }

    /// clears the color of v without touching the counters
    pub fn clear_vertex_color(&mut self, v: VertexId) {
        self.vertices[v].color = None;
    }

    /// charges an empty-domain failure to v
    pub fn add_conflict(&mut self, v: VertexId) {
        self.vertices[v].nb_conflicts += 1.;
    }

    /// removes the bits in mask from the domain of v
    pub fn remove_domain_bits(&mut self, v: VertexId, mask: u64) {
        self.vertices[v].domain &= !mask;
    }

    /// adds the bits in mask back to the domain of v
    pub fn restore_domain_bits(&mut self, v: VertexId, mask: u64) {
        self.vertices[v].domain |= mask;
    }

    /// mask of the colors [0,k)
    pub fn color_mask(k: usize) -> u64 {
        if k >= MAX_COLORS { u64::MAX } else { (1u64 << k) - 1 }
    }

    /** sets the domain of every vertex to the colors [0,k) */
    pub fn set_available_colors(&mut self, k: usize) {
        let mask = Self::color_mask(k);
        for vertex in self.vertices.iter_mut() { vertex.domain = mask; }
    }

    /** removes every color >= k from every domain */
    pub fn update_availability(&mut self, k: usize) {
        let mask = Self::color_mask(k);
        for vertex in self.vertices.iter_mut() { vertex.domain &= mask; }
    }

    /** removes every color >= k from the domain of v */
    pub fn update_vertex_availability(&mut self, v: VertexId, k: usize) {
        self.vertices[v].domain &= Self::color_mask(k);
    }

    /// uncolors every vertex
    pub fn reset_colors(&mut self) {
        for vertex in self.vertices.iter_mut() { vertex.color = None; }
    }

    /// resets the recoloring and conflict counters
    pub fn reset_counters(&mut self) {
        for vertex in self.vertices.iter_mut() {
            vertex.nb_recolorings = 0.;
            vertex.nb_conflicts = 0.;
        }
    }

    /// multiplies every recoloring counter by factor
    pub fn decay_recolorings(&mut self, factor: f64) {
        for vertex in self.vertices.iter_mut() { vertex.nb_recolorings *= factor; }
    }

    /// multiplies every conflict counter by factor
    pub fn decay_conflicts(&mut self, factor: f64) {
        for vertex in self.vertices.iter_mut() { vertex.nb_conflicts *= factor; }
    }

    /// returns true if v has at least one colored neighbor
    pub fn has_colored_neighbor(&self, v: VertexId) -> bool {
        self.vertices[v].adj.iter().any(|u| self.vertices[*u].color.is_some())
    }

    /// snapshot of the current coloring, indexed by vertex number
    pub fn colors(&self) -> Vec<Option<usize>> {
        self.vertices.iter().map(|v| v.color).collect()
    }

    /*
     * STRUCTURE
     */

    /** removes every degree-0 vertex, renumbers the survivors 0..n' and
    rebuilds the adjacency structures. Returns the labels of the removed
    vertices. */
    pub fn remove_isolated_vertices(&mut self) -> Vec<usize> {
        let mut removed = Vec::new();
        let mut new_number = vec![usize::MAX; self.n()];
        let mut counter = 0;
        for (i,vertex) in self.vertices.iter().enumerate() {
            if vertex.adj.is_empty() {
                removed.push(vertex.label);
            } else {
                new_number[i] = counter;
                counter += 1;
            }
        }
        if removed.is_empty() { return removed; }
        let old = std::mem::take(&mut self.vertices);
        self.vertices = old.into_iter().enumerate()
            .filter(|(i,_)| new_number[*i] != usize::MAX)
            .map(|(i,mut vertex)| {
                vertex.number = new_number[i];
                for u in vertex.adj.iter_mut() { *u = new_number[*u]; }
                vertex.neighbors = vertex.adj.iter().copied().collect();
                vertex
            }).collect();
        self.update_statistics();
        removed
    }

    /** builds the subgraph induced by the vertices whose current number is
    in keep. Vertices are renumbered in increasing order of their old
    number; labels are preserved. */
    pub fn induced(&self, keep: &BitSet) -> Graph {
        let mut new_number = vec![usize::MAX; self.n()];
        let mut counter = 0;
        for v in 0..self.n() {
            if keep.contains(v) { new_number[v] = counter; counter += 1; }
        }
        let mut vertices = Vec::with_capacity(counter);
        for v in 0..self.n() {
            if !keep.contains(v) { continue; }
            let mut vertex = Vertex::new(new_number[v], self.vertices[v].label);
            vertex.adj = self.vertices[v].adj.iter()
                .filter(|u| keep.contains(**u))
                .map(|u| new_number[*u]).collect();
            vertex.neighbors = vertex.adj.iter().copied().collect();
            vertices.push(vertex);
        }
        let mut res = Graph { vertices, m:0, max_degree:0, avg_degree:0., density:0., balance:0. };
        res.update_statistics();
        res
    }

    /** returns the set of vertices reachable from start */
    pub fn component_of(&self, start: VertexId) -> BitSet {
        let mut visited = BitSet::default();
        visited.insert(start);
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            for u in &self.vertices[v].adj {
                if !visited.contains(*u) {
                    visited.insert(*u);
                    stack.push(*u);
                }
            }
        }
        visited
    }

    /// returns true if the graph is connected (the empty graph is connected)
    pub fn is_connected(&self) -> bool {
        self.n() == 0 || self.component_of(0).len() == self.n()
    }

    /** builds the complement graph (same vertex set and labels, an edge
    wherever the graph has none) */
    pub fn complement(&self) -> Graph {
        let n = self.n();
        let mut res = Graph::new(n);
        for v in 0..n {
            res.vertices[v].label = self.vertices[v].label;
        }
        for u in 0..n {
            for v in (u+1)..n {
                if !self.are_adjacent(u, v) { res.add_edge(u, v); }
            }
        }
        res.update_statistics();
        res
    }

    /** builds the line graph: one vertex per edge, two line vertices
    adjacent iff the edges share an endpoint. The label of a line vertex
    is its edge index. */
    pub fn line_graph(&self) -> Graph {
        // collect the edges in lexicographic order
        let mut edges: Vec<(VertexId, VertexId)> = Vec::with_capacity(self.m);
        for u in 0..self.n() {
            for v in &self.vertices[u].adj {
                if u < *v { edges.push((u,*v)); }
            }
        }
        edges.sort_unstable();
        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); self.n()];
        for (e,(u,v)) in edges.iter().enumerate() {
            incident[*u].push(e);
            incident[*v].push(e);
        }
        let mut res = Graph::new(edges.len());
        for list in &incident {
            for i in 0..list.len() {
                for j in (i+1)..list.len() {
                    res.add_edge(list[i], list[j]);
                }
            }
        }
        res.update_statistics();
        res
    }
}

/**
returns None if the coloring is not a proper coloring of the graph
returns the number of colors (highest color + 1) if it is
*/
pub fn checker(graph: &Graph, coloring: &[usize]) -> Option<usize> {
    if coloring.len() != graph.n() { return None; }
    for u in 0..graph.n() {
        for v in graph.vertex(u).adj() {
            if coloring[u] == coloring[*v] { return None; }
        }
    }
    Some(coloring.iter().max().map_or(0, |c| c+1))
}
