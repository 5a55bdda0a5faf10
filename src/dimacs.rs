use std::fs;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{space0, space1, u64 as read_u64};

use crate::graph::Graph;
use crate::util::ReadError;

/// reads two integers separated by whitespace
fn read_two_integers(s: &str) -> IResult<&str, (usize, usize)> {
    let (s, _) = space0(s)?;
    let (s, a) = read_u64(s)?;
    let (s, _) = space1(s)?;
    let (s, b) = read_u64(s)?;
    Ok((s, (a as usize, b as usize)))
}

/// reads an edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s: &str) -> IResult<&str, (usize, usize)> {
    let (s, _) = tag("e ")(s)?;
    read_two_integers(s)
}

/// reads a header line containing (n,m)
pub fn read_header(s: &str) -> IResult<&str, (usize, usize)> {
    let (s, _) = alt((tag("p edge "), tag("p col ")))(s)?;
    read_two_integers(s)
}

/** parses DIMACS .col content into a graph over nb_vertices vertices.

Comment lines (`c ...`) are skipped and the header line is ignored: the
vertex count always comes from the caller, since several of the other
formats do not embed one. Every `e u v` line adds the undirected edge
(u-1, v-1); duplicates are ignored, self-loops and out-of-range
endpoints are malformed. */
pub fn parse_col(content: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    let mut graph = Graph::new(nb_vertices);
    for line in content.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() || trimmed.starts_with('c') { continue; }
        if trimmed.starts_with('p') { continue; }
        match read_edge(trimmed) {
            Ok((_, (u, v))) => {
                if u == 0 || v == 0 || u > nb_vertices || v > nb_vertices {
                    return Err(ReadError::Malformed(
                        format!("edge ({},{}) out of range", u, v)));
                }
                if u == v {
                    return Err(ReadError::Malformed(
                        format!("self-loop on vertex {}", u)));
                }
                graph.add_edge(u - 1, v - 1);
            }
            Err(_) => return Err(ReadError::Malformed(
                format!("unparsable line: {}", trimmed))),
        }
    }
    graph.update_statistics();
    Ok(graph)
}

/// creates a graph from a DIMACS .col file
pub fn read_col(filename: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    let content = fs::read_to_string(filename)?.replace('\r', "");
    parse_col(&content, nb_vertices)
}
