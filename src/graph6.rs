use std::fs;

use crate::graph::Graph;
use crate::util::ReadError;

/// graph6 stores up to 258047 vertices in the short and medium headers
pub const MAX_G6_VERTICES: usize = 258047;

fn sextet(byte: u8) -> Result<u64, ReadError> {
    if !(63..=126).contains(&byte) {
        return Err(ReadError::Malformed(
            format!("invalid graph6 byte {}", byte)));
    }
    Ok(u64::from(byte - 63))
}

/// decodes the vertex count; returns it with the number of header bytes
fn read_order(bytes: &[u8]) -> Result<(usize, usize), ReadError> {
    let first = *bytes.first().ok_or_else(|| ReadError::Malformed(
        "empty graph6 string".to_string()))?;
    if first != 126 {
        return Ok((sextet(first)? as usize, 1));
    }
    let second = *bytes.get(1).ok_or_else(|| ReadError::Malformed(
        "truncated graph6 vertex count".to_string()))?;
    if second == 126 {
        return Err(ReadError::Malformed(format!(
            "graphs with more than {} vertices are not supported", MAX_G6_VERTICES)));
    }
    if bytes.len() < 4 {
        return Err(ReadError::Malformed("truncated graph6 vertex count".to_string()));
    }
    let order = (sextet(bytes[1])? << 12) | (sextet(bytes[2])? << 6) | sextet(bytes[3])?;
    Ok((order as usize, 4))
}

/** decodes a standard graph6 string: optional `>>graph6<<` header, the
vertex count, then the upper triangle of the adjacency matrix column by
column, six bits per byte, most significant bit first. */
pub fn parse_graph6(content: &str) -> Result<Graph, ReadError> {
    let line = content.lines().next().ok_or_else(|| ReadError::Malformed(
        "empty graph6 file".to_string()))?;
    let mut bytes = line.as_bytes();
    if let Some(stripped) = line.strip_prefix(">>graph6<<") {
        bytes = stripped.as_bytes();
    }
    let (order, header_len) = read_order(bytes)?;
    if order > MAX_G6_VERTICES {
        return Err(ReadError::Malformed(format!(
            "graphs with more than {} vertices are not supported", MAX_G6_VERTICES)));
    }
    let data = &bytes[header_len..];
    let nb_bits = order * order.saturating_sub(1) / 2;
    if data.len() * 6 < nb_bits {
        return Err(ReadError::Malformed("truncated graph6 edge data".to_string()));
    }
    let mut graph = Graph::new(order);
    let mut bit = 0;
    for j in 1..order {
        for i in 0..j {
            let value = sextet(data[bit / 6])?;
            if (value >> (5 - bit % 6)) & 1 == 1 {
                graph.add_edge(i, j);
            }
            bit += 1;
        }
    }
    graph.update_statistics();
    Ok(graph)
}

/** creates a graph from a .g6 / .graph6 file (the vertex count is taken
from the encoding itself) */
pub fn read_graph6(filename: &str) -> Result<Graph, ReadError> {
    parse_graph6(&fs::read_to_string(filename)?)
}
