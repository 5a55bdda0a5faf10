use std::fs;

use crate::graph::Graph;
use crate::util::ReadError;

/// records one adjacency-matrix entry; symmetric input provides the
/// mirrored direction on its own row
fn record_entry(graph: &mut Graph, i: usize, j: usize, value: char) -> Result<(), ReadError> {
    match value {
        '0' => Ok(()),
        '1' => {
            if i == j {
                return Err(ReadError::Malformed(format!("self-loop on vertex {}", i)));
            }
            graph.add_arc(i, j);
            Ok(())
        }
        other => Err(ReadError::Malformed(
            format!("matrix entry ({},{}) is '{}', expected 0 or 1", i, j, other))),
    }
}

/** parses a whitespace-separated 0/1 adjacency matrix of size n*n */
pub fn parse_mat(content: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    let mut graph = Graph::new(nb_vertices);
    let mut tokens = content.split_whitespace();
    for i in 0..nb_vertices {
        for j in 0..nb_vertices {
            let token = tokens.next().ok_or_else(|| ReadError::Malformed(
                format!("matrix truncated at entry ({},{})", i, j)))?;
            if token.len() != 1 {
                return Err(ReadError::Malformed(
                    format!("matrix entry ({},{}) is '{}', expected 0 or 1", i, j, token)));
            }
            record_entry(&mut graph, i, j, token.chars().next().unwrap_or('0'))?;
        }
    }
    graph.update_statistics();
    Ok(graph)
}

/** parses a digit-packed 0/1 adjacency matrix (no separators between the
entries of a row) */
pub fn parse_txt(content: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    let mut graph = Graph::new(nb_vertices);
    let mut digits = content.chars().filter(|c| !c.is_whitespace());
    for i in 0..nb_vertices {
        for j in 0..nb_vertices {
            let value = digits.next().ok_or_else(|| ReadError::Malformed(
                format!("matrix truncated at entry ({},{})", i, j)))?;
            record_entry(&mut graph, i, j, value)?;
        }
    }
    graph.update_statistics();
    Ok(graph)
}

/// creates a graph from a .mat file
pub fn read_mat(filename: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    parse_mat(&fs::read_to_string(filename)?, nb_vertices)
}

/// creates a graph from a .txt file
pub fn read_txt(filename: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    parse_txt(&fs::read_to_string(filename)?, nb_vertices)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mat_triangle() {
        let content = "0 1 1\n1 0 1\n1 1 0\n";
        let graph = parse_mat(content, 3).unwrap();
        assert_eq!(graph.m(), 3);
        assert!(graph.are_adjacent(0,2));
    }

    #[test]
    fn test_parse_txt_path() {
        let content = "0100\n1010\n0101\n0010\n";
        let graph = parse_txt(content, 4).unwrap();
        assert_eq!(graph.m(), 3);
        assert!(graph.are_adjacent(1,2));
        assert!(!graph.are_adjacent(0,3));
    }

    #[test]
    fn test_rejects_bad_entries() {
        assert!(parse_mat("0 2\n2 0\n", 2).is_err());
        assert!(parse_mat("1 0\n0 1\n", 2).is_err()); // diagonal entries
        assert!(parse_mat("0 1 1 0", 3).is_err()); // truncated
        assert!(parse_txt("01\n1\n", 2).is_err());
    }

    #[test]
    fn test_read_instance_files() {
        let mat = read_mat("insts/triangle.mat", 3).unwrap();
        assert_eq!(mat.m(), 3);
        let txt = read_txt("insts/path4.txt", 4).unwrap();
        assert_eq!(txt.m(), 3);
        assert_eq!(txt.max_degree(), 2);
    }
}
