use std::fmt;
use std::fs;

use clap::ArgMatches;
use serde_json::Value;

use crate::config::ConfigOverrides;
use crate::graph::{Graph, Solution};
use crate::{dimacs, graph6, matrix};

/** why an instance file could not be turned into a graph */
#[derive(Debug)]
pub enum ReadError {
    /// the file cannot be opened or read
    Io(std::io::Error),
    /// the filename extension is not a supported format
    UnknownFormat(String),
    /// the content does not follow its format
    Malformed(String),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "no such file ({})", err),
            ReadError::UnknownFormat(ext) => write!(f, "filetype <{}> not supported", ext),
            ReadError::Malformed(message) => write!(f, "malformed input: {}", message),
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self { ReadError::Io(err) }
}

/** reads the instance file, dispatching on the filename extension.
The graph6 formats carry their own vertex count, which must agree with
the one given on the command line. */
pub fn load_graph(filename: &str, nb_vertices: usize) -> Result<Graph, ReadError> {
    let extension = filename.rsplit('.').next().unwrap_or("");
    match extension {
        "mat" => matrix::read_mat(filename, nb_vertices),
        "txt" => matrix::read_txt(filename, nb_vertices),
        "col" => dimacs::read_col(filename, nb_vertices),
        "g6" | "graph6" => {
            let graph = graph6::read_graph6(filename)?;
            if graph.n() != nb_vertices {
                return Err(ReadError::Malformed(format!(
                    "file encodes {} vertices, {} given", graph.n(), nb_vertices)));
            }
            Ok(graph)
        }
        other => Err(ReadError::UnknownFormat(other.to_string())),
    }
}

/// command line parameters of the solver
#[derive(Debug)]
pub struct Params {
    /// instance filename
    pub instance: String,
    /// number of vertices of the instance
    pub nb_vertices: usize,
    /// number of colors for a k-coloring decision
    pub k: Option<usize>,
    /// configuration overrides
    pub overrides: ConfigOverrides,
    /// color the edges of the graph instead of its vertices
    pub edge_coloring: bool,
    /// where to write the witness coloring
    pub sol_file: Option<String>,
    /// where to write the performance stats
    pub perf_file: Option<String>,
}

fn parse_value<T: std::str::FromStr>(
    main_args: &ArgMatches, name: &str,
) -> Result<Option<T>, String> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(raw) => raw.parse::<T>()
            .map(Some)
            .map_err(|_| format!("unable to parse --{} value: {}", name, raw)),
    }
}

/** reads the command line input. Missing or unparsable required
arguments are reported as an error message for the caller to print. */
pub fn read_params(main_args: &ArgMatches) -> Result<Params, String> {
    let instance = main_args.value_of("instance")
        .ok_or("missing argument: instance file")?.to_string();
    let nb_vertices = main_args.value_of("nb_vertices")
        .ok_or("missing argument: number of vertices")?
        .parse::<usize>()
        .map_err(|_| "unable to parse the number of vertices".to_string())?;
    let k = parse_value::<usize>(main_args, "k")?;
    let overrides = ConfigOverrides {
        search: parse_value(main_args, "search")?,
        bounds: parse_value(main_args, "bounds")?,
        sorting: parse_value(main_args, "sorting")?,
        sorting_rate: parse_value(main_args, "rate")?,
        decay_factor: parse_value(main_args, "decay")?,
        cs: if main_args.is_present("cs") { Some(true) } else { None },
    };
    let sol_file = main_args.value_of("solution").map(|name| {
        println!("printing solutions in: {}", name);
        name.to_string()
    });
    let perf_file = main_args.value_of("perf").map(|name| {
        println!("printing perfs in: {}\n", name);
        name.to_string()
    });
    Ok(Params {
        instance, nb_vertices, k, overrides,
        edge_coloring: main_args.is_present("edge"),
        sol_file, perf_file,
    })
}

/// groups a full coloring into color classes
pub fn coloring_to_classes(coloring: &[usize]) -> Solution {
    let nb_colors = coloring.iter().max().map_or(0, |c| c + 1);
    let mut classes = vec![Vec::new(); nb_colors];
    for (v, color) in coloring.iter().enumerate() {
        classes[*color].push(v);
    }
    classes
}

/** writes a string encoding the solution, one color class per line */
pub fn solution_to_string(classes: &[Vec<usize>]) -> String {
    let mut res = String::default();
    for class in classes {
        for v in class {
            res += format!("{} ", v).as_str();
        }
        res += "\n";
    }
    res
}

/// exports search statistics and the witness coloring to the requested files
pub fn export_results(
    stats: &Value,
    coloring: Option<&[usize]>,
    perf_file: Option<String>,
    sol_file: Option<String>,
) {
    if let Some(filename) = perf_file {
        if let Err(why) = fs::write(filename.as_str(), stats.to_string()) {
            println!("couldn't write {}: {}", filename, why);
        }
    }
    if let Some(filename) = sol_file {
        match coloring {
            None => println!("no solution to write in {}", filename),
            Some(colors) => {
                let classes = coloring_to_classes(colors);
                if let Err(why) = fs::write(filename.as_str(), solution_to_string(&classes)) {
                    println!("couldn't write {}: {}", filename, why);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_graph_dispatch() {
        assert!(load_graph("insts/triangle.mat", 3).is_ok());
        assert!(load_graph("insts/petersen.col", 10).is_ok());
        assert!(load_graph("insts/c5.g6", 5).is_ok());
        assert!(matches!(load_graph("insts/c5.g6", 6),
            Err(ReadError::Malformed(_))));
        assert!(matches!(load_graph("insts/triangle.xyz", 3),
            Err(ReadError::UnknownFormat(_))));
        assert!(matches!(load_graph("insts/missing.col", 3),
            Err(ReadError::Io(_))));
    }

    #[test]
    fn test_solution_export_format() {
        let classes = coloring_to_classes(&[0,1,0,2]);
        assert_eq!(classes, vec![vec![0,2], vec![1], vec![3]]);
        assert_eq!(solution_to_string(&classes), "0 2 \n1 \n3 \n");
    }
}
