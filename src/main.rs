//! chromatic number solver: reads a graph, configures the search from its
//! statistics and reports X(G) or a k-colorability decision

use std::process::exit;
use std::time::Instant;

use clap::{App, load_yaml};
use serde_json::json;

use chroma::config::{Config, SearchStrategy};
use chroma::graph::Graph;
use chroma::search::{self, Outcome};
use chroma::util::{self, Params};

/// full coloring over the loaded vertex set; the vertices dropped by the
/// isolated-vertex compaction can take any color and get 0
fn assemble_coloring(nb_loaded: usize, pairs: &[(usize, usize)]) -> Vec<usize> {
    let mut coloring = vec![0; nb_loaded];
    for (label, color) in pairs {
        coloring[*label] = *color;
    }
    coloring
}

/// edge coloring: the chromatic index is decided on the line graph, and
/// is the maximum degree or one more
fn edge_coloring(graph: &Graph, config: &Config, start: Instant) {
    let vertex_max_degree = graph.max_degree();
    if graph.m() == 0 {
        println!("\tRESULT:\n\tX'(G)=0");
        return;
    }
    let mut line = graph.line_graph();
    println!("\tline graph:\t{} vertices, {} edges\n", line.n(), line.m());
    let mut decision = *config;
    decision.search = SearchStrategy::KColoring;
    let chromatic_index = match search::run(&mut line, &decision, Some(vertex_max_degree), true) {
        Outcome::Colorable { .. } => vertex_max_degree,
        Outcome::NotColorable { .. } => vertex_max_degree + 1,
        Outcome::TooManyColors => {
            println!("\tfailed: too much colors");
            return;
        }
        Outcome::Chromatic { .. } => unreachable!("k-coloring decision expected"),
    };
    let duration = start.elapsed().as_secs_f32();
    println!("\tRESULT:\n\tX'(G)={}", chromatic_index);
    println!("\tduration: {:.6} seconds", duration);
}

fn report(params: &Params, config: &Config, nb_loaded: usize, outcome: Outcome, start: Instant) {
    let duration = start.elapsed().as_secs_f32();
    let (result, coloring): (String, Option<Vec<usize>>) = match outcome {
        Outcome::Colorable { k, coloring } => {
            println!("\tRESULT:\n\t{}-coloring possible", k);
            (format!("{}-coloring possible", k),
             Some(assemble_coloring(nb_loaded, &coloring)))
        }
        Outcome::NotColorable { k } => {
            println!("\tRESULT:\n\t{}-coloring not possible", k);
            (format!("{}-coloring not possible", k), None)
        }
        Outcome::TooManyColors => match params.k {
            Some(_) => {
                println!("\tfailed: too much colors");
                ("too much colors".to_string(), None)
            }
            None => {
                println!("\tRESULT:\n\tX(G)>64");
                ("X(G)>64".to_string(), None)
            }
        },
        Outcome::Chromatic { nb_colors, coloring } => {
            // a graph reduced to isolated vertices still needs one color
            let chromatic = if nb_colors == 0 && nb_loaded > 0 { 1 } else { nb_colors };
            println!("\tRESULT:\n\tX(G)={}", chromatic);
            (format!("X(G)={}", chromatic),
             Some(assemble_coloring(nb_loaded, &coloring)))
        }
    };
    println!("\tduration: {:.6} seconds", duration);
    let stats = json!({
        "inst_name": params.instance,
        "nb_vertices": params.nb_vertices,
        "configuration": config,
        "result": result,
        "time_searched": duration,
    });
    util::export_results(
        &stats, coloring.as_deref(),
        params.perf_file.clone(), params.sol_file.clone(),
    );
}

pub fn main() {
    let start = Instant::now();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = match util::read_params(&main_args) {
        Ok(params) => params,
        Err(message) => {
            println!("{}", message);
            exit(10);
        }
    };
    // read the instance
    println!("{}", params.instance);
    let mut graph = match util::load_graph(&params.instance, params.nb_vertices) {
        Ok(graph) => graph,
        Err(err) => {
            println!("> {}", err);
            exit(5);
        }
    };
    graph.display_statistics();
    println!("=======================");
    // configure from the loaded statistics, then compact
    let mut overrides = params.overrides;
    if params.k.is_some() {
        overrides.search = Some(SearchStrategy::KColoring);
    }
    let config = Config::decide(graph.n(), graph.density(), graph.balance(), &overrides);
    let nb_loaded = graph.n();
    graph.remove_isolated_vertices();
    if params.edge_coloring {
        edge_coloring(&graph, &config, start);
        return;
    }
    if config.search == SearchStrategy::KColoring && params.k.is_none() {
        println!("\tno value for k provided");
        return;
    }
    config.display(params.k);
    // run the configured search
    let outcome = search::run(&mut graph, &config, params.k, true);
    report(&params, &config, nb_loaded, outcome, start);
}
