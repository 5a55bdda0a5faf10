//! chromatic number of a small graph by subset dynamic programming

use std::process::exit;
use std::time::Instant;

use clap::{App, load_yaml};

use chroma::dynamic::{chromatic_number_dp, MAX_DP_VERTICES};
use chroma::util;

pub fn main() {
    let start = Instant::now();
    let yaml = load_yaml!("subset_dp.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let instance = match main_args.value_of("instance") {
        Some(name) => name.to_string(),
        None => {
            println!("missing argument: instance file");
            exit(10);
        }
    };
    let nb_vertices = match main_args.value_of("nb_vertices")
        .and_then(|raw| raw.parse::<usize>().ok()) {
        Some(n) => n,
        None => {
            println!("missing argument: number of vertices");
            exit(10);
        }
    };
    if nb_vertices > MAX_DP_VERTICES {
        println!("the subset DP handles at most {} vertices", MAX_DP_VERTICES);
        exit(10);
    }
    let graph = match util::load_graph(&instance, nb_vertices) {
        Ok(graph) => graph,
        Err(err) => {
            println!("> {}", err);
            exit(5);
        }
    };
    let chromatic = chromatic_number_dp(&graph);
    let duration = start.elapsed().as_secs_f32();
    println!("{}\t\t{}\tX(G)={}\tduration: {:.6} seconds",
        instance, graph.n(), chromatic, duration);
}
