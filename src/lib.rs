//! Exact chromatic number solver (constraint-propagating backtracking search)

// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]

/// graph model: vertex arena, neighbor bitsets, color domains, checker
pub mod graph;

/// read DIMACS .col files
pub mod dimacs;

/// read .mat / .txt adjacency matrix files
pub mod matrix;

/// read .g6 / .graph6 files (standard graph6 encoding)
pub mod graph6;

/// algorithm configuration (search, bounds, sorting) and the automatic decision tree
pub mod config;

/// vertex orderings, dynamic re-sorting, next-vertex and next-color selection
pub mod heuristics;

/// upper bounds on the chromatic number (Brooks, Welsh-Powell, RLF)
pub mod bounds;

/// the backtracking colorer with unit propagation on color domains
pub mod coloring;

/// search drivers bracketing the chromatic number
pub mod search;

/// 2-, 3- and 4-colorability specialists
pub mod lowk;

/// subset dynamic programming variant for small graphs
pub mod dynamic;

/// helper and utility methods for executables
pub mod util;
