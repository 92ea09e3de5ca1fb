//! A SAT-based solver and generator for a chemical-bond puzzle on a
//! hexagonal grid.
//!
//! A puzzle is a graph of atoms (vertices with a valence target) and bonds
//! (edges whose order, 0-3, the solver assigns). [`solver::LazySolver`] finds
//! connected, valence-satisfying assignments via lazy cut-set refinement on
//! top of `varisat`; [`generator::Generator`] drives it with a perturbation
//! loop that mutates atom kinds until exactly one solution remains.

pub mod connectivity;
pub mod error;
pub mod generator;
pub mod graph;
pub mod sink;
pub mod solver;
pub mod template;
pub mod valence;

pub use error::HexbondError;
pub use generator::{Generator, GeneratorConfig, GeneratorReport};
pub use graph::{AtomKind, BondKind, Graph};
pub use solver::{CountResult, LazySolver, Solution};
