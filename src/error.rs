//! Error types for every fallible stage of the puzzle pipeline.
//!
//! Each stage gets its own variant set so callers can match on the subsystem
//! that failed without losing the underlying diagnostic.

use std::path::PathBuf;
use thiserror::Error;

/// Root error returned by the library's public entry points.
#[derive(Debug, Error)]
pub enum HexbondError {
    #[error("template error")]
    Template(#[from] TemplateError),
    #[error("graph error")]
    Graph(#[from] GraphError),
    #[error("solver error")]
    Solver(#[from] SolverError),
    #[error("generator error")]
    Generator(#[from] GeneratorError),
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Errors from loading and parsing an ASCII puzzle template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("could not read template file {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized character '{ch}' at row {row}, column {col}")]
    UnknownCharacter { ch: char, row: usize, col: usize },

    #[error("bond at row {row}, column {col} has no atom at one or both endpoints")]
    DanglingBond { row: usize, col: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors from building or querying a `Graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("atom id {0:?} does not exist")]
    UnknownAtom(crate::graph::AtomId),

    #[error("a bond cannot connect an atom to itself ({0:?})")]
    SelfLoop(crate::graph::AtomId),

    #[error("a bond already exists between {0:?} and {1:?}")]
    DuplicateBond(crate::graph::AtomId, crate::graph::AtomId),

    #[error("graph capacity exceeded: at most {max} {what} are supported")]
    CapacityExceeded { what: &'static str, max: usize },
}

/// Errors from the lazy SAT solver.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("cut-set buffer overflowed its static cap of {max} literals")]
    CutSetOverflow { max: usize },
}

/// Errors from the generator's outer loop.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator exceeded its iteration cap of {cap}")]
    IterationCapExceeded { cap: u64 },

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("I/O error writing the puzzle sink")]
    Io(#[from] std::io::Error),
}
