//! The outer perturbation loop: repeatedly relabels a few atoms' valence
//! kinds and asks the Lazy Solver whether the result is still solvable,
//! until exactly one solution remains.
//!
//! A direct rework of the `while(1)` loop in `main()` of the original C
//! generator, with the raw `rand() % atoms_count` / `sample_distribution`
//! replaced by `rand::Rng`, the way the teacher's `src/bin/minesweeper.rs`
//! already uses it, and the ANSI status line replaced by
//! `log::info!`/`log::debug!`.

use std::path::PathBuf;

use rand::Rng;

use crate::error::GeneratorError;
use crate::graph::{AtomId, AtomKind, Graph};
use crate::sink;
use crate::solver::LazySolver;

/// Default per-iteration perturbation count, matching the original's
/// `#define NUM_CHOICES 2`.
pub const DEFAULT_NUM_CHOICES: usize = 2;

/// Knobs for one generator run. `weights` is indexed by `AtomKind::ALL`'s
/// order (`Unspecified, H, O, N, C`); the original's argv layout never
/// exposes `Unspecified`'s slot, so callers are expected to leave it 0, but
/// nothing here enforces that.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub weights: [u32; 5],
    pub num_choices: usize,
    pub output_path: PathBuf,
    pub max_iterations: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            weights: [0, 1, 5, 8, 3],
            num_choices: DEFAULT_NUM_CHOICES,
            output_path: PathBuf::from("puzzle.txt"),
            max_iterations: None,
        }
    }
}

/// Outcome of a completed run: the iteration count and the final, unique
/// labeling's bond-order assignment (already written back into the graph).
#[derive(Debug, Clone)]
pub struct GeneratorReport {
    pub iterations: u64,
}

/// Drives the perturbation loop against one owned `Graph`.
pub struct Generator {
    graph: Graph,
    config: GeneratorConfig,
    solver: LazySolver,
    unspecified_stack: Vec<AtomId>,
}

impl Generator {
    pub fn new(graph: Graph, config: GeneratorConfig) -> Self {
        let unspecified_stack = graph
            .atoms()
            .filter(|(_, atom)| atom.kind == AtomKind::Unspecified)
            .map(|(id, _)| id)
            .collect();
        Self {
            graph,
            config,
            solver: LazySolver::new(),
            unspecified_stack,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Runs the perturbation loop to termination, writes the result to
    /// `self.config.output_path`, and returns the iteration count.
    ///
    /// Per iteration: choose `num_choices` atoms (unspecified ones first),
    /// resample each to a different kind, call the Lazy Solver with
    /// `max_k = 2`, and branch: exactly 1 solution terminates the loop; 2
    /// (capped) accepts the perturbation and continues; 0 reverts it.
    pub fn run(&mut self) -> Result<GeneratorReport, GeneratorError> {
        let mut rng = rand::rng();
        let mut iterations: u64 = 0;

        loop {
            if let Some(cap) = self.config.max_iterations {
                if iterations >= cap {
                    return Err(GeneratorError::IterationCapExceeded { cap });
                }
            }

            let mut indices = Vec::with_capacity(self.config.num_choices);
            let mut old_kinds = Vec::with_capacity(self.config.num_choices);
            for _ in 0..self.config.num_choices {
                let atom_id = match self.unspecified_stack.pop() {
                    Some(id) => id,
                    None => AtomId(rng.random_range(0..self.graph.atom_count())),
                };
                indices.push(atom_id);
                old_kinds.push(self.graph.atom(atom_id).kind);
            }

            for (i, &atom_id) in indices.iter().enumerate() {
                loop {
                    let new_kind = sample_kind(&mut rng, &self.config.weights);
                    if new_kind != old_kinds[i] {
                        self.graph.atom_mut(atom_id).kind = new_kind;
                        break;
                    }
                }
            }

            let result = self
                .solver
                .count_solutions(&self.graph, 2)
                .map_err(GeneratorError::from)?;
            let found = result.solution_count();

            if found == 1 {
                log::info!(
                    "converged after {iterations} iterations, cut set has {} clauses",
                    self.solver.cut_set_len()
                );
                LazySolver::apply_solution(&mut self.graph, &result.solutions[0]);
                sink::write_puzzle_file(&self.config.output_path, &self.graph)
                    .map_err(GeneratorError::from)?;
                return Ok(GeneratorReport { iterations });
            } else if found >= 1 {
                log::debug!(
                    "iteration {iterations}: {found} solutions, cut set {}, kinds {:?}",
                    self.solver.cut_set_len(),
                    atom_kind_counts(&self.graph)
                );
            } else {
                for (i, &atom_id) in indices.iter().enumerate() {
                    self.graph.atom_mut(atom_id).kind = old_kinds[i];
                    if old_kinds[i] == AtomKind::Unspecified {
                        self.unspecified_stack.push(atom_id);
                    }
                }
                log::debug!("iteration {iterations}: reverted (UNSAT)");
            }

            iterations += 1;
        }
    }
}

fn sample_kind(rng: &mut impl Rng, weights: &[u32; 5]) -> AtomKind {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return AtomKind::Unspecified;
    }
    let mut r = rng.random_range(0..total);
    for (kind, &w) in AtomKind::ALL.iter().zip(weights.iter()) {
        if r < w {
            return *kind;
        }
        r -= w;
    }
    unreachable!("weighted sample exhausted without a hit")
}

fn atom_kind_counts(graph: &Graph) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for (_, atom) in graph.atoms() {
        let slot = AtomKind::ALL.iter().position(|k| *k == atom.kind).unwrap();
        counts[slot] += 1;
    }
    counts
}
