//! The lazy SAT solver: seeds valence clauses, drives `varisat`, and
//! refines disconnected candidates with cut-set clauses until it has found
//! up to `max_k` distinct *connected* models or proven unsatisfiability.
//!
//! Mirrors `solve()` in the original C generator, with the incremental
//! PicoSAT instance replaced by `varisat::Solver` (the teacher crate's SAT
//! engine, used the same way `sat_puzzles::find_all_solutions` uses it: a
//! fresh solver per call, blocking clauses for distinctness).

use varisat::{ExtendFormula, Lit, Solver};

use crate::connectivity;
use crate::error::SolverError;
use crate::graph::{BondId, Graph};
use crate::valence::{self, bond_literal, monotonicity_axioms};

/// Cap on the accumulated cut-set buffer, matching the original's
/// `MAX_CUT_EDGES`. Expressed as a literal count (each cut-set clause is at
/// most `bonds.len()` literals plus the clauses themselves).
pub const MAX_CUT_EDGES: usize = 64 * 1024 * 1024;

/// A single connected, valence-satisfying bond-order assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution {
    /// Bond order per `BondId`, i.e. `orders[bond.0]`.
    pub orders: Vec<u8>,
}

/// Outcome of one `count_solutions` call.
#[derive(Debug, Clone)]
pub struct CountResult {
    pub solutions: Vec<Solution>,
    /// Number of SAT calls made before the first connected model was found
    /// (inclusive). `varisat` does not expose PicoSAT's `decisions()`
    /// statistic (see DESIGN.md); this is the closest per-call cost metric
    /// this crate can report without vendoring a different SAT engine.
    pub sat_calls_to_first: usize,
}

impl CountResult {
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }
}

/// Owns the accumulating cut set across a generator run and drives one SAT
/// instance per `count_solutions` call.
pub struct LazySolver {
    cut_set: Vec<Vec<isize>>,
}

impl LazySolver {
    pub fn new() -> Self {
        Self {
            cut_set: Vec::new(),
        }
    }

    pub fn cut_set_len(&self) -> usize {
        self.cut_set.len()
    }

    /// Finds up to `max_k` distinct connected solutions for `graph`'s
    /// current atom-kind labeling. Cut-set clauses discovered on
    /// disconnected candidates are retained in `self.cut_set` and reused on
    /// every subsequent call, including ones with a different labeling —
    /// connectivity is orthogonal to valence targets.
    pub fn count_solutions(
        &mut self,
        graph: &Graph,
        max_k: usize,
    ) -> Result<CountResult, SolverError> {
        let mut solver = Solver::new();

        for clause in &self.cut_set {
            add_isize_clause(&mut solver, clause);
        }

        for (bond_id, _) in graph.bonds() {
            for axiom in monotonicity_axioms(bond_id) {
                add_isize_clause(&mut solver, &axiom);
            }
        }

        let mut valence_clauses = Vec::new();
        for (atom_id, atom) in graph.atoms() {
            let incident = graph.incident_bonds(atom_id);
            valence::encode_atom(&mut valence_clauses, &incident, atom.kind.valence());
        }
        for clause in &valence_clauses {
            add_isize_clause(&mut solver, clause);
        }

        let mut solutions = Vec::new();
        let mut sat_calls = 0usize;
        let mut sat_calls_to_first = 0usize;

        while solutions.len() < max_k {
            sat_calls += 1;
            let sat = solver.solve().unwrap_or(false);
            if !sat {
                break;
            }
            let model = solver.model().expect("model present after SAT result");

            let orders = decode_orders(&model, graph.bond_count());
            let result = connectivity::check(graph, |b| orders[b.0] >= 1);

            if result.is_connected(graph.atom_count()) {
                if solutions.is_empty() {
                    sat_calls_to_first = sat_calls;
                }
                solutions.push(Solution {
                    orders: orders.clone(),
                });
                let blocking: Vec<Lit> = model.iter().map(|&lit| !lit).collect();
                solver.add_clause(&blocking);
            } else {
                let mut new_clause = Vec::with_capacity(result.cut_edges.len());
                for bond_id in &result.cut_edges {
                    new_clause.push(bond_literal(*bond_id, 1));
                }
                if !new_clause.is_empty() {
                    if self.cut_set.len() + new_clause.len() > MAX_CUT_EDGES {
                        return Err(SolverError::CutSetOverflow { max: MAX_CUT_EDGES });
                    }
                    add_isize_clause(&mut solver, &new_clause);
                    self.cut_set.push(new_clause);
                }
            }
        }

        Ok(CountResult {
            solutions,
            sat_calls_to_first,
        })
    }

    /// Writes the bond orders of `solution` back into `graph`.
    pub fn apply_solution(graph: &mut Graph, solution: &Solution) {
        for i in 0..graph.bond_count() {
            let bond_id = BondId(i);
            graph.bond_mut(bond_id).order = solution.orders[i];
        }
    }
}

impl Default for LazySolver {
    fn default() -> Self {
        Self::new()
    }
}

fn add_isize_clause(solver: &mut Solver, clause: &[isize]) {
    let lits: Vec<Lit> = clause.iter().map(|&l| Lit::from_dimacs(l)).collect();
    solver.add_clause(&lits);
}

fn decode_orders(model: &[Lit], bond_count: usize) -> Vec<u8> {
    let mut orders = vec![0u8; bond_count];
    for &lit in model {
        if lit.is_positive() {
            let var = lit.var().to_dimacs() as usize - 1;
            let bond = var / 3;
            let order = (var % 3) as u8 + 1;
            if bond < orders.len() {
                orders[bond] = orders[bond].max(order);
            }
        }
    }
    orders
}
