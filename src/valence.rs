//! Translates a vertex's valence constraint into a CNF fragment over the
//! monotone "order ≥ k" literals of its incident bonds.
//!
//! This is a direct generalization of `synthesize_sum_ieq` from the original
//! C generator (`examples/original_source/main.c`), which only handled
//! degree 2 and degree 3 atoms (a degree-1 atom — every terminal H — fell
//! through to `assert(n == 3)`, a latent bug in the reference implementation
//! compiled out whenever `NDEBUG` is set). Degree 1 is handled directly here
//! instead: see `encode_degree_one`.

use crate::graph::BondId;

/// Which side of `Σ order_k = v` a clause family enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sign {
    /// `Σ order_k ≥ v` — blocks undershoot.
    AtLeast,
    /// `Σ order_k ≤ v` — blocks overshoot.
    AtMost,
}

/// `bond_id`'s three consecutive literals, numbered `3*i + 1, 3*i + 2, 3*i + 3`
/// for "order ≥ 1, ≥ 2, ≥ 3" respectively. Zero is reserved as the DIMACS
/// clause terminator and is never produced here.
pub fn bond_literal(bond_id: BondId, order: u8) -> isize {
    debug_assert!((1..=3).contains(&order));
    (bond_id.0 * 3 + order as usize) as isize
}

/// The two canonical monotonicity axioms for one bond: `(o1 ∨ ¬o2)` and
/// `(o2 ∨ ¬o3)`. Asserted once per bond, independent of its atom's valence.
pub fn monotonicity_axioms(bond_id: BondId) -> [Vec<isize>; 2] {
    let o1 = bond_literal(bond_id, 1);
    let o2 = bond_literal(bond_id, 2);
    let o3 = bond_literal(bond_id, 3);
    [vec![o1, -o2], vec![o2, -o3]]
}

fn signed_literal(bond_id: BondId, order: u8, sign: Sign) -> isize {
    let lit = bond_literal(bond_id, order);
    match sign {
        Sign::AtLeast => lit,
        Sign::AtMost => -lit,
    }
}

/// Pushes the clause family for one direction (`sign`) of the sum
/// inequality over two bonds, mirroring `synthesize_sum_ieq`'s `n == 2`
/// branch: the shared threshold `Σ = v + 1` blocks overshoot (via `i_k < 4`)
/// and undershoot (via `i_k > 0`) alike.
fn sum_ieq_degree_two(clauses: &mut Vec<Vec<isize>>, bonds: [BondId; 2], v: u8, sign: Sign) {
    for i1 in 0..=4u8 {
        for i2 in 0..=4u8 {
            if i1 as u32 + i2 as u32 != v as u32 + 1 {
                continue;
            }
            let admissible = match sign {
                Sign::AtMost => i1 < 4 && i2 < 4,
                Sign::AtLeast => i1 != 0 && i2 != 0,
            };
            if !admissible {
                continue;
            }
            let mut clause = Vec::with_capacity(2);
            if i1 > 0 && i1 < 4 {
                clause.push(signed_literal(bonds[0], i1, sign));
            }
            if i2 > 0 && i2 < 4 {
                clause.push(signed_literal(bonds[1], i2, sign));
            }
            clauses.push(clause);
        }
    }
}

/// Pushes the clause family for one direction (`sign`) of the sum
/// inequality over three bonds, mirroring `synthesize_sum_ieq`'s `n == 3`
/// branch: overshoot is blocked at `Σ = v + 1`, but undershoot is blocked at
/// the different threshold `Σ = v + 2` — the asymmetry spec.md §9 flags as
/// the single constant an implementer must get right.
fn sum_ieq_degree_three(clauses: &mut Vec<Vec<isize>>, bonds: [BondId; 3], v: u8, sign: Sign) {
    for i1 in 0..=4u8 {
        for i2 in 0..=4u8 {
            for i3 in 0..=4u8 {
                let sum = i1 as u32 + i2 as u32 + i3 as u32;
                let admissible = match sign {
                    Sign::AtMost => sum == v as u32 + 1 && i1 < 4 && i2 < 4 && i3 < 4,
                    Sign::AtLeast => sum == v as u32 + 2 && i1 != 0 && i2 != 0 && i3 != 0,
                };
                if !admissible {
                    continue;
                }
                let mut clause = Vec::with_capacity(3);
                for (&bond, &i) in bonds.iter().zip([i1, i2, i3].iter()) {
                    if i > 0 && i < 4 {
                        clause.push(signed_literal(bond, i, sign));
                    }
                }
                clauses.push(clause);
            }
        }
    }
}

/// A degree-1 atom's single bond must carry exactly order `v`. Unlike
/// degree 2/3, there is no tuple search: monotonicity pins the order
/// directly via unit clauses. `v > 3` (never true for H/O/N/C, whose
/// valences top out at 4 but whose degree is never forced to 1 at valence 4
/// in a well-formed puzzle) is encoded as a guaranteed contradiction rather
/// than silently accepted.
fn encode_degree_one(clauses: &mut Vec<Vec<isize>>, bond: BondId, v: u8) {
    if v > 3 {
        clauses.push(vec![]);
        return;
    }
    for order in 1..=3u8 {
        let lit = bond_literal(bond, order);
        if order <= v {
            clauses.push(vec![lit]);
        } else {
            clauses.push(vec![-lit]);
        }
    }
}

/// Encodes one atom's valence constraint: `Σ order_k = v` for a specified
/// target `v`, or `Σ order_k ≤ 4` if `valence` is `None` (the `Unspecified`
/// atom kind).
pub fn encode_atom(clauses: &mut Vec<Vec<isize>>, bond_ids: &[BondId], valence: Option<u8>) {
    match (bond_ids.len(), valence) {
        (0, _) => {}
        (1, Some(v)) => encode_degree_one(clauses, bond_ids[0], v),
        (1, None) => {
            // Σ ≤ 4 with one bond capped at order 3 always holds; nothing to add.
        }
        (2, Some(v)) => {
            let pair = [bond_ids[0], bond_ids[1]];
            sum_ieq_degree_two(clauses, pair, v, Sign::AtLeast);
            sum_ieq_degree_two(clauses, pair, v, Sign::AtMost);
        }
        (2, None) => {
            let pair = [bond_ids[0], bond_ids[1]];
            sum_ieq_degree_two(clauses, pair, 4, Sign::AtMost);
        }
        (3, Some(v)) => {
            let triple = [bond_ids[0], bond_ids[1], bond_ids[2]];
            sum_ieq_degree_three(clauses, triple, v, Sign::AtLeast);
            sum_ieq_degree_three(clauses, triple, v, Sign::AtMost);
        }
        (3, None) => {
            let triple = [bond_ids[0], bond_ids[1], bond_ids[2]];
            sum_ieq_degree_three(clauses, triple, 4, Sign::AtMost);
        }
        (n, _) => panic!("atom has unsupported degree {n}; the degree invariant caps it at 3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use varisat::{ExtendFormula, Lit, Solver};

    /// Enumerates every order tuple `(i_0,...,i_{n-1}) ∈ {0..=3}^n` admitted
    /// by `encode_atom` for `bond_ids`, by adding the monotonicity axioms and
    /// valence clauses to a fresh solver and blocking each model found.
    fn satisfying_tuples(n: usize, valence: Option<u8>) -> std::collections::HashSet<Vec<u8>> {
        let bond_ids: Vec<BondId> = (0..n).map(BondId).collect();
        let mut clauses = Vec::new();
        for &b in &bond_ids {
            for axiom in monotonicity_axioms(b) {
                clauses.push(axiom);
            }
        }
        encode_atom(&mut clauses, &bond_ids, valence);

        let mut solver = Solver::new();
        for clause in &clauses {
            let lits: Vec<Lit> = clause.iter().map(|&l| Lit::from_dimacs(l)).collect();
            solver.add_clause(&lits);
        }

        let mut found = std::collections::HashSet::new();
        while solver.solve().unwrap_or(false) {
            let model = solver.model().expect("model present after SAT result");
            let mut orders = vec![0u8; n];
            for &lit in &model {
                if lit.is_positive() {
                    let var = lit.var().to_dimacs() as usize - 1;
                    let bond = var / 3;
                    let order = (var % 3) as u8 + 1;
                    orders[bond] = orders[bond].max(order);
                }
            }
            found.insert(orders.clone());
            let blocking: Vec<Lit> = model.iter().map(|&l| !l).collect();
            solver.add_clause(&blocking);
        }
        found
    }

    fn expected_tuples(n: usize, valence: Option<u8>) -> std::collections::HashSet<Vec<u8>> {
        let mut expected = std::collections::HashSet::new();
        let mut tuple = vec![0u8; n];
        fill(&mut tuple, 0, valence, &mut expected);
        expected
    }

    fn fill(
        tuple: &mut Vec<u8>,
        idx: usize,
        valence: Option<u8>,
        out: &mut std::collections::HashSet<Vec<u8>>,
    ) {
        if idx == tuple.len() {
            let sum: u32 = tuple.iter().map(|&x| x as u32).sum();
            let ok = match valence {
                Some(v) => sum == v as u32,
                None => sum <= 4,
            };
            if ok {
                out.insert(tuple.clone());
            }
            return;
        }
        for v in 0..=3u8 {
            tuple[idx] = v;
            fill(tuple, idx + 1, valence, out);
        }
    }

    #[test]
    fn matches_truth_table_for_every_degree_and_valence() {
        for n in 1..=3usize {
            for v in 0..=4u8 {
                let found = satisfying_tuples(n, Some(v));
                let expected = expected_tuples(n, Some(v));
                assert_eq!(
                    found, expected,
                    "degree {n}, valence {v}: encoding diverged from Σ = v"
                );
            }
            let found = satisfying_tuples(n, None);
            let expected = expected_tuples(n, None);
            assert_eq!(found, expected, "degree {n}, unspecified: encoding diverged from Σ ≤ 4");
        }
    }

    #[test]
    fn degree_one_pins_the_order_exactly() {
        for v in 1..=3u8 {
            let found = satisfying_tuples(1, Some(v));
            assert_eq!(found, std::collections::HashSet::from([vec![v]]));
        }
    }

    #[test]
    fn monotonicity_axioms_forbid_gaps() {
        let bond = BondId(0);
        let axioms = monotonicity_axioms(bond);
        assert_eq!(axioms[0], vec![bond_literal(bond, 1), -bond_literal(bond, 2)]);
        assert_eq!(axioms[1], vec![bond_literal(bond, 2), -bond_literal(bond, 3)]);
    }
}
