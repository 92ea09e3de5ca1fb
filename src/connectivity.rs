//! Connectivity checking over the "active" (order ≥ 1) subgraph, and the
//! cut-set extraction the lazy solver needs to refine a disconnected
//! candidate assignment.

use std::collections::VecDeque;

use crate::graph::{AtomId, BondId, Graph};

/// Result of one connectivity traversal.
#[derive(Debug, Clone)]
pub struct ConnectivityResult {
    pub reached: usize,
    /// Edges crossing the boundary between the reached and unreached
    /// partitions — a valid (not necessarily minimum) edge cut.
    pub cut_edges: Vec<BondId>,
}

impl ConnectivityResult {
    pub fn is_connected(&self, total_atoms: usize) -> bool {
        self.reached == total_atoms
    }
}

/// Traverses `graph` from atom 0 across edges for which `active` returns
/// true, then filters the candidate cut edges discovered at the frontier
/// down to those whose endpoints actually straddle the reached/unreached
/// boundary.
pub fn check(graph: &Graph, active: impl Fn(BondId) -> bool) -> ConnectivityResult {
    let total = graph.atom_count();
    let mut marked = vec![false; total];
    let mut queue = VecDeque::new();
    let mut candidate_cuts = Vec::new();

    if total == 0 {
        return ConnectivityResult {
            reached: 0,
            cut_edges: Vec::new(),
        };
    }

    marked[0] = true;
    queue.push_back(AtomId(0));
    let mut reached = 1;

    while let Some(atom) = queue.pop_front() {
        for (bond_id, other) in graph.neighbors(atom) {
            if marked[other.0] {
                continue;
            }
            if active(bond_id) {
                marked[other.0] = true;
                reached += 1;
                queue.push_back(other);
            } else {
                candidate_cuts.push(bond_id);
            }
        }
    }

    let cut_edges = candidate_cuts
        .into_iter()
        .filter(|&bond_id| {
            let bond = graph.bond(bond_id);
            marked[bond.atom_id1.0] != marked[bond.atom_id2.0]
        })
        .collect();

    ConnectivityResult { reached, cut_edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AtomKind, BondKind};

    fn build_triangle(g: &mut Graph) -> [crate::graph::BondId; 3] {
        let a = g.add_atom(0, 0, AtomKind::C).unwrap();
        let b = g.add_atom(1, 0, AtomKind::C).unwrap();
        let c = g.add_atom(0, 1, AtomKind::C).unwrap();
        [
            g.add_bond(0, 0, BondKind::Minus, a, b).unwrap(),
            g.add_bond(0, 0, BondKind::Minus, b, c).unwrap(),
            g.add_bond(0, 0, BondKind::Minus, c, a).unwrap(),
        ]
    }

    #[test]
    fn forest_with_all_zero_orders_reaches_only_the_seed() {
        let mut g = Graph::new();
        let bonds = build_triangle(&mut g);
        let result = check(&g, |_| false);
        assert_eq!(result.reached, 1);
        // Every bond incident to the seed is a candidate; both of the
        // seed's bonds straddle reached/unreached, the far one doesn't.
        let mut ids: Vec<usize> = result.cut_edges.iter().map(|b| b.0).collect();
        ids.sort();
        let mut expected: Vec<usize> = bonds
            .iter()
            .filter(|&&b| {
                let bond = g.bond(b);
                bond.atom_id1.0 == 0 || bond.atom_id2.0 == 0
            })
            .map(|b| b.0)
            .collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn triangle_with_one_active_edge_reaches_two_atoms() {
        let mut g = Graph::new();
        let bonds = build_triangle(&mut g);
        let active_bond = bonds[0];
        let result = check(&g, |b| b == active_bond);
        assert_eq!(result.reached, 2);
        assert!(!result.is_connected(3));
        // The two bonds crossing into the unreached atom 2 are the cut.
        let mut ids: Vec<usize> = result.cut_edges.iter().map(|b| b.0).collect();
        ids.sort();
        assert_eq!(ids, vec![bonds[1].0, bonds[2].0]);
    }

    #[test]
    fn disconnected_pair_of_triangles() {
        let mut g = Graph::new();
        let _first = build_triangle(&mut g);
        let a = g.add_atom(5, 0, AtomKind::C).unwrap();
        let b = g.add_atom(6, 0, AtomKind::C).unwrap();
        let c = g.add_atom(5, 1, AtomKind::C).unwrap();
        g.add_bond(0, 0, BondKind::Minus, a, b).unwrap();
        g.add_bond(0, 0, BondKind::Minus, b, c).unwrap();
        g.add_bond(0, 0, BondKind::Minus, c, a).unwrap();

        // All edges active within each triangle; none between them (there
        // are none between them at all).
        let result = check(&g, |_| true);
        assert_eq!(result.reached, 3);
        assert!(!result.is_connected(6));
        assert!(result.cut_edges.is_empty());
    }
}
