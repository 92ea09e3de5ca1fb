//! The puzzle graph: atoms (vertices, each with a valence target) and bonds
//! (edges, each an eventual bond-order site).
//!
//! Mirrors the fixed-size `atoms[]`/`bonds[]` arrays of the original C
//! generator, but with runtime-checked capacity and stable, type-safe ids
//! instead of raw array indices.

use crate::error::GraphError;

/// The four chemical elements this puzzle domain models, plus a wildcard.
///
/// `Unspecified` carries no fixed valence target; its only constraint is an
/// upper bound (total incident bond order ≤ 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Unspecified,
    H,
    O,
    N,
    C,
}

impl AtomKind {
    /// The required sum of incident bond orders, or `None` for `Unspecified`.
    pub fn valence(self) -> Option<u8> {
        match self {
            AtomKind::Unspecified => None,
            AtomKind::H => Some(1),
            AtomKind::O => Some(2),
            AtomKind::N => Some(3),
            AtomKind::C => Some(4),
        }
    }

    /// The glyph this atom is written as in the puzzle text format.
    pub fn glyph(self) -> char {
        match self {
            AtomKind::Unspecified => 'X',
            AtomKind::H => 'H',
            AtomKind::O => 'O',
            AtomKind::N => 'N',
            AtomKind::C => 'C',
        }
    }

    /// All five kinds, in the fixed order the generator's weight slots use.
    pub const ALL: [AtomKind; 5] = [
        AtomKind::Unspecified,
        AtomKind::H,
        AtomKind::O,
        AtomKind::N,
        AtomKind::C,
    ];
}

/// The three lexical bond glyphs. Purely cosmetic once `atom_id1`/`atom_id2`
/// are resolved — kept only so the Puzzle Sink can round-trip the original
/// drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondKind {
    Minus,
    Slash,
    Backslash,
}

impl BondKind {
    pub fn glyph(self) -> char {
        match self {
            BondKind::Minus => '-',
            BondKind::Slash => '/',
            BondKind::Backslash => '\\',
        }
    }
}

/// Stable index of an atom within a `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub usize);

/// Stable index of a bond within a `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BondId(pub usize);

#[derive(Debug, Clone)]
pub struct Atom {
    pub x: i32,
    pub y: i32,
    pub kind: AtomKind,
}

#[derive(Debug, Clone)]
pub struct Bond {
    pub x: i32,
    pub y: i32,
    pub kind: BondKind,
    pub atom_id1: AtomId,
    pub atom_id2: AtomId,
    /// Assigned bond order in 0..=3, written by the solver once a call to
    /// `LazySolver::count_solutions` finds a connected model.
    pub order: u8,
}

/// The puzzle graph. No removal: indices are stable for the graph's
/// lifetime.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Graph {
    /// Matches the original C source's static caps, now runtime-checked.
    pub const MAX_ATOMS: usize = 512;
    pub const MAX_BONDS: usize = 512;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn atom(&self, id: AtomId) -> &Atom {
        &self.atoms[id.0]
    }

    /// Mutable access to one atom, used by the generator to resample a
    /// vertex's `AtomKind` in place between solver calls.
    pub fn atom_mut(&mut self, id: AtomId) -> &mut Atom {
        &mut self.atoms[id.0]
    }

    pub fn atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter().enumerate().map(|(i, a)| (AtomId(i), a))
    }

    pub fn bond(&self, id: BondId) -> &Bond {
        &self.bonds[id.0]
    }

    pub fn bond_mut(&mut self, id: BondId) -> &mut Bond {
        &mut self.bonds[id.0]
    }

    pub fn bonds(&self) -> impl Iterator<Item = (BondId, &Bond)> {
        self.bonds.iter().enumerate().map(|(i, b)| (BondId(i), b))
    }

    /// Appends a new atom, returning its stable id.
    pub fn add_atom(&mut self, x: i32, y: i32, kind: AtomKind) -> Result<AtomId, GraphError> {
        if self.atoms.len() >= Self::MAX_ATOMS {
            return Err(GraphError::CapacityExceeded {
                what: "atoms",
                max: Self::MAX_ATOMS,
            });
        }
        let id = AtomId(self.atoms.len());
        self.atoms.push(Atom { x, y, kind });
        Ok(id)
    }

    /// Appends a new bond between two existing, distinct atoms. Rejects
    /// self-loops and duplicate unordered pairs, matching the graph
    /// invariant of §3.
    pub fn add_bond(
        &mut self,
        x: i32,
        y: i32,
        kind: BondKind,
        a1: AtomId,
        a2: AtomId,
    ) -> Result<BondId, GraphError> {
        if a1.0 >= self.atoms.len() {
            return Err(GraphError::UnknownAtom(a1));
        }
        if a2.0 >= self.atoms.len() {
            return Err(GraphError::UnknownAtom(a2));
        }
        if a1 == a2 {
            return Err(GraphError::SelfLoop(a1));
        }
        if self
            .bonds
            .iter()
            .any(|b| unordered_eq(b.atom_id1, b.atom_id2, a1, a2))
        {
            return Err(GraphError::DuplicateBond(a1, a2));
        }
        if self.bonds.len() >= Self::MAX_BONDS {
            return Err(GraphError::CapacityExceeded {
                what: "bonds",
                max: Self::MAX_BONDS,
            });
        }
        let id = BondId(self.bonds.len());
        self.bonds.push(Bond {
            x,
            y,
            kind,
            atom_id1: a1,
            atom_id2: a2,
            order: 0,
        });
        Ok(id)
    }

    /// The bonds incident to `atom`, paired with the atom on the other end.
    /// Linear scan; acceptable since degrees are capped at 3.
    pub fn neighbors(&self, atom: AtomId) -> Vec<(BondId, AtomId)> {
        self.bonds
            .iter()
            .enumerate()
            .filter_map(|(i, b)| {
                if b.atom_id1 == atom {
                    Some((BondId(i), b.atom_id2))
                } else if b.atom_id2 == atom {
                    Some((BondId(i), b.atom_id1))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Bond ids incident to `atom`, in insertion order. What the valence
    /// encoder actually needs from `neighbors`.
    pub fn incident_bonds(&self, atom: AtomId) -> Vec<BondId> {
        self.neighbors(atom).into_iter().map(|(b, _)| b).collect()
    }
}

fn unordered_eq(a1: AtomId, a2: AtomId, b1: AtomId, b2: AtomId) -> bool {
    (a1 == b1 && a2 == b2) || (a1 == b2 && a2 == b1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_atom_assigns_stable_ids() {
        let mut g = Graph::new();
        let a = g.add_atom(0, 0, AtomKind::C).unwrap();
        let b = g.add_atom(1, 0, AtomKind::H).unwrap();
        assert_eq!(a, AtomId(0));
        assert_eq!(b, AtomId(1));
    }

    #[test]
    fn add_bond_rejects_self_loop() {
        let mut g = Graph::new();
        let a = g.add_atom(0, 0, AtomKind::C).unwrap();
        let err = g.add_bond(0, 0, BondKind::Minus, a, a).unwrap_err();
        assert!(matches!(err, GraphError::SelfLoop(_)));
    }

    #[test]
    fn add_bond_rejects_duplicate_unordered_pair() {
        let mut g = Graph::new();
        let a = g.add_atom(0, 0, AtomKind::C).unwrap();
        let b = g.add_atom(2, 0, AtomKind::C).unwrap();
        g.add_bond(1, 0, BondKind::Minus, a, b).unwrap();
        let err = g.add_bond(1, 0, BondKind::Minus, b, a).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateBond(_, _)));
    }

    #[test]
    fn neighbors_reports_both_directions() {
        let mut g = Graph::new();
        let a = g.add_atom(0, 0, AtomKind::C).unwrap();
        let b = g.add_atom(2, 0, AtomKind::H).unwrap();
        let bond = g.add_bond(1, 0, BondKind::Minus, a, b).unwrap();
        assert_eq!(g.neighbors(a), vec![(bond, b)]);
        assert_eq!(g.neighbors(b), vec![(bond, a)]);
    }
}
