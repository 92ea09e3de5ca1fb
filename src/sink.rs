//! Renders a `Graph`'s final labeling back into the ASCII puzzle-text
//! format, over the bounding rectangle of the atom grid.
//!
//! A direct rework of `print_file()` in the original C generator: unlike the
//! reference implementation's per-cell O(atoms + bonds) scan, this builds an
//! index once and looks cells up in it.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use crate::graph::Graph;

enum Cell {
    Atom(char),
    Bond(char),
}

/// Writes `graph`'s atoms and bonds onto a character grid sized to their
/// bounding rectangle, one row per line, space for empty cells.
pub fn write_puzzle<W: Write>(w: &mut W, graph: &Graph) -> io::Result<()> {
    if graph.atom_count() == 0 {
        return Ok(());
    }

    let mut cells: HashMap<(i32, i32), Cell> = HashMap::new();
    let mut min_x = i32::MAX;
    let mut max_x = i32::MIN;
    let mut min_y = i32::MAX;
    let mut max_y = i32::MIN;

    for (_, atom) in graph.atoms() {
        min_x = min_x.min(atom.x);
        max_x = max_x.max(atom.x);
        min_y = min_y.min(atom.y);
        max_y = max_y.max(atom.y);
        cells.insert((atom.x, atom.y), Cell::Atom(atom.kind.glyph()));
    }
    for (_, bond) in graph.bonds() {
        min_x = min_x.min(bond.x);
        max_x = max_x.max(bond.x);
        min_y = min_y.min(bond.y);
        max_y = max_y.max(bond.y);
        cells.insert((bond.x, bond.y), Cell::Bond(bond.kind.glyph()));
    }

    for y in min_y..=max_y {
        let mut line = String::with_capacity((max_x - min_x + 1).max(0) as usize);
        for x in min_x..=max_x {
            let ch = match cells.get(&(x, y)) {
                Some(Cell::Atom(c)) | Some(Cell::Bond(c)) => *c,
                None => ' ',
            };
            line.push(ch);
        }
        writeln!(w, "{line}")?;
    }
    Ok(())
}

/// Writes `graph` to `path`, creating or truncating it.
pub fn write_puzzle_file(path: &Path, graph: &Graph) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut w = io::BufWriter::new(file);
    write_puzzle(&mut w, graph)?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AtomKind, BondKind};

    #[test]
    fn renders_a_simple_bonded_pair() {
        let mut g = Graph::new();
        let a = g.add_atom(0, 0, AtomKind::C).unwrap();
        let b = g.add_atom(2, 0, AtomKind::C).unwrap();
        g.add_bond(1, 0, BondKind::Minus, a, b).unwrap();

        let mut out = Vec::new();
        write_puzzle(&mut out, &g).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "C-C\n");
    }

    #[test]
    fn empty_graph_writes_nothing() {
        let g = Graph::new();
        let mut out = Vec::new();
        write_puzzle(&mut out, &g).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn round_trips_through_the_template_parser() {
        let mut g = Graph::new();
        let a = g.add_atom(0, 0, AtomKind::H).unwrap();
        let b = g.add_atom(2, 0, AtomKind::C).unwrap();
        let c = g.add_atom(4, 0, AtomKind::H).unwrap();
        g.add_bond(1, 0, BondKind::Minus, a, b).unwrap();
        g.add_bond(3, 0, BondKind::Minus, b, c).unwrap();

        let mut out = Vec::new();
        write_puzzle(&mut out, &g).unwrap();
        let text = String::from_utf8(out).unwrap();

        let reparsed = crate::template::parse(&text).unwrap();
        assert_eq!(reparsed.atom_count(), 3);
        assert_eq!(reparsed.bond_count(), 2);
    }
}
