//! Parses the ASCII puzzle-template format into a `Graph`.
//!
//! A direct rework of `parse()` in the original C generator
//! (`examples/original_source/main.c`): a first pass places atoms and records
//! each bond glyph's grid coordinate, then a second pass resolves each bond's
//! two endpoint coordinates (per glyph: `-` looks left/right, `/` looks
//! down-left/up-right, `\` looks up-left/down-right) into atom ids.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::TemplateError;
use crate::graph::{AtomKind, BondKind, Graph};

struct PendingBond {
    x: i32,
    y: i32,
    kind: BondKind,
}

/// Parses `text` into a `Graph`. Atom coordinates match the character's
/// column/row; a bond's two endpoints are read off the grid positions its
/// glyph implies, exactly as the reference parser does.
pub fn parse(text: &str) -> Result<Graph, TemplateError> {
    let mut graph = Graph::new();
    let mut atom_at: HashMap<(i32, i32), crate::graph::AtomId> = HashMap::new();
    let mut pending_bonds = Vec::new();

    let mut x: i32 = 0;
    let mut y: i32 = 0;
    for (row, line) in text.split('\n').enumerate() {
        x = 0;
        if row > 0 {
            y += 1;
        }
        for ch in line.chars() {
            match ch {
                ' ' => {}
                'X' => {
                    let id = graph.add_atom(x, y, AtomKind::Unspecified)?;
                    atom_at.insert((x, y), id);
                }
                'H' => {
                    let id = graph.add_atom(x, y, AtomKind::H)?;
                    atom_at.insert((x, y), id);
                }
                'O' => {
                    let id = graph.add_atom(x, y, AtomKind::O)?;
                    atom_at.insert((x, y), id);
                }
                'N' => {
                    let id = graph.add_atom(x, y, AtomKind::N)?;
                    atom_at.insert((x, y), id);
                }
                'C' => {
                    let id = graph.add_atom(x, y, AtomKind::C)?;
                    atom_at.insert((x, y), id);
                }
                '-' => pending_bonds.push(PendingBond { x, y, kind: BondKind::Minus }),
                '/' => pending_bonds.push(PendingBond { x, y, kind: BondKind::Slash }),
                '\\' => pending_bonds.push(PendingBond { x, y, kind: BondKind::Backslash }),
                other => {
                    return Err(TemplateError::UnknownCharacter {
                        ch: other,
                        row,
                        col: x as usize,
                    });
                }
            }
            x += 1;
        }
    }

    for pending in pending_bonds {
        let (p1, p2) = match pending.kind {
            BondKind::Minus => ((pending.x - 1, pending.y), (pending.x + 1, pending.y)),
            BondKind::Slash => ((pending.x - 1, pending.y + 1), (pending.x + 1, pending.y - 1)),
            BondKind::Backslash => ((pending.x - 1, pending.y - 1), (pending.x + 1, pending.y + 1)),
        };
        let a1 = *atom_at.get(&p1).ok_or(TemplateError::DanglingBond {
            row: pending.y as usize,
            col: pending.x as usize,
        })?;
        let a2 = *atom_at.get(&p2).ok_or(TemplateError::DanglingBond {
            row: pending.y as usize,
            col: pending.x as usize,
        })?;
        graph.add_bond(pending.x, pending.y, pending.kind, a1, a2)?;
    }

    Ok(graph)
}

/// Reads `path` and parses it, wrapping an I/O failure as
/// `TemplateError::NotFound` (the CLI's "Template-not-found" policy).
pub fn load(path: &Path) -> Result<Graph, TemplateError> {
    let text = fs::read_to_string(path).map_err(|source| TemplateError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}
