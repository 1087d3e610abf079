//! Text views of the search for the command line.

use std::collections::HashSet;
use std::fmt::Write as _;

use tessel_core::{Cell, Grid, Point, Range};
use tessel_paths::DistanceField;

use crate::classify::Classification;
use crate::tiles::{DiffGrid, TileGrid, TileSet};

const UNREACHED: &str = ".";

/// Distances of one tile, right-aligned in columns. Unreached cells show
/// as `.`.
pub fn render_tile(tile: &TileGrid) -> String {
    let size = tile.size();
    render_cells(size, |p| {
        tile.is_reached(p).then(|| tile.get(p).to_string())
    })
}

/// Differences of a tile pair; cells without a value show as `.`.
pub fn render_diff(diff: &DiffGrid) -> String {
    render_cells(diff.size(), |p| diff.get(p).map(|d| d.to_string()))
}

/// The whole window as a map: `#` for rocks, `O` for `highlight`ed cells
/// and `.` for other plots.
pub fn render_window(field: &DistanceField, grid: &Grid, highlight: &[Point]) -> String {
    let marked: HashSet<Point> = highlight.iter().copied().collect();
    let window = field.window();
    let mut out = String::with_capacity(window.len() + window.height() as usize);
    for y in window.min.y..window.max.y {
        if y > window.min.y {
            out.push('\n');
        }
        for x in window.min.x..window.max.x {
            let p = Point::new(x, y);
            out.push(match grid.cell(p) {
                Cell::Blocked => Cell::BLOCKED_CHAR,
                Cell::Passable if marked.contains(&p) => 'O',
                Cell::Passable => Cell::PASSABLE_CHAR,
            });
        }
    }
    out
}

/// Every tile of the set, laid out the way the tiles sit in the plane.
pub fn render_tile_set(tiles: &TileSet) -> String {
    let e = tiles.extra();
    let rows: Vec<String> = (-e..=e)
        .map(|ty| {
            let row: Vec<String> = (-e..=e)
                .map(|tx| {
                    let idx = Point::new(tx, ty);
                    match tiles.get(idx) {
                        Some(t) => format!("{idx}\n{}", render_tile(t)),
                        None => idx.to_string(),
                    }
                })
                .collect();
            join_sections(&row, 3)
        })
        .collect();
    rows.join("\n\n")
}

/// The outermost diffs of every side of a classified window.
pub fn render_edges(classification: &Classification) -> String {
    let mut out = String::new();
    for edge in &classification.edge_diffs {
        let Some(layer) = edge.layers.first() else {
            continue;
        };
        let sections: Vec<String> = layer
            .iter()
            .enumerate()
            .map(|(lane, d)| format!("{}\n{}", edge.outer(0, lane), render_diff(d)))
            .collect();
        let _ = writeln!(out, "{}:", edge.direction);
        out.push_str(&join_sections(&sections, 3));
        out.push_str("\n\n");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Place multi-line blocks side by side, `gap` spaces apart. Shorter
/// blocks are padded with blank lines.
pub fn join_sections(sections: &[String], gap: usize) -> String {
    let blocks: Vec<Vec<&str>> = sections.iter().map(|s| s.lines().collect()).collect();
    let widths: Vec<usize> = blocks
        .iter()
        .map(|b| b.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let mut line = String::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(gap));
            }
            let text = block.get(row).copied().unwrap_or("");
            let _ = write!(line, "{text:<width$}", width = widths[i]);
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn render_cells(size: Point, value: impl Fn(Point) -> Option<String>) -> String {
    let bounds = Range::new(0, 0, size.x, size.y);
    let cells: Vec<Option<String>> = bounds.iter().map(value).collect();
    let width = cells
        .iter()
        .flatten()
        .map(String::len)
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for (i, cell) in cells.iter().enumerate() {
        let x = i % size.x.max(1) as usize;
        if x == 0 && i > 0 {
            out.push('\n');
        } else if x > 0 {
            out.push(' ');
        }
        let text = cell.as_deref().unwrap_or(UNREACHED);
        let _ = write!(out, "{text:>width$}");
    }
    out
}
