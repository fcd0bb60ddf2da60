//! Table grid resolution.
//!
//! Producers write merged cells into every grid position they cover, or mark
//! the covered positions with `row_span == 0` placeholders. Resolution turns
//! such a grid into one anchored cell per visual rectangle so it can be drawn
//! with row and column spans.

use std::collections::HashSet;

use serde::Serialize;

use crate::model::TableCell;

/// A cell placed at its anchor position with its spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCell {
    /// Cell text
    pub text: String,
    /// Rows spanned (at least 1)
    pub row_span: u32,
    /// Columns spanned (at least 1)
    pub col_span: u32,
    /// Cell belongs to a column header
    pub column_header: bool,
    /// Cell belongs to a row header
    pub row_header: bool,
    /// Anchor row in the source grid
    pub row: usize,
    /// Anchor column in the source grid
    pub col: usize,
}

impl ResolvedCell {
    fn anchored(cell: &TableCell, row: usize, col: usize) -> Self {
        Self {
            text: cell.text.clone(),
            row_span: cell.row_span.max(1),
            col_span: cell.col_span.max(1),
            column_header: cell.column_header,
            row_header: cell.row_header,
            row,
            col,
        }
    }

    /// Limit the spans so the cell stays inside a grid of `rows` x `cols`
    /// positions counted from its anchor.
    fn clamped(mut self, rows: usize, cols: usize) -> Self {
        let limit = |span: u32, room: usize| {
            span.min(u32::try_from(room).unwrap_or(u32::MAX)).max(1)
        };
        self.row_span = limit(self.row_span, rows.saturating_sub(self.row));
        self.col_span = limit(self.col_span, cols.saturating_sub(self.col));
        self
    }

    /// Whether the cell covers more than one grid position.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    /// Grid positions covered by this cell.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.row..self.row + self.row_span as usize)
            .flat_map(move |r| (self.col..self.col + self.col_span as usize).map(move |c| (r, c)))
    }
}

/// A table ready for display: one header row and the body rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedTable {
    /// Header cells (first grid row)
    pub header: Vec<ResolvedCell>,
    /// Body rows; a row may be empty when every position is covered from above
    pub rows: Vec<Vec<ResolvedCell>>,
}

impl ResolvedTable {
    /// Whether the table has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.iter().all(Vec::is_empty)
    }

    /// Whether any cell spans several positions.
    pub fn has_merged_cells(&self) -> bool {
        self.header
            .iter()
            .chain(self.rows.iter().flatten())
            .any(ResolvedCell::is_merged)
    }

    /// Widest row, counted in grid columns.
    pub fn column_count(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter().flatten())
            .map(|c| c.col + c.col_span as usize)
            .max()
            .unwrap_or(0)
    }
}

/// Resolve the header row.
///
/// Empty cells and placeholders are dropped. A cell that repeats the text of
/// its left neighbour is dropped when both have `row_span == 1`; that is how
/// horizontally merged headers show up in the grid.
pub fn resolve_header(row: &[Option<TableCell>]) -> Vec<ResolvedCell> {
    let mut header = Vec::new();

    for (col, cell) in row.iter().enumerate() {
        let Some(cell) = cell else {
            continue;
        };
        if cell.is_placeholder() || cell.text.is_empty() {
            continue;
        }

        let repeats_left = col > 0
            && cell.row_span == 1
            && row[col - 1]
                .as_ref()
                .is_some_and(|prev| prev.row_span == 1 && prev.text == cell.text);
        if repeats_left {
            continue;
        }

        header.push(ResolvedCell::anchored(cell, 0, col).clamped(usize::MAX, row.len()));
    }

    header
}

fn resolve_rows(rows: &[Vec<Option<TableCell>>], first_row: usize) -> Vec<Vec<ResolvedCell>> {
    let mut covered: HashSet<(usize, usize)> = HashSet::new();
    let mut resolved = Vec::with_capacity(rows.len());

    for (r, row) in rows.iter().enumerate() {
        let mut cells = Vec::new();

        for (c, cell) in row.iter().enumerate() {
            if covered.contains(&(r, c)) {
                continue;
            }
            let Some(cell) = cell else {
                continue;
            };
            if cell.is_placeholder() {
                continue;
            }

            let anchored = ResolvedCell::anchored(cell, r, c).clamped(rows.len(), row.len());
            covered.extend(anchored.positions());
            cells.push(ResolvedCell {
                row: first_row + r,
                ..anchored
            });
        }

        resolved.push(cells);
    }

    resolved
}

/// Resolve body rows.
///
/// Each cell is emitted once, at the first position it covers, and every
/// position inside its span rectangle is skipped afterwards. Anchor rows are
/// relative to the first row passed in.
pub fn resolve_body(rows: &[Vec<Option<TableCell>>]) -> Vec<Vec<ResolvedCell>> {
    resolve_rows(rows, 0)
}

/// Resolve a whole grid: the first row becomes the header.
pub fn resolve_table(grid: &[Vec<Option<TableCell>>]) -> ResolvedTable {
    match grid.split_first() {
        Some((header, body)) => ResolvedTable {
            header: resolve_header(header)
                .into_iter()
                .map(|cell| cell.clamped(grid.len(), usize::MAX))
                .collect(),
            rows: resolve_rows(body, 1),
        },
        None => ResolvedTable::default(),
    }
}
