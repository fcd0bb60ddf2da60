//! Table items.

use super::{BoundingBox, ContentRef, NodeHeader, Provenance, RefItem};
use serde::{Deserialize, Serialize};

fn one() -> u32 {
    1
}

/// A table item (`tables[i]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    /// Identity and links
    #[serde(flatten)]
    pub header: NodeHeader,

    /// Label (`table`, `document_index`, ...)
    #[serde(default)]
    pub label: String,

    /// Source locations
    #[serde(default)]
    pub prov: Vec<Provenance>,

    /// Caption text items
    #[serde(default)]
    pub captions: Vec<RefItem>,

    /// Cell data
    #[serde(default)]
    pub data: TableData,
}

impl TableNode {
    /// Create a table item from a cell grid.
    pub fn new(self_ref: ContentRef, parent: ContentRef, grid: Vec<Vec<Option<TableCell>>>) -> Self {
        Self {
            header: NodeHeader::new(self_ref, Some(parent)),
            label: "table".to_string(),
            prov: Vec::new(),
            captions: Vec::new(),
            data: TableData::from_grid(grid),
        }
    }
}

/// Table contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    /// Flat list of distinct cells
    #[serde(default)]
    pub table_cells: Vec<TableCell>,

    /// Row count
    #[serde(default)]
    pub num_rows: usize,

    /// Column count
    #[serde(default)]
    pub num_cols: usize,

    /// Row-major grid; merged cells repeat or leave gaps at the positions they cover
    #[serde(default)]
    pub grid: Vec<Vec<Option<TableCell>>>,
}

impl TableData {
    /// Build table data from a grid, deriving the dimensions.
    pub fn from_grid(grid: Vec<Vec<Option<TableCell>>>) -> Self {
        let num_rows = grid.len();
        let num_cols = grid.iter().map(Vec::len).max().unwrap_or(0);
        Self {
            table_cells: Vec::new(),
            num_rows,
            num_cols,
            grid,
        }
    }

    /// Whether the grid holds no rows.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Check if the table has merged cells.
    pub fn has_merged_cells(&self) -> bool {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .any(TableCell::is_merged)
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text
    #[serde(default)]
    pub text: String,

    /// Rows spanned; 0 marks a span-continuation placeholder
    #[serde(default = "one")]
    pub row_span: u32,

    /// Columns spanned
    #[serde(default = "one")]
    pub col_span: u32,

    /// Cell belongs to a column header
    #[serde(default)]
    pub column_header: bool,

    /// Cell belongs to a row header
    #[serde(default)]
    pub row_header: bool,

    /// Cell starts a row section
    #[serde(default)]
    pub row_section: bool,

    /// Cell location on the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// First grid row covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row_offset_idx: Option<usize>,

    /// One past the last grid row covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row_offset_idx: Option<usize>,

    /// First grid column covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_col_offset_idx: Option<usize>,

    /// One past the last grid column covered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_col_offset_idx: Option<usize>,
}

impl TableCell {
    /// Create a 1×1 cell with text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            row_span: 1,
            col_span: 1,
            column_header: false,
            row_header: false,
            row_section: false,
            bbox: None,
            start_row_offset_idx: None,
            end_row_offset_idx: None,
            start_col_offset_idx: None,
            end_col_offset_idx: None,
        }
    }

    /// Create a span-continuation placeholder.
    pub fn placeholder() -> Self {
        Self {
            row_span: 0,
            ..Self::text("")
        }
    }

    /// Set rowspan and return self.
    pub fn rowspan(mut self, span: u32) -> Self {
        self.row_span = span;
        self
    }

    /// Set colspan and return self.
    pub fn colspan(mut self, span: u32) -> Self {
        self.col_span = span;
        self
    }

    /// Mark as column header and return self.
    pub fn as_column_header(mut self) -> Self {
        self.column_header = true;
        self
    }

    /// Mark as row header and return self.
    pub fn as_row_header(mut self) -> Self {
        self.row_header = true;
        self
    }

    /// Whether this entry only marks a position covered by another cell.
    pub fn is_placeholder(&self) -> bool {
        self.row_span == 0
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_defaults() {
        let cell: TableCell = serde_json::from_str(r#"{"text": "A"}"#).unwrap();
        assert_eq!(cell.row_span, 1);
        assert_eq!(cell.col_span, 1);
        assert!(!cell.is_placeholder());
        assert!(!cell.is_merged());
    }

    #[test]
    fn test_placeholder_cell() {
        let cell = TableCell::placeholder();
        assert!(cell.is_placeholder());
        assert!(!cell.is_merged());
    }

    #[test]
    fn test_table_data_from_grid() {
        let data = TableData::from_grid(vec![
            vec![Some(TableCell::text("A").colspan(2)), None],
            vec![Some(TableCell::text("1")), Some(TableCell::text("2"))],
        ]);
        assert_eq!(data.num_rows, 2);
        assert_eq!(data.num_cols, 2);
        assert!(data.has_merged_cells());
    }

    #[test]
    fn test_grid_with_nulls_deserializes() {
        let data: TableData =
            serde_json::from_str(r#"{"num_rows":1,"num_cols":2,"grid":[[{"text":"x"},null]]}"#)
                .unwrap();
        assert!(data.grid[0][1].is_none());
    }
}
