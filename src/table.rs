/// Read-only tabular data for display.
///
/// The generation counter is bumped on every content replacement so
/// per-render state keyed to the data (expanded rows) can detect that
/// the underlying collection changed identity.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_count: usize,
    generation: u64,
}

/// Aggregate content-length figures that feed the layout selector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContentMetrics {
    pub average_content_length: f64,
    pub long_content_columns: usize,
}

/// Column indices by presentation priority. Condensed layouts always
/// show the primary group and hide the rest behind row expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroups {
    pub primary: Vec<usize>,
    pub secondary: Vec<usize>,
    pub tertiary: Vec<usize>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::empty();
        table.set_content(headers, rows);
        table
    }

    pub fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            col_count: 0,
            generation: 0,
        }
    }

    fn set_content(&mut self, headers: Vec<String>, mut rows: Vec<Vec<String>>) {
        let col_count = headers.len();
        // ragged rows are padded so every accessor can assume col_count
        for row in rows.iter_mut() {
            row.resize(col_count, String::new());
        }
        self.headers = headers;
        self.rows = rows;
        self.col_count = col_count;
    }

    /// Swap in new content. The old collection loses its identity, so
    /// the generation is bumped.
    pub fn replace(&mut self, headers: Vec<String>, rows: Vec<Vec<String>>) {
        self.set_content(headers, rows);
        self.generation += 1;
    }

    /// Adopt the content of a freshly loaded table, keeping this
    /// instance's generation history.
    pub fn replace_with(&mut self, other: Table) {
        self.headers = other.headers;
        self.rows = other.rows;
        self.col_count = other.col_count;
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn col_count(&self) -> usize {
        self.col_count
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header(&self, col: usize) -> &str {
        self.headers.get(col).map(String::as_str).unwrap_or("")
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    /// Every first-column cell, header included. This is the probe set
    /// for the content measurement pass.
    pub fn first_column_cells(&self) -> Vec<&str> {
        let mut cells = Vec::with_capacity(self.rows.len() + 1);
        if let Some(h) = self.headers.first() {
            cells.push(h.as_str());
        }
        for row in &self.rows {
            if let Some(c) = row.first() {
                cells.push(c.as_str());
            }
        }
        cells
    }

    /// Scan body cells for the aggregate length metrics. A column is
    /// long-content if any of its cells exceeds `long_threshold` chars.
    pub fn content_metrics(&self, long_threshold: usize) -> ContentMetrics {
        let mut total_len = 0usize;
        let mut cell_count = 0usize;
        let mut long_columns = vec![false; self.col_count];

        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                total_len += len;
                cell_count += 1;
                if len > long_threshold {
                    long_columns[col] = true;
                }
            }
        }

        ContentMetrics {
            average_content_length: total_len as f64 / cell_count.max(1) as f64,
            long_content_columns: long_columns.iter().filter(|l| **l).count(),
        }
    }

    /// Split columns into priority groups: the leading pair is primary,
    /// the rest divides evenly into secondary and tertiary.
    pub fn column_groups(&self) -> ColumnGroups {
        let primary_len = self.col_count.min(2);
        let primary: Vec<usize> = (0..primary_len).collect();

        let rest: Vec<usize> = (primary_len..self.col_count).collect();
        let mid = (rest.len() + 1) / 2;
        let secondary = rest[..mid].to_vec();
        let tertiary = rest[mid..].to_vec();

        ColumnGroups {
            primary,
            secondary,
            tertiary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Table {
        Table::new(
            headers.into_iter().map(|s| s.to_string()).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn ragged_rows_are_padded() {
        let t = make_table(vec!["a", "b", "c"], vec![vec!["1"]]);
        assert_eq!(t.cell(0, 1), Some(""));
        assert_eq!(t.cell(0, 2), Some(""));
        assert_eq!(t.cell(0, 3), None);
    }

    #[test]
    fn replace_bumps_generation() {
        let mut t = make_table(vec!["a"], vec![vec!["1"]]);
        assert_eq!(t.generation(), 0);
        t.replace(vec!["x".to_string()], vec![vec!["2".to_string()]]);
        assert_eq!(t.generation(), 1);
        assert_eq!(t.cell(0, 0), Some("2"));
    }

    #[test]
    fn first_column_cells_include_header() {
        let t = make_table(vec!["Name", "Qty"], vec![vec!["alpha", "1"], vec!["beta", "2"]]);
        assert_eq!(t.first_column_cells(), vec!["Name", "alpha", "beta"]);
    }

    #[test]
    fn content_metrics_average_and_long_columns() {
        let long = "x".repeat(60);
        let t = make_table(
            vec!["a", "b"],
            vec![vec!["12", long.as_str()], vec!["34", "ok"]],
        );
        let m = t.content_metrics(50);
        // lengths 2, 60, 2, 2 -> average 16.5
        assert_eq!(m.average_content_length, 16.5);
        assert_eq!(m.long_content_columns, 1);
    }

    #[test]
    fn content_metrics_empty_table() {
        let t = Table::empty();
        let m = t.content_metrics(50);
        assert_eq!(m.average_content_length, 0.0);
        assert_eq!(m.long_content_columns, 0);
    }

    #[test]
    fn column_groups_split() {
        let t = make_table(vec!["a", "b", "c", "d", "e", "f", "g"], vec![]);
        let g = t.column_groups();
        assert_eq!(g.primary, vec![0, 1]);
        assert_eq!(g.secondary, vec![2, 3, 4]);
        assert_eq!(g.tertiary, vec![5, 6]);
    }

    #[test]
    fn column_groups_narrow_table() {
        let t = make_table(vec!["only"], vec![]);
        let g = t.column_groups();
        assert_eq!(g.primary, vec![0]);
        assert!(g.secondary.is_empty());
        assert!(g.tertiary.is_empty());
    }
}
