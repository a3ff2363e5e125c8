/// A plain-text table for terminal output
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
    max_cell_width: usize,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: &[&str]) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            col_widths,
            max_cell_width: 24,
        }
    }

    /// Cells longer than `width` characters are shortened with an ellipsis
    pub fn with_max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = width.max(4);
        self
    }

    /// Add a row; extra cells beyond the header count are dropped
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let cells: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|s| shorten(s.as_ref(), self.max_cell_width))
            .collect();

        for (i, cell) in cells.iter().enumerate() {
            self.col_widths[i] = self.col_widths[i].max(cell.chars().count());
        }

        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as lines separated by '\n'
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let cells: Vec<String> = self
            .col_widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", cell, width = width)
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max - 1).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["ID", "Type", "Score"]);
        table.add_row(&["1", "bank", "30"]);
        table.add_row(&["22", "vehicle", "80"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "ID | Type    | Score");
        assert_eq!(lines[1], "---+---------+------");
        assert_eq!(lines[3], "22 | vehicle | 80");
    }

    #[test]
    fn test_long_cells_are_shortened() {
        let mut table = Table::new(&["Hash"]).with_max_cell_width(8);
        table.add_row(&["0x1234567890abcdef"]);
        let rendered = table.render();
        assert!(rendered.contains("0x12345…"));
        assert!(!rendered.contains("abcdef"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(&["x"]);
        assert!(!table.is_empty());
        assert!(table.render().lines().nth(2).unwrap().starts_with("x"));
    }
}
