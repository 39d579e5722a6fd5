//! Presentation collaborator seams. The report controller drives these
//! traits; concrete surfaces are the comfy-table text grid, the CSV
//! export grid, and the ratatui dialog view.

/// Opaque selector key: whatever columns the lookup row carried
/// (first/last name, product line name, country/city).
pub type SelectorKey = Vec<String>;

pub trait SelectorWidget {
    fn clear(&mut self);
    fn add_entry(&mut self, label: &str, key: SelectorKey);
    fn current_key(&self) -> Option<&SelectorKey>;
}

/// Per-column width policy: every column but the last fits its content,
/// the last stretches to fill the remaining width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSizing {
    FitContents,
    Stretch,
}

pub fn sizing_policy(columns: usize) -> Vec<ColumnSizing> {
    let mut policy = vec![ColumnSizing::FitContents; columns.saturating_sub(1)];
    if columns > 0 {
        policy.push(ColumnSizing::Stretch);
    }
    policy
}

pub trait GridWidget {
    fn clear(&mut self);
    fn set_header_labels(&mut self, labels: &[String]);
    fn set_cell(&mut self, row: usize, col: usize, text: &str);
    fn resize_columns(&mut self, policy: &[ColumnSizing]);
}

pub trait ChartSurface {
    fn render_series(&mut self, x_labels: &[String], y_values: &[f64], title: &str);
}

// ---------------------------------------------------------------------------
// In-memory implementations
// ---------------------------------------------------------------------------

/// Selector backed by a plain Vec. The TUI dialog renders it as a list;
/// tests inspect it directly.
#[derive(Debug, Default)]
pub struct VecSelector {
    pub entries: Vec<(String, SelectorKey)>,
    pub selected: Option<usize>,
}

impl VecSelector {
    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = Some(index);
        }
    }

    pub fn current_label(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.entries.get(i))
            .map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SelectorWidget for VecSelector {
    fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    fn add_entry(&mut self, label: &str, key: SelectorKey) {
        self.entries.push((label.to_string(), key));
        // First entry becomes the current one, matching combo-box behavior.
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    fn current_key(&self) -> Option<&SelectorKey> {
        self.selected.and_then(|i| self.entries.get(i)).map(|(_, key)| key)
    }
}

/// Chart surface that records the rendered series; the TUI draws the
/// recorded data on the next frame.
#[derive(Debug, Default)]
pub struct SeriesBuffer {
    pub x_labels: Vec<String>,
    pub y_values: Vec<f64>,
    pub title: String,
}

impl ChartSurface for SeriesBuffer {
    fn render_series(&mut self, x_labels: &[String], y_values: &[f64], title: &str) {
        self.x_labels = x_labels.to_vec();
        self.y_values = y_values.to_vec();
        self.title = title.to_string();
    }
}

/// Grid backed by string cells. Serves as the render target for CSV
/// export and the TUI table, and as the recording fake in tests.
#[derive(Debug, Default)]
pub struct VecGrid {
    pub headers: Vec<String>,
    pub cells: Vec<Vec<String>>,
    pub last_policy: Vec<ColumnSizing>,
    pub resize_count: usize,
}

impl GridWidget for VecGrid {
    fn clear(&mut self) {
        self.headers.clear();
        self.cells.clear();
    }

    fn set_header_labels(&mut self, labels: &[String]) {
        self.headers = labels.to_vec();
    }

    fn set_cell(&mut self, row: usize, col: usize, text: &str) {
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = text.to_string();
    }

    fn resize_columns(&mut self, policy: &[ColumnSizing]) {
        self.last_policy = policy.to_vec();
        self.resize_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizing_policy_last_column_stretches() {
        let policy = sizing_policy(6);
        assert_eq!(policy.len(), 6);
        assert!(policy[..5].iter().all(|s| *s == ColumnSizing::FitContents));
        assert_eq!(policy[5], ColumnSizing::Stretch);
        assert!(sizing_policy(0).is_empty());
        assert_eq!(sizing_policy(1), vec![ColumnSizing::Stretch]);
    }

    #[test]
    fn test_vec_grid_places_cells() {
        let mut grid = VecGrid::default();
        grid.set_cell(1, 2, "x");
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.cells[1][2], "x");
        assert_eq!(grid.cells[1][0], "");
    }

    #[test]
    fn test_vec_selector_tracks_selection() {
        let mut sel = VecSelector::default();
        sel.add_entry("Jane Doe", vec!["Jane".into(), "Doe".into()]);
        sel.add_entry("Bob Smith", vec!["Bob".into(), "Smith".into()]);
        assert_eq!(sel.current_label(), Some("Jane Doe"));
        sel.select(1);
        assert_eq!(sel.current_key().unwrap()[0], "Bob");
        sel.clear();
        assert!(sel.current_key().is_none());
    }
}
