use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use crate::cli::ReportCommands;
use crate::db::get_connection;
use crate::error::Result;
use crate::present::VecGrid;
use crate::settings::{db_path, load_settings};

/// Render a report command as a plain-text table for stdout.
pub fn run(cmd: &ReportCommands) -> Result<String> {
    let conn = get_connection(&db_path())?;
    let company = load_settings().company_name;

    let (ctl, rows, subject) = super::build_report(&conn, cmd)?;
    let mut grid = VecGrid::default();
    ctl.rebuild_headers(&mut grid)?;
    ctl.render(&rows, &mut grid);

    let title = format!("{} — {}", ctl.spec().title, subject);
    Ok(format_grid(&company, &title, &grid, rows.len()))
}

/// Grid → comfy-table string with a colored title line.
pub fn format_grid(company: &str, title: &str, grid: &VecGrid, row_count: usize) -> String {
    let mut out = String::new();
    if !company.is_empty() {
        out.push_str(&format!("{company}\n"));
    }
    out.push_str(&format!("{}\n", title.bold()));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(grid.headers.clone());
    for row in &grid.cells {
        table.add_row(row.clone());
    }
    out.push_str(&format!("{table}\n"));
    out.push_str(&format!("{} row(s)\n", row_count));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ReportController, PRODUCT_LINE_SALES};
    use crate::grain::TimeGrain;
    use crate::models::Scalar;

    #[test]
    fn test_format_grid_includes_headers_and_currency() {
        let mut ctl = ReportController::new(&PRODUCT_LINE_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        let rows = vec![vec![
            Scalar::Text("Trains".into()),
            Scalar::Int(4),
            Scalar::Int(2023),
            Scalar::Int(12),
            Scalar::Real(99.95),
            Scalar::Real(1199.4),
        ]];
        let mut grid = VecGrid::default();
        ctl.rebuild_headers(&mut grid).unwrap();
        ctl.render(&rows, &mut grid);

        let s = format_grid("", "Sales per Product Line — Trains", &grid, 1);
        assert!(s.contains("Month"));
        assert!(s.contains("$1,199.40"));
        assert!(s.contains("1 row(s)"));
    }
}
