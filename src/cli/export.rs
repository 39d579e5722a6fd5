use std::path::PathBuf;

use crate::cli::ReportCommands;
use crate::db::get_connection;
use crate::error::Result;
use crate::present::VecGrid;
use crate::settings::{db_path, get_data_dir};

fn default_path(key: &str) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir().join("exports").join(format!("{key}-{date}.csv"))
}

/// Run a report and write the rendered grid (headers plus formatted
/// cells, currency columns included) to a CSV file.
pub fn dispatch(cmd: ReportCommands) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let (ctl, rows, subject) = crate::cli::report::build_report(&conn, &cmd)?;

    let mut grid = VecGrid::default();
    ctl.rebuild_headers(&mut grid)?;
    ctl.render(&rows, &mut grid);

    let path = cmd
        .args()
        .output
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(ctl.spec().key));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(&grid.headers)?;
    for row in &grid.cells {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!("Wrote {} — {} ({} rows)", path.display(), subject, grid.cells.len());
    Ok(())
}
