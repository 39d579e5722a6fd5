pub mod text;
pub mod view;

use std::io::IsTerminal;

use rusqlite::Connection;

use crate::cli::ReportCommands;
use crate::controller::{ReportController, EMPLOYEE_SALES, LOCATION_SALES, PRODUCT_LINE_SALES};
use crate::error::{PinnacleError, Result};
use crate::grain::TimeGrain;
use crate::models::Scalar;
use crate::reports;

pub fn dispatch(cmd: ReportCommands) -> Result<()> {
    let args = cmd.args();

    if args.output.is_some() || args.mode.as_deref() == Some("export") {
        return crate::cli::export::dispatch(cmd);
    }

    if args.mode.as_deref() == Some("text") || !std::io::stdout().is_terminal() {
        let s = text::run(&cmd)?;
        println!("{s}");
        Ok(())
    } else {
        view::dispatch(cmd)
    }
}

/// Resolve the command's selection, run the query, and return the
/// controller (grain already set), result rows, and the selected
/// entity's display name. Shared by text, view, and export surfaces.
pub(crate) fn build_report(
    conn: &Connection,
    cmd: &ReportCommands,
) -> Result<(ReportController, Vec<Vec<Scalar>>, String)> {
    let args = cmd.args();
    let grain: TimeGrain = args.grain.parse()?;

    match cmd {
        ReportCommands::Employee { name, .. } => {
            let name = required(name, "employee (--name)")?;
            let key = reports::find_employee(conn, name)?;
            let mut ctl = ReportController::new(&EMPLOYEE_SALES);
            ctl.set_grain(grain);
            let rows = reports::employee_sales(conn, &key, grain, args.year)?;
            Ok((ctl, rows, key.display_name()))
        }
        ReportCommands::ProductLine { line, .. } => {
            let line = required(line, "product line (--line)")?;
            let line = reports::find_product_line(conn, line)?;
            let mut ctl = ReportController::new(&PRODUCT_LINE_SALES);
            ctl.set_grain(grain);
            let rows = reports::product_line_sales(conn, &line, grain, args.year)?;
            Ok((ctl, rows, line))
        }
        ReportCommands::Location { country, city, .. } => {
            let country = required(country, "country (--country)")?;
            let city = required(city, "city (--city)")?;
            let key = reports::find_location(conn, country, city)?;
            let mut ctl = ReportController::new(&LOCATION_SALES);
            ctl.set_grain(grain);
            let rows = reports::location_sales(conn, &key, grain, args.year)?;
            Ok((ctl, rows, format!("{country} / {city}")))
        }
    }
}

fn required<'a>(value: &'a Option<String>, what: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(PinnacleError::NothingSelected(what.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReportArgs;
    use crate::db::init_db;

    fn args(grain: &str) -> ReportArgs {
        ReportArgs {
            grain: grain.to_string(),
            year: None,
            mode: None,
            output: None,
        }
    }

    #[test]
    fn test_missing_selection_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let cmd = ReportCommands::Employee {
            name: None,
            args: args("monthly"),
        };
        assert!(matches!(
            build_report(&conn, &cmd).unwrap_err(),
            PinnacleError::NothingSelected(_)
        ));

        let cmd = ReportCommands::Employee {
            name: Some("   ".into()),
            args: args("monthly"),
        };
        assert!(matches!(
            build_report(&conn, &cmd).unwrap_err(),
            PinnacleError::NothingSelected(_)
        ));
    }

    #[test]
    fn test_bad_grain_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        let cmd = ReportCommands::ProductLine {
            line: Some("Trains".into()),
            args: args("weekly"),
        };
        assert!(build_report(&conn, &cmd).is_err());
    }
}
