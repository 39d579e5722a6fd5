//! The generic report controller. The three warehouse reports (employee
//! sales, product line sales, product line sales by customer location)
//! share one selector → grain toggle → query → render cycle; each
//! variant supplies only its column schema, currency column set, and an
//! optional chart mapping.

use crate::error::{PinnacleError, Result};
use crate::fmt::money;
use crate::grain::TimeGrain;
use crate::models::Scalar;
use crate::present::{sizing_policy, ChartSurface, GridWidget};

/// Maps report row columns onto a chart: one line series of `value_column`
/// against a time axis built from the grain period and year columns.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub period_column: usize,
    pub year_column: usize,
    pub value_column: usize,
}

/// Static description of one report variant. `headers[grain_slot]` is a
/// placeholder filled with the active grain's label ("Month"/"Quarter") —
/// the only header cell that differs between the two modes.
#[derive(Debug)]
pub struct ReportSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub grain_slot: usize,
    pub currency_columns: &'static [usize],
    pub chart: Option<ChartSpec>,
}

pub const EMPLOYEE_SALES: ReportSpec = ReportSpec {
    key: "employee-sales",
    title: "Sales Revenue per Employee",
    headers: &["First Name", "Last Name", "Manager", "", "Year", "Revenue"],
    grain_slot: 3,
    currency_columns: &[5],
    chart: None,
};

pub const PRODUCT_LINE_SALES: ReportSpec = ReportSpec {
    key: "product-line-sales",
    title: "Sales per Product Line",
    headers: &["Product Line", "", "Year", "Quantity", "Avg Price Each", "Total Sales"],
    grain_slot: 1,
    currency_columns: &[4, 5],
    chart: Some(ChartSpec {
        period_column: 1,
        year_column: 2,
        value_column: 3,
    }),
};

pub const LOCATION_SALES: ReportSpec = ReportSpec {
    key: "location-sales",
    title: "Sales per Product Line by Location",
    headers: &["Country", "City", "Product Line", "", "Year", "Quantity", "Avg Price Each", "Total Sales"],
    grain_slot: 3,
    currency_columns: &[6, 7],
    chart: None,
};

#[derive(Debug)]
pub struct ReportController {
    spec: &'static ReportSpec,
    grain: Option<TimeGrain>,
}

impl ReportController {
    /// A fresh controller has no active grain: header rebuild and query
    /// construction fail until the caller picks one explicitly.
    pub fn new(spec: &'static ReportSpec) -> Self {
        Self { spec, grain: None }
    }

    pub fn spec(&self) -> &'static ReportSpec {
        self.spec
    }

    pub fn set_grain(&mut self, grain: TimeGrain) {
        self.grain = Some(grain);
    }

    pub fn grain(&self) -> Result<TimeGrain> {
        self.grain.ok_or(PinnacleError::GrainNotSelected)
    }

    /// Header labels for the active grain. Exactly one label differs
    /// between the monthly and quarterly sets.
    pub fn header_labels(&self) -> Result<Vec<String>> {
        let grain = self.grain()?;
        Ok(self
            .spec
            .headers
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == self.spec.grain_slot {
                    grain.header_label().to_string()
                } else {
                    (*label).to_string()
                }
            })
            .collect())
    }

    /// Clear the grid and install the headers for the active grain,
    /// then reapply column sizing. Runs no query; called on every
    /// selector or toggle change.
    pub fn rebuild_headers(&self, grid: &mut dyn GridWidget) -> Result<()> {
        let labels = self.header_labels()?;
        grid.clear();
        grid.set_header_labels(&labels);
        grid.resize_columns(&sizing_policy(labels.len()));
        Ok(())
    }

    /// The text a scalar renders as in the given column: currency for
    /// columns in the variant's currency set, plain text otherwise.
    pub fn cell_text(&self, col: usize, value: &Scalar) -> String {
        if self.spec.currency_columns.contains(&col) {
            match value.as_f64() {
                Some(v) => money(v),
                None => value.plain(),
            }
        } else {
            value.plain()
        }
    }

    /// Write a complete result set into the grid, row order preserved,
    /// then reapply column sizing.
    pub fn render(&self, rows: &[Vec<Scalar>], grid: &mut dyn GridWidget) {
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                grid.set_cell(r, c, &self.cell_text(c, value));
            }
        }
        grid.resize_columns(&sizing_policy(self.spec.headers.len()));
    }

    /// Derive the chart series for variants that carry one: time labels
    /// from the grain period and year columns, values from the value
    /// column. Rows are already ordered year-then-period, so labels come
    /// out chronological.
    pub fn chart_series(&self, rows: &[Vec<Scalar>]) -> Result<Option<(Vec<String>, Vec<f64>)>> {
        let Some(chart) = self.spec.chart else {
            return Ok(None);
        };
        let grain = self.grain()?;
        let mut labels = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            let period = row.get(chart.period_column).and_then(Scalar::as_i64).unwrap_or(0);
            let year = row.get(chart.year_column).and_then(Scalar::as_i64).unwrap_or(0);
            let value = row.get(chart.value_column).and_then(|v| v.as_f64()).unwrap_or(0.0);
            labels.push(grain.axis_label(period, year));
            values.push(value);
        }
        Ok(Some((labels, values)))
    }

    /// Render the chart series, if this variant has one, titled with the
    /// selected entity's name.
    pub fn render_chart(
        &self,
        rows: &[Vec<Scalar>],
        title: &str,
        surface: &mut dyn ChartSurface,
    ) -> Result<()> {
        if let Some((labels, values)) = self.chart_series(rows)? {
            surface.render_series(&labels, &values, title);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{ColumnSizing, SeriesBuffer, VecGrid};

    fn jane_doe_row() -> Vec<Scalar> {
        vec![
            Scalar::Text("Jane".into()),
            Scalar::Text("Doe".into()),
            Scalar::Text("Bob Smith".into()),
            Scalar::Int(2),
            Scalar::Int(2023),
            Scalar::Real(15000.0),
        ]
    }

    #[test]
    fn test_headers_differ_in_exactly_one_position() {
        for spec in [&EMPLOYEE_SALES, &PRODUCT_LINE_SALES, &LOCATION_SALES] {
            let mut monthly = ReportController::new(spec);
            monthly.set_grain(TimeGrain::Monthly);
            let mut quarterly = ReportController::new(spec);
            quarterly.set_grain(TimeGrain::Quarterly);

            let m = monthly.header_labels().unwrap();
            let q = quarterly.header_labels().unwrap();
            assert_eq!(m.len(), q.len());
            let diffs: Vec<usize> = (0..m.len()).filter(|&i| m[i] != q[i]).collect();
            assert_eq!(diffs, vec![spec.grain_slot], "spec {}", spec.key);
            assert_eq!(m[spec.grain_slot], "Month");
            assert_eq!(q[spec.grain_slot], "Quarter");
        }
    }

    #[test]
    fn test_no_grain_fails_header_rebuild() {
        let ctl = ReportController::new(&EMPLOYEE_SALES);
        let mut grid = VecGrid::default();
        let err = ctl.rebuild_headers(&mut grid).unwrap_err();
        assert!(matches!(err, PinnacleError::GrainNotSelected));
        assert!(grid.headers.is_empty());
    }

    #[test]
    fn test_rebuild_headers_is_idempotent_and_clears_cells() {
        let mut ctl = ReportController::new(&EMPLOYEE_SALES);
        ctl.set_grain(TimeGrain::Quarterly);
        let mut grid = VecGrid::default();

        ctl.rebuild_headers(&mut grid).unwrap();
        ctl.render(&[jane_doe_row()], &mut grid);
        assert!(!grid.cells.is_empty());

        let first = grid.headers.clone();
        ctl.rebuild_headers(&mut grid).unwrap();
        assert_eq!(grid.headers, first);
        assert!(grid.cells.is_empty(), "rebuild must clear rendered cells");
    }

    #[test]
    fn test_resize_policy_stretches_last_column() {
        let mut ctl = ReportController::new(&LOCATION_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        let mut grid = VecGrid::default();
        ctl.rebuild_headers(&mut grid).unwrap();
        assert_eq!(grid.last_policy.len(), 8);
        assert_eq!(grid.last_policy[7], ColumnSizing::Stretch);
        assert!(grid.last_policy[..7].iter().all(|s| *s == ColumnSizing::FitContents));
    }

    #[test]
    fn test_jane_doe_quarterly_render() {
        let mut ctl = ReportController::new(&EMPLOYEE_SALES);
        ctl.set_grain(TimeGrain::Quarterly);
        let mut grid = VecGrid::default();
        ctl.rebuild_headers(&mut grid).unwrap();
        ctl.render(&[jane_doe_row()], &mut grid);
        assert_eq!(
            grid.cells[0],
            vec!["Jane", "Doe", "Bob Smith", "2", "2023", "$15,000.00"]
        );
        // Sizing is reapplied after both the header rebuild and the render.
        assert_eq!(grid.resize_count, 2);
    }

    #[test]
    fn test_row_order_preserved() {
        let mut ctl = ReportController::new(&PRODUCT_LINE_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        let rows: Vec<Vec<Scalar>> = (0..5)
            .map(|i| {
                vec![
                    Scalar::Text("Classic Cars".into()),
                    Scalar::Int(i + 1),
                    Scalar::Int(2023),
                    Scalar::Int(10 * (i + 1)),
                    Scalar::Real(55.0),
                    Scalar::Real(550.0 * (i + 1) as f64),
                ]
            })
            .collect();
        let mut grid = VecGrid::default();
        ctl.render(&rows, &mut grid);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(grid.cells[i][1], row[1].plain());
        }
    }

    #[test]
    fn test_currency_columns_only() {
        let mut ctl = ReportController::new(&PRODUCT_LINE_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        let row = vec![
            Scalar::Text("Trains".into()),
            Scalar::Int(7),
            Scalar::Int(2024),
            Scalar::Int(120),
            Scalar::Real(1234.5),
            Scalar::Real(148140.0),
        ];
        assert_eq!(ctl.cell_text(3, &row[3]), "120");
        assert_eq!(ctl.cell_text(4, &row[4]), "$1,234.50");
        assert_eq!(ctl.cell_text(5, &row[5]), "$148,140.00");
    }

    #[test]
    fn test_chart_series_labels_follow_grain() {
        let mut ctl = ReportController::new(&PRODUCT_LINE_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        let rows = vec![
            vec![
                Scalar::Text("Ships".into()),
                Scalar::Int(3),
                Scalar::Int(2023),
                Scalar::Int(42),
                Scalar::Real(10.0),
                Scalar::Real(420.0),
            ],
            vec![
                Scalar::Text("Ships".into()),
                Scalar::Int(11),
                Scalar::Int(2023),
                Scalar::Int(9),
                Scalar::Real(10.0),
                Scalar::Real(90.0),
            ],
        ];
        let (labels, values) = ctl.chart_series(&rows).unwrap().unwrap();
        assert_eq!(labels, vec!["03/2023", "11/2023"]);
        assert_eq!(values, vec![42.0, 9.0]);

        ctl.set_grain(TimeGrain::Quarterly);
        let (labels, _) = ctl.chart_series(&rows).unwrap().unwrap();
        assert_eq!(labels[0], "Q3/2023");
    }

    #[test]
    fn test_chart_absent_for_employee_report() {
        let mut ctl = ReportController::new(&EMPLOYEE_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        assert!(ctl.chart_series(&[jane_doe_row()]).unwrap().is_none());
    }

    #[test]
    fn test_render_chart_records_series() {
        let mut ctl = ReportController::new(&PRODUCT_LINE_SALES);
        ctl.set_grain(TimeGrain::Monthly);
        let rows = vec![vec![
            Scalar::Text("Ships".into()),
            Scalar::Int(3),
            Scalar::Int(2023),
            Scalar::Int(42),
            Scalar::Real(10.0),
            Scalar::Real(420.0),
        ]];
        let mut surface = SeriesBuffer::default();
        ctl.render_chart(&rows, "Ships", &mut surface).unwrap();
        assert_eq!(surface.title, "Ships");
        assert_eq!(surface.x_labels, vec!["03/2023"]);
        assert_eq!(surface.y_values, vec![42.0]);
    }

    #[test]
    fn test_chart_requires_grain() {
        let ctl = ReportController::new(&PRODUCT_LINE_SALES);
        assert!(matches!(
            ctl.chart_series(&[]).unwrap_err(),
            PinnacleError::GrainNotSelected
        ));
    }
}
