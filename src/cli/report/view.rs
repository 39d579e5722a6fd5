//! Interactive report dialog: a selector pane, a monthly/quarterly
//! toggle, a query action, and a result table — plus a line chart for
//! the product-line report. Selector and toggle changes rebuild the
//! table headers only; data is fetched when the user presses Enter.

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
    Row, Table,
};
use ratatui::Frame;

use rusqlite::Connection;

use crate::cli::ReportCommands;
use crate::controller::{ReportController, EMPLOYEE_SALES, LOCATION_SALES, PRODUCT_LINE_SALES};
use crate::db::get_connection;
use crate::error::{PinnacleError, Result};
use crate::fmt::number;
use crate::grain::TimeGrain;
use crate::models::{EmployeeKey, LocationKey};
use crate::present::{ColumnSizing, SelectorWidget, SeriesBuffer, VecGrid, VecSelector};
use crate::reports;
use crate::settings::db_path;
use crate::tui::{
    run_report_view, wrap_text, ReportView, ReportViewAction, CURRENCY_STYLE, ERROR_STYLE,
    FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE,
};

pub fn dispatch(cmd: ReportCommands) -> Result<()> {
    let mut dialog = ReportDialog::from_command(&cmd)?;
    run_report_view(&mut dialog)
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum ReportKind {
    Employee,
    ProductLine,
    Location,
}

impl ReportKind {
    fn selector_title(self) -> &'static str {
        match self {
            ReportKind::Employee => "Employees",
            ReportKind::ProductLine => "Product Lines",
            ReportKind::Location => "Countries",
        }
    }
}

pub(crate) struct ReportDialog {
    conn: Connection,
    kind: ReportKind,
    controller: ReportController,
    selector: VecSelector,
    /// Location report only: cities for the selected country.
    city_selector: VecSelector,
    focus_city: bool,
    grid: VecGrid,
    chart: Option<SeriesBuffer>,
    status: String,
    year: Option<i32>,
    offset: usize,
    visible_rows: usize,
}

impl ReportDialog {
    pub(crate) fn from_command(cmd: &ReportCommands) -> Result<Self> {
        let args = cmd.args();
        let grain: TimeGrain = args.grain.parse()?;
        let (kind, spec, preselect) = match cmd {
            ReportCommands::Employee { name, .. } => {
                (ReportKind::Employee, &EMPLOYEE_SALES, name.clone())
            }
            ReportCommands::ProductLine { line, .. } => {
                (ReportKind::ProductLine, &PRODUCT_LINE_SALES, line.clone())
            }
            ReportCommands::Location { country, .. } => {
                (ReportKind::Location, &LOCATION_SALES, country.clone())
            }
        };

        let conn = get_connection(&db_path())?;
        let mut controller = ReportController::new(spec);
        // The dialog opens with an explicit initial toggle (the CLI's
        // --grain value); the controller itself never defaults.
        controller.set_grain(grain);

        let mut dialog = Self {
            conn,
            kind,
            controller,
            selector: VecSelector::default(),
            city_selector: VecSelector::default(),
            focus_city: false,
            grid: VecGrid::default(),
            chart: None,
            status: "Press Enter to run the query".to_string(),
            year: args.year,
            offset: 0,
            visible_rows: 0,
        };
        dialog.populate_selectors()?;
        if let Some(label) = preselect {
            dialog.preselect(&label);
        }
        if let ReportCommands::Location { city: Some(city), .. } = cmd {
            dialog.populate_cities()?;
            let index = dialog
                .city_selector
                .entries
                .iter()
                .position(|(label, _)| label == city);
            if let Some(i) = index {
                dialog.city_selector.select(i);
            }
        }
        dialog.rebuild_headers();
        Ok(dialog)
    }

    /// One lookup query per selector, entries in query row order.
    fn populate_selectors(&mut self) -> Result<()> {
        self.selector.clear();
        match self.kind {
            ReportKind::Employee => {
                for e in reports::list_employees(&self.conn)? {
                    self.selector.add_entry(
                        &e.display_name(),
                        vec![e.first_name.clone(), e.last_name.clone()],
                    );
                }
            }
            ReportKind::ProductLine => {
                for line in reports::list_product_lines(&self.conn)? {
                    self.selector.add_entry(&line, vec![line.clone()]);
                }
            }
            ReportKind::Location => {
                for country in reports::list_countries(&self.conn)? {
                    self.selector.add_entry(&country, vec![country.clone()]);
                }
                self.populate_cities()?;
            }
        }
        Ok(())
    }

    /// The city menu depends on the selected country.
    fn populate_cities(&mut self) -> Result<()> {
        self.city_selector.clear();
        if let Some(key) = self.selector.current_key() {
            let country = key[0].clone();
            for city in reports::list_cities(&self.conn, &country)? {
                self.city_selector.add_entry(&city, vec![city.clone()]);
            }
        }
        Ok(())
    }

    fn preselect(&mut self, label: &str) {
        if let Some(i) = self.selector.entries.iter().position(|(l, _)| l == label) {
            self.selector.select(i);
        }
    }

    /// Selector or toggle changed: reset headers only, no query.
    fn rebuild_headers(&mut self) {
        self.chart = None;
        self.offset = 0;
        if let Err(e) = self.controller.rebuild_headers(&mut self.grid) {
            self.status = format!("Error: {e}");
        }
    }

    fn set_grain(&mut self, grain: TimeGrain) {
        self.controller.set_grain(grain);
        self.rebuild_headers();
    }

    fn move_selection(&mut self, delta: i64) {
        let (selector, dependent) = if self.focus_city {
            (&mut self.city_selector, false)
        } else {
            (&mut self.selector, self.kind == ReportKind::Location)
        };
        if selector.is_empty() {
            return;
        }
        let current = selector.selected.unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, selector.len() as i64 - 1) as usize;
        selector.select(next);
        if dependent {
            if let Err(e) = self.populate_cities() {
                self.status = format!("Error: {e}");
            }
        }
        self.rebuild_headers();
    }

    /// Explicit query action: read the current selector key(s) and the
    /// active grain, execute, render the complete result set.
    fn run_query(&mut self) -> Result<()> {
        let grain = self.controller.grain()?;
        let (rows, subject) = match self.kind {
            ReportKind::Employee => {
                let key = self
                    .selector
                    .current_key()
                    .ok_or_else(|| PinnacleError::NothingSelected("employee".into()))?;
                let key = EmployeeKey {
                    first_name: key[0].clone(),
                    last_name: key[1].clone(),
                };
                let rows = reports::employee_sales(&self.conn, &key, grain, self.year)?;
                (rows, key.display_name())
            }
            ReportKind::ProductLine => {
                let line = self
                    .selector
                    .current_label()
                    .ok_or_else(|| PinnacleError::NothingSelected("product line".into()))?
                    .to_string();
                let rows = reports::product_line_sales(&self.conn, &line, grain, self.year)?;
                (rows, line)
            }
            ReportKind::Location => {
                let country = self
                    .selector
                    .current_key()
                    .ok_or_else(|| PinnacleError::NothingSelected("country".into()))?[0]
                    .clone();
                let city = self
                    .city_selector
                    .current_key()
                    .ok_or_else(|| PinnacleError::NothingSelected("city".into()))?[0]
                    .clone();
                let key = LocationKey { country: country.clone(), city: city.clone() };
                let rows = reports::location_sales(&self.conn, &key, grain, self.year)?;
                (rows, format!("{country} / {city}"))
            }
        };

        self.controller.rebuild_headers(&mut self.grid)?;
        self.controller.render(&rows, &mut self.grid);
        self.chart = if self.controller.spec().chart.is_some() {
            let mut series = SeriesBuffer::default();
            self.controller.render_chart(&rows, &subject, &mut series)?;
            Some(series)
        } else {
            None
        };
        self.offset = 0;
        self.status = format!("{} row(s)", rows.len());
        Ok(())
    }

    fn grain_line(&self) -> Line<'static> {
        let (m_style, q_style) = match self.controller.grain() {
            Ok(TimeGrain::Monthly) => (SELECTED_STYLE, FOOTER_STYLE),
            Ok(TimeGrain::Quarterly) => (FOOTER_STYLE, SELECTED_STYLE),
            Err(_) => (FOOTER_STYLE, FOOTER_STYLE),
        };
        Line::from(vec![
            Span::styled(" (m) Monthly ", m_style),
            Span::raw(" "),
            Span::styled(" (q) Quarterly ", q_style),
        ])
    }

    fn draw_selectors(&mut self, frame: &mut Frame, area: Rect) {
        let areas: Vec<Rect> = if self.kind == ReportKind::Location {
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area)
                .to_vec()
        } else {
            vec![area]
        };

        let focused = |is: bool| {
            if is {
                HEADER_STYLE
            } else {
                Style::new()
            }
        };

        let items: Vec<ListItem> = self
            .selector
            .entries
            .iter()
            .map(|(label, _)| ListItem::new(label.clone()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.kind.selector_title())
                    .border_style(focused(!self.focus_city)),
            )
            .highlight_style(SELECTED_STYLE);
        let mut state = ListState::default().with_selected(self.selector.selected);
        frame.render_stateful_widget(list, areas[0], &mut state);

        if self.kind == ReportKind::Location {
            let items: Vec<ListItem> = self
                .city_selector
                .entries
                .iter()
                .map(|(label, _)| ListItem::new(label.clone()))
                .collect();
            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Cities")
                        .border_style(focused(self.focus_city)),
                )
                .highlight_style(SELECTED_STYLE);
            let mut state = ListState::default().with_selected(self.city_selector.selected);
            frame.render_stateful_widget(list, areas[1], &mut state);
        }
    }

    /// Translate the grid's recorded sizing policy into layout
    /// constraints: fit-contents columns measure their widest cell, the
    /// stretch column takes whatever width remains.
    fn column_widths(&self) -> Vec<Constraint> {
        self.grid
            .last_policy
            .iter()
            .enumerate()
            .map(|(c, sizing)| match sizing {
                ColumnSizing::Stretch => Constraint::Min(12),
                ColumnSizing::FitContents => {
                    let content = self
                        .grid
                        .cells
                        .iter()
                        .map(|row| row.get(c).map(String::len).unwrap_or(0))
                        .max()
                        .unwrap_or(0);
                    let header = self.grid.headers.get(c).map(String::len).unwrap_or(0);
                    Constraint::Length(content.max(header) as u16 + 2)
                }
            })
            .collect()
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        self.visible_rows = area.height.saturating_sub(3) as usize;
        let currency = self.controller.spec().currency_columns;

        let header = Row::new(
            self.grid
                .headers
                .iter()
                .map(|h| Cell::from(h.clone()).style(HEADER_STYLE)),
        );
        let rows: Vec<Row> = self
            .grid
            .cells
            .iter()
            .skip(self.offset)
            .take(self.visible_rows)
            .map(|cells| {
                Row::new(cells.iter().enumerate().map(|(c, text)| {
                    let cell = Cell::from(text.clone());
                    if currency.contains(&c) {
                        cell.style(CURRENCY_STYLE)
                    } else {
                        cell
                    }
                }))
            })
            .collect();

        let table = Table::new(rows, self.column_widths())
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(self.controller.spec().title));
        frame.render_widget(table, area);
    }

    fn draw_chart(&self, frame: &mut Frame, area: Rect) {
        let Some(series) = &self.chart else {
            return;
        };
        let (labels, values) = (&series.x_labels, &series.y_values);
        if values.is_empty() {
            let empty = Paragraph::new("No data to chart")
                .style(FOOTER_STYLE)
                .block(Block::default().borders(Borders::ALL).title("Quantity Sold"));
            frame.render_widget(empty, area);
            return;
        }

        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let max_y = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0);
        let max_x = (points.len() - 1).max(1) as f64;

        let dataset = Dataset::default()
            .name("Quantity")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(CURRENCY_STYLE)
            .data(&points);

        let x_labels: Vec<String> = if labels.len() > 2 {
            vec![
                labels[0].clone(),
                labels[labels.len() / 2].clone(),
                labels[labels.len() - 1].clone(),
            ]
        } else {
            labels.clone()
        };
        let y_labels = vec![
            "0".to_string(),
            number((max_y / 2.0) as i64),
            number(max_y as i64),
        ];

        let chart = Chart::new(vec![dataset])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Quantity Sold — {}", series.title)),
            )
            .x_axis(
                Axis::default()
                    .style(FOOTER_STYLE)
                    .bounds([0.0, max_x])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(FOOTER_STYLE)
                    .bounds([0.0, max_y])
                    .labels(y_labels),
            );
        frame.render_widget(chart, area);
    }
}

impl ReportView for ReportDialog {
    fn draw(&mut self, frame: &mut Frame) {
        // Long error messages wrap into extra footer lines.
        let width = frame.area().width.max(1) as usize;
        let (status_text, status_lines) = wrap_text(&self.status, width);
        let [title_area, toggle_area, body, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1 + status_lines.min(3)),
        ])
        .areas(frame.area());

        let title = Paragraph::new(Span::styled(
            format!(" {} ", self.controller.spec().title),
            HEADER_STYLE.add_modifier(Modifier::REVERSED),
        ));
        frame.render_widget(title, title_area);
        frame.render_widget(Paragraph::new(self.grain_line()), toggle_area);

        let [selector_area, data_area] =
            Layout::horizontal([Constraint::Length(26), Constraint::Min(0)]).areas(body);
        self.draw_selectors(frame, selector_area);

        if self.chart.is_some() {
            let [table_area, chart_area] =
                Layout::vertical([Constraint::Min(5), Constraint::Length(12)]).areas(data_area);
            self.draw_table(frame, table_area);
            self.draw_chart(frame, chart_area);
        } else {
            self.draw_table(frame, data_area);
        }

        let hints = "↑/↓ select · m/q grain · enter query · pgup/pgdn scroll · tab city · esc close";
        let status_style = if self.status.starts_with("Error") {
            ERROR_STYLE
        } else {
            FOOTER_STYLE
        };
        let mut footer_lines = vec![Line::styled(hints, FOOTER_STYLE)];
        for line in status_text.lines().take(3) {
            footer_lines.push(Line::styled(line.to_string(), status_style));
        }
        frame.render_widget(Paragraph::new(footer_lines), footer_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> ReportViewAction {
        match code {
            KeyCode::Esc => return ReportViewAction::Close,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Tab => {
                if self.kind == ReportKind::Location {
                    self.focus_city = !self.focus_city;
                }
            }
            KeyCode::Char('m') | KeyCode::Char('M') => self.set_grain(TimeGrain::Monthly),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.set_grain(TimeGrain::Quarterly),
            KeyCode::Enter => {
                if let Err(e) = self.run_query() {
                    self.status = format!("Error: {e}");
                }
            }
            KeyCode::PageDown => {
                let max = self.grid.cells.len().saturating_sub(self.visible_rows.max(1));
                self.offset = (self.offset + self.visible_rows.max(1)).min(max);
            }
            KeyCode::PageUp => {
                self.offset = self.offset.saturating_sub(self.visible_rows.max(1));
            }
            _ => {}
        }
        ReportViewAction::Continue
    }
}
