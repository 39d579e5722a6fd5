use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::cli::report::view::ReportDialog;
use crate::cli::{ReportArgs, ReportCommands};
use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::number;
use crate::settings::{db_path, load_settings};
use crate::tui::{run_report_view, ReportView, ReportViewAction, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const REPORTS: &[&str] = &[
    "Sales Revenue per Employee",
    "Sales per Product Line",
    "Sales per Product Line by Location",
];

pub fn run() -> Result<()> {
    let mut dashboard = Dashboard::new();
    run_report_view(&mut dashboard)
}

enum Screen {
    Home,
    Dialog(ReportDialog),
}

struct Dashboard {
    screen: Screen,
    selection: usize,
    summary: String,
    status: Option<String>,
}

impl Dashboard {
    fn new() -> Self {
        let summary = match warehouse_summary() {
            Ok(s) => s,
            Err(_) => "No warehouse found — run `pinnacle init` then `pinnacle demo`".to_string(),
        };
        Self {
            screen: Screen::Home,
            selection: 0,
            summary,
            status: None,
        }
    }

    fn open_selected(&mut self) {
        let args = ReportArgs {
            grain: "monthly".to_string(),
            year: None,
            mode: None,
            output: None,
        };
        let cmd = match self.selection {
            0 => ReportCommands::Employee { name: None, args },
            1 => ReportCommands::ProductLine { line: None, args },
            _ => ReportCommands::Location { country: None, city: None, args },
        };
        match ReportDialog::from_command(&cmd) {
            Ok(dialog) => {
                self.status = None;
                self.screen = Screen::Dialog(dialog);
            }
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }
}

fn warehouse_summary() -> Result<String> {
    let path = db_path();
    if !path.exists() {
        return Err(crate::error::PinnacleError::Other("no database".into()));
    }
    let conn = get_connection(&path)?;
    let orders: i64 = conn.query_row("SELECT count(*) FROM shippedorders", [], |r| r.get(0))?;
    let employees: i64 = conn.query_row("SELECT count(*) FROM salesrepemployee", [], |r| r.get(0))?;
    let lines: i64 = conn.query_row("SELECT count(*) FROM productline", [], |r| r.get(0))?;
    Ok(format!(
        "{} shipped order lines · {} employees · {} product lines",
        number(orders),
        number(employees),
        number(lines)
    ))
}

impl ReportView for Dashboard {
    fn draw(&mut self, frame: &mut Frame) {
        if let Screen::Dialog(dialog) = &mut self.screen {
            dialog.draw(frame);
            return;
        }

        let [title_area, summary_area, menu_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(frame.area());

        let company = load_settings().company_name;
        let title = if company.is_empty() {
            " Pinnacle Sales Reports ".to_string()
        } else {
            format!(" {company} — Sales Reports ")
        };
        frame.render_widget(
            Paragraph::new(Span::styled(title, HEADER_STYLE)),
            title_area,
        );
        frame.render_widget(
            Paragraph::new(Line::styled(self.summary.clone(), FOOTER_STYLE)),
            summary_area,
        );

        let items: Vec<ListItem> = REPORTS.iter().map(|r| ListItem::new(*r)).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Reports"))
            .highlight_style(SELECTED_STYLE)
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(Some(self.selection));
        frame.render_stateful_widget(list, menu_area, &mut state);

        let status = self.status.clone().unwrap_or_default();
        let footer = Paragraph::new(vec![
            Line::styled("↑/↓ choose · enter open · esc quit", FOOTER_STYLE),
            Line::raw(status),
        ]);
        frame.render_widget(footer, footer_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> ReportViewAction {
        match &mut self.screen {
            Screen::Dialog(dialog) => {
                if let ReportViewAction::Close = dialog.handle_key(code) {
                    self.screen = Screen::Home;
                }
                ReportViewAction::Continue
            }
            Screen::Home => {
                match code {
                    KeyCode::Esc | KeyCode::Char('q') => return ReportViewAction::Close,
                    KeyCode::Up => self.selection = self.selection.saturating_sub(1),
                    KeyCode::Down => self.selection = (self.selection + 1).min(REPORTS.len() - 1),
                    KeyCode::Enter => self.open_selected(),
                    _ => {}
                }
                ReportViewAction::Continue
            }
        }
    }
}
