//! Ratatui-based terminal UI.
//!
//! The TUI renders the grouped risk table with the two summary scalars in
//! the header, lets the user walk the metric rows, and shows the selected
//! metric's advisory description in the footer. `r` clears the memo and
//! refetches.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Terminal,
};

use crate::app::pipeline::{self, RunOutput};
use crate::cli::DashArgs;
use crate::data::DataFeed;
use crate::domain::{metric_description, DashConfig, Flag, MetricRow, Section};
use crate::error::AppError;

/// Start the TUI.
pub fn run(args: DashArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: DashConfig,
    feed: DataFeed,
    run: RunOutput,
    selected: usize,
    status: String,
}

impl App {
    fn new(args: DashArgs) -> Result<Self, AppError> {
        let config = crate::app::dash_config_from_args(&args);
        let mut feed = DataFeed::from_env(&config)?;
        let run = pipeline::run_dashboard(&mut feed, &config);
        let status = if feed.fred_key_configured() {
            "Loaded.".to_string()
        } else {
            "Loaded. FRED API key not set — HY OAS & WALCL may be blank.".to_string()
        };
        Ok(Self {
            config,
            feed,
            run,
            selected: 0,
            status,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.run.rows.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('r') => {
                self.status = "Refreshing data...".to_string();
                self.run = pipeline::run_refreshed(&mut self.feed, &self.config);
                self.status = format!(
                    "Refreshed. score={} regime={}",
                    self.run.total_score, self.run.regime
                );
            }
            _ => {}
        }
        false
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(0),
                Constraint::Length(5),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("mrisk", Style::default().fg(Color::Cyan)),
            Span::raw(" — Macro Risk Dashboard"),
        ]));

        lines.push(Line::from(vec![
            Span::raw("Total Risk Score: "),
            Span::styled(
                self.run.total_score.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Regime: "),
            Span::styled(
                self.run.regime,
                Style::default()
                    .fg(regime_color(self.run.total_score))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));

        if self.feed.fred_key_configured() {
            lines.push(Line::from(Span::styled(
                "FRED API: configured",
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "FRED API: not set — HY OAS & WALCL may be blank (set FRED_API_KEY).",
                Style::default().fg(Color::Yellow),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(vec!["Metric", "Current", "4W Trend", "Flag", "Notes"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let mut table_rows: Vec<Row> = Vec::new();
        let mut metric_idx = 0usize;
        for section in Section::ALL {
            table_rows.push(
                Row::new(vec![Cell::from(section.display_name())]).style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            );
            for row in self.run.rows.iter().filter(|r| r.section == section) {
                table_rows.push(metric_table_row(row, metric_idx == self.selected));
                metric_idx += 1;
            }
        }

        let widths = [
            Constraint::Length(28),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Min(8),
        ];

        let table = Table::new(table_rows, widths)
            .header(header)
            .column_spacing(2)
            .block(Block::default().title("Signals").borders(Borders::ALL));

        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  r refresh  q quit";
        let mut lines = vec![Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ])];

        if let Some(row) = self.run.rows.get(self.selected) {
            if let Some(desc) = metric_description(row.name) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}: ", row.name),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(desc),
                ]));
            }
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn metric_table_row(row: &MetricRow, selected: bool) -> Row<'static> {
    let flag_style = Style::default().fg(flag_color(row.flag));
    let mut style = Style::default();
    if selected {
        style = style.fg(Color::Black).bg(Color::White);
    }

    Row::new(vec![
        Cell::from(format!("  {}", row.name)),
        Cell::from(row.current.clone()),
        Cell::from(row.trend.arrow()),
        Cell::from(row.flag.label()).style(if selected { style } else { flag_style }),
        Cell::from(row.notes),
    ])
    .style(style)
}

fn flag_color(flag: Flag) -> Color {
    match flag {
        Flag::Green => Color::Green,
        Flag::Yellow => Color::Yellow,
        Flag::Red => Color::Red,
    }
}

fn regime_color(score: u32) -> Color {
    match score {
        0..=4 => Color::Green,
        5..=8 => Color::Yellow,
        9..=14 => Color::LightRed,
        _ => Color::Red,
    }
}
