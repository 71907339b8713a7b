use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use goal_intervals::combine::{CombinedRow, RandomPlaceholder};
use goal_intervals::config::AppConfig;
use goal_intervals::feed::{self, FeedContext};
use goal_intervals::state::{self, AppState, Delta, ProviderCommand, Screen, apply_delta};

const HOME_SCORED: Color = Color::Rgb(0x41, 0x69, 0xE1);
const HOME_CONCEDED: Color = Color::Rgb(0x87, 0xCE, 0xFA);
const AWAY_SCORED: Color = Color::Rgb(0x8B, 0x00, 0x00);
const AWAY_CONCEDED: Color = Color::Rgb(0xFA, 0x80, 0x72);

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(state: AppState, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                if self.state.select_next() {
                    self.request_profile();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.state.select_prev() {
                    self.request_profile();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_profile(),
            KeyCode::Char('t') | KeyCode::Tab => self.state.toggle_screen(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.request_export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn request_profile(&mut self) {
        let Some(cmd) = self.state.begin_fetch() else {
            self.state.push_log("[INFO] No match selected");
            return;
        };
        self.send(cmd, "Profile");
    }

    fn request_export(&mut self) {
        let Some(selection) = self.state.selected_match().cloned() else {
            self.state.push_log("[INFO] No match selected for export");
            return;
        };
        let Some(rows) = self.state.current_rows().map(|rows| rows.to_vec()) else {
            self.state.push_log("[INFO] Nothing to export yet");
            return;
        };
        self.send(ProviderCommand::Export { selection, rows }, "Export");
    }

    fn send(&mut self, cmd: ProviderCommand, what: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log(format!("[INFO] {what} unavailable"));
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {what} request failed"));
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let (provider, notice) = goal_intervals::select_provider(&config.provider, config.demo_seed);

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(
        tx,
        cmd_rx,
        FeedContext {
            provider,
            conceded: Box::new(RandomPlaceholder::new(StdRng::from_entropy())),
            last: config.provider.last,
            export_dir: config.export_dir.clone(),
        },
    );

    let mut app = App::new(AppState::new(config.catalog), Some(cmd_tx));
    if let Some(notice) = notice {
        app.state.push_log(notice);
    }
    app.request_profile();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(chunks[1]);

    let match_list = Paragraph::new(match_list_text(&app.state))
        .block(Block::default().title("Matches").borders(Borders::ALL));
    frame.render_widget(match_list, body[0]);

    match app.state.screen {
        Screen::Chart => render_chart(frame, body[1], &app.state),
        Screen::Table => render_table(frame, body[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "j/k/↑/↓ Match | r Refresh | t/Tab Chart/Table | e Export | ? Help | q Quit",
    );
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.selected_match() {
        Some(m) => m.title(),
        None => "No match".to_string(),
    };
    let status = if state.loading { "loading" } else { "ready" };
    let line1 = format!("GOAL INTERVALS | {title} | {status}");
    let line2 = "Average goals per 15-minute interval (recent form + head-to-head)".to_string();
    format!("{line1}\n{line2}")
}

fn match_list_text(state: &AppState) -> String {
    let mut lines = Vec::new();
    for (idx, m) in state.catalog.matches().iter().enumerate() {
        let prefix = if idx == state.selected { "> " } else { "  " };
        lines.push(format!("{prefix}{}", m.title()));
    }
    lines.join("\n")
}

fn render_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(legend_title(state))
        .borders(Borders::ALL);
    let Some(rows) = state.current_rows() else {
        let empty = Paragraph::new(empty_text(state))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(5)
        .bar_gap(0)
        .group_gap(3);
    for row in rows {
        chart = chart.data(interval_group(row));
    }
    frame.render_widget(chart, area);
}

fn interval_group(row: &CombinedRow) -> BarGroup<'static> {
    let bar = |value: f64, color: Color| {
        Bar::default()
            .value((value * 100.0).round().max(0.0) as u64)
            .text_value(format!("{value:.2}"))
            .style(Style::default().fg(color))
            .value_style(Style::default().fg(Color::Black).bg(color))
    };
    BarGroup::default()
        .label(Line::from(row.interval))
        .bars(&[
            bar(row.scored_home, HOME_SCORED),
            bar(row.conceded_home, HOME_CONCEDED),
            bar(row.scored_away, AWAY_SCORED),
            bar(row.conceded_away, AWAY_CONCEDED),
        ])
}

fn legend_title(state: &AppState) -> Line<'static> {
    let Some(m) = state.selected_match() else {
        return Line::from("Goals by interval");
    };
    Line::from(vec![
        Span::styled(format!(" {} scored ", m.home), Style::default().fg(HOME_SCORED)),
        Span::styled(
            format!(" {} conceded* ", m.home),
            Style::default().fg(HOME_CONCEDED),
        ),
        Span::styled(format!(" {} scored ", m.away), Style::default().fg(AWAY_SCORED)),
        Span::styled(
            format!(" {} conceded* ", m.away),
            Style::default().fg(AWAY_CONCEDED),
        ),
    ])
}

fn render_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Intervals").borders(Borders::ALL);
    let Some(rows) = state.current_rows() else {
        let empty = Paragraph::new(empty_text(state))
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![Line::styled(
        format!(
            "{:<8}{:>10}{:>12}{:>10}{:>12}",
            "Min", "H scored", "H conc.*", "A scored", "A conc.*"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for row in rows {
        lines.push(Line::from(format!(
            "{:<8}{:>10.2}{:>12.2}{:>10.2}{:>12.2}",
            row.interval, row.scored_home, row.conceded_home, row.scored_away, row.conceded_away
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "* conceded columns are placeholder values",
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(view) = state.profile.as_ref() {
        let p = &view.profile;
        lines.push(Line::styled(
            format!(
                "fixtures: home {} / away {} / h2h {}",
                p.home_fixtures, p.away_fixtures, p.h2h_fixtures
            ),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn empty_text(state: &AppState) -> &'static str {
    if state.loading {
        "Loading fixtures..."
    } else {
        "No data for this match"
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let mut lines: Vec<String> = state.logs.iter().rev().take(3).cloned().collect();
    lines.reverse();
    if let Some(err) = export_status(&state.export) {
        lines.push(err);
    }
    lines.join("\n")
}

fn export_status(export: &state::ExportState) -> Option<String> {
    match (&export.path, &export.error) {
        (Some(path), _) => Some(format!("Last export: {path}")),
        (None, Some(err)) => Some(format!("Last export failed: {err}")),
        (None, None) => None,
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Goal Intervals - Help",
        "",
        "  j/k or ↑/↓   Select match (refetches)",
        "  r            Refresh selected match",
        "  t / Tab      Toggle chart / table",
        "  e            Export rows to .xlsx",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Conceded bars are placeholders, not statistics.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
