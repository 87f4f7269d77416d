use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use matchup_terminal::config::LEAGUES;
use matchup_terminal::provider;
use matchup_terminal::state::{apply_delta, AppState, Delta, ProviderCommand, Slot};
use matchup_terminal::team_stats::TeamStats;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.focus_slot = Slot::Home,
            KeyCode::Char('2') => self.state.focus_slot = Slot::Away,
            KeyCode::Tab => {
                self.state.focus_slot = match self.state.focus_slot {
                    Slot::Home => Slot::Away,
                    Slot::Away => Slot::Home,
                };
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if self.state.league_cursor + 1 < LEAGUES.len() {
                    self.state.league_cursor += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.league_cursor = self.state.league_cursor.saturating_sub(1);
            }
            KeyCode::Enter => self.select_league_under_cursor(),
            KeyCode::Char('g') => self.generate_preview(),
            KeyCode::Char('x') => {
                let _ = self.cmd_tx.send(ProviderCommand::InvalidateCache);
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn select_league_under_cursor(&mut self) {
        let Some(league) = LEAGUES.get(self.state.league_cursor) else {
            return;
        };
        let slot = self.state.focus_slot;
        let effect = self.state.select_league(slot, league.key);
        self.state.push_log(format!(
            "[INFO] Slot {} -> {}",
            slot.index() + 1,
            league.label
        ));
        if effect.fetch_needed && !self.state.roster_loading(league.key) {
            self.state
                .rosters_loading
                .insert(league.key.to_string(), true);
            let _ = self.cmd_tx.send(ProviderCommand::FetchRoster {
                league_key: league.key.to_string(),
            });
        }
    }

    fn generate_preview(&mut self) {
        // The one validation surfaced to the user: both leagues must be set.
        if !self.state.selection.both_selected() {
            self.state
                .push_log("[WARN] Select leagues for both teams first");
            return;
        }
        let league1 = self.state.selection.league1.clone().unwrap_or_default();
        let league2 = self.state.selection.league2.clone().unwrap_or_default();
        self.state.preview_loading = true;
        let _ = self
            .cmd_tx
            .send(ProviderCommand::GeneratePreview { league1, league2 });
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    provider::spawn_provider(tx, cmd_rx);

    let mut app = App::new(cmd_tx);
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
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(chunks[1]);

    render_league_panel(frame, body[0], &app.state);
    render_preview_panel(frame, body[1], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "1/2/Tab Slot | j/k Move | Enter Pick league | g Generate | x Clear cache | ? Help | q Quit",
    );
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let cache = match state.cache_stamp_ms {
        Some(ms) => match DateTime::<Utc>::from_timestamp_millis(ms as i64) {
            Some(stamp) => format!("cache {}", stamp.format("%Y-%m-%d %H:%M UTC")),
            None => "cache ?".to_string(),
        },
        None => "cache empty".to_string(),
    };
    format!("MATCHUP TERMINAL | slot {} | {}", state.focus_slot.index() + 1, cache)
}

fn render_league_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Leagues").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::with_capacity(LEAGUES.len());
    for (idx, league) in LEAGUES.iter().enumerate() {
        let cursor = if idx == state.league_cursor { ">" } else { " " };
        let slot1 = if state.selection.league1.as_deref() == Some(league.key) {
            "1"
        } else {
            " "
        };
        let slot2 = if state.selection.league2.as_deref() == Some(league.key) {
            "2"
        } else {
            " "
        };
        let status = if state.roster_loading(league.key) {
            " fetching..."
        } else {
            match state.rosters.get(league.key) {
                Some(roster) if !roster.is_empty() => " ready",
                _ => "",
            }
        };
        lines.push(format!(
            "{cursor}[{slot1}{slot2}] {}{status}",
            league.label
        ));
    }
    let list = Paragraph::new(lines.join("\n"));
    frame.render_widget(list, inner);
}

fn render_preview_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Match Preview").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.preview_loading {
        let loading = Paragraph::new("Loading preview...")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    }

    let Some(preview) = &state.preview else {
        let empty = Paragraph::new("Pick two leagues, then press g")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(inner);

    let founded1 = founded_label(preview.team1.founded);
    let founded2 = founded_label(preview.team2.founded);
    let head = format!(
        "{} ({}, est. {})\n  vs\n{} ({}, est. {})\nHead to head: {} - {}",
        preview.team1.name,
        preview.team1.country,
        founded1,
        preview.team2.name,
        preview.team2.country,
        founded2,
        preview.h2h.0,
        preview.h2h.1,
    );
    frame.render_widget(Paragraph::new(head), rows[0]);

    render_stat_bars(frame, rows[1], &preview.stats1.stats, &preview.stats2.stats);
}

fn render_stat_bars(frame: &mut Frame, area: Rect, stats1: &TeamStats, stats2: &TeamStats) {
    let metrics = [
        ("WIN%", stats1.win_percentage, stats2.win_percentage),
        ("ATT", stats1.attacking, stats2.attacking),
        ("DEF", stats1.defensive, stats2.defensive),
        ("OVR", stats1.rating, stats2.rating),
    ];

    let constraints = [Constraint::Length(2); 4];
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, (label, left, right)) in slots.iter().zip(metrics) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(9), Constraint::Min(10)])
            .split(*slot);

        let text = format!("{label}\n{left:>3} {right:>3}");
        frame.render_widget(Paragraph::new(text), cols[0]);
        frame.render_widget(metric_bar_chart(left, right), cols[1]);
    }
}

fn metric_bar_chart(left: u32, right: u32) -> BarChart<'static> {
    let left_bar = Bar::default()
        .value(left as u64)
        .text_value(String::new())
        .style(Style::default().fg(Color::Blue));
    let right_bar = Bar::default()
        .value(right as u64)
        .text_value(String::new())
        .style(Style::default().fg(Color::Green));

    BarChart::default()
        .data(BarGroup::default().bars(&[left_bar, right_bar]))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(0)
        .max(100)
}

fn founded_label(founded: Option<u32>) -> String {
    founded
        .map(|year| year.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchup Terminal - Help",
        "",
        "  1 / 2 / Tab  Choose which slot a pick fills",
        "  j/k or ↑/↓   Move the league cursor",
        "  Enter        Assign the league to the slot",
        "  g            Generate a random match preview",
        "  x            Clear the roster cache",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Set FOOTBALL_API_KEY in .env for live data;",
        "without it the bundled demo rosters are used.",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default().add_modifier(Modifier::BOLD));
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
