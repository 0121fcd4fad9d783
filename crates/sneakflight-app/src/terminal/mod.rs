use std::{
    collections::VecDeque,
    fs::{self, File},
    io::{self, Stdout},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{CrosstermBackend, TestBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use serde::Serialize;
use sneakflight_core::{
    DisplayState, Flow, FrameSnapshot, GameWorld, Input, MapId, Outcome, PARENT_SLOTS, Point,
    SessionState, Terrain, TickEvents,
};
use supports_color::{ColorLevel, Stream, on_cached};
use tracing::info;

use crate::{
    input::{KeyCommand, translate_key},
    renderer::{Renderer, RendererContext},
};

const DEFAULT_TICK_MILLIS: u64 = 100;
const DEFAULT_HEADLESS_FRAMES: usize = 200;
const MAX_HEADLESS_FRAMES: usize = 2000;
const HEADLESS_SIZE: (u16, u16) = (80, 26);
const EVENT_LOG_CAPACITY: usize = 12;
const MAP_PANEL_WIDTH: u16 = 42;
const HUD_HEIGHT: u16 = 13;

pub struct TerminalRenderer {
    tick_interval: Duration,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TICK_MILLIS))
    }
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Renderer for TerminalRenderer {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn run(&self, ctx: RendererContext<'_>) -> Result<()> {
        if std::env::var_os("SNEAKFLIGHT_TERMINAL_HEADLESS").is_some() {
            let report = self.run_headless(ctx)?;
            info!(
                target: "sneakflight::terminal",
                frames = report.summary.frame_count,
                ticks_simulated = report.summary.ticks_simulated,
                final_tick = report.summary.final_tick,
                final_session = %report.summary.final_session,
                final_score = report.summary.final_score,
                max_score = report.summary.max_score,
                parents_spawned = report.summary.parents_spawned,
                wins = report.summary.wins,
                losses = report.summary.losses,
                "Terminal headless run completed"
            );
            return Ok(());
        }

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;
        terminal.hide_cursor().ok();

        let result = run_event_loop(self, &mut terminal, ctx);

        terminal.show_cursor().ok();
        if let Err(err) = disable_raw_mode() {
            tracing::error!(?err, "failed to disable raw mode");
        }
        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::error!(?err, "failed to leave alternate screen");
        }

        result
    }
}

fn run_event_loop(
    renderer: &TerminalRenderer,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ctx: RendererContext<'_>,
) -> Result<()> {
    let mut app = TerminalApp::new(ctx.world);
    let mut next_tick = Instant::now() + renderer.tick_interval;
    terminal.draw(|frame| app.draw(frame))?;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout).unwrap_or(false)
            && let Event::Key(key) = event::read()?
        {
            if app.handle_key(key) {
                break;
            }
            terminal.draw(|frame| app.draw(frame))?;
        }

        let now = Instant::now();
        if now >= next_tick {
            app.step_once();
            next_tick = now + renderer.tick_interval;
            terminal.draw(|frame| app.draw(frame))?;
        }
    }

    Ok(())
}

impl TerminalRenderer {
    fn run_headless(&self, ctx: RendererContext<'_>) -> Result<HeadlessReport> {
        let (width, height) = HEADLESS_SIZE;
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).context("failed to build test backend")?;
        let map = ctx.world.config().starting_map;
        let mut app = TerminalApp::new(ctx.world);

        // Menu -> map selection -> configured map.
        app.apply(Input::Select(1));
        app.apply(Input::Select(map.selector()));

        let mut report = HeadlessReport::new(FrameStats::from_snapshot(&app.world.snapshot()));
        let frames = self.headless_frame_budget();

        for _ in 0..frames {
            if app.world.session().is_over() {
                app.apply(Input::Restart);
            }
            let before = app.world.timers().game_time;
            let events = app.step_once();
            let advanced = app.world.timers().game_time != before;
            let stats = FrameStats::from_snapshot(&app.world.snapshot());
            report.record(stats.with_events(&events, advanced));
            terminal.draw(|frame| app.draw(frame))?;
        }

        report.finalize();

        if let Some(path) = report_file_path_from_env() {
            report.write_json(&path).with_context(|| {
                format!("failed to write headless report to {}", path.display())
            })?;
        }

        Ok(report)
    }

    fn headless_frame_budget(&self) -> usize {
        std::env::var("SNEAKFLIGHT_TERMINAL_HEADLESS_FRAMES")
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .map(|value| value.min(MAX_HEADLESS_FRAMES))
            .unwrap_or(DEFAULT_HEADLESS_FRAMES)
    }
}

struct TerminalApp<'a> {
    world: &'a mut GameWorld,
    palette: Palette,
    event_log: VecDeque<EventEntry>,
}

impl<'a> TerminalApp<'a> {
    fn new(world: &'a mut GameWorld) -> Self {
        Self {
            world,
            palette: Palette::detect(),
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
        }
    }

    fn step_once(&mut self) -> TickEvents {
        let events = self.world.step();
        self.ingest_events(&events);
        events
    }

    /// Returns `true` when the front end should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match translate_key(key) {
            None => false,
            Some(KeyCommand::ForceQuit) => true,
            Some(KeyCommand::Game(input)) => self.apply(input) == Flow::Quit,
        }
    }

    fn apply(&mut self, input: Input) -> Flow {
        let before = self.world.session();
        let flow = self.world.apply_input(input);
        let after = self.world.session();
        if before != after {
            let tick = self.world.timers().game_time;
            match (before, after) {
                (SessionState::Paused, SessionState::Playing) => {
                    self.push_event(tick, EventKind::Info, "Resumed");
                }
                (_, SessionState::Playing) => {
                    self.event_log.clear();
                    let name = self.world.map().name();
                    self.push_event(tick, EventKind::Info, format!("Sneaking around the {name}"));
                }
                (_, SessionState::Paused) => self.push_event(tick, EventKind::Info, "Paused"),
                _ => {}
            }
        }
        flow
    }

    fn ingest_events(&mut self, events: &TickEvents) {
        if events.is_quiet() {
            return;
        }
        let tick = events.tick.0;
        if let Some(slot) = events.spawned {
            let hint = self.world.current_map().hide_hint();
            self.push_event(
                tick,
                EventKind::Parent,
                format!("Parent {} is coming! Hide in {hint}", slot + 1),
            );
        }
        for (slot, expired) in events.expired.iter().enumerate() {
            if *expired {
                self.push_event(tick, EventKind::Clear, format!("Parent {} left", slot + 1));
            }
        }
        let total_time = self.world.timers().total_time;
        if events.interval_scored && total_time.is_multiple_of(10) && events.outcome.is_none() {
            self.push_event(tick, EventKind::Survival, format!("{total_time}s survived"));
        }
        match (events.outcome, events.caught_by) {
            (Some(Outcome::Win), _) => {
                self.push_event(tick, EventKind::Outcome, "Made it through the night!");
            }
            (Some(Outcome::Lost), Some(slot)) => {
                self.push_event(tick, EventKind::Outcome, format!("Caught by parent {}", slot + 1));
            }
            _ => {}
        }
    }

    fn push_event(&mut self, tick: u64, kind: EventKind, message: impl Into<String>) {
        if self.event_log.len() >= EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(EventEntry {
            tick,
            kind,
            message: message.into(),
        });
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let snapshot = self.world.snapshot();
        let area = frame.area();
        match snapshot.session {
            SessionState::Menu => {
                self.draw_menu(frame, area);
                if snapshot.instructions_visible {
                    self.draw_instructions(frame);
                }
            }
            SessionState::MapSelection => self.draw_map_selection(frame, area),
            SessionState::Playing | SessionState::Paused => self.draw_play(frame, &snapshot),
            SessionState::Win | SessionState::Lost => self.draw_game_over(frame, &snapshot),
        }
    }

    fn draw_menu(&self, frame: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::styled("SNEAKFLIGHT", self.palette.header_style()),
            Line::raw(""),
            Line::raw("Stay out of sight until the clock runs out."),
            Line::raw(""),
            Line::raw("1  Start game"),
            Line::raw("2  Instructions"),
            Line::raw("3  Quit"),
        ];
        let block = Block::default()
            .title(self.palette.title("Main Menu"))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, centered_rect(50, 11, area));
    }

    fn draw_instructions(&self, frame: &mut Frame<'_>) {
        let area = centered_rect(70, 16, frame.area());
        let mut lines = vec![
            Line::styled(
                "How to play",
                self.palette.header_style().add_modifier(Modifier::BOLD),
            ),
            Line::raw("1. Move with WASD or the arrow keys. Walls (#) stop you."),
            Line::raw("2. Every 10 ticks you earn a second and 10 points. Survive 100 seconds to win."),
            Line::raw("3. Parents may look in every 15 ticks. A red warning means one is coming."),
            Line::raw("4. While a parent is out, hide in the cyan zone for +5 a tick. Within 3 steps of a parent anywhere else, you are caught."),
            Line::raw("5. When the house is quiet, stay on the yellow bed for +2 a tick."),
            Line::raw(""),
        ];
        for id in MapId::ALL {
            lines.push(Line::raw(format!("{}: hide in {}", id.name(), id.hide_hint())));
        }
        lines.push(Line::styled("Press any key to return", self.palette.accent_style()));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(self.palette.title("Instructions"))
                .borders(Borders::ALL)
                .style(Style::default().bg(Color::Black).fg(Color::White)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }

    fn draw_map_selection(&self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines = vec![
            Line::styled("Where are you tonight?", self.palette.header_style()),
            Line::raw(""),
        ];
        for map in self.world.maps().iter() {
            let id = map.id();
            lines.push(Line::from(vec![
                Span::styled(format!("{}  ", id.selector()), self.palette.accent_style()),
                Span::raw(format!("{:<20}", id.name())),
                Span::styled(format!("hide in {}", id.hide_hint()), self.palette.hide_style()),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::raw("m  Back to menu"));

        let block = Block::default()
            .title(self.palette.title("Choose a Map"))
            .borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), centered_rect(64, 10, area));
    }

    fn draw_play(&self, frame: &mut Frame<'_>, snapshot: &FrameSnapshot) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(frame.area());

        self.draw_header(frame, outer[0], snapshot);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MAP_PANEL_WIDTH), Constraint::Min(0)])
            .split(outer[1]);

        self.draw_map(frame, body[0], snapshot);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HUD_HEIGHT), Constraint::Min(3)])
            .split(body[1]);

        self.draw_hud(frame, sidebar[0], snapshot);
        self.draw_events(frame, sidebar[1]);

        if snapshot.session == SessionState::Paused {
            self.draw_pause_banner(frame, body[0]);
        }
    }

    fn draw_header(&self, frame: &mut Frame<'_>, area: Rect, snapshot: &FrameSnapshot) {
        let (status, style) = if snapshot.session == SessionState::Paused {
            (" PAUSED ", self.palette.paused_style())
        } else {
            (" RUNNING ", self.palette.running_style())
        };
        let line = Line::from(vec![
            Span::styled("Sneakflight", self.palette.header_style()),
            Span::raw("  "),
            Span::styled(status, style),
            Span::raw(format!(
                "  {}  tick {}",
                snapshot.map_name, snapshot.timers.game_time
            )),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_map(&self, frame: &mut Frame<'_>, area: Rect, snapshot: &FrameSnapshot) {
        let map = self.world.map();
        let block = Block::default()
            .title(self.palette.title(map.name()))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 2 || inner.height < 2 {
            return;
        }

        let width = map.width() as usize;
        let height = map.height() as usize;
        let mut grid = Vec::with_capacity(width * height);
        for y in 0..map.height() {
            for x in 0..map.width() {
                let point = Point::new(x, y);
                let zone = if map.in_hide_zone(point) {
                    Zone::Hide
                } else if map.in_bed_zone(point) {
                    Zone::Bed
                } else {
                    Zone::Open
                };
                grid.push(self.palette.terrain_symbol(map.cell_at(x, y), zone));
            }
        }

        let cell_index = |point: Point| {
            map.contains(point)
                .then(|| (point.y * map.width() + point.x) as usize)
        };
        for parent in snapshot.parents.iter().filter(|parent| parent.active) {
            if let Some(idx) = cell_index(parent.position) {
                grid[idx] = (parent.glyph, self.palette.parent_style());
            }
        }
        if let Some(idx) = cell_index(snapshot.player.position) {
            grid[idx] = (
                snapshot.player.glyph,
                self.palette.player_style(snapshot.player.display),
            );
        }

        let lines: Vec<Line> = grid
            .chunks(width)
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|(glyph, style)| Span::styled(glyph.to_string(), *style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_hud(&self, frame: &mut Frame<'_>, area: Rect, snapshot: &FrameSnapshot) {
        let rules = &self.world.config().rules;
        let timers = snapshot.timers;
        let active = snapshot.parents.iter().filter(|parent| parent.active).count();
        let warning = if timers.warning > 0 {
            Line::styled(
                format!("PARENT INCOMING! ({})", timers.warning),
                self.palette.warning_style(),
            )
        } else {
            Line::raw("")
        };
        let lines = vec![
            Line::raw(format!("Map       {}", snapshot.map_name)),
            Line::from(vec![
                Span::raw("Status    "),
                Span::styled(
                    snapshot.player.display.label(),
                    self.palette.player_style(snapshot.player.display),
                ),
            ]),
            Line::raw(format!("Time      {}", timers.game_time)),
            Line::raw(format!("Survived  {}/{}s", timers.total_time, rules.survival_goal)),
            Line::raw(format!("Next check {}", snapshot.next_check_in)),
            Line::raw(format!("Score     {}", snapshot.player.score)),
            Line::raw(format!("Parents   {active}/{PARENT_SLOTS}")),
            Line::styled(
                format!("Hide in {}", snapshot.map_id.hide_hint()),
                self.palette.hide_style(),
            ),
            warning,
            Line::raw("WASD move  space pause"),
            Line::raw("m menu  q quit"),
        ];
        let block = Block::default()
            .title(self.palette.title("Status"))
            .borders(Borders::ALL);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_events(&self, frame: &mut Frame<'_>, area: Rect) {
        let events: Vec<ListItem> = self
            .event_log
            .iter()
            .rev()
            .map(|entry| {
                let style = self.palette.event_style(entry.kind);
                let text = format!("[t{:>4}] {}", entry.tick, entry.message);
                ListItem::new(Span::styled(text, style))
            })
            .collect();
        let block = Block::default()
            .title(self.palette.title("Recent Events"))
            .borders(Borders::ALL);
        frame.render_widget(List::new(events).block(block), area);
    }

    fn draw_pause_banner(&self, frame: &mut Frame<'_>, area: Rect) {
        let area = centered_rect(30, 3, area);
        let paragraph = Paragraph::new("PAUSED - space to resume")
            .alignment(Alignment::Center)
            .style(self.palette.paused_style())
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }

    fn draw_game_over(&self, frame: &mut Frame<'_>, snapshot: &FrameSnapshot) {
        let won = snapshot.session == SessionState::Win;
        let headline = if won { "You made it!" } else { "Caught!" };
        let goal = self.world.config().rules.survival_goal;
        let lines = vec![
            Line::styled(headline, self.palette.outcome_style(won)),
            Line::raw(""),
            Line::raw(format!("Map       {}", snapshot.map_name)),
            Line::raw(format!("Score     {}", snapshot.player.score)),
            Line::raw(format!("Survived  {}s of {goal}s", snapshot.timers.total_time)),
            Line::raw(""),
            Line::raw("R  Play again"),
            Line::raw("M  Main menu"),
        ];
        let block = Block::default()
            .title(self.palette.title("Game Over"))
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, centered_rect(44, 12, frame.area()));
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[derive(Clone, Debug)]
struct EventEntry {
    tick: u64,
    message: String,
    kind: EventKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EventKind {
    Parent,
    Clear,
    Survival,
    Outcome,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Open,
    Bed,
    Hide,
}

#[derive(Debug, Clone, Serialize)]
struct HeadlessReport {
    initial: FrameStats,
    frames: Vec<FrameStats>,
    summary: ReportSummary,
}

impl HeadlessReport {
    fn new(initial: FrameStats) -> Self {
        Self {
            initial,
            frames: Vec::new(),
            summary: ReportSummary::default(),
        }
    }

    fn record(&mut self, stats: FrameStats) {
        self.frames.push(stats);
    }

    fn finalize(&mut self) {
        self.summary = ReportSummary::from(&self.initial, &self.frames);
    }

    fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self).context("failed to serialize headless report")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
struct FrameStats {
    tick: u64,
    session: SessionState,
    display: DisplayState,
    score: u32,
    total_time: u32,
    active_parents: usize,
    advanced: bool,
    spawned: bool,
    outcome: Option<Outcome>,
}

impl FrameStats {
    fn from_snapshot(snapshot: &FrameSnapshot) -> Self {
        Self {
            tick: snapshot.timers.game_time,
            session: snapshot.session,
            display: snapshot.player.display,
            score: snapshot.player.score,
            total_time: snapshot.timers.total_time,
            active_parents: snapshot.parents.iter().filter(|parent| parent.active).count(),
            advanced: false,
            spawned: false,
            outcome: None,
        }
    }

    fn with_events(mut self, events: &TickEvents, advanced: bool) -> Self {
        self.advanced = advanced;
        self.spawned = events.spawned.is_some();
        self.outcome = events.outcome;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct ReportSummary {
    frame_count: usize,
    ticks_simulated: usize,
    final_tick: u64,
    final_session: SessionState,
    final_score: u32,
    max_score: u32,
    parents_spawned: usize,
    wins: usize,
    losses: usize,
}

impl ReportSummary {
    fn from(initial: &FrameStats, frames: &[FrameStats]) -> Self {
        let Some(final_stats) = frames.last() else {
            return Self {
                final_tick: initial.tick,
                final_session: initial.session,
                final_score: initial.score,
                max_score: initial.score,
                ..Self::default()
            };
        };

        let count_outcome = |wanted: Outcome| {
            frames
                .iter()
                .filter(|frame| frame.outcome == Some(wanted))
                .count()
        };

        Self {
            frame_count: frames.len(),
            ticks_simulated: frames.iter().filter(|frame| frame.advanced).count(),
            final_tick: final_stats.tick,
            final_session: final_stats.session,
            final_score: final_stats.score,
            max_score: frames
                .iter()
                .map(|frame| frame.score)
                .max()
                .unwrap_or(initial.score),
            parents_spawned: frames.iter().filter(|frame| frame.spawned).count(),
            wins: count_outcome(Outcome::Win),
            losses: count_outcome(Outcome::Lost),
        }
    }
}

fn report_file_path_from_env() -> Option<PathBuf> {
    std::env::var_os("SNEAKFLIGHT_TERMINAL_HEADLESS_REPORT").and_then(|raw| {
        if raw.is_empty() {
            None
        } else {
            Some(PathBuf::from(raw))
        }
    })
}

struct Palette {
    level: Option<ColorLevel>,
}

impl Palette {
    fn detect() -> Self {
        Self {
            level: on_cached(Stream::Stdout),
        }
    }

    fn has_color(&self) -> bool {
        self.level.is_some()
    }

    fn fg(&self, color: Color) -> Style {
        if self.has_color() {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    fn header_style(&self) -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    fn accent_style(&self) -> Style {
        Style::default().fg(Color::LightMagenta)
    }

    fn paused_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    fn running_style(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    fn title<T: Into<String>>(&self, title: T) -> Span<'static> {
        Span::styled(title.into(), self.header_style())
    }

    fn hide_style(&self) -> Style {
        self.fg(Color::Cyan)
    }

    fn warning_style(&self) -> Style {
        self.fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    fn parent_style(&self) -> Style {
        self.fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    fn player_style(&self, display: DisplayState) -> Style {
        let style = self.fg(Color::Green).add_modifier(Modifier::BOLD);
        if display == DisplayState::Caught {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    fn outcome_style(&self, won: bool) -> Style {
        self.fg(if won { Color::Green } else { Color::Red })
            .add_modifier(Modifier::BOLD)
    }

    fn event_style(&self, kind: EventKind) -> Style {
        let color = match kind {
            EventKind::Parent => Color::Red,
            EventKind::Clear => Color::Green,
            EventKind::Survival => Color::Yellow,
            EventKind::Outcome => Color::LightMagenta,
            EventKind::Info => Color::Cyan,
        };
        Style::default().fg(color)
    }

    /// Glyph and style for one map cell. Zone floor is dotted so zones stay visible without colour.
    fn terrain_symbol(&self, terrain: Terrain, zone: Zone) -> (char, Style) {
        let rich_color = self
            .level
            .is_some_and(|level| level.has_16m || level.has_256);
        match (terrain, zone) {
            (Terrain::Wall, _) => ('#', self.fg(Color::White)),
            (Terrain::Floor, Zone::Open) => (' ', Style::default()),
            (Terrain::Decor(glyph), Zone::Open) => (glyph, self.fg(Color::DarkGray)),
            (terrain, Zone::Bed | Zone::Hide) => {
                let color = if zone == Zone::Bed {
                    Color::Yellow
                } else {
                    Color::Cyan
                };
                let glyph = match terrain {
                    Terrain::Floor => '.',
                    other => other.glyph(),
                };
                let style = if rich_color {
                    Style::default().fg(Color::Black).bg(color)
                } else {
                    self.fg(color)
                };
                (glyph, style)
            }
        }
    }
}
