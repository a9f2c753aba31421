//! TUI application model (Elm architecture).

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;
use tracing::debug;

use growthcalc_core::{
    EngineEvent, EngineSnapshot, GrowthEngine, RunPhase, SequenceKind, SequencePoint,
};

use crate::bridge::TuiBridgeObserver;
use crate::chart::render_sequence_chart;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, LogScrollState};
use crate::messages::TuiMessage;
use crate::results::render_results;
use crate::styles::ColorTheme;

/// Log lines kept in memory.
pub const MAX_LOGS: usize = 500;
/// Lines moved by PgUp/PgDn.
pub const PAGE_SIZE: usize = 10;
/// Amount `]`/`[` add to or remove from the base.
pub const BASE_STEP: f64 = 0.5;
/// Capacity of the engine-to-TUI channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 4096;

const TICK_RATE: Duration = Duration::from_millis(250);

/// Screen regions of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub linear: Rect,
    pub exponential: Rect,
    pub results: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

/// TUI application state (Elm Model).
pub struct TuiApp {
    /// Engine the keys control.
    engine: GrowthEngine,
    /// Message receiver.
    rx: Receiver<TuiMessage>,
    /// Last known engine state, kept current from events.
    pub view: EngineSnapshot,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Log messages.
    pub logs: Vec<String>,
    pub log_scroll: LogScrollState,
    pub show_logs: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
    /// Start time of the current run.
    pub started_at: Option<Instant>,
    theme: ColorTheme,
}

impl TuiApp {
    /// Create an app that reads messages from `rx`.
    ///
    /// The caller is responsible for feeding engine events into the
    /// channel; see [`TuiApp::attach`].
    #[must_use]
    pub fn new(engine: GrowthEngine, rx: Receiver<TuiMessage>) -> Self {
        let view = engine.snapshot();
        Self {
            engine,
            rx,
            view,
            should_quit: false,
            logs: Vec::new(),
            log_scroll: LogScrollState::new(),
            show_logs: true,
            terminal_width: 80,
            terminal_height: 24,
            started_at: None,
            theme: ColorTheme::default(),
        }
    }

    /// Create an app and register a [`TuiBridgeObserver`] on `engine`.
    #[must_use]
    pub fn attach(engine: GrowthEngine) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(EVENT_CHANNEL_CAPACITY);
        engine.register(Arc::new(TuiBridgeObserver::new(tx)));
        Self::new(engine, rx)
    }

    /// Update the model with incoming messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Engine(event) => self.handle_engine_event(event),
            TuiMessage::Log(line) => self.push_log(line),
            TuiMessage::Tick => {}
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
            TuiMessage::Quit => self.quit(),
        }
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::BaseChanged { base } => self.view.base = base,
            EngineEvent::ExponentChanged { exponent } => self.view.exponent = exponent,
            EngineEvent::RunningChanged { running: true } => {
                self.view.is_running = true;
                self.view.phase = RunPhase::Running;
                self.started_at = Some(Instant::now());
                self.push_log(format!(
                    "Run started: base {}, exponent {}",
                    self.view.base, self.view.exponent
                ));
            }
            EngineEvent::RunningChanged { running: false } => {
                let was_running = self.view.is_running;
                // Events may have been dropped under load; catch up in full.
                self.view = self.engine.snapshot();
                match self.view.phase {
                    RunPhase::Cancelled if was_running => self.push_log("[WARN] Run stopped".into()),
                    RunPhase::Rejected => {
                        let line = format!("[ERROR] Run rejected: {}", self.view.status_label);
                        self.push_log(line);
                    }
                    _ => {}
                }
            }
            EngineEvent::PointsCleared { kind } => self.view_points(kind).clear(),
            EngineEvent::PointAppended { kind, point } => {
                let points = self.view_points(kind);
                if usize::try_from(point.index) == Ok(points.len() + 1) {
                    points.push(point);
                } else {
                    // A dropped event left a gap.
                    let current = self.engine.points(kind);
                    *self.view_points(kind) = current;
                }
            }
            EngineEvent::StatusChanged { status } => {
                self.push_log(status.clone());
                self.view.status_label = status;
            }
            EngineEvent::ResultChanged { kind, label } => {
                if let Some(label) = &label {
                    self.push_log(format!("{kind}: {label}"));
                }
                match kind {
                    SequenceKind::Linear => self.view.linear_result_label = label,
                    SequenceKind::Exponential => self.view.exponential_result_label = label,
                }
            }
            EngineEvent::Finished => {
                let elapsed = self.started_at.map(|t| t.elapsed()).unwrap_or_default();
                self.push_log(format!("[OK] Calculation finished in {elapsed:.3?}"));
            }
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.quit(),
            KeyAction::Start => self.engine.start(),
            KeyAction::Stop => self.engine.stop(),
            KeyAction::ExponentUp => {
                self.engine.set_exponent(self.engine.exponent().saturating_add(1));
            }
            KeyAction::ExponentDown => {
                self.engine.set_exponent(self.engine.exponent().saturating_sub(1));
            }
            KeyAction::BaseUp => self.engine.set_base(self.engine.base() + BASE_STEP),
            KeyAction::BaseDown => self.engine.set_base(self.engine.base() - BASE_STEP),
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::ScrollUp => self.log_scroll.scroll_up(),
            KeyAction::ScrollDown => self.log_scroll.scroll_down(self.logs.len()),
            KeyAction::PageUp => self.log_scroll.page_up(PAGE_SIZE),
            KeyAction::PageDown => self.log_scroll.page_down(PAGE_SIZE, self.logs.len()),
            KeyAction::Home => self.log_scroll.home(),
            KeyAction::End => self.log_scroll.end(self.logs.len()),
            KeyAction::None => {}
        }
    }

    fn view_points(&mut self, kind: SequenceKind) -> &mut Vec<SequencePoint> {
        match kind {
            SequenceKind::Linear => &mut self.view.linear_points,
            SequenceKind::Exponential => &mut self.view.exponential_points,
        }
    }

    fn quit(&mut self) {
        self.engine.stop();
        self.should_quit = true;
    }

    fn push_log(&mut self, line: String) {
        self.logs.push(line);
        if self.logs.len() > MAX_LOGS {
            let excess = self.logs.len() - MAX_LOGS;
            self.logs.drain(..excess);
            self.log_scroll.on_trimmed(excess);
        }
        self.log_scroll.on_new_message(self.logs.len());
    }

    /// Elapsed time of the current or last run.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|t| t.elapsed())
    }

    /// Split the screen into dashboard regions.
    #[must_use]
    pub fn compute_layout(area: Rect, show_logs: bool) -> DashboardLayout {
        let mut constraints = vec![
            Constraint::Length(3), // header
            Constraint::Min(8),    // charts
            Constraint::Length(5), // results
        ];
        if show_logs {
            constraints.push(Constraint::Length(8));
        }
        constraints.push(Constraint::Length(2)); // footer

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        DashboardLayout {
            header: rows[0],
            linear: charts[0],
            exponential: charts[1],
            results: rows[2],
            logs: show_logs.then(|| rows[3]),
            footer: rows[rows.len() - 1],
        }
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let layout = Self::compute_layout(frame.area(), self.show_logs);
        let view = &self.view;

        render_header(
            frame,
            layout.header,
            view.base,
            view.exponent,
            view.is_running,
            &self.theme,
        );
        render_sequence_chart(
            frame,
            layout.linear,
            SequenceKind::Linear,
            &view.linear_points,
            &self.theme,
        );
        render_sequence_chart(
            frame,
            layout.exponential,
            SequenceKind::Exponential,
            &view.exponential_points,
            &self.theme,
        );
        render_results(frame, layout.results, view, &self.theme);
        if let Some(area) = layout.logs {
            render_logs(frame, area, &self.logs, &self.log_scroll, &self.theme);
        }
        render_footer(frame, layout.footer, &self.theme);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop until the user quits.
    ///
    /// Any run still in progress is stopped on the way out.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        self.engine.stop();
        Self::teardown_terminal(&mut terminal)?;
        debug!("TUI closed");
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if self.should_quit {
                return Ok(());
            }

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_message(TuiMessage::KeyPress(map_key(key)));
                    }
                    Event::Resize(width, height) => {
                        self.handle_message(TuiMessage::Resize { width, height });
                    }
                    _ => {}
                }
            } else {
                self.handle_message(TuiMessage::Tick);
            }

            self.update();
        }
    }
}
