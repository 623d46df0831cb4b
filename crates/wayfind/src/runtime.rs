//! Terminal runtime: drives a [`TileBoard`] through the navigation engine.
//!
//! [`Session`] holds the board, the dispatcher and the handful of app-level
//! keys, and can be driven without a terminal. [`Program`] wraps a session
//! with terminal setup, the async event loop and frame pacing.

use std::io::{self, stdout, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;
use wayfind_core::{
    ConfigError, Dispatcher, Disposition, GeometryProvider, NavConfig, NodeId, ScopeId,
};
use wayfind_widgets::TileBoard;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The navigation configuration was rejected.
    #[error("invalid navigation config: {0}")]
    Config(#[from] ConfigError),
    /// The log subscriber could not be installed.
    #[error("failed to set up logging: {0}")]
    Log(String),
}

/// Configuration options for a [`Program`].
///
/// All fields have sensible defaults (see [`Default`] impl). Use struct
/// update syntax to override only the options you need:
///
/// ```rust,ignore
/// use wayfind::{NavConfig, ProgramOptions};
///
/// let opts = ProgramOptions {
///     fps: 30,
///     log_file: Some("wayfind.log".into()),
///     nav: NavConfig { row_tolerance: 8.0, ..NavConfig::default() },
///     ..ProgramOptions::default()
/// };
/// ```
pub struct ProgramOptions {
    /// Target frames per second for rendering and scroll animation
    /// (default: 60, max: 120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Set terminal title.
    pub title: Option<String>,
    /// Whether to catch panics and restore terminal (default: true).
    pub catch_panics: bool,
    /// Whether to quit on SIGINT (default: true).
    pub handle_signals: bool,
    /// Write `tracing` output to this file. Filtered by `RUST_LOG`.
    pub log_file: Option<std::path::PathBuf>,
    /// Navigation engine configuration.
    pub nav: NavConfig,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            nav: NavConfig::default(),
        }
    }
}

/// Install a global `tracing` subscriber that appends to `path`.
///
/// A TUI owns the terminal, so logs go to a file. The filter comes from
/// `RUST_LOG`, defaulting to debug output from the wayfind crates.
pub fn init_logging(path: impl AsRef<Path>) -> Result<(), ProgramError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wayfind=debug,wayfind_core=debug,wayfind_widgets=debug"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| ProgramError::Log(e.to_string()))
}

/// Whether the session wants to keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A board wired to a dispatcher, plus the app-level keys.
///
/// Navigation keys go to the engine first. Keys it ignores are app keys:
///
/// | Key | Action |
/// |-----|--------|
/// | `Tab` | Open or close the sidebar menu as its own scope |
/// | `o` | Move focus to the sidebar without opening the menu |
/// | `x` | Remove the focused content tile |
/// | `v` | Hide or show the content tile after the focused one |
/// | `Esc` | Close the menu, or quit |
/// | `q`, `Ctrl-C` | Quit |
pub struct Session {
    board: TileBoard,
    dispatcher: Dispatcher,
    menu: Option<ScopeId>,
    last: Disposition,
}

impl Session {
    /// Validate `nav`, then mount the content scope and cold-start focus.
    pub fn new(board: TileBoard, nav: NavConfig) -> Result<Self, ConfigError> {
        nav.validate()?;
        let mut session = Self {
            board,
            dispatcher: Dispatcher::new(nav),
            menu: None,
            last: Disposition::Ignored,
        };
        session
            .dispatcher
            .activate(TileBoard::CONTENT, &mut session.board);
        session.sync_focus();
        Ok(session)
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut TileBoard {
        &mut self.board
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Outcome of the last navigation event.
    pub fn last_disposition(&self) -> Disposition {
        self.last
    }

    pub fn into_board(mut self) -> TileBoard {
        self.dispatcher.shutdown();
        self.board
    }

    /// Handle one key event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        let flow = match self.dispatcher.handle_key(&mut self.board, key) {
            Disposition::Ignored => self.app_key(key.code),
            Disposition::PassThrough => {
                self.activate();
                Flow::Continue
            }
            d => {
                self.last = d;
                Flow::Continue
            }
        };
        self.sync_focus();
        flow
    }

    fn app_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Esc if self.menu.is_none() => return Flow::Quit,
            KeyCode::Esc => self.close_menu(),
            KeyCode::Tab if self.menu.is_some() => self.close_menu(),
            KeyCode::Tab => self.open_menu(),
            KeyCode::Char('o') => {
                self.board.focus_sidebar();
            }
            KeyCode::Char('x') => {
                if let Some(node) = self.focused_content() {
                    self.board.remove_tile(node);
                }
            }
            KeyCode::Char('v') => self.toggle_next(),
            other => trace!(key = ?other, "unbound key"),
        }
        Flow::Continue
    }

    fn activate(&mut self) {
        self.last = Disposition::PassThrough;
        let Some(node) = self.board.activate_focused() else {
            return;
        };
        if self.menu.is_some() && self.board.contains(TileBoard::SIDEBAR, node) {
            self.close_menu();
        }
    }

    fn open_menu(&mut self) {
        self.menu = Some(self.dispatcher.activate(TileBoard::SIDEBAR, &mut self.board));
    }

    fn close_menu(&mut self) {
        if let Some(id) = self.menu.take() {
            self.dispatcher.deactivate(id, &mut self.board);
        }
    }

    fn focused_content(&self) -> Option<NodeId> {
        self.board
            .focused()
            .filter(|n| self.board.contains(TileBoard::CONTENT, *n))
    }

    /// Toggle the content tile that follows the focused one.
    fn toggle_next(&mut self) {
        let nodes = self.board.focusable_nodes(TileBoard::CONTENT);
        let next = match self.focused_content() {
            Some(node) => nodes
                .iter()
                .position(|n| *n == node)
                .and_then(|i| nodes.get(i + 1)),
            None => nodes.first(),
        };
        let Some(&next) = next else {
            return;
        };
        let hidden = self.board.tile(next).is_some_and(|t| t.hidden);
        self.board.set_hidden(next, !hidden);
        debug!(node = %next, hidden = !hidden, "toggled tile visibility");
    }

    /// Deliver the board's pending focus changes to the dispatcher until
    /// none are left. A restore queues one more change, which lands inside
    /// the scope.
    fn sync_focus(&mut self) {
        loop {
            let changes = self.board.take_focus_changes();
            if changes.is_empty() {
                break;
            }
            for change in changes {
                let d = self.dispatcher.focus_changed(&mut self.board, change);
                if let Disposition::Restored(node) = d {
                    info!(node = %node, "focus recovered");
                    self.last = d;
                }
            }
        }
    }

    /// Advance scroll animations. Returns `true` if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.board.tick()
    }

    /// Lay the board out for `area` and draw it with a status line.
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let board_area = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        self.board.resize(board_area);
        self.board.view(frame);

        if area.height > 0 {
            let status = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let hints = "arrows move · enter open · tab menu · o steal · x remove · v hide next · q quit";
            let line = format!("{} │ {}", describe(&self.last), hints);
            frame.render_widget(
                Paragraph::new(Line::styled(line, Style::default().fg(Color::DarkGray))),
                status,
            );
        }
    }
}

fn describe(d: &Disposition) -> String {
    match d {
        Disposition::Ignored => "ready".to_string(),
        Disposition::PassThrough => "activated".to_string(),
        Disposition::Moved { from, to } => format!("moved {from} → {to}"),
        Disposition::Blocked { at } => format!("blocked at {at}"),
        Disposition::Restored(node) => format!("restored {node}"),
        Disposition::Observed(node) => format!("focused {node}"),
        Disposition::Inert => "nothing to focus".to_string(),
    }
}

/// The program runtime. Manages terminal setup, the event loop, and frame
/// pacing for a [`Session`].
///
/// # Example
///
/// ```rust,ignore
/// use wayfind::{Program, ProgramError, ProgramOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let board = build_board();
///     let board = Program::new(board, ProgramOptions::default())?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program {
    session: Session,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
    needs_redraw: bool,
}

impl Program {
    /// Set up logging, validate the configuration, then take over the
    /// terminal.
    pub fn new(board: TileBoard, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            init_logging(path)?;
        }
        let session = Session::new(board, options.nav.clone())?;
        let terminal = init_terminal(&options)?;
        info!(fps = options.fps, "program initialized");
        Ok(Self {
            session,
            terminal,
            options,
            needs_redraw: true,
        })
    }

    /// Run until quit and hand back the final board.
    pub async fn run(mut self) -> Result<TileBoard, ProgramError> {
        let result = self.event_loop().await;
        info!("shutting down");
        restore_terminal(&self.options)?;
        result?;
        Ok(self.session.into_board())
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;
        let mut events = EventStream::new();

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    debug!("received ctrl+c signal");
                    return Ok(());
                }

                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => {
                        if self.session.handle_key(&key) == Flow::Quit {
                            return Ok(());
                        }
                        self.needs_redraw = true;
                    }
                    Some(Ok(Event::Resize(..))) => self.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                },

                _ = frame_interval.tick() => {
                    if self.session.tick() {
                        self.needs_redraw = true;
                    }
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        let session = &mut self.session;
        self.terminal.draw(|frame| session.render(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Install panic hook that restores terminal (only once to avoid stacking)
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();
    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if let Some(ref title) = options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(writer))?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool) -> Result<(), io::Error> {
    // Best effort: keep going after individual failures.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
