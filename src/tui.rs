//! TUI (Terminal User Interface) for Code Buster
//!
//! Full-screen front end built on Ratatui. It renders a [`Session`] and maps
//! key presses to [`UserAction`]s; the rules all live in the session.
//!
//! # Layout
//! Title, board (one row per attempt with its pegs), palette, status line,
//! key help. A "How to Play" overlay is shown at start and toggled with `?`.

use crate::cli::{INSTRUCTIONS, describe_rejection, encouragement, tries};
use crate::code::Code;
use crate::feedback::{Feedback, Peg};
use crate::game_state::{GameInterface, GameStatus, Session, UserAction};
use crate::palette::{Palette, Symbol};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::Rng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const PEG_EXACT: &str = "●";
const PEG_PARTIAL: &str = "○";
const PEG_EMPTY: &str = "·";
const SLOT_FILLED: &str = " ● ";
const SLOT_EMPTY: &str = " ◌ ";

const HEADER_STYLE: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow);
const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Terminal color for a palette symbol.
fn symbol_color(symbol: &Symbol) -> Color {
    match symbol.name() {
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "purple" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "pink" => Color::LightMagenta,
        _ => Color::Gray,
    }
}

fn peg_span(peg: Peg) -> Span<'static> {
    match peg {
        Peg::Exact => Span::styled(PEG_EXACT, Style::new().fg(Color::White)),
        Peg::Partial => Span::styled(PEG_PARTIAL, Style::new().fg(Color::White)),
        Peg::Empty => Span::styled(PEG_EMPTY, DIM_STYLE),
    }
}

fn slot_span(symbol: Option<&Symbol>) -> Span<'static> {
    match symbol {
        Some(symbol) => Span::styled(SLOT_FILLED, Style::new().fg(symbol_color(symbol))),
        None => Span::styled(SLOT_EMPTY, DIM_STYLE),
    }
}

/// Everything the screen shows, copied out of the session so the frame can
/// be redrawn without it (help toggling, resizes).
#[derive(Debug, Default)]
struct BoardSnapshot {
    rows: Vec<(Code, Feedback)>,
    current: Vec<Symbol>,
    palette: Vec<(Symbol, bool)>,
    status: Option<GameStatus>,
    secret: Option<Code>,
    code_length: usize,
    max_attempts: usize,
}

impl BoardSnapshot {
    fn capture<R: Rng>(session: &Session<R>) -> Self {
        let config = session.config();
        Self {
            rows: session
                .history()
                .iter()
                .map(|r| (r.guess().clone(), r.feedback().clone()))
                .collect(),
            current: session.current_guess().to_vec(),
            palette: config
                .palette
                .symbols()
                .iter()
                .map(|s| (s.clone(), session.is_symbol_used(s)))
                .collect(),
            status: Some(session.status()),
            secret: session.revealed_secret().cloned(),
            code_length: config.code_length,
            max_attempts: config.max_attempts,
        }
    }
}

/// Main TUI interface component.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    snapshot: BoardSnapshot,
    show_help: bool,
    error_message: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            snapshot: BoardSnapshot::default(),
            show_help: true,
            error_message: String::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let snapshot = &self.snapshot;
        let show_help = self.show_help;
        let error_message = self.error_message.as_str();
        self.terminal.draw(|f| {
            Self::render_static(f, snapshot, error_message, show_help);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, snapshot: &BoardSnapshot, error_message: &str, show_help: bool) {
        let board_height = u16::try_from(snapshot.max_attempts).unwrap_or(u16::MAX).saturating_add(3);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Title
                Constraint::Length(board_height), // Board
                Constraint::Min(5),               // Palette
                Constraint::Length(3),            // Status
                Constraint::Length(3),            // Keys
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], snapshot);
        Self::render_palette(f, chunks[2], snapshot);
        Self::render_status(f, chunks[3], snapshot, error_message);
        Self::render_keys(f, chunks[4], snapshot);

        if show_help {
            Self::render_help(f);
        }
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("CODE BUSTER - can you crack the secret code?")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, snapshot: &BoardSnapshot) {
        let playing = snapshot.status == Some(GameStatus::Playing);
        let mut lines = Vec::with_capacity(snapshot.max_attempts + 1);

        for row in 0..snapshot.max_attempts {
            let mut spans = vec![Span::raw(format!("{:>3} ", row + 1))];
            if let Some((guess, feedback)) = snapshot.rows.get(row) {
                spans.extend(guess.symbols().iter().map(|s| slot_span(Some(s))));
                spans.push(Span::raw("   "));
                spans.extend(feedback.pegs().iter().map(|&p| peg_span(p)));
            } else if playing && row == snapshot.rows.len() {
                spans.extend((0..snapshot.code_length).map(|i| slot_span(snapshot.current.get(i))));
                spans.push(Span::styled("   <", INFO_STYLE));
            } else {
                spans.extend((0..snapshot.code_length).map(|_| slot_span(None)));
            }
            lines.push(Line::from(spans));
        }

        if let Some(secret) = &snapshot.secret {
            let mut spans = vec![Span::styled("Secret: ", INFO_STYLE)];
            spans.extend(secret.symbols().iter().map(|s| slot_span(Some(s))));
            spans.push(Span::raw(format!("  ({secret})")));
            lines.push(Line::from(spans));
        }

        let board = Paragraph::new(lines).block(Block::default().title("Your Guesses").borders(Borders::ALL));
        f.render_widget(board, area);
    }

    fn render_palette(f: &mut Frame, area: Rect, snapshot: &BoardSnapshot) {
        let mut spans = Vec::new();
        for (i, (symbol, used)) in snapshot.palette.iter().enumerate() {
            let style = if *used {
                DIM_STYLE.add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::new().fg(symbol_color(symbol))
            };
            spans.push(Span::styled(format!("{}:{symbol}", i + 1), style));
            spans.push(Span::raw("  "));
        }

        let current = format!(
            "Current guess ({}/{})",
            snapshot.current.len(),
            snapshot.code_length
        );
        let lines = vec![Line::from(spans), Line::from(""), Line::from(current)];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Choose Colors").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, snapshot: &BoardSnapshot, error_message: &str) {
        let used = snapshot.rows.len();
        let line = if !error_message.is_empty() {
            Line::from(Span::styled(error_message.to_string(), ERROR_STYLE))
        } else {
            match snapshot.status {
                Some(GameStatus::Won) => Line::from(Span::styled(
                    format!("CONGRATULATIONS! You solved it in {used} {}!", tries(used)),
                    SUCCESS_STYLE,
                )),
                Some(GameStatus::Lost) => Line::from(Span::styled(
                    "Game Over! The secret code is revealed above.",
                    LOSS_STYLE,
                )),
                Some(GameStatus::Playing) | None => {
                    let mut text = format!("Attempt {} of {}", used + 1, snapshot.max_attempts);
                    if let Some(cheer) = encouragement(used) {
                        text.push_str(" - ");
                        text.push_str(cheer);
                    }
                    Line::from(text)
                }
            }
        };

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_keys(f: &mut Frame, area: Rect, snapshot: &BoardSnapshot) {
        let text = match snapshot.status {
            Some(GameStatus::Playing) | None => {
                "1-8: Add color | BACKSPACE: Undo | ENTER: Submit | N: New game | ?: Help | ESC: Quit"
            }
            Some(_) => "N: New game | ?: Help | ESC: Quit",
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_help(f: &mut Frame) {
        let area = centered(f.area(), 46, 12);
        let mut lines = vec![Line::from(Span::styled("How to Play", HEADER_STYLE)), Line::from("")];
        lines.extend(INSTRUCTIONS.iter().map(|l| Line::from(format!("  {l}"))));
        lines.push(Line::from(format!("  {PEG_EXACT} right color, right spot")));
        lines.push(Line::from(format!("  {PEG_PARTIAL} right color, wrong spot")));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Press any key to start playing", INFO_STYLE)));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }

    /// Blocks until the next key press and maps it to an action.
    fn handle_input(&mut self, palette: &Palette) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, palette)),
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("handle_input() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, palette: &Palette) -> Option<UserAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UserAction::Exit);
        }

        if self.show_help {
            self.show_help = false;
            self.draw_or_log();
            return None;
        }

        self.error_message.clear();
        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                let Some(symbol) = palette.parse_symbol(&c.to_string()) else {
                    self.error_message = format!("There is no color {c}.");
                    self.draw_or_log();
                    return None;
                };
                Some(UserAction::AddSymbol(symbol))
            }
            KeyCode::Backspace => Some(UserAction::RemoveLast),
            KeyCode::Enter => Some(UserAction::Submit),
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Char('?' | 'h' | 'H') => {
                self.show_help = true;
                self.draw_or_log();
                None
            }
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl GameInterface for TuiInterface {
    fn render<R: Rng>(&mut self, session: &Session<R>) {
        self.snapshot = BoardSnapshot::capture(session);
        self.draw_or_log();
    }

    fn read_action(&mut self, palette: &Palette) -> Option<UserAction> {
        loop {
            match self.handle_input(palette) {
                Ok(Some(action)) => {
                    debug_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error, exiting: {}", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_rejection<R: Rng>(&mut self, action: &UserAction, session: &Session<R>) {
        self.error_message = describe_rejection(action, session);
    }

    fn display_exit_message(&mut self) {
        info_log!("Exit requested");
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
