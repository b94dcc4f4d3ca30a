use crate::debug_log;
use crate::game_state::{GameInterface, GameStatus, Session, UserAction};
use crate::palette::Palette;
use clap::Parser;
use rand::Rng;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Code Buster: crack the secret color code
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Play in the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Seed for the secret generator, for repeatable games
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of the user cache directory
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const INSTRUCTIONS: [&str; 4] = [
    "Guess the secret 4-color code",
    "You have 10 tries to win",
    "Choose from 8 colors",
    "No duplicate colors allowed!",
];

/// Cheer line for a game in progress, by attempts used so far.
#[must_use]
pub fn encouragement(attempts_used: usize) -> Option<&'static str> {
    match attempts_used {
        0 => None,
        1..=3 => Some("Great start!"),
        4..=6 => Some("You're getting closer!"),
        7 | 8 => Some("Almost there!"),
        _ => Some("Last chance! You can do it!"),
    }
}

/// Explains why the session ignored `action`.
#[must_use]
pub fn describe_rejection<R: Rng>(action: &UserAction, session: &Session<R>) -> String {
    if session.status().is_over() {
        return "The game is over. Start a new game to keep playing.".to_string();
    }
    let length = session.config().code_length;
    match action {
        UserAction::AddSymbol(symbol) if session.is_symbol_used(symbol) => {
            format!("{symbol} is already in your guess.")
        }
        UserAction::AddSymbol(_) if session.is_guess_complete() => {
            format!("Your guess already has {length} colors. Submit or undo.")
        }
        UserAction::AddSymbol(symbol) => format!("{symbol} is not one of the colors."),
        UserAction::RemoveLast => "Nothing to undo.".to_string(),
        UserAction::Submit => format!(
            "Pick {length} colors before submitting ({}/{length}).",
            session.current_guess().len()
        ),
        UserAction::NewGame | UserAction::Exit => String::new(),
    }
}

#[must_use]
pub fn tries(count: usize) -> &'static str {
    if count == 1 { "try" } else { "tries" }
}

/// Line command: a control word, or one or more colors.
#[derive(Debug, PartialEq)]
pub enum Command {
    Actions(Vec<UserAction>),
    Help,
    Invalid(String),
}

/// Parses one input line. Colors are names or palette numbers separated by
/// spaces or commas; an empty line submits.
#[must_use]
pub fn parse_command(line: &str, palette: &Palette) -> Command {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "" | "submit" | "s" => return Command::Actions(vec![UserAction::Submit]),
        "undo" | "u" => return Command::Actions(vec![UserAction::RemoveLast]),
        "new" | "next" | "n" => return Command::Actions(vec![UserAction::NewGame]),
        "exit" | "quit" | "q" => return Command::Actions(vec![UserAction::Exit]),
        "help" | "?" => return Command::Help,
        _ => {}
    }

    let mut actions = Vec::new();
    for token in line.split([' ', ',']).filter(|t| !t.is_empty()) {
        match palette.parse_symbol(token) {
            Some(symbol) => actions.push(UserAction::AddSymbol(symbol)),
            None => return Command::Invalid(token.to_string()),
        }
    }
    Command::Actions(actions)
}

/// Line-oriented front end over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    pending: VecDeque<UserAction>,
    last_seen: Option<(usize, GameStatus)>,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
            last_seen: None,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.writer, "{}", text.as_ref()) {
            debug_log!("Write error: {}", e);
        }
    }

    fn display_instructions(&mut self) {
        self.say("How to play:");
        for line in INSTRUCTIONS {
            self.say(format!("  - {line}"));
        }
        self.say("  - X = right color, right spot; O = right color, wrong spot");
        self.say("Enter colors by name or number, 'undo', 'submit' (or an empty line), 'new', 'exit'.");
    }

    fn display_palette(&mut self, palette: &Palette) {
        let entries: Vec<String> = palette
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}={}", i + 1, s))
            .collect();
        self.say(format!("Colors: {}", entries.join(" ")));
    }

    fn display_board<G: Rng>(&mut self, session: &Session<G>) {
        if session.history().is_empty() {
            return;
        }
        self.say("Your guesses:");
        let lines: Vec<String> = session
            .history()
            .iter()
            .enumerate()
            .map(|(i, record)| {
                format!("{:>3}. {:<40} [{}]", i + 1, record.guess().to_string(), record.feedback())
            })
            .collect();
        for line in lines {
            self.say(line);
        }
    }

    fn display_outcome<G: Rng>(&mut self, session: &Session<G>) {
        let secret = session
            .revealed_secret()
            .map(ToString::to_string)
            .unwrap_or_default();
        match session.status() {
            GameStatus::Won => {
                let used = session.attempts_used();
                self.say("CONGRATULATIONS! You cracked the code!");
                self.say(format!("The secret code was: {secret}"));
                self.say(format!("You solved it in {used} {}!", tries(used)));
            }
            GameStatus::Lost => {
                self.say("Game Over!");
                self.say(format!("The secret code was: {secret}"));
            }
            GameStatus::Playing => return,
        }
        self.say("Type 'new' to play again or 'exit' to quit.");
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn render<G: Rng>(&mut self, session: &Session<G>) {
        // Only draw once a whole line of input has been applied.
        if !self.pending.is_empty() {
            return;
        }

        let seen = (session.attempts_used(), session.status());
        if self.last_seen != Some(seen) {
            if self.last_seen.is_none() {
                self.say("Code Buster - can you crack the secret code?");
                self.display_instructions();
            } else if seen.0 == 0 {
                self.say("New game started.");
            }
            self.display_board(session);
            self.display_outcome(session);
            if !seen.1.is_over() {
                self.display_palette(session.palette());
            }
            self.last_seen = Some(seen);
        }

        if session.status() == GameStatus::Playing {
            let config = session.config();
            let mut slots: Vec<String> =
                session.current_guess().iter().map(ToString::to_string).collect();
            slots.resize(config.code_length, "_".to_string());
            let mut status = format!(
                "Attempt {} of {}",
                session.attempts_used() + 1,
                config.max_attempts
            );
            if let Some(cheer) = encouragement(session.attempts_used()) {
                status.push_str(" - ");
                status.push_str(cheer);
            }
            self.say(status);
            self.say(format!(
                "Current guess ({}/{}): {}",
                session.current_guess().len(),
                config.code_length,
                slots.join(" ")
            ));
        }
    }

    fn read_action(&mut self, palette: &Palette) -> Option<UserAction> {
        if let Some(action) = self.pending.pop_front() {
            return Some(action);
        }

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                debug_log!("Read error: {}", e);
                return Some(UserAction::Exit);
            }
        }

        match parse_command(&input, palette) {
            Command::Actions(actions) => {
                self.pending.extend(actions);
                self.pending.pop_front()
            }
            Command::Help => {
                self.display_instructions();
                self.display_palette(palette);
                None
            }
            Command::Invalid(token) => {
                self.say(format!("Unknown color or command: '{token}'. Type 'help' for help."));
                None
            }
        }
    }

    fn display_rejection<G: Rng>(&mut self, action: &UserAction, session: &Session<G>) {
        let reason = describe_rejection(action, session);
        if !reason.is_empty() {
            self.say(reason);
        }
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}
