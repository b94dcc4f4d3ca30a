use crate::code::{Code, draw_distinct};
use crate::config::{ConfigError, GameConfig};
use crate::feedback::{Feedback, evaluate};
use crate::palette::{Palette, Symbol};
use crate::{debug_log, info_log};
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// One submitted guess and the feedback it earned. Never changes once recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessRecord {
    guess: Code,
    feedback: Feedback,
}

impl GuessRecord {
    #[must_use]
    pub fn guess(&self) -> &Code {
        &self.guess
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}

/// A single game: the hidden secret, the guesses made so far and the row
/// being assembled.
///
/// Every mutator is a no-op when called at the wrong moment, so a front end
/// can forward input without checking the game rules itself.
pub struct Session<R = StdRng> {
    config: GameConfig,
    rng: R,
    secret: Code,
    history: Vec<GuessRecord>,
    current_guess: Vec<Symbol>,
    status: GameStatus,
    started_at: DateTime<Local>,
}

impl Session<StdRng> {
    /// Starts a game with an entropy-seeded generator.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Starts a game whose secrets follow from `seed`.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let secret = draw_distinct(&config.palette, config.code_length, &mut rng);
        Ok(Self::start(config, rng, secret))
    }

    /// Starts a game on a known secret. Later resets draw from `rng`.
    pub fn with_secret(config: GameConfig, secret: Code, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        check_secret(&config, &secret)?;
        Ok(Self::start(config, rng, secret))
    }

    fn start(config: GameConfig, rng: R, secret: Code) -> Self {
        info_log!(
            "New session: {} colors, code length {}, {} attempts",
            config.palette.len(),
            config.code_length,
            config.max_attempts
        );
        debug_log!("Secret: {}", secret);
        Self {
            current_guess: Vec::with_capacity(config.code_length),
            config,
            rng,
            secret,
            history: Vec::new(),
            status: GameStatus::Playing,
            started_at: Local::now(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.config.palette
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn current_guess(&self) -> &[Symbol] {
        &self.current_guess
    }

    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// The secret, once the game is over.
    #[must_use]
    pub fn revealed_secret(&self) -> Option<&Code> {
        self.status.is_over().then_some(&self.secret)
    }

    #[must_use]
    pub fn attempts_used(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> usize {
        self.config.max_attempts.saturating_sub(self.history.len())
    }

    /// Whether `symbol` is already part of the row being assembled.
    #[must_use]
    pub fn is_symbol_used(&self, symbol: &Symbol) -> bool {
        self.current_guess.contains(symbol)
    }

    #[must_use]
    pub fn is_guess_complete(&self) -> bool {
        self.current_guess.len() == self.config.code_length
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Appends `symbol` to the row being assembled. Returns false, leaving
    /// the session untouched, when the game is over, the row is full, the
    /// symbol is already in the row, or it is not in the palette.
    pub fn add_symbol_to_guess(&mut self, symbol: &Symbol) -> bool {
        if self.status != GameStatus::Playing
            || self.is_guess_complete()
            || self.is_symbol_used(symbol)
            || !self.config.palette.contains(symbol)
        {
            debug_log!("Rejected symbol {} (guess: {:?})", symbol, self.current_guess);
            return false;
        }
        self.current_guess.push(symbol.clone());
        debug_log!("Guess now {:?}", self.current_guess);
        true
    }

    /// Takes back the most recently added symbol.
    pub fn remove_last_symbol(&mut self) -> Option<Symbol> {
        let removed = self.current_guess.pop();
        debug_log!("Removed {:?} from guess", removed);
        removed
    }

    /// Scores the assembled row and records it. Returns `None` unless the
    /// game is in progress and the row is complete.
    pub fn submit_guess(&mut self) -> Option<&GuessRecord> {
        if self.status != GameStatus::Playing || !self.is_guess_complete() {
            debug_log!(
                "Rejected submit: status {:?}, {} of {} symbols",
                self.status,
                self.current_guess.len(),
                self.config.code_length
            );
            return None;
        }

        let guess = Code::new(std::mem::take(&mut self.current_guess));
        let feedback = evaluate(&guess, &self.secret);
        info_log!(
            "Attempt {}: {} -> {}",
            self.history.len() + 1,
            guess,
            feedback
        );

        let won = feedback.is_win();
        self.history.push(GuessRecord { guess, feedback });

        if won {
            self.finish(GameStatus::Won);
        } else if self.history.len() >= self.config.max_attempts {
            self.finish(GameStatus::Lost);
        }

        self.history.last()
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        let elapsed = Local::now().signed_duration_since(self.started_at);
        info_log!(
            "Game {:?} after {} attempts in {}s",
            status,
            self.history.len(),
            elapsed.num_seconds()
        );
    }

    /// Throws the current game away and starts over with a fresh secret.
    pub fn reset(&mut self) {
        self.secret = draw_distinct(&self.config.palette, self.config.code_length, &mut self.rng);
        self.history.clear();
        self.current_guess.clear();
        self.status = GameStatus::Playing;
        self.started_at = Local::now();
        info_log!("Session reset");
        debug_log!("Secret: {}", self.secret);
    }
}

fn check_secret(config: &GameConfig, secret: &Code) -> Result<(), ConfigError> {
    if secret.len() != config.code_length {
        return Err(ConfigError::InvalidSecret(format!(
            "expected {} symbols, got {}",
            config.code_length,
            secret.len()
        )));
    }
    if let Some(stranger) = secret.symbols().iter().find(|s| !config.palette.contains(s)) {
        return Err(ConfigError::InvalidSecret(format!(
            "'{stranger}' is not in the palette"
        )));
    }
    if secret.has_duplicates() {
        return Err(ConfigError::InvalidSecret(
            "symbols must not repeat".to_string(),
        ));
    }
    Ok(())
}

/// Player intent, as decoded by a front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    AddSymbol(Symbol),
    RemoveLast,
    Submit,
    NewGame,
    Exit,
}

/// A front end that renders a [`Session`] and turns input into actions.
pub trait GameInterface {
    /// Shows the session after it has been created or changed.
    fn render<R: Rng>(&mut self, session: &Session<R>);

    /// Next action, or `None` if the input produced nothing to apply.
    fn read_action(&mut self, palette: &Palette) -> Option<UserAction>;

    /// Called when the session ignored `action`.
    fn display_rejection<R: Rng>(&mut self, action: &UserAction, session: &Session<R>);

    fn display_exit_message(&mut self);
}

/// Feeds actions from `interface` into `session` until the player exits.
pub fn game_loop<R: Rng, I: GameInterface>(session: &mut Session<R>, interface: &mut I) {
    interface.render(session);

    loop {
        let Some(action) = interface.read_action(session.palette()) else {
            continue;
        };

        let applied = match &action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::AddSymbol(symbol) => session.add_symbol_to_guess(symbol),
            UserAction::RemoveLast => session.remove_last_symbol().is_some(),
            UserAction::Submit => session.submit_guess().is_some(),
            UserAction::NewGame => {
                session.reset();
                true
            }
        };

        if !applied {
            interface.display_rejection(&action, session);
        }
        interface.render(session);
    }
}
