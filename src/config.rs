use crate::palette::Palette;
use thiserror::Error;

pub const CODE_LENGTH: usize = 4;
pub const MAX_ATTEMPTS: usize = 10;

/// Problems that make a game impossible to set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("palette has {palette} symbols but a code needs {length} distinct symbols")]
    PaletteTooSmall { palette: usize, length: usize },
    #[error("code length must be at least 1")]
    ZeroCodeLength,
    #[error("maximum attempts must be at least 1")]
    ZeroMaxAttempts,
    #[error("palette contains '{0}' more than once")]
    DuplicateSymbol(String),
    #[error("palette symbol names must not be empty")]
    EmptySymbolName,
    #[error("invalid secret: {0}")]
    InvalidSecret(String),
}

/// Fixed parameters of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub palette: Palette,
    pub code_length: usize,
    pub max_attempts: usize,
}

impl GameConfig {
    pub fn new(
        palette: Palette,
        code_length: usize,
        max_attempts: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            palette,
            code_length,
            max_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 {
            return Err(ConfigError::ZeroCodeLength);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if self.palette.len() < self.code_length {
            return Err(ConfigError::PaletteTooSmall {
                palette: self.palette.len(),
                length: self.code_length,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            palette: Palette::classic(),
            code_length: CODE_LENGTH,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}
