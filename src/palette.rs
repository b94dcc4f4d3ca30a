use crate::config::ConfigError;
use std::collections::HashSet;
use std::fmt;

/// Colors of the classic game, in palette order.
pub const CLASSIC_COLORS: [&str; 8] = [
    "red", "green", "blue", "yellow", "purple", "cyan", "white", "pink",
];

/// A single color a code can be built from.
///
/// Symbols compare by name only; names are stored trimmed and lowercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The ordered set of symbols available to the secret and to guesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    symbols: Vec<Symbol>,
}

impl Palette {
    /// Builds a palette from symbol names, rejecting blanks and repeats.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        for name in names {
            let symbol = Symbol::new(name);
            if symbol.name().is_empty() {
                return Err(ConfigError::EmptySymbolName);
            }
            if !seen.insert(symbol.clone()) {
                return Err(ConfigError::DuplicateSymbol(symbol.0));
            }
            symbols.push(symbol);
        }
        Ok(Self { symbols })
    }

    /// The eight-color palette of the classic game.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            symbols: CLASSIC_COLORS.iter().map(|name| Symbol::new(name)).collect(),
        }
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    /// Resolves player input to a symbol: either a name (any case) or a
    /// 1-based palette number.
    #[must_use]
    pub fn parse_symbol(&self, input: &str) -> Option<Symbol> {
        let input = input.trim();
        if let Ok(number) = input.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| self.get(index))
                .cloned();
        }
        let wanted = Symbol::new(input);
        self.symbols.iter().find(|s| **s == wanted).cloned()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}
