use crate::config::ConfigError;
use crate::palette::{Palette, Symbol};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;

/// An ordered row of symbols: the secret, or one guess at it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Code(Vec<Symbol>);

impl Code {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// Builds a code from symbol names, for callers that spell codes out.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(names.into_iter().map(Symbol::new).collect())
    }

    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        let mut seen = HashSet::new();
        !self.0.iter().all(|s| seen.insert(s))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl From<Vec<Symbol>> for Code {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

/// Draws a secret of `length` distinct symbols from `palette`.
///
/// Symbols are sampled without replacement: each pick is uniform over the
/// symbols not yet chosen, so the result never repeats a symbol.
pub fn generate_code<R: Rng + ?Sized>(
    palette: &Palette,
    length: usize,
    rng: &mut R,
) -> Result<Code, ConfigError> {
    if length == 0 {
        return Err(ConfigError::ZeroCodeLength);
    }
    if palette.len() < length {
        return Err(ConfigError::PaletteTooSmall {
            palette: palette.len(),
            length,
        });
    }
    Ok(draw_distinct(palette, length, rng))
}

/// Sampling core of [`generate_code`]; `palette.len() >= length` must hold.
pub(crate) fn draw_distinct<R: Rng + ?Sized>(palette: &Palette, length: usize, rng: &mut R) -> Code {
    let mut pool: Vec<&Symbol> = palette.symbols().iter().collect();
    let mut symbols = Vec::with_capacity(length);
    while symbols.len() < length && !pool.is_empty() {
        let index = rng.gen_range(0..pool.len());
        symbols.push(pool.remove(index).clone());
    }
    Code(symbols)
}
