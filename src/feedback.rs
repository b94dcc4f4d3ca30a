use crate::code::Code;
use std::fmt;

/// Verdict for one guess position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Peg {
    /// Right color, right position.
    Exact,
    /// Right color, wrong position.
    Partial,
    /// Color not matched.
    Empty,
}

impl Peg {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Self::Exact),
            'O' => Some(Self::Partial),
            '.' => Some(Self::Empty),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Exact => 'X',
            Self::Partial => 'O',
            Self::Empty => '.',
        }
    }
}

/// Pegs for one guess, aligned with the guess positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback(Vec<Peg>);

impl Feedback {
    #[must_use]
    pub fn pegs(&self) -> &[Peg] {
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

    /// True when every peg is exact.
    #[must_use]
    pub fn is_win(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&p| p == Peg::Exact)
    }

    #[must_use]
    pub fn exact_count(&self) -> usize {
        self.count(Peg::Exact)
    }

    #[must_use]
    pub fn partial_count(&self) -> usize {
        self.count(Peg::Partial)
    }

    fn count(&self, peg: Peg) -> usize {
        self.0.iter().filter(|&&p| p == peg).count()
    }
}

impl From<Vec<Peg>> for Feedback {
    fn from(pegs: Vec<Peg>) -> Self {
        Self(pegs)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for peg in &self.0 {
            write!(f, "{}", peg.to_char())?;
        }
        Ok(())
    }
}

/// Scores `guess` against `secret`.
///
/// Exact matches are taken first and consume both positions. Each remaining
/// guess position, left to right, then consumes the leftmost unconsumed
/// secret position holding the same symbol. This stays correct when either
/// code repeats a symbol.
#[must_use]
pub fn evaluate(guess: &Code, secret: &Code) -> Feedback {
    let guess = guess.symbols();
    let secret = secret.symbols();
    let mut pegs = vec![Peg::Empty; guess.len()];
    let mut secret_used = vec![false; secret.len()];

    // First pass: exact
    for (i, (g, s)) in guess.iter().zip(secret).enumerate() {
        if g == s {
            pegs[i] = Peg::Exact;
            secret_used[i] = true;
        }
    }

    // Second pass: partial
    for (i, g) in guess.iter().enumerate() {
        if pegs[i] == Peg::Exact {
            continue;
        }
        let found = secret
            .iter()
            .zip(secret_used.iter())
            .position(|(s, &used)| !used && s == g);
        if let Some(pos) = found {
            pegs[i] = Peg::Partial;
            secret_used[pos] = true;
        }
    }

    Feedback(pegs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use std::collections::HashMap;

    fn code(names: &[&str]) -> Code {
        Code::from_names(names.iter().copied())
    }

    fn pegs(pattern: &str) -> Feedback {
        pattern.chars().map(|c| Peg::from_char(c).unwrap()).collect::<Vec<_>>().into()
    }

    fn secret() -> Code {
        code(&["red", "green", "blue", "yellow"])
    }

    #[test]
    fn test_exact_guess_wins() {
        let feedback = evaluate(&secret(), &secret());
        assert_eq!(feedback, pegs("XXXX"));
        assert!(feedback.is_win());
    }

    #[test]
    fn test_rotated_guess_all_partial() {
        let guess = code(&["green", "red", "yellow", "blue"]);
        let feedback = evaluate(&guess, &secret());
        assert_eq!(feedback, pegs("OOOO"));
        assert!(!feedback.is_win());
    }

    #[test]
    fn test_disjoint_guess_all_empty() {
        let guess = code(&["white", "pink", "cyan", "purple"]);
        assert_eq!(evaluate(&guess, &secret()), pegs("...."));
    }

    #[test]
    fn test_mixed_feedback_is_positional() {
        let guess = code(&["red", "blue", "pink", "green"]);
        assert_eq!(evaluate(&guess, &secret()), pegs("XO.O"));
    }

    #[test]
    fn test_repeated_guess_symbol_scores_once() {
        let guess = code(&["red", "red", "red", "red"]);
        assert_eq!(evaluate(&guess, &secret()), pegs("X..."));
    }

    #[test]
    fn test_exact_consumed_before_partial() {
        // The second red must not claim the red already matched exactly.
        let guess = code(&["red", "red", "red", "yellow"]);
        let secret = code(&["yellow", "red", "blue", "green"]);
        assert_eq!(evaluate(&guess, &secret), pegs(".X.O"));
    }

    #[test]
    fn test_duplicate_secret_symbols_each_consumed_once() {
        let guess = code(&["red", "red", "green", "blue"]);
        let secret = code(&["green", "yellow", "red", "red"]);
        assert_eq!(evaluate(&guess, &secret), pegs("OOO."));
    }

    #[test]
    fn test_more_guess_copies_than_secret_copies() {
        let guess = code(&["cyan", "cyan", "cyan", "white"]);
        let secret = code(&["white", "cyan", "pink", "cyan"]);
        // Only one cyan is left after the exact match, so the third cyan misses.
        assert_eq!(evaluate(&guess, &secret), pegs("OX.O"));
    }

    #[test]
    fn test_counts() {
        let feedback = pegs("XO.O");
        assert_eq!(feedback.exact_count(), 1);
        assert_eq!(feedback.partial_count(), 2);
        assert_eq!(feedback.to_string(), "XO.O");
    }

    #[test]
    fn test_empty_feedback_is_not_a_win() {
        assert!(!Feedback::from(Vec::new()).is_win());
    }

    fn all_distinct_codes(palette: &Palette, length: usize) -> Vec<Code> {
        let mut codes = vec![Vec::new()];
        for _ in 0..length {
            let mut next = Vec::new();
            for prefix in &codes {
                for symbol in palette.symbols() {
                    if !prefix.contains(symbol) {
                        let mut extended = prefix.clone();
                        extended.push(symbol.clone());
                        next.push(extended);
                    }
                }
            }
            codes = next;
        }
        codes.into_iter().map(Code::new).collect()
    }

    fn color_counts(symbols: &[crate::palette::Symbol]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for s in symbols {
            *counts.entry(s.name()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_score_bounds_over_every_guess() {
        let palette = Palette::classic();
        let secret = secret();
        for guess in all_distinct_codes(&palette, 4) {
            let feedback = evaluate(&guess, &secret);
            assert_eq!(feedback.len(), 4);
            assert!(feedback.exact_count() + feedback.partial_count() <= 4);
            assert_eq!(feedback.exact_count() == 4, guess == secret);
        }
    }

    #[test]
    fn test_conservation_with_repeated_symbols() {
        let names = ["red", "green", "blue"];
        // Every 4-long code over three colors, repeats allowed.
        let mut codes = Vec::new();
        for a in names {
            for b in names {
                for c in names {
                    for d in names {
                        codes.push(code(&[a, b, c, d]));
                    }
                }
            }
        }
        for guess in &codes {
            for secret in codes.iter().step_by(7) {
                let feedback = evaluate(guess, secret);
                let guess_counts = color_counts(guess.symbols());
                let secret_counts = color_counts(secret.symbols());
                let mut scored: HashMap<&str, usize> = HashMap::new();
                for (symbol, peg) in guess.symbols().iter().zip(feedback.pegs()) {
                    if *peg != Peg::Empty {
                        *scored.entry(symbol.name()).or_insert(0) += 1;
                    }
                }
                for (name, count) in scored {
                    let limit = guess_counts[name].min(*secret_counts.get(name).unwrap_or(&0));
                    assert!(count <= limit, "{guess} vs {secret}: {name} scored {count}");
                }
            }
        }
    }
}
