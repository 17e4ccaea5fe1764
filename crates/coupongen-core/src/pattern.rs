use std::fmt;

use crate::charset::CharsetKind;
use crate::error::{Error, Result};

/// One position of a coupon pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Replaced by a random character drawn from the kind's set.
    Placeholder(CharsetKind),
    /// Copied into the code unchanged.
    Literal(char),
}

/// Parsed coupon pattern.
///
/// `A` stands for a letter, `D` for a digit and `S` for a symbol; every other
/// character is a literal. Any string is a valid pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    pub fn parse(source: &str) -> Self {
        let tokens = source
            .chars()
            .map(|ch| match CharsetKind::from_placeholder(ch) {
                Some(kind) => Token::Placeholder(kind),
                None => Token::Literal(ch),
            })
            .collect();

        Self {
            source: source.to_string(),
            tokens,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of placeholder positions.
    pub fn placeholder_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::Placeholder(_)))
            .count()
    }

    /// Upper bound on distinct codes this pattern can produce.
    ///
    /// Literals contribute a factor of 1. Saturates at `u128::MAX`.
    pub fn max_combinations(&self) -> u128 {
        self.tokens.iter().fold(1_u128, |total, token| match token {
            Token::Placeholder(kind) => total.saturating_mul(kind.size() as u128),
            Token::Literal(_) => total,
        })
    }

    /// Fail with [`Error::CapacityExceeded`] when `requested` distinct codes
    /// cannot exist for this pattern. Returns the capacity otherwise.
    pub fn ensure_capacity(&self, requested: u64) -> Result<u128> {
        let capacity = self.max_combinations();
        if u128::from(requested) > capacity {
            return Err(Error::CapacityExceeded {
                requested,
                capacity,
                pattern: self.source.clone(),
            });
        }
        Ok(capacity)
    }

    /// Whether `code` has the shape of this pattern: same length, placeholder
    /// positions drawn from their set, literal positions equal.
    pub fn matches(&self, code: &str) -> bool {
        let mut chars = code.chars();
        for token in &self.tokens {
            let Some(ch) = chars.next() else {
                return false;
            };
            let ok = match token {
                Token::Placeholder(kind) => kind.contains(ch),
                Token::Literal(literal) => *literal == ch,
            };
            if !ok {
                return false;
            }
        }
        chars.next().is_none()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
