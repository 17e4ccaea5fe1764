/// Digits allowed in codes. 6 and 9 are left out since they read like 8.
pub const DIGITS: &str = "01234578";

/// Letters allowed in codes. E, F, I, O, U and V are left out since they are
/// easily confused with digits or with each other.
pub const LETTERS: &str = "ABCDGHJKLMNPQRSTWXYZ";

pub const SYMBOLS: &str = "!@#$%";

/// Placeholder kinds recognised in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharsetKind {
    /// `A`
    Letter,
    /// `D`
    Digit,
    /// `S`
    Symbol,
}

impl CharsetKind {
    /// Map a pattern character to its placeholder kind, if it is one.
    pub fn from_placeholder(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Self::Letter),
            'D' => Some(Self::Digit),
            'S' => Some(Self::Symbol),
            _ => None,
        }
    }

    /// Allowed characters for this kind, as ASCII bytes.
    pub fn charset(self) -> &'static [u8] {
        match self {
            Self::Letter => LETTERS.as_bytes(),
            Self::Digit => DIGITS.as_bytes(),
            Self::Symbol => SYMBOLS.as_bytes(),
        }
    }

    pub fn size(self) -> usize {
        self.charset().len()
    }

    pub fn contains(self, ch: char) -> bool {
        ch.is_ascii() && self.charset().contains(&(ch as u8))
    }
}
