use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Everything currently wrong with a credential string. Empty means valid.
    ///
    /// Flags combine independently: a too-long string containing whitespace
    /// reports both `TOO_LONG` and `INVALID_SYMBOL`. Check order never
    /// affects the result.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ValidationState: u8 {
        const TOO_SHORT = 1 << 0;
        const TOO_LONG = 1 << 1;
        const INVALID_SYMBOL = 1 << 2;
        const TOO_FEW_LOWERCASE = 1 << 3;
        const TOO_FEW_UPPERCASE = 1 << 4;
        const TOO_FEW_DIGITS = 1 << 5;
        const TOO_FEW_SYMBOLS = 1 << 6;
    }
}

impl ValidationState {
    pub fn is_valid(&self) -> bool {
        self.is_empty()
    }
}

const MESSAGES: [(ValidationState, &str); 7] = [
    (ValidationState::TOO_SHORT, "too short"),
    (ValidationState::TOO_LONG, "too long"),
    (ValidationState::INVALID_SYMBOL, "contains an invalid character"),
    (ValidationState::TOO_FEW_LOWERCASE, "needs more lowercase letters"),
    (ValidationState::TOO_FEW_UPPERCASE, "needs more uppercase letters"),
    (ValidationState::TOO_FEW_DIGITS, "needs more digits"),
    (ValidationState::TOO_FEW_SYMBOLS, "needs more symbols"),
];

/// Renders the set flags as a comma-separated list, suitable for an error
/// label. A valid state renders as the empty string.
impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, message) in MESSAGES {
            if !self.contains(flag) {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

/// Returned by the checked conversions when the input does not meet its
/// requirements. Carries the full flag set so callers can report every
/// problem at once.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid credential: {0}")]
pub struct InvalidCredential(pub ValidationState);
