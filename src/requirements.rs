use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Symbols the identity service accepts in a username, beyond letters and
/// digits. The first character doubles as the sanitizer's replacement char.
pub const USERNAME_SYMBOLS: &str = "_-.@";

/// Symbols the identity service accepts in a password: all ASCII punctuation.
pub const PASSWORD_SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Immutable validation policy for one credential kind: inclusive length
/// bounds, the extra characters permitted beyond ASCII letters and digits,
/// and minimum per-class character counts (zero disables a count check).
///
/// Construct through [`Requirements::new`] or one of the presets; the
/// constructor enforces the internal invariants, so a value of this type is
/// always well-formed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRequirements")]
pub struct Requirements {
    min_length: usize,
    max_length: usize,
    valid_symbols: String,
    lowercase_count: usize,
    uppercase_count: usize,
    digit_count: usize,
    symbol_count: usize,
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RequirementsError {
    #[error("min length {min} exceeds max length {max}")]
    ReversedLengthBounds { min: usize, max: usize },

    #[error("valid symbols must not contain letters or digits, got {0:?}")]
    AlphanumericSymbol(char),

    #[error("a symbol count is required but no valid symbols are given")]
    NoSymbolsToCount,
}

impl Requirements {
    /// Length and symbol policy with no per-class count checks.
    pub fn new(
        min_length: usize,
        max_length: usize,
        valid_symbols: &str,
    ) -> Result<Requirements, RequirementsError> {
        Requirements {
            min_length,
            max_length,
            valid_symbols: valid_symbols.to_owned(),
            lowercase_count: 0,
            uppercase_count: 0,
            digit_count: 0,
            symbol_count: 0,
        }
        .checked()
    }

    /// Adds minimum per-class character counts, for password-style policies.
    pub fn with_class_counts(
        mut self,
        lowercase_count: usize,
        uppercase_count: usize,
        digit_count: usize,
        symbol_count: usize,
    ) -> Result<Requirements, RequirementsError> {
        self.lowercase_count = lowercase_count;
        self.uppercase_count = uppercase_count;
        self.digit_count = digit_count;
        self.symbol_count = symbol_count;
        self.checked()
    }

    /// Username policy: 3 to 20 characters, symbols `_-.@`.
    pub fn username() -> Requirements {
        Requirements {
            min_length: 3,
            max_length: 20,
            valid_symbols: USERNAME_SYMBOLS.to_owned(),
            lowercase_count: 0,
            uppercase_count: 0,
            digit_count: 0,
            symbol_count: 0,
        }
    }

    /// Password policy: 8 to 30 characters, at least one lowercase letter,
    /// one uppercase letter, one digit and one punctuation symbol.
    pub fn password() -> Requirements {
        Requirements {
            min_length: 8,
            max_length: 30,
            valid_symbols: PASSWORD_SYMBOLS.to_owned(),
            lowercase_count: 1,
            uppercase_count: 1,
            digit_count: 1,
            symbol_count: 1,
        }
    }

    /// Player name policy: 1 to 50 characters. The player name validator
    /// accepts anything that is not whitespace, so no symbol list applies.
    pub fn player_name() -> Requirements {
        Requirements {
            min_length: 1,
            max_length: 50,
            valid_symbols: String::new(),
            lowercase_count: 0,
            uppercase_count: 0,
            digit_count: 0,
            symbol_count: 0,
        }
    }

    fn checked(self) -> Result<Requirements, RequirementsError> {
        if self.min_length > self.max_length {
            return Err(RequirementsError::ReversedLengthBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }

        if let Some(c) = self.valid_symbols.chars().find(char::is_ascii_alphanumeric) {
            return Err(RequirementsError::AlphanumericSymbol(c));
        }

        if self.symbol_count > 0 && self.valid_symbols.is_empty() {
            return Err(RequirementsError::NoSymbolsToCount);
        }

        Ok(self)
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn valid_symbols(&self) -> &str {
        &self.valid_symbols
    }

    pub fn lowercase_count(&self) -> usize {
        self.lowercase_count
    }

    pub fn uppercase_count(&self) -> usize {
        self.uppercase_count
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    /// True if `c` belongs to the allowed alphabet: ASCII letters, digits,
    /// or one of the valid symbols.
    pub fn is_allowed(&self, c: char) -> bool {
        c.is_ascii_alphanumeric() || self.is_symbol(c)
    }

    pub fn is_symbol(&self, c: char) -> bool {
        self.valid_symbols.contains(c)
    }

    /// The character the sanitizer substitutes for disallowed input, by
    /// convention the first valid symbol. `None` when no symbols are allowed,
    /// in which case disallowed characters are removed instead.
    pub fn replacement_char(&self) -> Option<char> {
        self.valid_symbols.chars().next()
    }

    /// One-line summary of this policy, for tooltips and help text.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "between {} and {} characters; valid characters are english letters, digits",
            self.min_length, self.max_length
        );

        if !self.valid_symbols.is_empty() {
            let _ = write!(out, ", and the symbols {}", self.valid_symbols);
        }

        let counts = [
            (self.lowercase_count, "lowercase letter(s)"),
            (self.uppercase_count, "uppercase letter(s)"),
            (self.digit_count, "digit(s)"),
            (self.symbol_count, "symbol(s)"),
        ];

        if counts.iter().any(|(count, _)| *count > 0) {
            out.push_str("; requires at least");
            let mut first = true;
            for (count, label) in counts {
                if count == 0 {
                    continue;
                }
                out.push_str(if first { " " } else { ", " });
                let _ = write!(out, "{} {}", count, label);
                first = false;
            }
        }

        out
    }
}

/// The credential kinds this crate validates. `FromStr`/`Display` use
/// snake_case names so requirement presets can be referenced from config.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    Username,
    Password,
    PlayerName,
}

impl CredentialKind {
    pub fn default_requirements(self) -> Requirements {
        match self {
            CredentialKind::Username => Requirements::username(),
            CredentialKind::Password => Requirements::password(),
            CredentialKind::PlayerName => Requirements::player_name(),
        }
    }

    /// Usernames match case-insensitively on the identity service; passwords
    /// and player names are case-sensitive.
    pub fn case_sensitive(self) -> bool {
        !matches!(self, CredentialKind::Username)
    }
}

#[derive(Deserialize)]
struct RawRequirements {
    min_length: usize,
    max_length: usize,
    #[serde(default)]
    valid_symbols: String,
    #[serde(default)]
    lowercase_count: usize,
    #[serde(default)]
    uppercase_count: usize,
    #[serde(default)]
    digit_count: usize,
    #[serde(default)]
    symbol_count: usize,
}

impl TryFrom<RawRequirements> for Requirements {
    type Error = RequirementsError;

    fn try_from(raw: RawRequirements) -> Result<Requirements, RequirementsError> {
        Requirements {
            min_length: raw.min_length,
            max_length: raw.max_length,
            valid_symbols: raw.valid_symbols,
            lowercase_count: raw.lowercase_count,
            uppercase_count: raw.uppercase_count,
            digit_count: raw.digit_count,
            symbol_count: raw.symbol_count,
        }
        .checked()
    }
}
