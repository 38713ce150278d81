use crate::{
    requirements::Requirements,
    state::{InvalidCredential, ValidationState},
};
use log::trace;

/// A candidate username paired with the policy it is validated against.
///
/// The value is whatever the input field currently holds; it may or may not
/// be valid. Usernames match case-insensitively on the identity service,
/// which is why [`sanitize_with`] lowercases its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username {
    value: String,
    requires: Requirements,
}

impl Username {
    pub fn new(value: impl Into<String>) -> Username {
        Username::with_requirements(value, Requirements::username())
    }

    pub fn with_requirements(value: impl Into<String>, requires: Requirements) -> Username {
        Username {
            value: value.into(),
            requires,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the candidate value, typically on every input event.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn requires(&self) -> &Requirements {
        &self.requires
    }

    pub fn validate(&self) -> ValidationState {
        validate_with(&self.value, &self.requires)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// The sanitized form of the current value. See [`sanitize_with`].
    pub fn sanitized(&self) -> String {
        sanitize_with(&self.value, &self.requires)
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl Default for Username {
    fn default() -> Username {
        Username::new("")
    }
}

impl TryFrom<&str> for Username {
    type Error = InvalidCredential;

    fn try_from(value: &str) -> Result<Username, InvalidCredential> {
        let username = Username::new(value);
        let state = username.validate();
        if state.is_valid() {
            Ok(username)
        } else {
            Err(InvalidCredential(state))
        }
    }
}

/// Classifies `value` against `requires`. The allowed alphabet is ASCII
/// letters and digits plus the policy's valid symbols; anything else flags
/// `INVALID_SYMBOL`. Length bounds flag independently, so one string can
/// fail several ways at once.
pub fn validate_with(value: &str, requires: &Requirements) -> ValidationState {
    let mut state = ValidationState::empty();

    let length = value.chars().count();
    if length < requires.min_length() {
        state |= ValidationState::TOO_SHORT;
    }
    if length > requires.max_length() {
        state |= ValidationState::TOO_LONG;
    }
    if value.chars().any(|c| !requires.is_allowed(c)) {
        state |= ValidationState::INVALID_SYMBOL;
    }

    state
}

/// Absent input counts as below minimum length; no other check applies.
pub fn validate_opt(value: Option<&str>, requires: &Requirements) -> ValidationState {
    match value {
        Some(value) => validate_with(value, requires),
        None => ValidationState::TOO_SHORT,
    }
}

/// Rewrites `value` into a best-effort valid username: lowercases the whole
/// string, substitutes the policy's replacement character for every
/// disallowed character, then truncates to the maximum length.
///
/// CAUTION: the result is not necessarily valid. Minimum length is never
/// enforced (nothing sensible to pad with), so callers must re-validate.
pub fn sanitize_with(value: &str, requires: &Requirements) -> String {
    let lowered = value.to_lowercase();

    let mut replaced = 0usize;
    let mut sanitized = match requires.replacement_char() {
        Some(replacement) => lowered
            .chars()
            .map(|c| {
                if requires.is_allowed(c) {
                    c
                } else {
                    replaced += 1;
                    replacement
                }
            })
            .collect(),
        None => lowered,
    };

    if sanitized.chars().count() > requires.max_length() {
        sanitized = sanitized.chars().take(requires.max_length()).collect();
    }

    if replaced > 0 {
        trace!("sanitize replaced {} invalid username character(s)", replaced);
    }

    sanitized
}
