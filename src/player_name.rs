use crate::{
    requirements::Requirements,
    state::{InvalidCredential, ValidationState},
};
use log::trace;

/// A candidate player display name paired with the policy it is validated
/// against. Player names are far more permissive than usernames: any
/// non-whitespace character is allowed, only the length is bounded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerName {
    value: String,
    requires: Requirements,
}

impl PlayerName {
    pub fn new(value: impl Into<String>) -> PlayerName {
        PlayerName::with_requirements(value, Requirements::player_name())
    }

    pub fn with_requirements(value: impl Into<String>, requires: Requirements) -> PlayerName {
        PlayerName {
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

impl Default for PlayerName {
    fn default() -> PlayerName {
        PlayerName::new("")
    }
}

impl TryFrom<&str> for PlayerName {
    type Error = InvalidCredential;

    fn try_from(value: &str) -> Result<PlayerName, InvalidCredential> {
        let player_name = PlayerName::new(value);
        let state = player_name.validate();
        if state.is_valid() {
            Ok(player_name)
        } else {
            Err(InvalidCredential(state))
        }
    }
}

/// Classifies `value` against `requires`: length bounds plus a whitespace
/// check. Whitespace of any kind flags `INVALID_SYMBOL`; every other
/// character is acceptable in a display name.
pub fn validate_with(value: &str, requires: &Requirements) -> ValidationState {
    let mut state = ValidationState::empty();

    let length = value.chars().count();
    if length < requires.min_length() {
        state |= ValidationState::TOO_SHORT;
    }
    if length > requires.max_length() {
        state |= ValidationState::TOO_LONG;
    }
    if value.chars().any(char::is_whitespace) {
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

/// Strips all whitespace and truncates to the maximum length. Whitespace is
/// removed rather than replaced so "My Name" becomes "MyName", not a string
/// of filler characters.
///
/// CAUTION: the result is not necessarily valid, it can end up empty.
pub fn sanitize_with(value: &str, requires: &Requirements) -> String {
    let mut sanitized: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    if sanitized.chars().count() > requires.max_length() {
        sanitized = sanitized.chars().take(requires.max_length()).collect();
    }

    if sanitized.len() != value.len() {
        trace!("sanitize stripped whitespace from player name input");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::{sanitize_with, validate_opt, validate_with, PlayerName};
    use crate::{requirements::Requirements, state::ValidationState};
    use test_case::test_case;

    #[test_case("a" ; "min length letter")]
    #[test_case("0" ; "min length digit")]
    #[test_case("abcdefghijklmnopqrstuvwxyz0123456789_-@/#(){}[]*&?" ; "max length")]
    #[test_case("Grüßgott" ; "extended letters allowed")]
    fn valid_player_names(value: &str) {
        let player_name = PlayerName::new(value);
        assert_eq!(player_name.validate(), ValidationState::empty());
        assert!(player_name.is_valid());
    }

    #[test_case("", ValidationState::TOO_SHORT ; "empty")]
    #[test_case("My Name", ValidationState::INVALID_SYMBOL ; "inner space")]
    #[test_case("tab\tname", ValidationState::INVALID_SYMBOL ; "tab")]
    #[test_case(" ", ValidationState::INVALID_SYMBOL ; "single space")]
    fn invalid_player_names(value: &str, expected: ValidationState) {
        assert_eq!(PlayerName::new(value).validate(), expected);
    }

    #[test]
    fn overlong_whitespace_fails_both_ways() {
        let value = " ".repeat(51);
        assert_eq!(
            PlayerName::new(value).validate(),
            ValidationState::TOO_LONG | ValidationState::INVALID_SYMBOL
        );
    }

    #[test]
    fn absent_input_is_too_short() {
        let requires = Requirements::player_name();
        assert_eq!(validate_opt(None, &requires), ValidationState::TOO_SHORT);
        assert_eq!(validate_opt(Some("a"), &requires), ValidationState::empty());
    }

    #[test_case("", "" ; "empty")]
    #[test_case(" ", "" ; "single space")]
    #[test_case("  ", "" ; "two spaces")]
    #[test_case(
        "PlayerNames can have\tany\nchar\rexcept whitespace",
        "PlayerNamescanhaveanycharexceptwhitespace" ; "every whitespace kind"
    )]
    #[test_case("-My = Na`me.", "-My=Na`me." ; "case preserved")]
    #[test_case(
        "01234567890123456789012345678901234567890123456789.123",
        "01234567890123456789012345678901234567890123456789" ; "truncated to max"
    )]
    fn sanitize_strips_whitespace(value: &str, expected: &str) {
        assert_eq!(PlayerName::new(value).sanitized(), expected);
    }

    #[test]
    fn sanitize_can_yield_an_invalid_empty_result() {
        let requires = Requirements::player_name();
        let sanitized = sanitize_with("   ", &requires);
        assert_eq!(sanitized, "");
        assert!(validate_with(&sanitized, &requires).contains(ValidationState::TOO_SHORT));
    }

    #[test]
    fn checked_conversion_carries_the_flag_set() {
        assert!(PlayerName::try_from("-My=Na`me.").is_ok());

        let err = PlayerName::try_from("My Name").unwrap_err();
        assert_eq!(err.0, ValidationState::INVALID_SYMBOL);
    }
}
