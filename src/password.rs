use crate::{
    requirements::Requirements,
    state::{InvalidCredential, ValidationState},
};
use std::fmt;

/// A candidate password paired with the policy it is validated against.
///
/// Unlike usernames there is no sanitizer: silently rewriting a password the
/// user believes they typed would let a credential they cannot reproduce
/// reach the identity service. Matching is case-sensitive.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    value: String,
    requires: Requirements,
}

impl Password {
    pub fn new(value: impl Into<String>) -> Password {
        Password::with_requirements(value, Requirements::password())
    }

    pub fn with_requirements(value: impl Into<String>, requires: Requirements) -> Password {
        Password {
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

    pub fn into_value(self) -> String {
        self.value
    }
}

impl Default for Password {
    fn default() -> Password {
        Password::new("")
    }
}

// Keeps the password itself out of logs and panic messages.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Password")
            .field("value", &"<redacted>")
            .field("requires", &self.requires)
            .finish()
    }
}

impl TryFrom<&str> for Password {
    type Error = InvalidCredential;

    fn try_from(value: &str) -> Result<Password, InvalidCredential> {
        let password = Password::new(value);
        let state = password.validate();
        if state.is_valid() {
            Ok(password)
        } else {
            Err(InvalidCredential(state))
        }
    }
}

#[derive(Debug, Default)]
struct ClassCounts {
    lowercase: usize,
    uppercase: usize,
    digits: usize,
    symbols: usize,
    invalid: usize,
    length: usize,
}

// "Letters" are ASCII letters only; extended letters count as invalid, the
// identity service rejects them.
fn count_classes(value: &str, requires: &Requirements) -> ClassCounts {
    let mut counts = ClassCounts::default();

    for c in value.chars() {
        if c.is_ascii_lowercase() {
            counts.lowercase += 1;
        } else if c.is_ascii_uppercase() {
            counts.uppercase += 1;
        } else if c.is_ascii_digit() {
            counts.digits += 1;
        } else if requires.is_symbol(c) {
            counts.symbols += 1;
        } else {
            counts.invalid += 1;
        }
        counts.length += 1;
    }

    counts
}

/// Classifies `value` against `requires`: length bounds, minimum per-class
/// character counts, and the symbol whitelist. A single pass over the string
/// feeds every check, and all flags combine independently — an empty string
/// reports `TOO_SHORT` plus one `TOO_FEW_*` flag per required class.
pub fn validate_with(value: &str, requires: &Requirements) -> ValidationState {
    let counts = count_classes(value, requires);
    let mut state = ValidationState::empty();

    if counts.length < requires.min_length() {
        state |= ValidationState::TOO_SHORT;
    }
    if counts.length > requires.max_length() {
        state |= ValidationState::TOO_LONG;
    }
    if counts.lowercase < requires.lowercase_count() {
        state |= ValidationState::TOO_FEW_LOWERCASE;
    }
    if counts.uppercase < requires.uppercase_count() {
        state |= ValidationState::TOO_FEW_UPPERCASE;
    }
    if counts.digits < requires.digit_count() {
        state |= ValidationState::TOO_FEW_DIGITS;
    }
    if counts.symbols < requires.symbol_count() {
        state |= ValidationState::TOO_FEW_SYMBOLS;
    }
    if counts.invalid > 0 {
        state |= ValidationState::INVALID_SYMBOL;
    }

    state
}

/// Absent input classifies exactly like the empty string: below minimum
/// length and missing every required character class.
pub fn validate_opt(value: Option<&str>, requires: &Requirements) -> ValidationState {
    validate_with(value.unwrap_or(""), requires)
}

#[cfg(test)]
mod tests {
    use super::{validate_opt, validate_with, Password};
    use crate::{requirements::Requirements, state::ValidationState};
    use test_case::test_case;

    fn all_class_flags() -> ValidationState {
        ValidationState::TOO_FEW_LOWERCASE
            | ValidationState::TOO_FEW_UPPERCASE
            | ValidationState::TOO_FEW_DIGITS
            | ValidationState::TOO_FEW_SYMBOLS
    }

    #[test_case("Aa_00000" ; "min length")]
    #[test_case("Aa_000000000000000000000000000" ; "max length")]
    #[test_case("xK9!pQ2@mN4#" ; "typical")]
    #[test_case("Aa1!\"#$%&'()*+,-./:;<=>?@[]^_" ; "punctuation heavy")]
    fn valid_passwords(value: &str) {
        let password = Password::new(value);
        assert_eq!(password.validate(), ValidationState::empty());
        assert!(password.is_valid());
    }

    #[test_case("123Abc!", ValidationState::TOO_SHORT ; "seven chars")]
    #[test_case(
        "123Abc!123abc!123abc!123abc!_31",
        ValidationState::TOO_LONG ; "thirty one chars"
    )]
    #[test_case("123_abc!", ValidationState::TOO_FEW_UPPERCASE ; "missing uppercase")]
    #[test_case("123_ABC!", ValidationState::TOO_FEW_LOWERCASE ; "missing lowercase")]
    #[test_case("abc_ABC!", ValidationState::TOO_FEW_DIGITS ; "missing digit")]
    #[test_case("ABab1234", ValidationState::TOO_FEW_SYMBOLS ; "missing symbol")]
    #[test_case(
        "ABab 1234",
        ValidationState::INVALID_SYMBOL | ValidationState::TOO_FEW_SYMBOLS ; "space is not a symbol"
    )]
    #[test_case(
        "Pässwort1!",
        ValidationState::INVALID_SYMBOL ; "extended letter is invalid"
    )]
    #[test_case(
        "123 abc!",
        ValidationState::TOO_FEW_UPPERCASE | ValidationState::INVALID_SYMBOL ; "space and no uppercase"
    )]
    #[test_case(
        "abcdABCD",
        ValidationState::TOO_FEW_DIGITS | ValidationState::TOO_FEW_SYMBOLS ; "letters only"
    )]
    fn invalid_passwords(value: &str, expected: ValidationState) {
        assert_eq!(Password::new(value).validate(), expected);
    }

    #[test]
    fn empty_input_fails_every_class_check() {
        let requires = Requirements::password();
        let expected = ValidationState::TOO_SHORT | all_class_flags();

        assert_eq!(validate_with("", &requires), expected);
        assert_eq!(validate_opt(None, &requires), expected);
    }

    #[test]
    fn whitespace_only_input_is_invalid_and_missing_every_class() {
        let state = validate_with("        ", &Requirements::password());
        assert_eq!(state, ValidationState::INVALID_SYMBOL | all_class_flags());
    }

    #[test]
    fn matching_is_case_sensitive() {
        // Same string, cases swapped: the class counts move with the case.
        assert!(Password::new("Aa_00000").is_valid());
        assert_eq!(
            Password::new("aa_00000").validate(),
            ValidationState::TOO_FEW_UPPERCASE
        );
        assert_eq!(
            Password::new("AA_00000").validate(),
            ValidationState::TOO_FEW_LOWERCASE
        );
    }

    #[test]
    fn custom_class_counts_are_honored() {
        let requires = Requirements::new(8, 30, "_-")
            .unwrap()
            .with_class_counts(2, 2, 2, 2)
            .unwrap();

        assert_eq!(validate_with("AaBb12_-", &requires), ValidationState::empty());
        assert_eq!(
            validate_with("Aabb12_-", &requires),
            ValidationState::TOO_FEW_UPPERCASE
        );
    }

    #[test]
    fn symbols_outside_the_policy_are_invalid() {
        let requires = Requirements::new(8, 30, "_")
            .unwrap()
            .with_class_counts(1, 1, 1, 1)
            .unwrap();

        // '!' is a fine password symbol by default but not under this policy.
        assert_eq!(
            validate_with("Aa1!Aa1!", &requires),
            ValidationState::INVALID_SYMBOL | ValidationState::TOO_FEW_SYMBOLS
        );
    }

    #[test]
    fn checked_conversion_carries_the_flag_set() {
        assert!(Password::try_from("Aa_00000").is_ok());

        let err = Password::try_from("ABab1234").unwrap_err();
        assert_eq!(err.0, ValidationState::TOO_FEW_SYMBOLS);
    }

    #[test]
    fn debug_output_redacts_the_value() {
        let rendered = format!("{:?}", Password::new("Aa_00000"));
        assert!(!rendered.contains("Aa_00000"));
        assert!(rendered.contains("<redacted>"));
    }
}
