//! Validation of account credential strings: usernames, passwords and player
//! display names.
//!
//! Each credential kind pairs a candidate string with an immutable
//! [`Requirements`] policy and classifies it into a [`ValidationState`] flag
//! set describing every way the string currently fails, rather than a single
//! error code. Usernames and player names additionally offer a best-effort
//! sanitizer; passwords deliberately do not.
//!
//! All operations are pure functions of (value, requirements): no I/O, no
//! shared state, identical results on repeated calls. Invalid input is a
//! data outcome, not an error; the `Result`-shaped [`TryFrom`] conversions
//! exist only as a convenience seam for callers that gate on validity.

pub mod password;
pub mod player_name;
pub mod requirements;
pub mod state;
pub mod username;

pub use password::Password;
pub use player_name::PlayerName;
pub use requirements::{CredentialKind, Requirements, RequirementsError};
pub use state::{InvalidCredential, ValidationState};
pub use username::Username;
