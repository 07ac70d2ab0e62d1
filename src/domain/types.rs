//! Strongly-typed value objects used by domain entities.
//!
//! Entity references travel as opaque 24-character hexadecimal identifiers.
//! The codec here only checks the format; whether an identifier resolves to a
//! stored entity is the services' concern.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The raw value was not a 24-character hexadecimal string.
    #[error("identifier must be a 24-character hexadecimal string")]
    Malformed,
}

/// Length of the hexadecimal form of an [`Identifier`].
pub const IDENTIFIER_LEN: usize = 24;

/// Opaque identifier referencing a stored entity.
///
/// Always exactly [`IDENTIFIER_LEN`] hexadecimal digits. Freshly minted
/// identifiers start with a big-endian unix timestamp followed by eight bytes
/// of random entropy, so ids sort roughly by creation time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Parses a raw string, accepting only 24 hexadecimal digits.
    pub fn parse<S: Into<String>>(value: S) -> Result<Self, IdentifierError> {
        let value = value.into();
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(IdentifierError::Malformed)
        }
    }

    /// Non-allocating predicate form of [`Self::parse`].
    pub fn is_valid(value: &str) -> bool {
        value.len() == IDENTIFIER_LEN && value.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Mints a fresh identifier: 4 timestamp bytes plus 8 bytes of entropy.
    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp() as u32;
        let entropy = Uuid::new_v4();
        let mut out = format!("{secs:08x}");
        for byte in &entropy.as_bytes()[..8] {
            out.push_str(&format!("{byte:02x}"));
        }
        Self(out)
    }

    /// Borrow the hexadecimal form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<Identifier> for &str {
    fn eq(&self, other: &Identifier) -> bool {
        *self == other.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_24_hex_digits() {
        let id = Identifier::parse("64f1c2a0deadbeef01234567").unwrap();
        assert_eq!(id.as_str(), "64f1c2a0deadbeef01234567");
    }

    #[test]
    fn accepts_mixed_case_hex() {
        assert!(Identifier::is_valid("64F1C2A0DEADBEEF01234567"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(Identifier::parse("123"), Err(IdentifierError::Malformed));
        assert!(!Identifier::is_valid("64f1c2a0deadbeef0123456"));
        assert!(!Identifier::is_valid("64f1c2a0deadbeef012345678"));
    }

    #[test]
    fn rejects_non_hex_characters() {
        assert!(!Identifier::is_valid("64f1c2a0deadbeef0123456g"));
        assert!(!Identifier::is_valid("64f1c2a0-eadbeef01234567"));
    }

    #[test]
    fn generated_identifiers_are_well_formed_and_distinct() {
        let a = Identifier::generate();
        let b = Identifier::generate();
        assert!(Identifier::is_valid(a.as_str()));
        assert!(Identifier::is_valid(b.as_str()));
        assert_ne!(a, b);
    }
}
