//! Room codes: short public identifiers handed out to presenters.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Symbols a generated code may contain. `I`, `O`, `0` and `1` are left out
/// so codes can be read aloud or copied from a projector without confusion.
pub const ROOM_ID_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters in every room code.
pub const ROOM_ID_LENGTH: usize = 6;

/// A 6-character room code.
///
/// Codes are not unique: [`RoomId::generate`] never consults previously
/// issued codes, so two sessions may share one (roughly 1 in 1.07e9 per pair).
///
/// Deserialization goes through [`RoomId::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Draw a fresh code, sampling each position uniformly from
    /// [`ROOM_ID_ALPHABET`].
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Draw a fresh code from the given RNG.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let code = (0..ROOM_ID_LENGTH)
            .map(|_| {
                let index = rng.random_range(0..ROOM_ID_ALPHABET.len());
                char::from(ROOM_ID_ALPHABET[index])
            })
            .collect();
        Self(code)
    }

    /// Parse a user-supplied code.
    ///
    /// Surrounding whitespace is trimmed and letters are upper-cased. Any
    /// ASCII letter or digit is accepted, including the symbols generation
    /// avoids, so a mistyped `0` for `O` is reported as "not found" rather
    /// than "malformed".
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let normalized = raw.trim().to_ascii_uppercase();
        let well_formed = normalized.len() == ROOM_ID_LENGTH
            && normalized
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());

        if well_formed {
            Ok(Self(normalized))
        } else {
            Err(SessionError::InvalidRoomId(raw.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomId {
    type Error = SessionError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.0
    }
}
