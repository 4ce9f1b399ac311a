use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Probe sequence is empty")]
    Empty,

    #[error("Invalid base '{base}' at position {position}: probe alphabet is A, C, G, T, N")]
    InvalidBase { base: char, position: usize },
}

/// A validated probe sequence.
///
/// The alphabet is restricted to `{A, C, G, T, N}`; input is accepted
/// case-insensitively and stored uppercase. Construction is the only way to
/// obtain a `Probe`, so any `Probe` value is known valid downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    sequence: String,
}

impl Probe {
    /// Validate and normalize a probe sequence.
    ///
    /// Surrounding whitespace is tolerated and stripped.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Empty` for an empty (or whitespace-only)
    /// input, or `ValidationError::InvalidBase` naming the first character
    /// outside the alphabet.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        let sequence = trimmed.to_uppercase();
        for (i, base) in sequence.chars().enumerate() {
            if !matches!(base, 'A' | 'C' | 'G' | 'T' | 'N') {
                // Positions in errors are 1-based for user friendliness
                return Err(ValidationError::InvalidBase {
                    base,
                    position: i + 1,
                });
            }
        }

        Ok(Self { sequence })
    }

    /// The normalized (uppercase) sequence
    #[must_use]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Probe length in bases
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Probe lengths are tiny
    pub fn len(&self) -> u64 {
        self.sequence.len() as u64
    }

    /// Always false for a validated probe; provided for completeness
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl std::fmt::Display for Probe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sequence)
    }
}
