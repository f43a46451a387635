//! Speaker and record-kind enums for Viva.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and round-trip through [`FromStr`] / [`fmt::Display`] with the same spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Tutor,
    Student,
}

impl Speaker {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tutor => "tutor",
            Self::Student => "student",
        }
    }

    /// Transcript label, without the trailing colon.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tutor => "Tutor",
            Self::Student => "Student",
        }
    }

    /// Chat-completion role name (`assistant` for the tutor, `user` for the student).
    #[must_use]
    pub const fn role(self) -> &'static str {
        match self {
            Self::Tutor => "assistant",
            Self::Student => "user",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Speaker {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tutor" => Ok(Self::Tutor),
            "student" => Ok(Self::Student),
            other => Err(CoreError::UnknownVariant {
                kind: "speaker",
                value: other.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordKind
// ---------------------------------------------------------------------------

/// Origin of a knowledge record: a curated misconception entry or a practice problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Misconception,
    Problem,
}

impl RecordKind {
    /// Return the string representation used in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Misconception => "misconception",
            Self::Problem => "problem",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "misconception" => Ok(Self::Misconception),
            "problem" => Ok(Self::Problem),
            other => Err(CoreError::UnknownVariant {
                kind: "record kind",
                value: other.to_string(),
            }),
        }
    }
}
