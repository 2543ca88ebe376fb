use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseError;

pub const MIN_SCHOOL_GRADE: u8 = 1;
pub const MAX_SCHOOL_GRADE: u8 = 12;

/// School grade `1..=12`, or college.
///
/// On the wire a school grade is a JSON number (numeric strings are accepted
/// too) and college is the string `"college"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GradeRepr", into = "GradeRepr")]
pub enum Grade {
    Level(u8),
    College,
}

impl Grade {
    /// Every selectable grade in display order.
    pub fn all() -> impl Iterator<Item = Grade> {
        (MIN_SCHOOL_GRADE..=MAX_SCHOOL_GRADE)
            .map(Grade::Level)
            .chain(std::iter::once(Grade::College))
    }

    pub fn is_college(self) -> bool {
        matches!(self, Grade::College)
    }

    /// Phrase used inside tutor prompts, e.g. `grade 7` or `college level`.
    pub fn level_phrase(self) -> String {
        match self {
            Grade::Level(level) => format!("grade {level}"),
            Grade::College => "college level".to_string(),
        }
    }

    fn from_level(level: i64) -> Result<Self, ParseError> {
        u8::try_from(level)
            .ok()
            .filter(|value| (MIN_SCHOOL_GRADE..=MAX_SCHOOL_GRADE).contains(value))
            .map(Grade::Level)
            .ok_or_else(|| ParseError::InvalidGrade(level.to_string()))
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade::Level(5)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Level(level) => write!(f, "{level}"),
            Grade::College => f.write_str("college"),
        }
    }
}

impl FromStr for Grade {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("college") {
            return Ok(Grade::College);
        }

        trimmed
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidGrade(format!("{value:?}")))
            .and_then(Grade::from_level)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum GradeRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<GradeRepr> for Grade {
    type Error = ParseError;

    fn try_from(value: GradeRepr) -> Result<Self, Self::Error> {
        match value {
            GradeRepr::Number(level) => Grade::from_level(level),
            GradeRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Grade> for GradeRepr {
    fn from(value: Grade) -> Self {
        match value {
            Grade::Level(level) => GradeRepr::Number(i64::from(level)),
            Grade::College => GradeRepr::Text("college".to_string()),
        }
    }
}
