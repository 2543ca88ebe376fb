use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    #[default]
    Math,
    Science,
    Computer,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Science, Subject::Computer];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::Computer => "computer",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Science => "Science",
            Subject::Computer => "Computer",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "math" | "maths" | "mathematics" => Ok(Subject::Math),
            "science" => Ok(Subject::Science),
            "computer" | "computers" => Ok(Subject::Computer),
            _ => Err(ParseError::UnknownSubject(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Math".parse::<Subject>().unwrap(), Subject::Math);
        assert_eq!(" COMPUTER ".parse::<Subject>().unwrap(), Subject::Computer);
        assert!(matches!(
            "history".parse::<Subject>(),
            Err(ParseError::UnknownSubject(_))
        ));
    }
}
