// src/models/mod.rs

pub mod analytics;
pub mod audit;
pub mod export;
pub mod notification;
pub mod question;
pub mod quiz;
pub mod score;
pub mod session;
pub mod user;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Partition of students, quizzes and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    School,
    College,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::School => "school",
            Audience::College => "college",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(Audience::School),
            "college" => Ok(Audience::College),
            other => Err(format!("unknown audience '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_parses_lowercase_only() {
        assert_eq!("school".parse::<Audience>(), Ok(Audience::School));
        assert_eq!("college".parse::<Audience>(), Ok(Audience::College));
        assert!("both".parse::<Audience>().is_err());
        assert!("School".parse::<Audience>().is_err());
        assert_eq!(serde_json::to_string(&Audience::College).unwrap(), "\"college\"");
    }
}
