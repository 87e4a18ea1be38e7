use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Interview question domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    Behavioral,
    SystemDesign,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown interview category: {0:?}")]
pub struct CategoryParseError(pub String);

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Technical,
        Category::Behavioral,
        Category::SystemDesign,
    ];

    /// Wire name used in storage and URLs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::Behavioral => "behavioral",
            Category::SystemDesign => "system_design",
        }
    }

    /// Human-readable heading for the category.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Technical => "Technical Interview",
            Category::Behavioral => "Behavioral Interview",
            Category::SystemDesign => "System Design Interview",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}
