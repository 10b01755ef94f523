use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScrubError;

/// Disposability category of a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Temp,
    Cache,
    Update,
    Personal,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Temp,
        Category::Cache,
        Category::Update,
        Category::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Temp => "temp",
            Category::Cache => "cache",
            Category::Update => "update",
            Category::Personal => "personal",
        }
    }

    /// Whether files of this category are picked by auto-clean on their own.
    pub fn is_disposable(&self) -> bool {
        !matches!(self, Category::Personal)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ScrubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "temp" => Ok(Category::Temp),
            "cache" => Ok(Category::Cache),
            "update" => Ok(Category::Update),
            "personal" => Ok(Category::Personal),
            other => Err(ScrubError::Config(format!("Unknown category: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("CACHE".parse::<Category>().unwrap(), Category::Cache);
        assert!("junk".parse::<Category>().is_err());
    }

    #[test]
    fn test_only_personal_is_not_disposable() {
        assert!(Category::Temp.is_disposable());
        assert!(Category::Cache.is_disposable());
        assert!(Category::Update.is_disposable());
        assert!(!Category::Personal.is_disposable());
    }
}
