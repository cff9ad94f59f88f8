//! Category filter selected in the UI.

use std::fmt;
use std::str::FromStr;

/// Which records the category row selects.
///
/// Parsed from the strings the UI sends: `all`, `favorites`, or a category
/// name. Category names are matched exactly (case-sensitive), the way the
/// filter buttons carry them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Only records in the favorites set.
    Favorites,
    /// Records whose category equals the name.
    Specific(String),
}

impl CategoryFilter {
    /// Returns true for the favorites-only filter.
    pub fn is_favorites(&self) -> bool {
        matches!(self, CategoryFilter::Favorites)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Favorites => write!(f, "favorites"),
            CategoryFilter::Specific(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" | "all" => CategoryFilter::All,
            "favorites" => CategoryFilter::Favorites,
            other => CategoryFilter::Specific(other.to_string()),
        })
    }
}
