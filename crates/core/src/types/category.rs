//! Menu category enumeration.

use serde::{Deserialize, Serialize};

/// The category a menu item belongs to.
///
/// Stored as text with a CHECK constraint; decoded through
/// [`std::str::FromStr`] like [`crate::Role`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Beverages,
    Food,
    Desserts,
    Specials,
}

impl MenuCategory {
    /// All categories, in menu display order.
    pub const ALL: [Self; 4] = [Self::Beverages, Self::Food, Self::Desserts, Self::Specials];

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beverages => "Beverages",
            Self::Food => "Food",
            Self::Desserts => "Desserts",
            Self::Specials => "Specials",
        }
    }
}

impl std::fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beverages => write!(f, "beverages"),
            Self::Food => write!(f, "food"),
            Self::Desserts => write!(f, "desserts"),
            Self::Specials => write!(f, "specials"),
        }
    }
}

impl std::str::FromStr for MenuCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beverages" => Ok(Self::Beverages),
            "food" => Ok(Self::Food),
            "desserts" => Ok(Self::Desserts),
            "specials" => Ok(Self::Specials),
            _ => Err(format!("invalid menu category: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_from_str_roundtrip() {
        for category in MenuCategory::ALL {
            let parsed: MenuCategory = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!("sides".parse::<MenuCategory>().is_err());
        assert!("".parse::<MenuCategory>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(MenuCategory::Beverages.label(), "Beverages");
        assert_eq!(MenuCategory::Specials.label(), "Specials");
    }
}
