//! Closed set of product categories.

use core::str::FromStr;
use serde::Serialize;

use catalog_core::ValidationError;

/// Product category.
///
/// The wire and storage form is the upper-case name (`"CLOTHS"`, `"FOOD"`, ...).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every member, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Names are matched exactly; `"cloths"` is not a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_category(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn rejects_unknown_and_miscased_names() {
        for bad in ["cloths", "Cloths", "GARDEN", ""] {
            match bad.parse::<Category>() {
                Err(ValidationError::InvalidCategory(name)) => assert_eq!(name, bad),
                other => panic!("Expected InvalidCategory for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_as_storage_name() {
        for category in Category::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, serde_json::json!(category.as_str()));
        }
    }

    #[test]
    fn defaults_to_unknown() {
        assert_eq!(Category::default(), Category::Unknown);
    }
}
