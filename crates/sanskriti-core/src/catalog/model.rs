//! Heritage catalog domain models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Kind of heritage site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SiteCategory {
    Monument,
    Temple,
    Fort,
    Palace,
    Natural,
}

impl SiteCategory {
    /// Plural label shown on filter chips.
    pub fn label(self) -> &'static str {
        match self {
            SiteCategory::Monument => "Monuments",
            SiteCategory::Temple => "Temples",
            SiteCategory::Fort => "Forts",
            SiteCategory::Palace => "Palaces",
            SiteCategory::Natural => "Natural",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SiteCategory::Monument => "account-balance",
            SiteCategory::Temple => "place-of-worship",
            SiteCategory::Fort => "security",
            SiteCategory::Palace => "castle",
            SiteCategory::Natural => "nature",
        }
    }
}

/// A heritage site as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageSite {
    pub id: String,
    pub name: String,
    /// City and state, e.g. "Agra, Uttar Pradesh".
    pub location: String,
    pub description: String,
    /// Image URL.
    pub image: String,
    pub category: SiteCategory,
    pub state: String,
    /// Free-form: "1653", "14th Century", "2nd Century BCE".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<String>,
    pub significance: String,
}

/// A browsable category entry, including the synthetic "all" entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    /// Material icon name.
    pub icon: String,
}

impl CategoryInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}
