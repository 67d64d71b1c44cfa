//! Search and filtering over a catalog slice.
//!
//! Catalogs are small and static, so every query is a linear scan that keeps
//! catalog order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::{HeritageSite, SiteCategory};

/// Filter value meaning "no restriction".
pub const ALL: &str = "all";

/// Explore-screen filter: free text plus optional state and category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteQuery {
    /// Case-insensitive substring matched against name and location.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub category: Option<SiteCategory>,
}

impl SiteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Restricts to one state. `"all"` clears the restriction.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        let state = state.into();
        self.state = (!state.eq_ignore_ascii_case(ALL)).then_some(state);
        self
    }

    pub fn with_category(mut self, category: SiteCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts by a category id as used by the UI chips. `"all"` and
    /// unknown ids clear the restriction.
    pub fn with_category_id(mut self, category_id: &str) -> Self {
        self.category = SiteCategory::from_str(category_id).ok();
        self
    }

    pub fn matches(&self, site: &HeritageSite) -> bool {
        let needle = self.text.to_lowercase();
        let matches_text = site.name.to_lowercase().contains(&needle)
            || site.location.to_lowercase().contains(&needle);
        let matches_state = self.state.as_deref().is_none_or(|state| site.state == state);
        let matches_category = self.category.is_none_or(|category| site.category == category);

        matches_text && matches_state && matches_category
    }
}

/// Sites matching `query`, in catalog order.
pub fn filter_sites<'a>(sites: &'a [HeritageSite], query: &SiteQuery) -> Vec<&'a HeritageSite> {
    sites.iter().filter(|site| query.matches(site)).collect()
}

/// Unique states in first-seen order.
pub fn distinct_states(sites: &[HeritageSite]) -> Vec<&str> {
    let mut states: Vec<&str> = Vec::new();
    for site in sites {
        if !states.contains(&site.state.as_str()) {
            states.push(&site.state);
        }
    }
    states
}
