//! Heritage catalog domain module.
//!
//! The catalog is supplied from outside the stores and is never mutated by
//! them. [`CatalogSource`] is the seam the UI and CLI read through.

mod model;
mod query;

pub use model::{CategoryInfo, HeritageSite, SiteCategory};
pub use query::{ALL, SiteQuery, distinct_states, filter_sites};

use strum::IntoEnumIterator;

/// Read-only access to a heritage catalog.
pub trait CatalogSource: Send + Sync {
    fn sites(&self) -> &[HeritageSite];

    fn categories(&self) -> &[CategoryInfo];

    fn find(&self, site_id: &str) -> Option<&HeritageSite> {
        self.sites().iter().find(|site| site.id == site_id)
    }

    fn search(&self, query: &SiteQuery) -> Vec<&HeritageSite> {
        filter_sites(self.sites(), query)
    }
}

/// The chip list: "All Sites" followed by every [`SiteCategory`].
pub fn default_categories() -> Vec<CategoryInfo> {
    std::iter::once(CategoryInfo::new(ALL, "All Sites", "explore"))
        .chain(
            SiteCategory::iter()
                .map(|category| CategoryInfo::new(category.to_string(), category.label(), category.icon())),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let categories = default_categories();
        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["all", "monument", "temple", "fort", "palace", "natural"]);
        assert_eq!(categories[0].name, "All Sites");
        assert_eq!(categories[3].icon, "security");
    }
}
