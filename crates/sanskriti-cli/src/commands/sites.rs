use anyhow::{Result, bail};
use sanskriti_application::FavoritesStore;
use sanskriti_core::catalog::{
    ALL, CatalogSource, HeritageSite, SiteCategory, SiteQuery, distinct_states,
};
use std::str::FromStr;

/// One-line listing used by `sites` and `favorites list`.
pub fn format_site_line(site: &HeritageSite, favorite: bool) -> String {
    format!(
        "{} {:>3}  {:<22} {:<30} [{}]",
        if favorite { "★" } else { " " },
        site.id,
        site.name,
        site.location,
        site.category
    )
}

fn build_query(
    query: Option<String>,
    state: Option<String>,
    category: Option<String>,
) -> Result<SiteQuery> {
    let mut site_query = SiteQuery::new().with_text(query.unwrap_or_default());
    if let Some(state) = state {
        site_query = site_query.with_state(state);
    }
    if let Some(category) = category {
        if !category.eq_ignore_ascii_case(ALL) && SiteCategory::from_str(&category).is_err() {
            bail!("Unknown category '{}'", category);
        }
        site_query = site_query.with_category_id(&category);
    }
    Ok(site_query)
}

pub fn list(
    catalog: &dyn CatalogSource,
    query: Option<String>,
    state: Option<String>,
    category: Option<String>,
) -> Result<()> {
    let site_query = build_query(query, state, category)?;
    let sites = catalog.search(&site_query);

    if sites.is_empty() {
        println!("No heritage sites found");
        return Ok(());
    }
    for site in &sites {
        println!("{}", format_site_line(site, false));
    }
    println!("\n{} site(s)", sites.len());
    Ok(())
}

pub fn show(catalog: &dyn CatalogSource, favorites: &FavoritesStore, id: &str) -> Result<()> {
    let Some(site) = catalog.find(id) else {
        bail!("No heritage site with id '{}'", id);
    };

    println!("{}", site.name);
    println!("  Location:     {}", site.location);
    println!("  Category:     {}", site.category.label());
    if let Some(year) = &site.year_built {
        println!("  Built:        {}", year);
    }
    println!("  Significance: {}", site.significance);
    if favorites.is_favorite(&site.id) {
        println!("  ★ In your favorites");
    }
    println!("\n{}", site.description);
    Ok(())
}

pub fn categories(catalog: &dyn CatalogSource) {
    for category in catalog.categories() {
        println!("{:<10} {}", category.id, category.name);
    }
}

pub fn states(catalog: &dyn CatalogSource) {
    for state in distinct_states(catalog.sites()) {
        println!("{}", state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanskriti_infrastructure::BuiltinCatalog;

    #[test]
    fn test_build_query_accepts_all() {
        let query = build_query(None, Some("all".into()), Some("ALL".into())).unwrap();
        assert_eq!(query, SiteQuery::new());
    }

    #[test]
    fn test_build_query_rejects_unknown_category() {
        assert!(build_query(None, None, Some("castle".into())).is_err());
    }

    #[test]
    fn test_format_marks_favorites() {
        let catalog = BuiltinCatalog;
        let site = catalog.find("1").unwrap();
        let line = format_site_line(site, true);
        assert!(line.starts_with('★'));
        assert!(line.contains("Taj Mahal"));
        assert!(line.contains("[monument]"));
    }
}
