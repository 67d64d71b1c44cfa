use super::sites::format_site_line;
use anyhow::{Result, bail};
use sanskriti_application::FavoritesStore;
use sanskriti_core::catalog::{CatalogSource, HeritageSite};

pub fn list(favorites: &FavoritesStore, catalog: &dyn CatalogSource) {
    let sites = favorites.favorite_sites(catalog.sites());
    if sites.is_empty() {
        println!("No favorites yet. Add one with `sanskriti favorites toggle <id>`.");
        return;
    }
    for site in sites {
        println!("{}", format_site_line(site, true));
    }
}

pub async fn toggle(favorites: &FavoritesStore, catalog: &dyn CatalogSource, id: &str) -> Result<()> {
    let Some(site) = catalog.find(id) else {
        bail!("No heritage site with id '{}'", id);
    };

    println!("{}", toggle_site(favorites, site).await);
    Ok(())
}

/// Toggles `site` and describes the outcome.
async fn toggle_site(favorites: &FavoritesStore, site: &HeritageSite) -> String {
    let was_favorite = favorites.is_favorite(&site.id);
    let now_favorite = favorites.toggle_favorite(&site.id).await;

    if now_favorite == was_favorite {
        "Could not save favorites, see log for details".to_string()
    } else if now_favorite {
        format!("★ Added {} to favorites", site.name)
    } else {
        format!("Removed {} from favorites", site.name)
    }
}

pub async fn clear(favorites: &FavoritesStore) {
    favorites.clear_favorites().await;
    if favorites.favorites().is_empty() {
        println!("Favorites cleared");
    } else {
        println!("Could not clear favorites, see log for details");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanskriti_infrastructure::{BuiltinCatalog, FileKeyValueStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_toggle_reports_add_then_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(FileKeyValueStore::new(temp_dir.path().join("storage.json")));
        let favorites = FavoritesStore::load(storage).await;
        let catalog = BuiltinCatalog;
        let site = catalog.find("1").unwrap();

        assert_eq!(
            toggle_site(&favorites, site).await,
            "★ Added Taj Mahal to favorites"
        );
        assert_eq!(
            toggle_site(&favorites, site).await,
            "Removed Taj Mahal from favorites"
        );
    }

    #[tokio::test]
    async fn test_toggle_reports_failed_write() {
        let temp_dir = TempDir::new().unwrap();
        // Parent of the store is a regular file, so every write fails
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let storage = Arc::new(FileKeyValueStore::new(blocker.join("storage.json")));
        let favorites = FavoritesStore::load(storage).await;
        let catalog = BuiltinCatalog;
        let site = catalog.find("1").unwrap();

        assert_eq!(
            toggle_site(&favorites, site).await,
            "Could not save favorites, see log for details"
        );
        assert!(!favorites.is_favorite("1"));
    }
}
