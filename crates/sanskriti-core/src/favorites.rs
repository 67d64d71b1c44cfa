//! FavoriteSet domain model.

use serde::{Deserialize, Deserializer, Serialize};

/// Ids of the sites a user has marked, without duplicates.
///
/// Insertion order is kept so lists render in the order sites were added.
/// Serialized as a plain JSON array of ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, site_id: &str) -> bool {
        self.ids.iter().any(|id| id == site_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Returns a copy with `site_id` removed if present, appended otherwise.
    pub fn toggled(&self, site_id: &str) -> Self {
        let ids = if self.contains(site_id) {
            self.ids.iter().filter(|id| *id != site_id).cloned().collect()
        } else {
            let mut ids = self.ids.clone();
            ids.push(site_id.to_string());
            ids
        };
        Self { ids }
    }

    /// Keeps the items of `catalog` whose id is a favorite, in catalog order.
    pub fn project<'a, T, F>(&self, catalog: &'a [T], id_of: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        catalog
            .iter()
            .filter(|item| self.contains(id_of(item)))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for FavoriteSet {
    /// Collects ids, dropping repeats after their first occurrence.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut ids: Vec<String> = Vec::new();
        for id in iter {
            let id = id.into();
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Self { ids }
    }
}

impl<'de> Deserialize<'de> for FavoriteSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ids = Vec::<String>::deserialize(deserializer)?;
        Ok(ids.into_iter().collect())
    }
}
