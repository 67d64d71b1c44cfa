//! Display preference store.
//!
//! Only the [`ThemeMode`] is persisted (under [`THEME_KEY`]). Whether the UI
//! renders dark is derived from the mode and the last OS color scheme.

use sanskriti_core::storage::{KeyValueStore, THEME_KEY};
use sanskriti_core::theme::{ColorScheme, DisplayPreference, SystemAppearance, ThemeMode};
use std::str::FromStr;
use std::sync::{Arc, OnceLock, Weak};
use tokio::sync::{Mutex, watch};
use tokio::task::AbortHandle;

pub struct PreferenceStore {
    storage: Arc<dyn KeyValueStore>,
    preference: watch::Sender<DisplayPreference>,
    write_lock: Mutex<()>,
    appearance_listener: OnceLock<AbortHandle>,
}

impl PreferenceStore {
    /// Loads the persisted mode, defaulting to dark when it is absent or
    /// unreadable. `os_scheme` seeds the resolved appearance.
    pub async fn load(storage: Arc<dyn KeyValueStore>, os_scheme: Option<ColorScheme>) -> Self {
        let mode = match storage.get(THEME_KEY).await {
            Ok(Some(raw)) => ThemeMode::from_str(raw.trim()).unwrap_or_else(|_| {
                tracing::warn!("[PreferenceStore] Unknown theme '{}', using default", raw);
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::error!("[PreferenceStore] Error loading theme: {}", e);
                ThemeMode::default()
            }
        };

        let (preference, _) = watch::channel(DisplayPreference::new(mode, os_scheme));
        Self {
            storage,
            preference,
            write_lock: Mutex::new(()),
            appearance_listener: OnceLock::new(),
        }
    }

    pub fn preference(&self) -> DisplayPreference {
        *self.preference.borrow()
    }

    pub fn mode(&self) -> ThemeMode {
        self.preference.borrow().mode()
    }

    pub fn is_dark(&self) -> bool {
        self.preference.borrow().is_dark()
    }

    /// Registers an observer. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<DisplayPreference> {
        self.preference.subscribe()
    }

    /// Persists `mode`, then publishes the new preference.
    ///
    /// A failed write is logged and leaves the current preference in place.
    pub async fn set_theme(&self, mode: ThemeMode) -> DisplayPreference {
        let _guard = self.write_lock.lock().await;
        self.commit(mode).await
    }

    /// Switches to the concrete mode opposite to what is rendered now. In
    /// system mode this leaves system mode.
    pub async fn toggle_theme(&self) -> DisplayPreference {
        let _guard = self.write_lock.lock().await;
        let next = ThemeMode::opposite_of(self.is_dark());
        self.commit(next).await
    }

    /// Records an OS color scheme change.
    ///
    /// The scheme is always remembered, but observers hear about it only
    /// while following the system.
    pub fn on_system_scheme_changed(&self, scheme: Option<ColorScheme>) {
        self.preference.send_if_modified(|current| {
            if current.os_scheme() == scheme {
                return false;
            }
            let was_dark = current.is_dark();
            *current = current.with_os_scheme(scheme);
            current.mode() == ThemeMode::System && current.is_dark() != was_dark
        });
    }

    /// Follows `appearance` in the background until this store or the
    /// appearance source is dropped. Only the first call attaches.
    pub fn attach_system_appearance(self: &Arc<Self>, appearance: Arc<dyn SystemAppearance>) {
        if self.appearance_listener.get().is_some() {
            tracing::warn!("[PreferenceStore] System appearance already attached");
            return;
        }

        let mut schemes = appearance.subscribe();
        self.on_system_scheme_changed(*schemes.borrow_and_update());

        let store = Arc::downgrade(self);
        let handle = tokio::spawn(Self::follow_appearance(store, schemes));
        if let Err(handle) = self.appearance_listener.set(handle.abort_handle()) {
            handle.abort();
        }
    }

    async fn follow_appearance(store: Weak<Self>, mut schemes: watch::Receiver<Option<ColorScheme>>) {
        while schemes.changed().await.is_ok() {
            let scheme = *schemes.borrow_and_update();
            let Some(store) = store.upgrade() else {
                break;
            };
            tracing::debug!("[PreferenceStore] OS color scheme changed: {:?}", scheme);
            store.on_system_scheme_changed(scheme);
        }
    }

    async fn commit(&self, mode: ThemeMode) -> DisplayPreference {
        if let Err(e) = self.storage.set(THEME_KEY, &mode.to_string()).await {
            tracing::error!("[PreferenceStore] Error saving theme: {}", e);
            return self.preference();
        }

        self.preference.send_if_modified(|current| {
            if current.mode() == mode {
                false
            } else {
                *current = current.with_mode(mode);
                true
            }
        });
        self.preference()
    }
}

impl Drop for PreferenceStore {
    fn drop(&mut self) {
        if let Some(listener) = self.appearance_listener.get() {
            listener.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FlakyStore;
    use sanskriti_infrastructure::{InMemoryKeyValueStore, ManualAppearance};

    async fn store_with(
        raw: Option<&str>,
        os_scheme: Option<ColorScheme>,
    ) -> (Arc<FlakyStore>, Arc<PreferenceStore>) {
        let inner = match raw {
            Some(raw) => InMemoryKeyValueStore::with_entries([(THEME_KEY, raw)]),
            None => InMemoryKeyValueStore::new(),
        };
        let storage = Arc::new(FlakyStore::new(inner));
        let store = PreferenceStore::load(storage.clone(), os_scheme).await;
        (storage, Arc::new(store))
    }

    async fn persisted(storage: &FlakyStore) -> Option<String> {
        storage.get(THEME_KEY).await.unwrap()
    }

    #[tokio::test]
    async fn test_default_is_dark() {
        let (_, store) = store_with(None, Some(ColorScheme::Light)).await;
        assert_eq!(store.mode(), ThemeMode::Dark);
        assert!(store.is_dark());
    }

    #[tokio::test]
    async fn test_unknown_stored_value_defaults() {
        let (_, store) = store_with(Some("sepia"), None).await;
        assert_eq!(store.mode(), ThemeMode::Dark);

        let (_, store) = store_with(Some("Light"), None).await;
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_set_theme_persists_and_notifies() {
        let (storage, store) = store_with(None, None).await;
        let mut rx = store.subscribe();

        let preference = store.set_theme(ThemeMode::Light).await;
        assert!(!preference.is_dark());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().mode(), ThemeMode::Light);
        assert_eq!(persisted(&storage).await.as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_system_mode_follows_os_then_toggle_exits() {
        let (storage, store) = store_with(None, Some(ColorScheme::Light)).await;

        store.set_theme(ThemeMode::System).await;
        assert!(!store.is_dark());

        store.on_system_scheme_changed(Some(ColorScheme::Dark));
        assert!(store.is_dark());
        assert_eq!(store.mode(), ThemeMode::System);
        assert_eq!(persisted(&storage).await.as_deref(), Some("system"));

        let preference = store.toggle_theme().await;
        assert_eq!(preference.mode(), ThemeMode::Light);
        assert!(!preference.is_dark());
        assert_eq!(persisted(&storage).await.as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn test_os_change_outside_system_mode_is_silent_but_remembered() {
        let (_, store) = store_with(Some("light"), Some(ColorScheme::Light)).await;
        let mut rx = store.subscribe();
        rx.borrow_and_update();

        store.on_system_scheme_changed(Some(ColorScheme::Dark));
        assert!(!rx.has_changed().unwrap());
        assert!(!store.is_dark());

        store.set_theme(ThemeMode::System).await;
        assert!(store.is_dark());
    }

    #[tokio::test]
    async fn test_toggle_concrete_modes() {
        let (_, store) = store_with(Some("dark"), None).await;
        assert_eq!(store.toggle_theme().await.mode(), ThemeMode::Light);
        assert_eq!(store.toggle_theme().await.mode(), ThemeMode::Dark);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_preference() {
        let (storage, store) = store_with(Some("dark"), None).await;
        let mut rx = store.subscribe();
        rx.borrow_and_update();
        storage.fail_writes(true);

        let preference = store.set_theme(ThemeMode::Light).await;
        assert_eq!(preference.mode(), ThemeMode::Dark);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_attach_system_appearance() {
        let (_, store) = store_with(Some("system"), None).await;
        let appearance = Arc::new(ManualAppearance::new(Some(ColorScheme::Dark)));
        store.attach_system_appearance(appearance.clone());
        assert!(store.is_dark());

        let mut rx = store.subscribe();
        rx.borrow_and_update();
        appearance.set_color_scheme(Some(ColorScheme::Light));
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_dark());
    }
}
