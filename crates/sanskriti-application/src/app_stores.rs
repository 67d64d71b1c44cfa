//! Composition root for the three stores.

use crate::favorites_store::FavoritesStore;
use crate::preference_store::PreferenceStore;
use crate::session_store::SessionStore;
use sanskriti_core::error::SessionError;
use sanskriti_core::identity::{IdentityProvider, PopupSocialSignIn, SocialPlatform, SocialSignIn};
use sanskriti_core::storage::KeyValueStore;
use sanskriti_core::theme::SystemAppearance;
use std::sync::Arc;

/// External collaborators the stores are built from.
#[derive(Clone)]
pub struct AppDependencies {
    pub provider: Arc<dyn IdentityProvider>,
    pub social: Arc<dyn SocialSignIn>,
    pub storage: Arc<dyn KeyValueStore>,
    pub appearance: Arc<dyn SystemAppearance>,
}

impl AppDependencies {
    /// Picks the social sign-in flavour for `platform`. On the web the
    /// identity provider runs its own popup, so `native` is not used.
    pub fn select_social(
        platform: SocialPlatform,
        native: Arc<dyn SocialSignIn>,
    ) -> Arc<dyn SocialSignIn> {
        match platform {
            SocialPlatform::Native => native,
            SocialPlatform::Web => Arc::new(PopupSocialSignIn),
        }
    }
}

/// The stores handed to the UI.
#[derive(Clone)]
pub struct AppStores {
    pub session: Arc<SessionStore>,
    pub favorites: Arc<FavoritesStore>,
    pub preferences: Arc<PreferenceStore>,
}

impl AppStores {
    /// Builds the stores, initializes the session and starts following the OS
    /// appearance.
    pub async fn bootstrap(deps: AppDependencies) -> Result<Self, SessionError> {
        let session = Arc::new(SessionStore::new(
            deps.provider,
            deps.social,
            deps.storage.clone(),
        ));
        let favorites = Arc::new(FavoritesStore::load(deps.storage.clone()).await);
        let preferences = Arc::new(
            PreferenceStore::load(deps.storage, deps.appearance.color_scheme()).await,
        );

        session.initialize().await?;
        preferences.attach_system_appearance(deps.appearance);

        tracing::info!("[AppStores] Stores ready");
        Ok(Self {
            session,
            favorites,
            preferences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session_store::SessionState;
    use crate::test_support::{ScriptedProvider, ScriptedSocial};
    use sanskriti_core::identity::{Principal, SocialCredential, SocialOutcome};
    use sanskriti_core::storage::THEME_KEY;
    use sanskriti_core::theme::{ColorScheme, ThemeMode};
    use sanskriti_infrastructure::{InMemoryKeyValueStore, ManualAppearance};

    #[tokio::test]
    async fn test_bootstrap_wires_everything() {
        let storage = Arc::new(InMemoryKeyValueStore::with_entries([
            (THEME_KEY, "system"),
            ("@sanskritiar_favorites", r#"["4"]"#),
        ]));
        let appearance = Arc::new(ManualAppearance::new(Some(ColorScheme::Light)));

        let stores = AppStores::bootstrap(AppDependencies {
            provider: Arc::new(ScriptedProvider::new(Some(Principal::new("u1")))),
            social: Arc::new(ScriptedSocial::default()),
            storage,
            appearance: appearance.clone(),
        })
        .await
        .unwrap();

        assert!(stores.session.is_initialized());
        assert!(matches!(stores.session.state(), SessionState::Authenticated(_)));
        assert!(stores.favorites.is_favorite("4"));
        assert_eq!(stores.preferences.mode(), ThemeMode::System);
        assert!(!stores.preferences.is_dark());

        let mut rx = stores.preferences.subscribe();
        appearance.set_color_scheme(Some(ColorScheme::Dark));
        rx.changed().await.unwrap();
        assert!(stores.preferences.is_dark());
    }

    #[tokio::test]
    async fn test_web_platform_uses_popup() {
        let social = AppDependencies::select_social(
            SocialPlatform::Web,
            Arc::new(ScriptedSocial::default()),
        );
        assert_eq!(
            social.obtain_credential().await.unwrap(),
            SocialOutcome::Credential(SocialCredential::Popup)
        );
    }
}
