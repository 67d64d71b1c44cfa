//! Ports to the remote identity provider and the social sign-in SDK.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::model::Principal;
use crate::error::AuthError;

/// Push stream of the provider's current principal.
///
/// The current value is what the provider believes right now (`None` when no
/// session exists); every change is delivered as a new value.
pub type PrincipalStream = watch::Receiver<Option<Principal>>;

/// Remote identity provider (email/password plus social federation).
///
/// Implementations decode provider error codes with
/// [`AuthError::from_provider_code`] before returning.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Subscribes to session-change notifications.
    fn subscribe(&self) -> PrincipalStream;

    /// Signs in with email and password.
    async fn verify_credentials(&self, email: &str, password: &str)
    -> Result<Principal, AuthError>;

    /// Creates an email/password account and signs it in.
    async fn create_account(&self, email: &str, password: &str) -> Result<Principal, AuthError>;

    /// Exchanges a social credential for a provider session.
    async fn exchange_social_credential(
        &self,
        credential: SocialCredential,
    ) -> Result<Principal, AuthError>;

    /// Ends the provider session.
    async fn end_session(&self) -> Result<(), AuthError>;
}

/// Which social sign-in flavour the running platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    /// Native SDK yields an ID token that is exchanged with the provider.
    #[default]
    Native,
    /// The provider runs its own popup flow.
    Web,
}

/// A credential handed from the social SDK to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialCredential {
    /// ID token issued by the native social SDK.
    IdToken(String),
    /// Ask the provider to run its popup flow.
    Popup,
}

/// Result of asking the social SDK for a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialOutcome {
    Credential(SocialCredential),
    /// The user dismissed the flow.
    Cancelled,
}

/// Native or web social sign-in SDK.
#[async_trait]
pub trait SocialSignIn: Send + Sync {
    async fn obtain_credential(&self) -> Result<SocialOutcome, AuthError>;

    /// Signs out of the social account. Failing here is expected when no
    /// social session exists.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Social sign-in for the web, where the provider owns the popup.
#[derive(Debug, Clone, Default)]
pub struct PopupSocialSignIn;

#[async_trait]
impl SocialSignIn for PopupSocialSignIn {
    async fn obtain_credential(&self) -> Result<SocialOutcome, AuthError> {
        Ok(SocialOutcome::Credential(SocialCredential::Popup))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_popup_sign_in_defers_to_provider() {
        let social = PopupSocialSignIn;
        assert_eq!(
            social.obtain_credential().await.unwrap(),
            SocialOutcome::Credential(SocialCredential::Popup)
        );
        assert!(social.sign_out().await.is_ok());
    }

    #[test]
    fn test_platform_serde() {
        let platform: SocialPlatform = serde_json::from_str("\"web\"").unwrap();
        assert_eq!(platform, SocialPlatform::Web);
        assert_eq!(SocialPlatform::default(), SocialPlatform::Native);
    }
}
