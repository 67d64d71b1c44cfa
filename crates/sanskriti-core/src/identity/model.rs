//! Identity and Principal domain models.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Display name used when the provider does not supply one.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The provider's description of an authenticated account.
///
/// Optional fields mirror what identity providers actually return: social
/// accounts may lack an email and fresh email accounts lack a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub subject_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Principal {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_name: None,
            email: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// The currently authenticated user as cached on the device.
///
/// An `Identity` can only be built with a non-empty subject id, so a value of
/// this type is always complete. Absence is expressed with `Option<Identity>`.
///
/// Serialized as `{"id": .., "name": .., "email": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "id")]
    subject_id: String,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(default)]
    email: String,
}

impl Identity {
    /// Creates an identity, applying the default display name when `display_name`
    /// is blank.
    pub fn new(
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let subject_id = subject_id.into();
        if subject_id.trim().is_empty() {
            return Err(AuthError::MissingSubject);
        }

        let display_name = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            DEFAULT_DISPLAY_NAME.to_string()
        } else {
            display_name
        };

        Ok(Self {
            subject_id,
            display_name,
            email: email.into(),
        })
    }

    /// Builds an identity from provider-supplied fields.
    pub fn from_principal(principal: &Principal) -> Result<Self, AuthError> {
        Self::new(
            principal.subject_id.clone(),
            principal.display_name.clone().unwrap_or_default(),
            principal.email.clone().unwrap_or_default(),
        )
    }

    /// Builds an identity from provider fields but with a caller-chosen name.
    pub fn from_principal_named(principal: &Principal, display_name: &str) -> Result<Self, AuthError> {
        Self::new(
            principal.subject_id.clone(),
            display_name,
            principal.email.clone().unwrap_or_default(),
        )
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether this cached identity belongs to `principal`.
    pub fn matches(&self, principal: &Principal) -> bool {
        self.subject_id == principal.subject_id
    }

    /// Decodes a cached identity, rejecting records with an empty subject id.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let identity: Identity = serde_json::from_str(raw)?;
        if identity.subject_id.trim().is_empty() {
            return Err(serde::de::Error::custom("cached identity has an empty id"));
        }
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_name_fallback() {
        let principal = Principal::new("u1").with_display_name("").with_email("a@b.com");
        let identity = Identity::from_principal(&principal).unwrap();
        assert_eq!(identity.subject_id(), "u1");
        assert_eq!(identity.display_name(), "User");
        assert_eq!(identity.email(), "a@b.com");
    }

    #[test]
    fn test_missing_email_becomes_empty() {
        let principal = Principal::new("g-42").with_display_name("Asha");
        let identity = Identity::from_principal(&principal).unwrap();
        assert_eq!(identity.display_name(), "Asha");
        assert_eq!(identity.email(), "");
    }

    #[test]
    fn test_empty_subject_rejected() {
        assert_eq!(
            Identity::new("", "Asha", "a@b.com"),
            Err(AuthError::MissingSubject)
        );
        assert_eq!(
            Identity::from_principal(&Principal::new("   ")),
            Err(AuthError::MissingSubject)
        );
    }

    #[test]
    fn test_cached_shape() {
        let identity = Identity::new("u1", "Asha", "a@b.com").unwrap();
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "u1", "name": "Asha", "email": "a@b.com"})
        );

        let decoded = Identity::from_json(&json.to_string()).unwrap();
        assert_eq!(decoded, identity);
    }

    #[test]
    fn test_from_json_rejects_empty_id() {
        assert!(Identity::from_json(r#"{"id":"","name":"x","email":""}"#).is_err());
        assert!(Identity::from_json("not json").is_err());
    }

    #[test]
    fn test_matches_principal() {
        let identity = Identity::new("u1", "Asha", "").unwrap();
        assert!(identity.matches(&Principal::new("u1")));
        assert!(!identity.matches(&Principal::new("u2")));
    }
}
