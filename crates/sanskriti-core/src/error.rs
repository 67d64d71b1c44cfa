//! Error types for the SanskritiAR core.
//!
//! Errors are split by who is expected to act on them:
//!
//! - [`AuthError`]: identity provider and social sign-in failures, surfaced to
//!   the user for every explicit sign-in action.
//! - [`PersistenceError`]: local key-value storage failures. Favorites and
//!   display preference swallow these after logging.
//! - [`SessionError`]: what session operations return to callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic message shown for unexpected authentication failures.
pub const GENERIC_AUTH_MESSAGE: &str = "Something went wrong while signing in. Please try again.";

/// Generic message shown when social sign-in fails for any reason other than
/// the user dismissing the flow.
pub const SOCIAL_SIGN_IN_MESSAGE: &str =
    "Failed to sign in with Google. Please try again or use email/password.";

/// Failures reported by the identity provider or the social sign-in SDK.
///
/// Provider error codes are decoded once, at the boundary, through
/// [`AuthError::from_provider_code`]. Nothing past that point compares raw
/// codes.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// Email/password pair (or account) was rejected.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An account already exists for the email.
    #[error("An account already exists for this email")]
    AccountExists,

    #[error("The email address is malformed")]
    InvalidEmail,

    #[error("The password is too weak")]
    WeakPassword,

    /// Transport failure between the device and the provider.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider rejected a social credential as malformed or expired.
    #[error("Malformed credential: {0}")]
    MalformedToken(String),

    /// The social SDK completed without yielding an ID token.
    #[error("No ID token received from social sign-in")]
    MissingIdToken,

    /// The provider answered with a principal that has no subject id.
    #[error("Provider returned a principal without a subject id")]
    MissingSubject,

    /// The user dismissed a sign-in flow. Never shown to the user.
    #[error("Sign-in was cancelled by the user")]
    Cancelled,

    /// Any provider code without a dedicated variant.
    #[error("Provider error [{code}]: {message}")]
    Provider { code: String, message: String },
}

impl AuthError {
    /// Decodes a provider or social SDK error code into a typed error.
    ///
    /// Both the string codes of the identity provider (`auth/...`) and the
    /// numeric codes of the native social SDK (`-5` on iOS, `12501` on
    /// Android) are understood.
    pub fn from_provider_code(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code.trim() {
            "auth/wrong-password"
            | "auth/user-not-found"
            | "auth/invalid-credential"
            | "auth/invalid-login-credentials"
            | "auth/user-disabled" => Self::InvalidCredentials,
            "auth/email-already-in-use" | "auth/credential-already-in-use" => Self::AccountExists,
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/weak-password" => Self::WeakPassword,
            "auth/network-request-failed" | "auth/timeout" => Self::Network(message),
            "auth/invalid-id-token" | "auth/argument-error" | "auth/invalid-idp-response" => {
                Self::MalformedToken(message)
            }
            "auth/popup-closed-by-user"
            | "auth/cancelled-popup-request"
            | "auth/user-cancelled"
            | "-5"
            | "12501"
            | "SIGN_IN_CANCELLED" => Self::Cancelled,
            other => Self::Provider {
                code: other.to_string(),
                message,
            },
        }
    }

    /// Check if the user dismissed the flow.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if retrying the same action may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// The text a dialog should show for this failure.
    ///
    /// Credential problems get a specific hint; everything unexpected falls
    /// back to [`GENERIC_AUTH_MESSAGE`].
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid email or password.",
            Self::AccountExists => "An account with this email already exists.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::WeakPassword => "Please choose a stronger password.",
            Self::Network(_) => "Network error. Check your connection and try again.",
            Self::Cancelled => "",
            Self::MalformedToken(_)
            | Self::MissingIdToken
            | Self::MissingSubject
            | Self::Provider { .. } => {
                GENERIC_AUTH_MESSAGE
            }
        }
    }
}

/// Local durable storage failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceError {
    #[error("IO error: {message}")]
    Io { message: String },

    /// Stored content could not be encoded or decoded.
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    #[error("Lock error: {0}")]
    Lock(String),

    /// The backing store cannot be reached at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl PersistenceError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Errors returned by session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Social sign-in failed for a reason other than cancellation.
    #[error("Social sign-in failed: {0}")]
    SocialSignIn(AuthError),

    /// The identity was accepted by the provider but could not be cached.
    #[error("Failed to persist session: {0}")]
    Persistence(#[from] PersistenceError),

    /// `initialize` may run once per store.
    #[error("Session store is already initialized")]
    AlreadyInitialized,
}

impl SessionError {
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Auth(err) | Self::SocialSignIn(err) if err.is_cancellation())
    }

    /// The text a dialog should show for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Auth(err) => err.user_message(),
            Self::SocialSignIn(_) => SOCIAL_SIGN_IN_MESSAGE,
            Self::Persistence(_) | Self::AlreadyInitialized => GENERIC_AUTH_MESSAGE,
        }
    }
}

/// A type alias for `Result<T, PersistenceError>`.
pub type StorageResult<T> = std::result::Result<T, PersistenceError>;
