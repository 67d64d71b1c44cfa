//! Identity domain module.
//!
//! # Module Structure
//!
//! - `model`: `Identity` (cached user) and `Principal` (provider view)
//! - `provider`: identity provider and social sign-in ports

mod model;
mod provider;

pub use model::{DEFAULT_DISPLAY_NAME, Identity, Principal};
pub use provider::{
    IdentityProvider, PopupSocialSignIn, PrincipalStream, SocialCredential, SocialOutcome,
    SocialPlatform, SocialSignIn,
};
