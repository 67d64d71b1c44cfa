//! Application layer: the observable stores the UI binds to.
//!
//! - [`SessionStore`]: authentication lifecycle and the cached identity
//! - [`FavoritesStore`]: favorited site ids
//! - [`PreferenceStore`]: theme mode resolved against the OS color scheme
//! - [`AppStores`]: builds and wires the three

pub mod app_stores;
pub mod favorites_store;
pub mod preference_store;
pub mod session_store;

#[cfg(test)]
mod test_support;

pub use app_stores::{AppDependencies, AppStores};
pub use favorites_store::FavoritesStore;
pub use preference_store::PreferenceStore;
pub use session_store::{SessionState, SessionStore};
