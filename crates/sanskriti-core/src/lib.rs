pub mod catalog;
pub mod error;
pub mod favorites;
pub mod identity;
pub mod storage;
pub mod theme;

pub use error::{AuthError, PersistenceError, SessionError};
pub use favorites::FavoriteSet;
pub use identity::{Identity, Principal};
pub use storage::KeyValueStore;
pub use theme::{ColorScheme, DisplayPreference, ThemeMode};
