pub mod appearance;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod paths;
pub mod storage;

pub use crate::appearance::ManualAppearance;
pub use crate::catalog::BuiltinCatalog;
pub use crate::config::AppConfig;
pub use crate::paths::SanskritiPaths;
pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
