//! Display preference domain models.
//!
//! The stored state is only the [`ThemeMode`]. Whether the UI renders dark is
//! always derived from the mode and the last color scheme the OS reported.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::sync::watch;

/// The user's chosen theme mode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
    /// Follow the OS color scheme.
    System,
}

/// Color scheme reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ThemeMode {
    /// Resolves the mode against the OS scheme. An unknown OS scheme counts
    /// as light.
    pub fn is_dark(self, os_scheme: Option<ColorScheme>) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => os_scheme == Some(ColorScheme::Dark),
        }
    }

    /// The concrete mode opposite to what is currently rendered.
    pub fn opposite_of(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }
}

/// Snapshot published to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPreference {
    mode: ThemeMode,
    os_scheme: Option<ColorScheme>,
}

impl DisplayPreference {
    pub fn new(mode: ThemeMode, os_scheme: Option<ColorScheme>) -> Self {
        Self { mode, os_scheme }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Last color scheme reported by the OS, if any.
    pub fn os_scheme(&self) -> Option<ColorScheme> {
        self.os_scheme
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark(self.os_scheme)
    }

    pub fn with_mode(self, mode: ThemeMode) -> Self {
        Self { mode, ..self }
    }

    pub fn with_os_scheme(self, os_scheme: Option<ColorScheme>) -> Self {
        Self { os_scheme, ..self }
    }
}

impl Default for DisplayPreference {
    fn default() -> Self {
        Self::new(ThemeMode::default(), None)
    }
}

/// OS appearance settings.
pub trait SystemAppearance: Send + Sync {
    /// Current OS color scheme, `None` when the platform does not report one.
    fn color_scheme(&self) -> Option<ColorScheme>;

    /// Change notifications for the OS color scheme.
    fn subscribe(&self) -> watch::Receiver<Option<ColorScheme>>;
}
