//! System appearance adapter driven by explicit updates.
//!
//! Platform shells forward OS color-scheme changes through
//! [`ManualAppearance::set_color_scheme`]; headless hosts such as the CLI
//! construct it once with a fixed scheme.

use sanskriti_core::theme::{ColorScheme, SystemAppearance};
use tokio::sync::watch;

#[derive(Debug)]
pub struct ManualAppearance {
    scheme: watch::Sender<Option<ColorScheme>>,
}

impl ManualAppearance {
    pub fn new(initial: Option<ColorScheme>) -> Self {
        let (scheme, _) = watch::channel(initial);
        Self { scheme }
    }

    /// Publishes a new OS color scheme to subscribers.
    pub fn set_color_scheme(&self, scheme: Option<ColorScheme>) {
        self.scheme.send_replace(scheme);
    }
}

impl Default for ManualAppearance {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SystemAppearance for ManualAppearance {
    fn color_scheme(&self) -> Option<ColorScheme> {
        *self.scheme.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<Option<ColorScheme>> {
        self.scheme.subscribe()
    }
}
