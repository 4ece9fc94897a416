//! Configuration for the keyboard loader.
//!
//! [`LoaderConfig`] implements [`serde::Deserialize`], so front ends can
//! embed it in their own configuration files.
//!
//! # Example
//!
//! ```
//! # use keyloom::config::LoaderConfig;
//! let config = LoaderConfig::default().with_keyboards_dir("/opt/layouts");
//! assert_eq!(config.keyboards_dir(), Some("/opt/layouts"));
//! ```

use std::env;

use serde::Deserialize;

use crate::resource::{BUNDLED_KEYBOARDS_DIR, ResourceName};

/// Environment variable that overrides the keyboards root.
pub const KEYBOARDS_DIR_ENV: &str = "KEYLOOM_KEYBOARDS_DIR";

/// Loader configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoaderConfig {
    /// Root holding `keyboards.xml`, `geometry/` and `symbols/`.
    #[serde(default)]
    keyboards_dir: Option<String>,
}

impl LoaderConfig {
    /// Sets the keyboards root explicitly.
    pub fn with_keyboards_dir(mut self, dir: impl Into<String>) -> Self {
        self.keyboards_dir = Some(dir.into());
        self
    }

    /// Returns the explicitly configured keyboards root, if any.
    pub fn keyboards_dir(&self) -> Option<&str> {
        self.keyboards_dir.as_deref()
    }

    /// Resolves the keyboards root, consulting [`KEYBOARDS_DIR_ENV`] when no
    /// root is configured.
    pub fn resolve_root(&self) -> ResourceName {
        let environment = env::var(KEYBOARDS_DIR_ENV).ok();
        resolve_root(self.keyboards_dir(), environment.as_deref())
    }
}

/// Picks the keyboards root: the configured value, then the environment
/// value, then the bundled keyboards. Empty values are ignored.
pub fn resolve_root(configured: Option<&str>, environment: Option<&str>) -> ResourceName {
    let name = configured
        .filter(|value| !value.is_empty())
        .or(environment.filter(|value| !value.is_empty()))
        .unwrap_or(BUNDLED_KEYBOARDS_DIR);
    ResourceName::parse(name)
}
