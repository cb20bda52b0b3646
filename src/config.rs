//! Resolver configuration loaded from an optional JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AssetError, Result};
use crate::resolver::ResolverBuilder;

/// Configuration file searched for by [`ResolverConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "asset_helper.config.json";

/// Serializable resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
  /// Prefix prepended to every resolved asset name.
  pub url_prefix: String,
  /// Manifest produced by the asset pipeline.
  pub manifest_path: String,
  /// Prefer `.min` variants when the manifest lists them.
  pub use_minified: bool,
  /// Emit integrity hashes for generated tags.
  pub use_sri: bool,
}

impl Default for ResolverConfig {
  fn default() -> Self {
    Self {
      url_prefix: "/static/".into(),
      manifest_path: "manifest.json".into(),
      use_minified: false,
      use_sri: false,
    }
  }
}

impl ResolverConfig {
  /// Load the configuration file from `dir`.
  ///
  /// A missing or unreadable file yields the defaults.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        if candidate.exists() {
          tracing::warn!("ignoring configuration: {err}");
        }
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path).map_err(|err| config_error(path, err))?;
    serde_json::from_str(&content).map_err(|err| config_error(path, err))
  }

  /// Convert into a resolver builder reading the manifest from disk.
  pub fn into_builder(self) -> ResolverBuilder {
    ResolverBuilder::new(self.url_prefix, self.manifest_path)
      .use_minified(self.use_minified)
      .use_sri(self.use_sri)
  }
}

fn config_error(path: &Path, err: impl Into<crate::error::BoxError>) -> AssetError {
  AssetError::Config {
    path: PathBuf::from(path),
    source: err.into(),
  }
}
