//! Error types shared by the resolver and its collaborators.

use std::path::PathBuf;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Boxed error produced by custom mapping builders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building a resolver or rendering tags.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
  /// The loader failed to produce the manifest bytes.
  #[error("failed to load manifest {path}: {source}")]
  ManifestLoad {
    /// Manifest path handed to the loader.
    path: String,
    /// Source I/O error.
    source: std::io::Error,
  },

  /// The manifest bytes are not a JSON object.
  #[error("failed to parse manifest {path}: {source}")]
  ManifestParse {
    /// Manifest path the bytes were loaded from.
    path: String,
    /// Source parse error.
    source: serde_json::Error,
  },

  /// Tag attributes were not supplied as name/value pairs.
  #[error("tag attributes don't form pairs (got {count} values)")]
  InvalidAttributes {
    /// Number of values supplied.
    count: usize,
  },

  /// SRI is enabled but the resolved asset could not be read.
  #[error("failed to read asset {path} for integrity hash: {source}")]
  AssetRead {
    /// Path handed to the asset loader.
    path: String,
    /// Source I/O error.
    source: std::io::Error,
  },

  /// A custom mapping builder failed.
  #[error("failed to build asset mapping: {0}")]
  MappingBuild(#[source] BoxError),

  /// A template helper name is not one of `scripttag`, `linktag` or `static`.
  #[error("unknown template helper `{0}`")]
  UnknownHelper(String),

  /// A template helper was called with the wrong number of arguments.
  #[error("helper `{helper}` expects {expected}, got {got} arguments")]
  HelperArguments {
    /// Helper name.
    helper: &'static str,
    /// Human readable arity description.
    expected: &'static str,
    /// Number of arguments supplied.
    got: usize,
  },

  /// The configuration file exists but could not be read or parsed.
  #[error("failed to read configuration {}: {source}", .path.display())]
  Config {
    /// Configuration file path.
    path: PathBuf,
    /// Underlying error.
    source: BoxError,
  },
}

impl AssetError {
  /// Wrap an arbitrary error raised by a custom [`crate::MappingBuilder`].
  pub fn mapping_build(err: impl Into<BoxError>) -> Self {
    Self::MappingBuild(err.into())
  }
}
