//! Resolution of logical asset names through a build-time manifest.
//!
//! The default [`MappingBuilder`] loads a JSON manifest through a [`ByteLoader`] and parses it
//! into a [`StaticMap`]. Callers that already hold a mapping (embedded tables, generated code)
//! can plug in their own builder and skip the manifest file entirely.

mod manifest;
mod minified;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

pub use manifest::{ManifestValue, StaticMap};
pub use minified::minified_name;

use crate::error::Result;
use crate::loader::ByteLoader;

/// Lookup from logical asset names to the names that should be served.
pub trait AssetMapping: Send + Sync {
  /// Served name for `name`. Unknown names resolve to themselves.
  fn get<'a>(&'a self, name: &'a str) -> Cow<'a, str>;
}

impl AssetMapping for HashMap<String, String> {
  fn get<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
    Cow::Borrowed(HashMap::get(self, name).map_or(name, String::as_str))
  }
}

/// Produces the mapping a resolver uses for its whole lifetime.
pub trait MappingBuilder {
  /// Build the mapping. Failures abort resolver construction.
  fn build(&self) -> Result<Box<dyn AssetMapping>>;
}

impl<F> MappingBuilder for F
where
  F: Fn() -> Result<Box<dyn AssetMapping>>,
{
  fn build(&self) -> Result<Box<dyn AssetMapping>> {
    self()
  }
}

/// Default builder: load the manifest at `path` and parse it into a [`StaticMap`].
#[derive(Clone)]
pub struct ManifestMappingBuilder {
  loader: Option<Arc<dyn ByteLoader>>,
  path: String,
  use_minified: bool,
}

impl ManifestMappingBuilder {
  /// Create a builder reading `path` through `loader`.
  pub fn new(loader: Option<Arc<dyn ByteLoader>>, path: impl Into<String>, use_minified: bool) -> Self {
    Self {
      loader,
      path: path.into(),
      use_minified,
    }
  }
}

impl MappingBuilder for ManifestMappingBuilder {
  fn build(&self) -> Result<Box<dyn AssetMapping>> {
    let mapping = StaticMap::load(self.loader.as_deref(), &self.path, self.use_minified)?;
    Ok(Box::new(mapping))
  }
}
