//! Resolver facade turning logical asset names into `<script>` and `<link>` markup.

use std::fmt;
use std::sync::Arc;

use crate::attrs::{AttrSet, TagKind};
use crate::error::{AssetError, Result};
use crate::integrity::{self, CROSSORIGIN_ANONYMOUS};
use crate::loader::{ByteLoader, FsLoader};
use crate::mapping::{AssetMapping, ManifestMappingBuilder, MappingBuilder};

/// Rendered HTML that is already escaped and must be emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
  /// Borrow the markup text.
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Take ownership of the markup text.
  pub fn into_string(self) -> String {
    self.0
  }
}

impl fmt::Display for Markup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for Markup {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<Markup> for String {
  fn from(markup: Markup) -> Self {
    markup.0
  }
}

impl PartialEq<&str> for Markup {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}

/// Resolves asset names through a manifest and renders tags referencing them.
///
/// A resolver is immutable once built, so a single instance can be shared between threads
/// serving concurrent requests.
pub struct Resolver {
  url_prefix: String,
  manifest_path: String,
  asset_loader: Arc<dyn ByteLoader>,
  use_minified: bool,
  use_sri: bool,
  mapping: Box<dyn AssetMapping>,
}

impl Resolver {
  /// Start configuring a resolver serving assets below `url_prefix`.
  pub fn builder(url_prefix: impl Into<String>, manifest_path: impl Into<String>) -> ResolverBuilder {
    ResolverBuilder::new(url_prefix, manifest_path)
  }

  /// Build a resolver reading the manifest from disk with default options.
  pub fn new(url_prefix: impl Into<String>, manifest_path: impl Into<String>) -> Result<Self> {
    Self::builder(url_prefix, manifest_path).build()
  }

  /// `<script>` tag for `name`. `attrs` holds additional name/value pairs.
  pub fn script_tag(&self, name: &str, attrs: &[&str]) -> Result<Markup> {
    self.render_tag(TagKind::Script, name, attrs)
  }

  /// `<link rel="stylesheet">` tag for `name`. See [`Resolver::script_tag`].
  pub fn link_tag(&self, name: &str, attrs: &[&str]) -> Result<Markup> {
    self.render_tag(TagKind::Link, name, attrs)
  }

  /// Full URL the manifest maps `name` to.
  pub fn url(&self, name: &str) -> String {
    format!("{}{}", self.url_prefix, self.mapping.get(name))
  }

  /// URL prefix for static assets, always ending with `/`.
  pub fn url_prefix(&self) -> &str {
    &self.url_prefix
  }

  /// URL prefix as markup, for templates referencing images and other files directly.
  pub fn static_prefix(&self) -> Markup {
    Markup(self.url_prefix.clone())
  }

  /// Manifest path the resolver was configured with.
  pub fn manifest_path(&self) -> &str {
    &self.manifest_path
  }

  /// Whether `.min` variants are preferred.
  pub fn use_minified(&self) -> bool {
    self.use_minified
  }

  /// Whether tags carry integrity hashes.
  pub fn use_sri(&self) -> bool {
    self.use_sri
  }

  /// Mapping used for name resolution.
  pub fn mapping(&self) -> &dyn AssetMapping {
    &*self.mapping
  }

  fn render_tag(&self, kind: TagKind, name: &str, attrs: &[&str]) -> Result<Markup> {
    let mut merged = AttrSet::merged(kind.default_attrs(), attrs)?;
    let url = self.url(name);

    if self.use_sri {
      merged.insert("integrity", self.integrity_for(&url)?);
      merged.insert("crossorigin", CROSSORIGIN_ANONYMOUS);
    }
    merged.insert(kind.url_attr(), url);

    Ok(Markup(kind.wrap(&merged.render())))
  }

  fn integrity_for(&self, path: &str) -> Result<String> {
    let content = self
      .asset_loader
      .load(path)
      .map_err(|source| AssetError::AssetRead {
        path: path.to_string(),
        source,
      })?;
    tracing::debug!(path, bytes = content.len(), "computed asset integrity");
    Ok(integrity::digest(&content))
  }
}

impl fmt::Debug for Resolver {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Resolver")
      .field("url_prefix", &self.url_prefix)
      .field("manifest_path", &self.manifest_path)
      .field("use_minified", &self.use_minified)
      .field("use_sri", &self.use_sri)
      .finish_non_exhaustive()
  }
}

/// Options collected before a [`Resolver`] is built.
///
/// Setting the same option twice keeps the last value.
pub struct ResolverBuilder {
  url_prefix: String,
  manifest_path: String,
  manifest_loader: Option<Arc<dyn ByteLoader>>,
  asset_loader: Option<Arc<dyn ByteLoader>>,
  use_minified: bool,
  use_sri: bool,
  mapping_builder: Option<Box<dyn MappingBuilder>>,
}

impl ResolverBuilder {
  /// Builder with the filesystem loader and minification and SRI disabled.
  pub fn new(url_prefix: impl Into<String>, manifest_path: impl Into<String>) -> Self {
    Self {
      url_prefix: url_prefix.into(),
      manifest_path: manifest_path.into(),
      manifest_loader: Some(Arc::new(FsLoader)),
      asset_loader: None,
      use_minified: false,
      use_sri: false,
      mapping_builder: None,
    }
  }

  /// Read the manifest through `loader`.
  pub fn manifest_loader(mut self, loader: impl ByteLoader + 'static) -> Self {
    self.manifest_loader = Some(Arc::new(loader));
    self
  }

  /// Skip the manifest entirely; every name resolves to itself.
  pub fn no_manifest_loader(mut self) -> Self {
    self.manifest_loader = None;
    self
  }

  /// Read asset contents for integrity hashes through `loader` instead of the filesystem.
  pub fn asset_loader(mut self, loader: impl ByteLoader + 'static) -> Self {
    self.asset_loader = Some(Arc::new(loader));
    self
  }

  /// Prefer `.min` variants of assets when the manifest lists them.
  pub fn use_minified(mut self, use_minified: bool) -> Self {
    self.use_minified = use_minified;
    self
  }

  /// Add `integrity` and `crossorigin` attributes to generated tags.
  pub fn use_sri(mut self, use_sri: bool) -> Self {
    self.use_sri = use_sri;
    self
  }

  /// Replace manifest loading with a custom mapping builder.
  pub fn mapping_builder(mut self, builder: impl MappingBuilder + 'static) -> Self {
    self.mapping_builder = Some(Box::new(builder));
    self
  }

  /// Normalise the URL prefix and build the mapping.
  ///
  /// Any failure while building the mapping aborts construction.
  pub fn build(self) -> Result<Resolver> {
    let url_prefix = normalise_prefix(&self.url_prefix);

    let mapping = match &self.mapping_builder {
      Some(builder) => builder.build()?,
      None => ManifestMappingBuilder::new(
        self.manifest_loader.clone(),
        self.manifest_path.as_str(),
        self.use_minified,
      )
      .build()?,
    };

    let asset_loader = self.asset_loader.unwrap_or_else(|| Arc::new(FsLoader));

    tracing::debug!(
      url_prefix = %url_prefix,
      manifest_path = %self.manifest_path,
      use_minified = self.use_minified,
      use_sri = self.use_sri,
      "asset resolver ready"
    );

    Ok(Resolver {
      url_prefix,
      manifest_path: self.manifest_path,
      asset_loader,
      use_minified: self.use_minified,
      use_sri: self.use_sri,
      mapping,
    })
  }
}

fn normalise_prefix(prefix: &str) -> String {
  format!("{}/", prefix.trim_end_matches('/'))
}
