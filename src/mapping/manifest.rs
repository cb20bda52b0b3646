//! Parsed manifest tables produced by external asset pipelines.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use super::AssetMapping;
use super::minified::minified_name;
use crate::error::{AssetError, Result};
use crate::loader::ByteLoader;

/// Value stored under a manifest key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestValue {
  /// Resolved asset name.
  Path(String),
  /// Any non-string JSON value. Lookups treat it as missing.
  Other,
}

impl ManifestValue {
  /// Resolved name, when the manifest stored a string.
  pub fn as_path(&self) -> Option<&str> {
    match self {
      Self::Path(path) => Some(path),
      Self::Other => None,
    }
  }
}

impl From<Value> for ManifestValue {
  fn from(value: Value) -> Self {
    match value {
      Value::String(path) => Self::Path(path),
      _ => Self::Other,
    }
  }
}

impl From<&str> for ManifestValue {
  fn from(path: &str) -> Self {
    Self::Path(path.to_string())
  }
}

impl From<String> for ManifestValue {
  fn from(path: String) -> Self {
    Self::Path(path)
  }
}

/// Immutable logical-name to served-name table.
#[derive(Debug, Clone, Default)]
pub struct StaticMap {
  entries: HashMap<String, ManifestValue>,
  use_minified: bool,
}

impl StaticMap {
  /// Mapping without entries; every lookup returns its input.
  pub fn empty(use_minified: bool) -> Self {
    Self {
      entries: HashMap::new(),
      use_minified,
    }
  }

  /// Build a mapping from in-memory entries.
  pub fn from_entries<I, K, V>(entries: I, use_minified: bool) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ManifestValue>,
  {
    Self {
      entries: entries
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect(),
      use_minified,
    }
  }

  /// Parse manifest bytes. `path` is only used to describe failures.
  pub fn from_slice(path: &str, bytes: &[u8], use_minified: bool) -> Result<Self> {
    let object: serde_json::Map<String, Value> =
      serde_json::from_slice(bytes).map_err(|source| AssetError::ManifestParse {
        path: path.to_string(),
        source,
      })?;

    Ok(Self::from_entries(object, use_minified))
  }

  /// Load and parse the manifest stored at `path`.
  ///
  /// Without a loader the mapping is empty, which lets callers render tags without any
  /// manifest at all.
  pub fn load(loader: Option<&dyn ByteLoader>, path: &str, use_minified: bool) -> Result<Self> {
    let Some(loader) = loader else {
      tracing::debug!("no manifest loader configured, using identity mapping");
      return Ok(Self::empty(use_minified));
    };

    let bytes = loader.load(path).map_err(|source| AssetError::ManifestLoad {
      path: path.to_string(),
      source,
    })?;
    let mapping = Self::from_slice(path, &bytes, use_minified)?;
    tracing::debug!(
      path,
      entries = mapping.len(),
      use_minified,
      "loaded asset manifest"
    );
    Ok(mapping)
  }

  /// Number of manifest keys, string-valued or not.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the manifest had no keys.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Returns `true` when `key` maps to a string value.
  pub fn contains(&self, key: &str) -> bool {
    self.lookup(key).is_some()
  }

  /// Whether lookups prefer the `.min` variant of a name.
  pub fn use_minified(&self) -> bool {
    self.use_minified
  }

  fn lookup(&self, key: &str) -> Option<&str> {
    self.entries.get(key).and_then(ManifestValue::as_path)
  }
}

impl AssetMapping for StaticMap {
  fn get<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
    if self.use_minified {
      let minified = minified_name(name);
      if let Some(value) = self.lookup(&minified) {
        tracing::trace!(name, minified = %minified, value, "resolved minified asset");
        return Cow::Borrowed(value);
      }
    }

    Cow::Borrowed(self.lookup(name).unwrap_or(name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use std::io;

  const MANIFEST: &str = r#"{
    "js/name.js": "dist/name-1234.js",
    "js/other.min.js": "dist/other-1234.min.js",
    "js/other.js": "dist/other-1234.js"
  }"#;

  fn static_loader(content: &'static str) -> impl Fn(&str) -> io::Result<Vec<u8>> + Send + Sync {
    move |_path: &str| -> io::Result<Vec<u8>> { Ok(content.as_bytes().to_vec()) }
  }

  #[test]
  fn missing_loader_yields_identity_mapping() {
    let mapping = StaticMap::load(None, "filename", false).unwrap();
    assert!(mapping.is_empty());
    assert_eq!(mapping.get("name"), "name");
  }

  #[test]
  fn loader_failures_are_reported() {
    let loader = |_path: &str| -> io::Result<Vec<u8>> { Err(io::Error::other("I/O Error")) };
    let err = StaticMap::load(Some(&loader), "filename", false).unwrap_err();
    assert!(matches!(err, AssetError::ManifestLoad { ref path, .. } if path == "filename"));
  }

  #[test]
  fn invalid_json_is_rejected() {
    let loader = static_loader("garbage");
    let err = StaticMap::load(Some(&loader), "filename", false).unwrap_err();
    assert!(matches!(err, AssetError::ManifestParse { .. }));
  }

  #[test]
  fn non_object_json_is_rejected() {
    let loader = static_loader(r#"["js/main.js"]"#);
    let err = StaticMap::load(Some(&loader), "filename", false).unwrap_err();
    assert!(matches!(err, AssetError::ManifestParse { .. }));
  }

  #[test]
  fn plain_lookup_ignores_minified_entries() {
    let loader = static_loader(
      r#"{"js/name.js":"dist/name-1234.js", "js/other.min.js":"dist/name-1234.min.js", "js/name.min.js":"dist/name-1234.min.js"}"#,
    );
    let mapping = StaticMap::load(Some(&loader), "filename", false).unwrap();

    assert_eq!(mapping.get("js/name.js"), "dist/name-1234.js");
    assert_eq!(mapping.get("js/other.js"), "js/other.js");
  }

  #[test]
  fn minified_lookup_prefers_min_variant() {
    let loader = static_loader(MANIFEST);
    let mapping = StaticMap::load(Some(&loader), "filename", true).unwrap();

    assert_eq!(mapping.get("js/name.js"), "dist/name-1234.js");
    assert_eq!(mapping.get("js/other.js"), "dist/other-1234.min.js");
    assert_eq!(mapping.get("js/absent.js"), "js/absent.js");
  }

  #[test]
  fn non_string_minified_value_falls_back_to_plain_key() {
    let mapping = StaticMap::from_slice(
      "manifest.json",
      br#"{"js/app.min.js": {"file": "x"}, "js/app.js": "dist/app-1.js"}"#,
      true,
    )
    .unwrap();

    assert_eq!(mapping.get("js/app.js"), "dist/app-1.js");
  }

  #[test]
  fn non_string_plain_value_falls_back_to_identity() {
    let mapping =
      StaticMap::from_slice("manifest.json", br#"{"img/logo.png": 42, "data": null}"#, false)
        .unwrap();

    assert_eq!(mapping.len(), 2);
    assert!(!mapping.contains("img/logo.png"));
    assert_eq!(mapping.get("img/logo.png"), "img/logo.png");
    assert_eq!(mapping.get("data"), "data");
  }

  #[test]
  fn builds_from_in_memory_entries() {
    let mapping = StaticMap::from_entries([("css/site.css", "css/site-abc.css")], false);
    assert!(mapping.contains("css/site.css"));
    assert!(!mapping.use_minified());
    assert_eq!(mapping.get("css/site.css"), "css/site-abc.css");
  }

  proptest! {
    #[test]
    fn absent_names_resolve_to_themselves(
      name in "[a-z0-9/._-]{0,24}",
      use_minified in any::<bool>(),
    ) {
      let mapping = StaticMap::from_slice("manifest.json", MANIFEST.as_bytes(), use_minified).unwrap();
      prop_assume!(!mapping.contains(&name) && !mapping.contains(&minified_name(&name)));

      prop_assert_eq!(mapping.get(&name), name.as_str());
    }
  }
}
