//! HTML attribute sets for generated tags.
//!
//! Attribute sets are unordered while they are being assembled. Rendering escapes every name
//! and value and sorts the resulting `name="value"` strings, so the same set always renders to
//! the same markup regardless of insertion order.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::{AssetError, Result};

/// Unordered collection of attributes with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrSet {
  attrs: HashMap<String, String>,
}

impl AttrSet {
  /// Empty attribute set.
  pub fn new() -> Self {
    Self::default()
  }

  /// Interpret a flat `[name, value, name, value, ...]` list as attributes.
  ///
  /// Fails with [`AssetError::InvalidAttributes`] when the list has odd length. A name
  /// repeated later in the list replaces the earlier value.
  pub fn from_pairs<S: AsRef<str>>(values: &[S]) -> Result<Self> {
    if values.len() % 2 != 0 {
      return Err(AssetError::InvalidAttributes {
        count: values.len(),
      });
    }

    Ok(
      values
        .chunks_exact(2)
        .map(|pair| (pair[0].as_ref(), pair[1].as_ref()))
        .collect(),
    )
  }

  /// Apply caller supplied pairs over `defaults`; caller values replace defaults by name.
  pub fn merged<S: AsRef<str>>(defaults: AttrSet, overrides: &[S]) -> Result<Self> {
    let overrides = Self::from_pairs(overrides)?;
    let mut merged = defaults;
    merged.extend(overrides);
    Ok(merged)
  }

  /// Set `name`, replacing any previous value.
  pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.attrs.insert(name.into(), value.into());
  }

  /// Value currently stored under `name`.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.attrs.get(name).map(String::as_str)
  }

  /// Number of attributes.
  pub fn len(&self) -> usize {
    self.attrs.len()
  }

  /// Returns `true` when no attributes are set.
  pub fn is_empty(&self) -> bool {
    self.attrs.is_empty()
  }

  /// Render as escaped, lexicographically sorted `name="value"` pairs joined by spaces.
  pub fn render(&self) -> String {
    let mut rendered: Vec<String> = self
      .attrs
      .iter()
      .map(|(name, value)| format!(r#"{}="{}""#, escape_html(name), escape_html(value)))
      .collect();
    rendered.sort();
    rendered.join(" ")
  }
}

impl Extend<(String, String)> for AttrSet {
  fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
    self.attrs.extend(iter);
  }
}

impl IntoIterator for AttrSet {
  type Item = (String, String);
  type IntoIter = std::collections::hash_map::IntoIter<String, String>;

  fn into_iter(self) -> Self::IntoIter {
    self.attrs.into_iter()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrSet {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self {
      attrs: iter
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect(),
    }
  }
}

/// Escape the characters that are significant inside a quoted HTML attribute.
pub fn escape_html(value: &str) -> Cow<'_, str> {
  if !value.contains(['&', '\'', '<', '>', '"']) {
    return Cow::Borrowed(value);
  }

  let mut escaped = String::with_capacity(value.len() + 8);
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '\'' => escaped.push_str("&#39;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&#34;"),
      other => escaped.push(other),
    }
  }
  Cow::Owned(escaped)
}

/// Kinds of tags the resolver emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
  /// `<script>` referencing JavaScript through `src`.
  Script,
  /// `<link>` referencing a stylesheet through `href`.
  Link,
}

impl TagKind {
  /// Attributes every tag of this kind starts with.
  pub fn default_attrs(self) -> AttrSet {
    match self {
      Self::Script => [("type", "text/javascript")].into_iter().collect(),
      Self::Link => [("type", "text/css"), ("rel", "stylesheet")]
        .into_iter()
        .collect(),
    }
  }

  /// Attribute carrying the asset URL.
  pub fn url_attr(self) -> &'static str {
    match self {
      Self::Script => "src",
      Self::Link => "href",
    }
  }

  /// Wrap already rendered attributes into the final element.
  pub fn wrap(self, rendered_attrs: &str) -> String {
    match self {
      Self::Script => format!("<script {rendered_attrs}></script>"),
      Self::Link => format!("<link {rendered_attrs}/>"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn renders_sorted_escaped_attributes() {
    let attrs: AttrSet = [("name", "value"), ("\"escape", "me<"), ("other", "attribute ")]
      .into_iter()
      .collect();

    assert_eq!(
      attrs.render(),
      r#"&#34;escape="me&lt;" name="value" other="attribute ""#
    );
  }

  #[test]
  fn escapes_ampersands_and_apostrophes() {
    assert_eq!(escape_html("a&b'c>d"), "a&amp;b&#39;c&gt;d");
    assert!(matches!(escape_html("plain"), Cow::Borrowed("plain")));
  }

  #[test]
  fn parses_flat_pairs() {
    let attrs = AttrSet::from_pairs(&["one", "two", "three", "four"]).unwrap();
    let expected: AttrSet = [("one", "two"), ("three", "four")].into_iter().collect();
    assert_eq!(attrs, expected);
  }

  #[test]
  fn rejects_odd_pairs() {
    let err = AttrSet::from_pairs(&["one", "two", "three", "four", "five"]).unwrap_err();
    assert!(matches!(err, AssetError::InvalidAttributes { count: 5 }));
  }

  #[test]
  fn overrides_replace_defaults() {
    let merged = AttrSet::merged(TagKind::Link.default_attrs(), &["type", "text/plain"]).unwrap();
    assert_eq!(merged.get("type"), Some("text/plain"));
    assert_eq!(merged.get("rel"), Some("stylesheet"));
    assert_eq!(merged.len(), 2);
  }

  #[test]
  fn wraps_tags_by_kind() {
    assert_eq!(TagKind::Script.wrap(r#"src="a.js""#), r#"<script src="a.js"></script>"#);
    assert_eq!(TagKind::Link.wrap(r#"href="a.css""#), r#"<link href="a.css"/>"#);
    assert_eq!(TagKind::Script.url_attr(), "src");
    assert_eq!(TagKind::Link.url_attr(), "href");
  }

  fn flatten(pairs: &[(String, String)]) -> Vec<String> {
    pairs
      .iter()
      .flat_map(|(name, value)| [name.clone(), value.clone()])
      .collect()
  }

  proptest! {
    #[test]
    fn merge_accepts_exactly_even_lists(values in prop::collection::vec("[a-z]{0,6}", 0..12)) {
      let result = AttrSet::merged(TagKind::Script.default_attrs(), &values);
      prop_assert_eq!(result.is_ok(), values.len() % 2 == 0);
    }

    #[test]
    fn rendering_ignores_override_order(
      (pairs, shuffled) in prop::collection::hash_map("[a-z-]{1,8}", "[ -~]{0,12}", 0..6)
        .prop_map(|map| map.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|pairs| (Just(pairs.clone()), Just(pairs).prop_shuffle()))
    ) {
      let first = AttrSet::merged(TagKind::Link.default_attrs(), &flatten(&pairs)).unwrap();
      let second = AttrSet::merged(TagKind::Link.default_attrs(), &flatten(&shuffled)).unwrap();
      prop_assert_eq!(first.render(), second.render());
    }
  }
}
