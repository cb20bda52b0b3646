/// Derive the minified variant of a logical asset name.
///
/// `.min` is inserted right before the extension of the final path segment, so
/// `js/main.js` becomes `js/main.min.js`. Names without an extension get a `.min` suffix.
pub fn minified_name(name: &str) -> String {
  let base_start = name.rfind('/').map_or(0, |idx| idx + 1);
  match name[base_start..].rfind('.') {
    Some(dot) => {
      let (stem, ext) = name.split_at(base_start + dot);
      format!("{stem}.min{ext}")
    }
    None => format!("{name}.min"),
  }
}
