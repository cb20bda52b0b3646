//! Subresource Integrity descriptors.

use base64::{Engine as _, engine::general_purpose};
use sha2::{Digest, Sha256};

/// Value emitted in the `crossorigin` attribute next to an integrity hash.
pub const CROSSORIGIN_ANONYMOUS: &str = "anonymous";

/// Compute the `sha256-<base64>` integrity descriptor for `content`.
pub fn digest(content: &[u8]) -> String {
  let hash = Sha256::digest(content);
  format!("sha256-{}", general_purpose::STANDARD.encode(hash))
}

#[cfg(test)]
mod tests {
  use super::digest;

  #[test]
  fn hashes_known_content() {
    assert_eq!(
      digest(b"the quick brown fox jumps over the lazy dog\n"),
      "sha256-EVOkCA8fywRCWqC4QcKxRgb+bfJdkHbSofrOLVr1cSk="
    );
  }

  #[test]
  fn hashes_empty_content() {
    assert_eq!(
      digest(b""),
      "sha256-47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
    );
  }
}
