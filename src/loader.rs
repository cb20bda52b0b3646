//! Byte sources for manifests and asset contents.

use std::fs;
use std::io;

/// Source of raw bytes for a manifest or asset path.
///
/// Any `Fn(&str) -> io::Result<Vec<u8>>` closure is a loader, which makes it easy to serve
/// manifests embedded in the binary or kept in memory.
pub trait ByteLoader: Send + Sync {
  /// Return the full contents stored under `path`.
  fn load(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Loader reading paths from the local filesystem, relative to the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl ByteLoader for FsLoader {
  fn load(&self, path: &str) -> io::Result<Vec<u8>> {
    fs::read(path)
  }
}

impl<F> ByteLoader for F
where
  F: Fn(&str) -> io::Result<Vec<u8>> + Send + Sync,
{
  fn load(&self, path: &str) -> io::Result<Vec<u8>> {
    self(path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn fs_loader_reads_file_contents() -> io::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("manifest.json");
    fs::write(&path, b"{}")?;

    let bytes = FsLoader.load(path.to_str().unwrap())?;
    assert_eq!(bytes, b"{}");
    Ok(())
  }

  #[test]
  fn fs_loader_reports_missing_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = FsLoader.load(path.to_str().unwrap()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn closures_act_as_loaders() {
    let loader = |path: &str| -> io::Result<Vec<u8>> { Ok(path.as_bytes().to_vec()) };
    assert_eq!(loader.load("css/site.css").unwrap(), b"css/site.css");
  }
}
