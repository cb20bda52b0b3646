//! Logging setup for binaries built on this crate.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install a compact stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Library code only emits events; binaries decide whether to call this.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let fmt_layer = fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(true)
    .with_level(true)
    .compact();

  let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

  tracing_subscriber::registry()
    .with(filter_layer)
    .with(fmt_layer)
    .try_init()?;

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn second_init_is_rejected() {
    let _ = init();
    assert!(init().is_err());
    tracing::debug!("subscriber installed");
  }
}
