use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use asset_helper::{Helper, ResolverConfig, logging};

/// Render script and link tags for assets listed in a build manifest.
#[derive(Debug, Parser)]
#[command(name = "asset-helper", version, about)]
struct Cli {
  /// JSON configuration file; defaults to `asset_helper.config.json` in the working directory.
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// URL prefix prepended to resolved asset names.
  #[arg(long, global = true)]
  prefix: Option<String>,

  /// Manifest mapping logical asset names to built files.
  #[arg(long, global = true)]
  manifest: Option<String>,

  /// Prefer `.min` variants listed in the manifest.
  #[arg(long, global = true)]
  minified: bool,

  /// Add integrity hashes, reading assets from the resolved URL path.
  #[arg(long, global = true)]
  sri: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print a `<script>` tag.
  Script {
    /// Logical asset name.
    name: String,
    /// Additional attributes as name/value pairs.
    attrs: Vec<String>,
  },
  /// Print a `<link rel="stylesheet">` tag.
  Link {
    /// Logical asset name.
    name: String,
    /// Additional attributes as name/value pairs.
    attrs: Vec<String>,
  },
  /// Print the URL prefix.
  Static,
  /// Print the resolved URL of an asset.
  Resolve {
    /// Logical asset name.
    name: String,
  },
}

fn main() -> Result<()> {
  if let Err(err) = logging::init() {
    eprintln!("failed to initialise logging: {err}");
  }

  let cli = Cli::parse();
  let mut config = match &cli.config {
    Some(path) => ResolverConfig::from_path(path)?,
    None => ResolverConfig::discover(&std::env::current_dir()?),
  };
  if let Some(prefix) = cli.prefix {
    config.url_prefix = prefix;
  }
  if let Some(manifest) = cli.manifest {
    config.manifest_path = manifest;
  }
  config.use_minified |= cli.minified;
  config.use_sri |= cli.sri;

  let manifest_path = config.manifest_path.clone();
  let resolver = config
    .into_builder()
    .build()
    .with_context(|| format!("failed to prepare asset resolver for {manifest_path}"))?;

  let output = match &cli.command {
    Command::Script { name, attrs } => render(&resolver, Helper::ScriptTag, name, attrs)?,
    Command::Link { name, attrs } => render(&resolver, Helper::LinkTag, name, attrs)?,
    Command::Static => resolver.static_prefix().into_string(),
    Command::Resolve { name } => resolver.url(name),
  };
  println!("{output}");

  Ok(())
}

fn render(
  resolver: &asset_helper::Resolver,
  helper: Helper,
  name: &str,
  attrs: &[String],
) -> Result<String> {
  let args: Vec<&str> = std::iter::once(name)
    .chain(attrs.iter().map(String::as_str))
    .collect();
  let markup = resolver
    .call(helper, &args)
    .with_context(|| format!("failed to render {helper} for {name}"))?;
  Ok(markup.into_string())
}
