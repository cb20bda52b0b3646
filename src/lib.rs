#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod attrs;
pub mod config;
pub mod error;
pub mod helpers;
pub mod integrity;
pub mod loader;
pub mod logging;
pub mod mapping;
pub mod resolver;

pub use attrs::{AttrSet, TagKind};
pub use config::ResolverConfig;
pub use error::{AssetError, Result};
pub use helpers::{Helper, HelperFn, HelperRegistry};
pub use loader::{ByteLoader, FsLoader};
pub use mapping::{AssetMapping, ManifestMappingBuilder, ManifestValue, MappingBuilder, StaticMap};
pub use resolver::{Markup, Resolver, ResolverBuilder};
