//! Template helper bindings.
//!
//! Template engines register callables by name. The resolver exposes three of them:
//! `scripttag` and `linktag` take `(name, attrs...)`, `static` takes no arguments.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{AssetError, Result};
use crate::resolver::{Markup, Resolver};

/// Named operations exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
  /// `scripttag name [attr value]...`
  ScriptTag,
  /// `linktag name [attr value]...`
  LinkTag,
  /// `static`
  Static,
}

impl Helper {
  /// Every helper, in registration order.
  pub const ALL: [Helper; 3] = [Helper::ScriptTag, Helper::LinkTag, Helper::Static];

  /// Name under which the helper is registered.
  pub fn name(self) -> &'static str {
    match self {
      Self::ScriptTag => "scripttag",
      Self::LinkTag => "linktag",
      Self::Static => "static",
    }
  }
}

impl fmt::Display for Helper {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Helper {
  type Err = AssetError;

  fn from_str(name: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|helper| helper.name() == name)
      .ok_or_else(|| AssetError::UnknownHelper(name.to_string()))
  }
}

/// Boxed helper callable stored in a registry.
pub type HelperFn = Box<dyn Fn(&[&str]) -> Result<Markup> + Send + Sync>;

/// Function table of a template engine.
pub trait HelperRegistry {
  /// Register `helper` under `name`, replacing any previous entry.
  fn register(&mut self, name: &'static str, helper: HelperFn);
}

impl HelperRegistry for HashMap<&'static str, HelperFn> {
  fn register(&mut self, name: &'static str, helper: HelperFn) {
    self.insert(name, helper);
  }
}

impl Resolver {
  /// Invoke `helper` with template arguments.
  pub fn call(&self, helper: Helper, args: &[&str]) -> Result<Markup> {
    match helper {
      Helper::ScriptTag | Helper::LinkTag => {
        let Some((name, attrs)) = args.split_first() else {
          return Err(AssetError::HelperArguments {
            helper: helper.name(),
            expected: "an asset name followed by attribute pairs",
            got: 0,
          });
        };
        if helper == Helper::ScriptTag {
          self.script_tag(name, attrs)
        } else {
          self.link_tag(name, attrs)
        }
      }
      Helper::Static if args.is_empty() => Ok(self.static_prefix()),
      Helper::Static => Err(AssetError::HelperArguments {
        helper: helper.name(),
        expected: "no arguments",
        got: args.len(),
      }),
    }
  }

  /// Invoke a helper by its registered name.
  pub fn call_named(&self, name: &str, args: &[&str]) -> Result<Markup> {
    self.call(name.parse()?, args)
  }

  /// Register `scripttag`, `linktag` and `static` with `registry`.
  pub fn attach<R: HelperRegistry + ?Sized>(self: &Arc<Self>, registry: &mut R) {
    for helper in Helper::ALL {
      let resolver = Arc::clone(self);
      registry.register(
        helper.name(),
        Box::new(move |args: &[&str]| resolver.call(helper, args)),
      );
    }
  }

  /// Helper table keyed by name, ready to hand to a template engine.
  pub fn func_map(self: &Arc<Self>) -> HashMap<&'static str, HelperFn> {
    let mut map = HashMap::new();
    self.attach(&mut map);
    map
  }
}
