use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::directive::parse_directive;
use crate::errors::{MacroError, Result};
use crate::macros::{Macro, Registry};
use crate::options::{Options, PRODUCTION};

/// A context field: a macro, or a value merged from flags and data.
#[derive(Clone)]
pub enum Entry {
    Macro(Arc<dyn Macro>),
    Value(Value),
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Macro(m) => write!(f, "Macro({})", m.name()),
            Entry::Value(v) => write!(f, "Value({v})"),
        }
    }
}

/// Build a context from exactly one options bundle.
pub fn build_context(bundles: &[Options]) -> Result<Context> {
    match bundles {
        [options] => Ok(Context::new(options)),
        _ => Err(MacroError::InvalidArity(bundles.len())),
    }
}

/// Everything a directive can name while one file is processed.
///
/// Fields are merged in order: macros, then truthy flags (as `true`), then
/// data entries. A later field replaces an earlier one of the same name,
/// including a macro.
#[derive(Debug, Clone)]
pub struct Context {
    production: bool,
    entries: BTreeMap<String, Entry>,
}

impl Context {
    pub fn new(options: &Options) -> Self {
        let registry = Registry::with_builtins(options.is_production(), options.constants.clone());
        Self::with_registry(options, &registry)
    }

    /// Like [`Context::new`], with a caller-assembled registry in place of
    /// the built-ins.
    pub fn with_registry(options: &Options, registry: &Registry) -> Self {
        let flags = options.resolved_flags();
        let production = flags.get(PRODUCTION).copied().unwrap_or(false);

        let mut entries: BTreeMap<String, Entry> = registry
            .iter()
            .map(|(name, m)| (name.to_string(), Entry::Macro(Arc::clone(m))))
            .collect();

        let truthy = flags.into_iter().filter(|(_, on)| *on);
        let data = options.data.iter().map(|(k, v)| (k.clone(), v.clone()));
        for (name, value) in truthy.map(|(k, _)| (k, Value::Bool(true))).chain(data) {
            if let Some(Entry::Macro(_)) = entries.get(&name) {
                warn!(name = %name, "context field shadows macro");
            }
            entries.insert(name, Entry::Value(value));
        }

        debug!(production, fields = entries.len(), "built macro context");
        Self { production, entries }
    }

    pub fn is_production(&self) -> bool {
        self.production
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// True when `name` holds the boolean `true`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(Entry::Value(Value::Bool(true))))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Non-macro fields, as the engine sees them.
    pub fn fields(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter_map(|(name, entry)| match entry {
                Entry::Value(v) => Some((name.clone(), v.clone())),
                Entry::Macro(_) => None,
            })
            .collect()
    }

    /// Call the macro bound to `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<String> {
        match self.entries.get(name) {
            Some(Entry::Macro(m)) => {
                trace!(name, args = args.len(), production = self.production, "expanding macro");
                m.invoke(args)
            }
            Some(Entry::Value(_)) => Err(MacroError::NotAMacro(name.to_string())),
            None => Err(MacroError::UnknownMacro(name.to_string())),
        }
    }

    /// Parse one directive call such as `SANITY("x > 0")` and expand it.
    pub fn expand(&self, directive: &str) -> Result<String> {
        let parsed = parse_directive(directive)?;
        self.call(&parsed.name, &parsed.args)
    }
}
