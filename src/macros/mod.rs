use serde_json::Value;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::errors::{MacroError, Result};

pub mod constants;
pub mod properties;
pub mod sanity;

pub use constants::{Constant, ConstantTable, Constants};
pub use properties::{DefineAttribute, DefineConstants, NoAccess};
pub use sanity::{Sanity, SanityFail};

pub const SANITY: &str = "SANITY";
pub const SANITY_FAIL: &str = "SANITY_FAIL";
pub const DEFINE_NO_ACCESS: &str = "DEFINE_NO_ACCESS";
pub const DEFINE_CONSTANTS: &str = "DEFINE_CONSTANTS";
pub const DEFINE_ATTRIBUTE: &str = "DEFINE_ATTRIBUTE";
pub const CONSTANTS: &str = "CONSTANTS";

/// Names every context binds to the built-in macros.
pub const RESERVED: [&str; 6] = [
    SANITY,
    SANITY_FAIL,
    DEFINE_NO_ACCESS,
    DEFINE_CONSTANTS,
    DEFINE_ATTRIBUTE,
    CONSTANTS,
];

/// A code-generating function callable from a directive.
///
/// Implementations are pure: the same arguments always yield the same text.
pub trait Macro: Send + Sync {
    fn name(&self) -> &'static str;
    fn arity(&self) -> RangeInclusive<usize>;
    fn call(&self, args: &[Value]) -> Result<String>;

    /// Check the argument count against [`Macro::arity`], then call.
    fn invoke(&self, args: &[Value]) -> Result<String> {
        check_arity(self.name(), self.arity(), args)?;
        self.call(args)
    }
}

/// Thread-safe macro registry.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<HashMap<&'static str, Arc<dyn Macro>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The six built-in macros, bound to one build mode and constants table.
    pub fn with_builtins(production: bool, constants: ConstantTable) -> Self {
        let mut map: HashMap<&'static str, Arc<dyn Macro>> = HashMap::new();
        map.insert(SANITY, Arc::new(Sanity::new(production)));
        map.insert(SANITY_FAIL, Arc::new(SanityFail::new(production)));
        map.insert(DEFINE_NO_ACCESS, Arc::new(NoAccess::new(production)));
        map.insert(DEFINE_CONSTANTS, Arc::new(DefineConstants::new(production)));
        map.insert(DEFINE_ATTRIBUTE, Arc::new(DefineAttribute::new(production)));
        map.insert(CONSTANTS, Arc::new(Constants::new(constants)));
        Self { inner: Arc::new(map) }
    }

    pub fn register<M: Macro + 'static>(&mut self, m: M) {
        let mut_map = Arc::make_mut(&mut self.inner);
        mut_map.insert(m.name(), Arc::new(m));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Macro>> {
        self.inner.get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Arc<dyn Macro>)> {
        self.inner.iter().map(|(name, m)| (*name, m))
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<String> {
        let m = self
            .get(name)
            .ok_or_else(|| MacroError::UnknownMacro(name.to_string()))?;
        m.invoke(args)
    }
}

pub(crate) fn check_arity(
    name: &'static str,
    arity: RangeInclusive<usize>,
    args: &[Value],
) -> Result<()> {
    if arity.contains(&args.len()) {
        return Ok(());
    }
    let expected = match (*arity.start(), *arity.end()) {
        (lo, hi) if lo == hi => format!("{lo} arguments"),
        (lo, usize::MAX) => format!("{lo} or more arguments"),
        (lo, hi) => format!("{lo} to {hi} arguments"),
    };
    Err(MacroError::ArgumentArity {
        name,
        expected,
        got: render_args(args),
    })
}

/// Argument list as JSON, for error messages.
pub(crate) fn render_args(args: &[Value]) -> String {
    Value::Array(args.to_vec()).to_string()
}

pub(crate) fn expect_str<'a>(name: &'static str, args: &'a [Value], index: usize) -> Result<&'a str> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| MacroError::ArgumentType {
            name,
            got: render_args(args),
        })
}

/// Missing and `null` both mean "not given".
pub(crate) fn optional_str<'a>(
    name: &'static str,
    args: &'a [Value],
    index: usize,
) -> Result<Option<&'a str>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => expect_str(name, args, index).map(Some),
    }
}
