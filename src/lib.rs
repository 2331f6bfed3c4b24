pub mod errors;
pub mod options;
pub mod context;
pub mod macros;     // the six built-ins plus the registry they live in
pub mod codegen;    // shared quoting, keys
pub mod directive;

use errors::Result;

pub use codegen::Key;
pub use context::{build_context, Context, Entry};
pub use errors::MacroError;
pub use macros::{Constant, ConstantTable, Macro, Registry};
pub use options::{Options, PRODUCTION};

/// Convenience: build a context from `options` and expand one directive.
pub fn expand(options: &Options, directive: &str) -> Result<String> {
    Context::new(options).expand(directive)
}
