use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Every failure raised while building a context or expanding a macro call
#[derive(Debug, Error)]
pub enum MacroError {
    // Context build invoked with zero or several options bundles
    #[error("context build expects exactly one options bundle, got {0}")]
    InvalidArity(usize),

    // Too few arguments, or a count that breaks a structural rule
    #[error("{name} expects {expected}, got {got}")]
    ArgumentArity {
        name: &'static str,
        expected: String,
        got: String,
    },

    #[error("{name} expects string parameters, got {got}")]
    ArgumentType { name: &'static str, got: String },

    #[error("No such constant \"{0}\".")]
    UndefinedConstant(String),

    #[error("unknown macro `{0}`")]
    UnknownMacro(String),

    // A data entry replaced the macro of the same name
    #[error("`{0}` is bound to data, not a macro")]
    NotAMacro(String),

    // Malformed directive text; `offset` is a byte position in the input
    #[error("parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Type alias for results that use `MacroError` as the error type
pub type Result<T> = std::result::Result<T, MacroError>;
