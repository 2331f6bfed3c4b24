use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use super::{expect_str, Macro, CONSTANTS};
use crate::codegen;
use crate::errors::{MacroError, Result};

/// One build-time constant.
///
/// In an options file a JSON string is code; every other JSON value is a
/// literal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Constant {
    /// Code expression, emitted verbatim.
    Code(String),
    /// Value serialized as a literal.
    Literal(Value),
}

impl Constant {
    pub fn code(expr: impl Into<String>) -> Self {
        Constant::Code(expr.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Constant::Literal(value.into())
    }

    /// Right-hand side of the emitted binding.
    pub fn to_code(&self) -> String {
        match self {
            Constant::Code(expr) => expr.clone(),
            Constant::Literal(value) => codegen::literal(value),
        }
    }
}

pub type ConstantTable = BTreeMap<String, Constant>;

/// `CONSTANTS(name, ...)`: splice selected constants as `const` bindings.
#[derive(Debug, Clone, Default)]
pub struct Constants {
    table: Arc<ConstantTable>,
}

impl Constants {
    pub fn new(table: ConstantTable) -> Self {
        Self { table: Arc::new(table) }
    }

    pub fn render<S: AsRef<str>>(&self, names: &[S]) -> Result<String> {
        if names.is_empty() {
            return Ok(String::new());
        }
        let bindings = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let constant = self
                    .table
                    .get(name)
                    .ok_or_else(|| MacroError::UndefinedConstant(name.to_string()))?;
                Ok(format!("const {name} = {}", constant.to_code()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("{};", bindings.join(";")))
    }
}

impl Macro for Constants {
    fn name(&self) -> &'static str { CONSTANTS }
    fn arity(&self) -> RangeInclusive<usize> { 0..=usize::MAX }
    fn call(&self, args: &[Value]) -> Result<String> {
        let names = (0..args.len())
            .map(|i| expect_str(CONSTANTS, args, i))
            .collect::<Result<Vec<_>>>()?;
        self.render(&names)
    }
}
