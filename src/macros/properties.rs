//! Macros that install or assign properties on an object expression.

use itertools::Itertools;
use serde_json::Value;
use std::ops::RangeInclusive;

use super::{expect_str, render_args, Macro, DEFINE_ATTRIBUTE, DEFINE_CONSTANTS, DEFINE_NO_ACCESS};
use crate::codegen::{quote, Key};
use crate::errors::{MacroError, Result};

/// `DEFINE_NO_ACCESS(object, name, ...)`: trap reads and writes of the named
/// properties in development builds. Emits nothing in production.
#[derive(Debug, Clone, Copy)]
pub struct NoAccess {
    production: bool,
}

impl NoAccess {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    pub fn render<S: AsRef<str>>(&self, object: &str, names: &[S]) -> String {
        if self.production {
            return String::new();
        }
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let read = quote(&format!("Accessed illegal property \"{name}\""));
                let write = quote(&format!("Assigned to illegal property \"{name}\""));
                format!(
                    "Object.defineProperty({object}, {}, {{configurable: false, enumerable: false, \
                     get: function() {{throw new Error({read})}},\
                     set: function() {{throw new Error({write})}}}});",
                    quote(name)
                )
            })
            .join("")
    }
}

impl Macro for NoAccess {
    fn name(&self) -> &'static str { DEFINE_NO_ACCESS }
    fn arity(&self) -> RangeInclusive<usize> { 2..=usize::MAX }
    fn call(&self, args: &[Value]) -> Result<String> {
        let object = expect_str(DEFINE_NO_ACCESS, args, 0)?;
        let names = (1..args.len())
            .map(|i| expect_str(DEFINE_NO_ACCESS, args, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.render(object, &names))
    }
}

/// `DEFINE_CONSTANTS(object, key, value, ...)`: plain assignments in
/// production, read-only property definitions in development.
#[derive(Debug, Clone, Copy)]
pub struct DefineConstants {
    production: bool,
}

impl DefineConstants {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    pub fn render(&self, object: &str, pairs: &[(Key, String)]) -> String {
        pairs
            .iter()
            .map(|(key, value)| {
                let key = key.render();
                if self.production {
                    format!("{object}[{key}] = {value}")
                } else {
                    format!(
                        "Object.defineProperty({object}, {key}, \
                         {{configurable: false, enumerable: true, writable: false, value: {value}}})"
                    )
                }
            })
            .join(";")
    }
}

impl Macro for DefineConstants {
    fn name(&self) -> &'static str { DEFINE_CONSTANTS }
    fn arity(&self) -> RangeInclusive<usize> { 3..=usize::MAX }
    fn call(&self, args: &[Value]) -> Result<String> {
        if args.len() % 2 == 0 {
            return Err(MacroError::ArgumentArity {
                name: DEFINE_CONSTANTS,
                expected: "an odd number of arguments".into(),
                got: render_args(args),
            });
        }
        let object = expect_str(DEFINE_CONSTANTS, args, 0)?;
        let pairs = (1..args.len())
            .step_by(2)
            .map(|i| {
                let key = expect_str(DEFINE_CONSTANTS, args, i)?;
                let value = expect_str(DEFINE_CONSTANTS, args, i + 1)?;
                Ok((Key::parse(key), value.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.render(object, &pairs))
    }
}

/// `DEFINE_ATTRIBUTE(object, validator, key, value)`: a mutable property
/// whose writes are checked by `validator` in development builds.
#[derive(Debug, Clone, Copy)]
pub struct DefineAttribute {
    production: bool,
}

impl DefineAttribute {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    pub fn render(&self, object: &str, validator: &str, key: &Key, value: &str) -> String {
        let rendered_key = key.render();
        if self.production {
            return format!("{object}[{rendered_key}] = {value}");
        }

        let not_callable = quote("Validator is not a function.");
        let bad_initial = quote(&format!(
            "Invalid initial value for attribute \"{}\"",
            key.describe()
        ));
        let bad_assignment = quote(&format!(
            "Invalid value assigned to attribute \"{}\"",
            key.describe()
        ));
        let callable_check =
            format!("if(typeof validator !== \"function\") {{ throw new Error({not_callable}) }}");

        // Object and key are evaluated at the call site so `this` keeps its meaning.
        [
            ";(function(target, key, value, validator) {".to_string(),
            callable_check.clone(),
            format!("if(!validator(value)) {{ throw new Error({bad_initial}) }}"),
            ";Object.defineProperty(target, key, {configurable: false, enumerable: true,".to_string(),
            "get: function() { return value },".to_string(),
            "set: function(newValue) {".to_string(),
            callable_check,
            format!("if(!validator(newValue)) {{ throw new Error({bad_assignment}) }}"),
            "value = newValue".to_string(),
            "}".to_string(),
            "})".to_string(),
            format!("}})({object}, {rendered_key}, {value}, {validator});"),
        ]
        .join(" ")
    }
}

impl Macro for DefineAttribute {
    fn name(&self) -> &'static str { DEFINE_ATTRIBUTE }
    fn arity(&self) -> RangeInclusive<usize> { 4..=4 }
    fn call(&self, args: &[Value]) -> Result<String> {
        let object = expect_str(DEFINE_ATTRIBUTE, args, 0)?;
        let validator = expect_str(DEFINE_ATTRIBUTE, args, 1)?;
        let key = expect_str(DEFINE_ATTRIBUTE, args, 2)?;
        let value = expect_str(DEFINE_ATTRIBUTE, args, 3)?;
        Ok(self.render(object, validator, &Key::parse(key), value))
    }
}
