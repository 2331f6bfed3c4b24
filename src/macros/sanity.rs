use serde_json::Value;
use std::ops::RangeInclusive;

use super::{expect_str, optional_str, Macro, SANITY, SANITY_FAIL};
use crate::codegen::quote;
use crate::errors::Result;

/// `SANITY(expr, fallback?)`: run-time assertion.
///
/// Development builds throw when `expr` is false. Production builds drop the
/// check entirely, unless a fallback is given, in which case the fallback
/// statements run instead of throwing.
#[derive(Debug, Clone, Copy)]
pub struct Sanity {
    production: bool,
}

impl Sanity {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    pub fn render(&self, expr: &str, fallback: Option<&str>) -> String {
        let fallback = fallback.filter(|f| !f.is_empty());
        if self.production {
            return match fallback {
                Some(kludge) => format!("if(!( {expr} )) {{ {kludge} }}"),
                None => String::new(),
            };
        }
        let message = quote(&format!("Sanity check failed: << {expr} >>"));
        format!("if(!( {expr} )) {{ throw new Error({message}) }}")
    }
}

impl Macro for Sanity {
    fn name(&self) -> &'static str { SANITY }
    fn arity(&self) -> RangeInclusive<usize> { 1..=2 }
    fn call(&self, args: &[Value]) -> Result<String> {
        let expr = expect_str(SANITY, args, 0)?;
        // development output never uses the fallback, so it is not checked there
        let fallback = if self.production {
            optional_str(SANITY, args, 1)?
        } else {
            None
        };
        Ok(self.render(expr, fallback))
    }
}

/// `SANITY_FAIL(fallback?)`: marks a path that must never run.
///
/// Same as `SANITY("false", fallback)`, so without a fallback it vanishes in
/// production.
#[derive(Debug, Clone, Copy)]
pub struct SanityFail {
    sanity: Sanity,
}

impl SanityFail {
    pub fn new(production: bool) -> Self {
        Self { sanity: Sanity::new(production) }
    }

    pub fn render(&self, fallback: Option<&str>) -> String {
        self.sanity.render("false", fallback)
    }
}

impl Macro for SanityFail {
    fn name(&self) -> &'static str { SANITY_FAIL }
    fn arity(&self) -> RangeInclusive<usize> { 0..=1 }
    fn call(&self, args: &[Value]) -> Result<String> {
        let fallback = if self.sanity.production {
            optional_str(SANITY_FAIL, args, 0)?
        } else {
            None
        };
        Ok(self.render(fallback))
    }
}
