use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::Result;
use crate::macros::{Constant, ConstantTable};

/// Flag that switches every macro to its production shape.
pub const PRODUCTION: &str = "PRODUCTION";

/// One options bundle: the sole input of a context build.
///
/// Deserializes from `{ "constants", "flags", "flagList", "data" }`, every
/// member optional. Unknown members are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(default)]
    pub constants: ConstantTable,
    #[serde(default)]
    pub flags: BTreeMap<String, bool>,
    #[serde(default)]
    pub flag_list: Vec<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Options {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.flag_list.push(name.into());
        self
    }

    pub fn with_constant(mut self, name: impl Into<String>, constant: Constant) -> Self {
        self.constants.insert(name.into(), constant);
        self
    }

    pub fn with_data(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// `flags` with every `flagList` entry set. Listed names only ever turn
    /// a flag on.
    pub fn resolved_flags(&self) -> BTreeMap<String, bool> {
        let mut flags = self.flags.clone();
        for name in &self.flag_list {
            flags.insert(name.clone(), true);
        }
        flags
    }

    pub fn is_production(&self) -> bool {
        self.resolved_flags().get(PRODUCTION).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flag_list_folds_into_flags() {
        let opts = Options::from_json(
            r#"{"flags": {"PRODUCTION": false, "DEBUG": true}, "flagList": ["PRODUCTION", "PRODUCTION"]}"#,
        )
        .unwrap();
        let flags = opts.resolved_flags();
        assert_eq!(flags.get("PRODUCTION"), Some(&true));
        assert_eq!(flags.get("DEBUG"), Some(&true));
        assert!(opts.is_production());
    }

    #[test]
    fn empty_bundle_is_development() {
        let opts = Options::from_json("{}").unwrap();
        assert!(!opts.is_production());
        assert!(opts.constants.is_empty());
    }

    #[test]
    fn unknown_members_are_ignored() {
        let opts = Options::from_json(r#"{"flag": {}, "srcDir": "lib", "flagList": ["PRODUCTION"]}"#).unwrap();
        assert!(opts.is_production());
        assert!(opts.data.is_empty());
    }
}
