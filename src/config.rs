// SPDX-License-Identifier: Apache-2.0

//! Parameters for generating an adder tree, and loading them from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::util::is_identifier;
use crate::{Dialect, Usage};

pub const DEFAULT_ADDER_NAME: &str = "ripple_add";
pub const DEFAULT_INPUT_NAME: &str = "summands";
pub const DEFAULT_OUTPUT_NAME: &str = "sum";
pub const DEFAULT_MODULE_NAME: &str = "ripple_adder_tree";
pub const DEFAULT_WORD_WIDTH: usize = 8;
pub const DEFAULT_ROWS: usize = 64;

/// Widest input word accepted. Keeps every derived width, and the range
/// proof over them, well within `usize`.
pub const MAX_WORD_WIDTH: usize = 1 << 16;

/// Everything needed to generate one adder tree module.
///
/// Every field has a default, so a TOML file only needs to mention what it
/// changes:
///
/// ```toml
/// word_width = 16
/// rows = 8
/// dialect = "verilog"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConfig {
    /// Width in bits of each signed input word.
    pub word_width: usize,
    /// Number of input words; must be a power of two.
    pub rows: usize,
    pub adder_name: String,
    pub input_name: String,
    pub output_name: String,
    pub module_name: String,
    pub dialect: Dialect,
    pub adder_usage: Usage,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            word_width: DEFAULT_WORD_WIDTH,
            rows: DEFAULT_ROWS,
            adder_name: DEFAULT_ADDER_NAME.to_string(),
            input_name: DEFAULT_INPUT_NAME.to_string(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            dialect: Dialect::default(),
            adder_usage: Usage::default(),
        }
    }
}

impl TreeConfig {
    /// Returns the default configuration with the given word width and row
    /// count.
    pub fn new(word_width: usize, rows: usize) -> Self {
        TreeConfig {
            word_width,
            rows,
            ..Default::default()
        }
    }

    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: TreeConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file and validates it.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks the parameters before anything is generated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.word_width == 0 || self.word_width > MAX_WORD_WIDTH {
            return Err(ConfigError::InvalidWordWidth(self.word_width));
        }
        if !self.rows.is_power_of_two() {
            return Err(ConfigError::InvalidRowCount(self.rows));
        }

        for (field, name) in [
            ("adder_name", &self.adder_name),
            ("input_name", &self.input_name),
            ("output_name", &self.output_name),
            ("module_name", &self.module_name),
        ] {
            if !is_identifier(name) {
                return Err(ConfigError::InvalidIdentifier {
                    field,
                    name: name.clone(),
                });
            }
        }

        if self.input_name == self.output_name {
            return Err(ConfigError::NameCollision(self.input_name.clone()));
        }
        if self.module_name == self.adder_name {
            return Err(ConfigError::NameCollision(self.module_name.clone()));
        }

        Ok(())
    }

    /// Number of adder layers, `log2(rows)`. Only meaningful once
    /// `validate` has passed.
    pub fn depth(&self) -> usize {
        self.rows.trailing_zeros() as usize
    }

    /// Width of the module output, `word_width + log2(rows)`.
    pub fn output_width(&self) -> usize {
        self.word_width + self.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tree() {
        let config = TreeConfig::default();
        assert_eq!(config.word_width, 8);
        assert_eq!(config.rows, 64);
        assert_eq!(config.adder_name, "ripple_add");
        assert_eq!(config.input_name, "summands");
        assert_eq!(config.output_name, "sum");
        assert_eq!(config.module_name, "ripple_adder_tree");
        assert_eq!(config.depth(), 6);
        assert_eq!(config.output_width(), 14);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
word_width = 16
rows = 8
dialect = "verilog"
adder_usage = "emit_stub"
"#;
        let config = TreeConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.word_width, 16);
        assert_eq!(config.rows, 8);
        assert_eq!(config.dialect, Dialect::Verilog);
        assert_eq!(config.adder_usage, Usage::EmitStub);
        assert_eq!(config.output_name, "sum");
    }

    #[test]
    fn parse_empty_config() {
        assert_eq!(TreeConfig::from_toml_str("").unwrap(), TreeConfig::default());
    }

    #[test]
    fn parse_rejects_unknown_field() {
        let err = TreeConfig::from_toml_str("width = 8").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn parse_rejects_invalid_rows() {
        let err = TreeConfig::from_toml_str("rows = 12").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRowCount(12)));
    }

    #[test]
    fn rejects_zero_rows_and_width() {
        assert!(matches!(
            TreeConfig::new(8, 0).validate(),
            Err(ConfigError::InvalidRowCount(0))
        ));
        assert!(matches!(
            TreeConfig::new(0, 4).validate(),
            Err(ConfigError::InvalidWordWidth(0))
        ));
    }

    #[test]
    fn rejects_width_beyond_limit() {
        assert!(TreeConfig::new(MAX_WORD_WIDTH, 1 << 20).validate().is_ok());
        assert!(matches!(
            TreeConfig::new(MAX_WORD_WIDTH + 1, 4).validate(),
            Err(ConfigError::InvalidWordWidth(w)) if w == MAX_WORD_WIDTH + 1
        ));
        assert!(matches!(
            TreeConfig::new(usize::MAX, 2).validate(),
            Err(ConfigError::InvalidWordWidth(usize::MAX))
        ));
    }

    #[test]
    fn rejects_bad_names() {
        let config = TreeConfig {
            output_name: "sum out".to_string(),
            ..TreeConfig::new(8, 4)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidIdentifier {
                field: "output_name",
                ..
            })
        ));

        let config = TreeConfig {
            output_name: "summands".to_string(),
            ..TreeConfig::new(8, 4)
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NameCollision(name)) if name == "summands"
        ));
    }

    #[test]
    fn single_row_has_no_layers() {
        let config = TreeConfig::new(12, 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.depth(), 0);
        assert_eq!(config.output_width(), 12);
    }
}
