//! Generator configuration from `[generator]` in a TOML file.
//!
//! ```toml
//! [generator]
//! class_name = "BooksClient"
//! sync = false
//! additional_method_comment = true
//! runtime_module = "./runtime"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::method::MethodOptions;

/// Options for a whole client generation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name of the generated class
    pub class_name: String,
    /// Emit synchronous methods
    pub sync: bool,
    /// Append operationId / Request URI lines to method docs
    pub additional_method_comment: bool,
    /// Module the `ApiClient` and `QueryParameters` types are imported from
    pub runtime_module: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            class_name: "Client".to_string(),
            sync: false,
            additional_method_comment: false,
            runtime_module: None,
        }
    }
}

/// File layout: everything lives under `[generator]`.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    generator: GeneratorConfig,
}

impl GeneratorConfig {
    /// Parse a TOML document. A missing `[generator]` table yields defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Ok(file.generator)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Per-method options derived from this config.
    pub fn method_options(&self) -> MethodOptions {
        MethodOptions {
            sync: self.sync,
            additional_method_comment: self.additional_method_comment,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_toml_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.class_name, "Client");
        assert_eq!(config.method_options(), MethodOptions::default());
    }

    #[test]
    fn test_partial_table() {
        let config = GeneratorConfig::from_toml_str(
            r#"
[generator]
sync = true
runtime_module = "./runtime"
"#,
        )
        .unwrap();
        assert!(config.sync);
        assert_eq!(config.class_name, "Client");
        assert_eq!(config.runtime_module.as_deref(), Some("./runtime"));
        assert!(config.method_options().sync);
    }

    #[test]
    fn test_invalid_toml() {
        let err = GeneratorConfig::from_toml_str("[generator]\nsync = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clientgen.toml");
        fs::write(
            &path,
            "[generator]\nclass_name = \"BooksClient\"\nadditional_method_comment = true\n",
        )
        .unwrap();
        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.class_name, "BooksClient");
        assert!(config.method_options().additional_method_comment);

        let missing = GeneratorConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
