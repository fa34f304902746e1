//! Preprocessor configuration

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names and defaults the preprocessor recognises
///
/// Every key is optional in the TOML form; missing keys take the defaults.
///
/// ```toml
/// shadow_annotation = "Shadow"
/// default_shadow_prefix = "shadow$"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Annotation type marking shadow members
    pub shadow_annotation: String,

    /// Annotation type recording a member's original name after a rename
    pub renamed_annotation: String,

    /// Prefix stripped from shadow methods when the annotation sets none
    pub default_shadow_prefix: String,

    /// Name of the imaginary-super placeholder field
    pub imaginary_super: String,

    /// Name shared by all constructors
    pub constructor_name: String,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            shadow_annotation: "Shadow".to_string(),
            renamed_annotation: "MixinRenamed".to_string(),
            default_shadow_prefix: "shadow$".to_string(),
            imaginary_super: "$$imaginarySuper".to_string(),
            constructor_name: "<init>".to_string(),
        }
    }
}

impl PreprocessorConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if `contents` is not valid TOML or a key has the
    /// wrong type.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse preprocessor configuration")
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error naming `path` if it cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_keys_take_defaults() {
        let config = PreprocessorConfig::from_toml_str("default_shadow_prefix = \"m_\"\n")
            .expect("valid config");

        assert_eq!(config.default_shadow_prefix, "m_");
        assert_eq!(config.shadow_annotation, "Shadow");
        assert_eq!(config.constructor_name, "<init>");
    }

    #[test]
    fn empty_document_is_default() {
        let config = PreprocessorConfig::from_toml_str("").expect("valid config");
        assert_eq!(config, PreprocessorConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        let error = PreprocessorConfig::from_toml_str("imaginary_super = 3").expect_err("integer name");
        assert!(error.to_string().contains("preprocessor configuration"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "shadow_annotation = \"Lorg/example/Shadow;\"").expect("write");

        let config = PreprocessorConfig::from_file(file.path()).expect("valid config");
        assert_eq!(config.shadow_annotation, "Lorg/example/Shadow;");
    }

    #[test]
    fn missing_file_reports_path() {
        let error = PreprocessorConfig::from_file(Path::new("/nonexistent/preprocess.toml"))
            .expect_err("missing file");
        assert!(error.to_string().contains("/nonexistent/preprocess.toml"));
    }
}
