//! # Export Configuration
//!
//! Settings that shape the emitted model module: where it is written, the
//! name of the top-level container, how deferred texture paths are built and
//! which renderer runtime functions the initializer binds to.
//!
//! The configuration is passed explicitly into the exporter; nothing in the
//! export pass reads global state.

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use super::{Config, ConfigError};

/// Words that cannot be used as the container name.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// # Runtime Bindings
///
/// Fully qualified names of the renderer functions the emitted initializer
/// aliases to its shorthands (`n`, `no`, `v`, `c`, `ct`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeBindings {
    /// N-gon constructor (`n`)
    pub ngon: String,
    /// Vector constructor used for normals (`no`)
    pub vector: String,
    /// Vertex constructor (`v`)
    pub vertex: String,
    /// Color constructor (`c`)
    pub color: String,
    /// Asynchronous texture loader (`ct`)
    pub texture_loader: String,
}

impl Default for RuntimeBindings {
    fn default() -> Self {
        Self {
            ngon: "Rngon.ngon".to_string(),
            vector: "Rngon.vector".to_string(),
            vertex: "Rngon.vertex".to_string(),
            color: "Rngon.color".to_string(),
            texture_loader: "Rngon.texture.load".to_string(),
        }
    }
}

impl RuntimeBindings {
    fn validate(&self) -> Result<(), ConfigError> {
        let bindings = [
            ("ngon", &self.ngon),
            ("vector", &self.vector),
            ("vertex", &self.vertex),
            ("color", &self.color),
            ("texture_loader", &self.texture_loader),
        ];
        for (name, target) in bindings {
            if target.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("runtime binding '{name}' cannot be empty")));
            }
        }
        Ok(())
    }
}

/// # Export Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Path of the emitted model module
    pub output_file: PathBuf,
    /// Name of the top-level container object
    pub model_name: String,
    /// Extension of pre-converted texture assets (without the leading dot)
    pub texture_extension: String,
    /// Prepended verbatim to every deferred texture path
    pub texture_path_prefix: String,
    /// Emit `export const` so the artifact can be imported as an ES module
    pub export_binding: bool,
    /// Renderer runtime functions used by the initializer
    pub runtime: RuntimeBindings,
    /// Log level used by host applications
    pub log_level: String,
}

impl ExportConfig {
    /// Create a configuration with the default file and container names
    pub fn new() -> Self {
        Self {
            output_file: PathBuf::from("model.rngon-model.js"),
            model_name: "model".to_string(),
            texture_extension: "rngon-texture.json".to_string(),
            texture_path_prefix: String::new(),
            export_binding: false,
            runtime: RuntimeBindings::default(),
            log_level: "info".to_string(),
        }
    }

    /// Set the output file
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = path.into();
        self
    }

    /// Set the container name
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Set the texture asset extension
    pub fn with_texture_extension(mut self, extension: impl Into<String>) -> Self {
        self.texture_extension = extension.into();
        self
    }

    /// Set the texture path prefix (e.g. `"./assets/textures/"`)
    pub fn with_texture_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.texture_path_prefix = prefix.into();
        self
    }

    /// Toggle the ES module `export` keyword
    pub fn with_export_binding(mut self, enabled: bool) -> Self {
        self.export_binding = enabled;
        self
    }

    /// Replace the runtime bindings
    pub fn with_runtime(mut self, runtime: RuntimeBindings) -> Self {
        self.runtime = runtime;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output file cannot be empty".to_string()));
        }

        if !is_identifier(&self.model_name) {
            return Err(ConfigError::Invalid(format!(
                "model name '{}' is not a valid identifier",
                self.model_name
            )));
        }

        let extension = self.texture_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(ConfigError::Invalid("texture extension cannot be empty".to_string()));
        }

        self.runtime.validate()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ExportConfig {}

/// Whether `name` can be used as a JavaScript binding name.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let valid_start = first.is_alphabetic() || first == '_' || first == '$';
    valid_start
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !RESERVED_WORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.output_file, PathBuf::from("model.rngon-model.js"));
        assert_eq!(config.model_name, "model");
        assert_eq!(config.texture_extension, "rngon-texture.json");
        assert!(!config.export_binding);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ExportConfig::new()
            .with_output_file("out/scene.js")
            .with_model_name("scene")
            .with_texture_path_prefix("./textures/")
            .with_export_binding(true);

        assert_eq!(config.output_file, PathBuf::from("out/scene.js"));
        assert_eq!(config.model_name, "scene");
        assert_eq!(config.texture_path_prefix, "./textures/");
        assert!(config.export_binding);
    }

    #[test]
    fn test_rejects_invalid_model_names() {
        for name in ["", "3d", "my-model", "class", "two words"] {
            let config = ExportConfig::new().with_model_name(name);
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "'{name}' should be rejected"
            );
        }
        for name in ["model", "_scene", "$cube", "torusModel2"] {
            assert!(ExportConfig::new().with_model_name(name).validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_empty_values() {
        assert!(ExportConfig::new().with_output_file("").validate().is_err());
        assert!(ExportConfig::new().with_texture_extension(".").validate().is_err());

        let runtime = RuntimeBindings {
            texture_loader: " ".to_string(),
            ..RuntimeBindings::default()
        };
        assert!(ExportConfig::new().with_runtime(runtime).validate().is_err());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "model_name = \"crate\"\nexport_binding = true\n\n[runtime]\ncolor = \"Rngon.color_rgba\"\n"
        )
        .unwrap();

        let config = ExportConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.model_name, "crate");
        assert!(config.export_binding);
        assert_eq!(config.runtime.color, "Rngon.color_rgba");
        // Unspecified fields keep their defaults
        assert_eq!(config.runtime.ngon, "Rngon.ngon");
        assert_eq!(config.texture_extension, "rngon-texture.json");
    }

    #[test]
    fn test_save_and_reload_ron() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.ron");
        let config = ExportConfig::new()
            .with_model_name("torus")
            .with_texture_path_prefix("assets/");

        config.save_to_file(&path).unwrap();
        let loaded = ExportConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_format() {
        let file = NamedTempFile::new().unwrap();
        let result = ExportConfig::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
