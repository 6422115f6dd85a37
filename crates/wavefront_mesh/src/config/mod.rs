//! Configuration system
//!
//! Loader behaviour can be set up in code with the `with_*` builders or
//! read from a TOML/RON file through the [`Config`] trait.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// # Loader Configuration
///
/// Selects the output mode and how strictly referenced material
/// libraries are treated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Deduplicate corner tokens into a shared index buffer
    pub indexed: bool,
    /// Fail the load when an `mtllib` target cannot be opened
    pub require_material_library: bool,
    /// Log filter used by [`LoaderConfig::init_logging`]
    pub log_level: String,
}

impl LoaderConfig {
    /// Create a new loader configuration with defaults
    pub fn new() -> Self {
        Self {
            indexed: false,
            require_material_library: true,
            log_level: "info".to_string(),
        }
    }

    /// Select indexed (`true`) or flat (`false`) output
    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Choose whether a missing material library aborts the load
    pub fn with_required_material_library(mut self, required: bool) -> Self {
        self.require_material_library = required;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Install an env_logger using `log_level` as the filter
    pub fn init_logging(&self) {
        crate::foundation::logging::init_with_filter(&self.log_level);
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for LoaderConfig {}
