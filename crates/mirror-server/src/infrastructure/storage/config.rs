//! TOML-based configuration for the server.
//!
//! ```toml
//! [server]
//! log_level = "info"
//!
//! [geometry]
//! video_width = 1920
//! video_height = 1080
//! target_width = 1080
//! target_height = 1920
//! # a b c d e f, in normalized coordinates
//! filter = [0.0, 1.0, -1.0, 0.0, 0.0, 0.0]
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so the server
//! runs with no config file at all and older files keep working when new
//! fields are added.

use std::path::{Path, PathBuf};

use mirror_core::{AffineMatrix, GeometryError, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::update_geometry::DisplayGeometry;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configured geometry contains a zero dimension.
    #[error("invalid geometry in config: {0}")]
    Geometry(#[from] GeometryError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub geometry: GeometryConfig,
}

/// General server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` overrides it when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Initial display geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryConfig {
    /// Width the video is encoded at.
    #[serde(default = "default_video_width")]
    pub video_width: u32,
    /// Height the video is encoded at.
    #[serde(default = "default_video_height")]
    pub video_height: u32,
    /// Device-side target width; defaults to `video_width`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_width: Option<u32>,
    /// Device-side target height; defaults to `video_height`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_height: Option<u32>,
    /// Filter coefficients `[a, b, c, d, e, f]` in normalized coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<[f64; 6]>,
}

impl GeometryConfig {
    /// Validates the configured sizes and builds a [`DisplayGeometry`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] if any dimension is zero.
    pub fn to_geometry(&self) -> Result<DisplayGeometry, ConfigError> {
        let video_size = Size::new(self.video_width, self.video_height)?;
        let target_size = Size::new(
            self.target_width.unwrap_or(self.video_width),
            self.target_height.unwrap_or(self.video_height),
        )?;
        Ok(DisplayGeometry {
            video_size,
            target_size,
            filter: self.filter.map(AffineMatrix::from),
        })
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_video_width() -> u32 {
    1080
}
fn default_video_height() -> u32 {
    1920
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            video_width: default_video_width(),
            video_height: default_video_height(),
            target_width: None,
            target_height: None,
            filter: None,
        }
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Loads `ServerConfig` from `path`, returning `ServerConfig::default()` if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &ServerConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("mirror_test_{}_{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_default_config_is_portrait_passthrough() {
        let cfg = ServerConfig::default();
        let geometry = cfg.geometry.to_geometry().unwrap();

        assert_eq!(cfg.server.log_level, "info");
        assert_eq!(geometry.video_size, Size::new(1080, 1920).unwrap());
        assert_eq!(geometry.target_size, geometry.video_size);
        assert!(geometry.filter.is_none());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ServerConfig::default());
    }

    #[test]
    fn test_partial_geometry_section_fills_defaults() {
        let cfg: ServerConfig = toml::from_str("[geometry]\nvideo_width = 720\n").unwrap();
        assert_eq!(cfg.geometry.video_width, 720);
        assert_eq!(cfg.geometry.video_height, 1920);
    }

    #[test]
    fn test_geometry_with_target_and_filter() {
        let toml_str = r#"
            [geometry]
            video_width = 1920
            video_height = 1080
            target_width = 1080
            target_height = 1920
            filter = [0.0, 1.0, -1.0, 0.0, 0.0, 0.0]
        "#;
        let cfg: ServerConfig = toml::from_str(toml_str).unwrap();
        let geometry = cfg.geometry.to_geometry().unwrap();

        assert_eq!(geometry.target_size, Size::new(1080, 1920).unwrap());
        assert_eq!(geometry.filter, Some(AffineMatrix::rotate_quarter_turns(1)));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let cfg: ServerConfig = toml::from_str("[geometry]\nvideo_width = 0\n").unwrap();
        assert!(matches!(
            cfg.geometry.to_geometry(),
            Err(ConfigError::Geometry(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[geometry\nvideo_width = ").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = temp_path("missing");
        assert_eq!(load_config(&path).unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip_via_temp_dir() {
        // Arrange
        let path = temp_path("round_trip");
        let mut cfg = ServerConfig::default();
        cfg.server.log_level = "debug".to_string();
        cfg.geometry.target_width = Some(540);
        cfg.geometry.target_height = Some(960);
        cfg.geometry.filter = Some([1.0, 0.0, 0.0, -1.0, 0.0, 0.0]);

        // Act
        save_config(&path, &cfg).unwrap();
        let restored = load_config(&path).unwrap();

        // Assert
        assert_eq!(restored, cfg);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
