//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TLAB_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;
use transform_lab_math::MatrixMode;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Matrix editor configuration
    #[serde(default)]
    pub matrix: MatrixConfig,
    /// Asset locations
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TLAB_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional local overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // TLAB_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("TLAB_").split("__"));

        let config: Self = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the window or editor unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.matrix.drag_speed.is_finite() && self.matrix.drag_speed > 0.0) {
            return Err(ConfigError::invalid(format!(
                "matrix.drag_speed must be positive, got {}",
                self.matrix.drag_speed
            )));
        }
        Ok(())
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
    /// Append the active matrix mode to the title
    pub show_mode_in_title: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "App".to_string(),
            width: 1024,
            height: 768,
            fullscreen: false,
            vsync: true,
            show_mode_in_title: false,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Flip images so row 0 is the bottom (the quad's v = 0)
    pub flip_texture_vertically: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.6, 0.6, 1.0, 1.0],
            flip_texture_vertically: true,
        }
    }
}

/// Matrix editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Mode selected at startup
    pub initial_mode: MatrixMode,
    /// Value change per pixel dragged
    pub drag_speed: f32,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            initial_mode: MatrixMode::default(),
            drag_speed: 0.01,
        }
    }
}

/// Asset locations, relative to the working directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Image drawn on the quad
    pub texture_path: String,
    /// Directory with WGSL overrides; embedded shaders are used when unset
    pub shader_dir: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            texture_path: "assets/textures/quad.png".to_string(),
            shader_dir: None,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.title, "App");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 768);
        assert_eq!(config.rendering.background_color, [0.6, 0.6, 1.0, 1.0]);
        assert_eq!(config.matrix.initial_mode, MatrixMode::Linear2D);
        assert_eq!(config.matrix.drag_speed, 0.01);
        assert!(config.assets.shader_dir.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("drag_speed"));
        assert!(toml.contains("\"2d-2x2\""));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [window]
            title = "Custom"

            [matrix]
            initial_mode = "3d-4x4"
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.matrix.initial_mode, MatrixMode::Homogeneous3D);
        assert_eq!(config.matrix.drag_speed, 0.01);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.matrix.drag_speed = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("drag_speed"));

        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = AppConfig::load_from("/nonexistent/config/dir").unwrap();
        assert_eq!(config.window.width, 1024);
    }
}
