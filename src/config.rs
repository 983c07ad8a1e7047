//! Engine configuration.
//!
//! [`EngineConfig`] holds the few knobs the frame pipeline needs. It is owned
//! by the [`Context`](crate::context::Context) and can be adjusted before the
//! storages are built, either in code or through environment variables.

use std::path::PathBuf;

/// Environment variable overriding [`EngineConfig::default_texture_path`].
pub const DEFAULT_TEXTURE_ENV: &str = "NGIN_DEFAULT_TEXTURE";
/// Environment variable overriding [`EngineConfig::max_point_lights`].
pub const MAX_POINT_LIGHTS_ENV: &str = "NGIN_MAX_POINT_LIGHTS";

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Texture that is always present in the texture storage.
    pub default_texture_path: PathBuf,
    /// Unit a texture is bound to when the caller does not ask for one.
    pub default_texture_unit: u32,
    /// Upper bound of point lights uploaded to a shader per frame.
    /// Must match the array size declared in the shaders.
    pub max_point_lights: usize,
}

impl EngineConfig {
    pub const DEFAULT_TEXTURE_PATH: &'static str = "./resources/textures/default_texture.png";
    pub const DEFAULT_MAX_POINT_LIGHTS: usize = 4;

    pub fn new() -> Self {
        Self {
            default_texture_path: PathBuf::from(Self::DEFAULT_TEXTURE_PATH),
            default_texture_unit: 0,
            max_point_lights: Self::DEFAULT_MAX_POINT_LIGHTS,
        }
    }

    /// Start from the defaults and apply overrides from the environment.
    ///
    /// Malformed values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(path) = std::env::var(DEFAULT_TEXTURE_ENV) {
            config.default_texture_path = PathBuf::from(path);
        }
        if let Ok(value) = std::env::var(MAX_POINT_LIGHTS_ENV) {
            match value.parse::<usize>() {
                Ok(max) => config.max_point_lights = max,
                Err(e) => log::warn!(
                    "ignoring {MAX_POINT_LIGHTS_ENV}={value}: {e}"
                ),
            }
        }
        config
    }

    pub fn with_default_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_texture_path = path.into();
        self
    }

    pub fn with_max_point_lights(mut self, max: usize) -> Self {
        self.max_point_lights = max;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
