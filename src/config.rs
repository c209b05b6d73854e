use std::env;
use std::path::PathBuf;

pub const TITLE: &str = "Splash";
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 720;

/// Logical frame rate of a screen that does not pick its own
pub const DEFAULT_FPS: f64 = 60.0;

pub const INTRO_FPS: f64 = 10.0;
pub const INTRO_ASSET_DIR: &str = "./images";
pub const INTRO_FRAME_PREFIX: &str = "11zon_";
pub const INTRO_FRAME_COUNT: usize = 40;
pub const INTRO_FRAME_EXTENSION: &str = "jpeg";

pub const ENV_ASSET_DIR: &str = "SPLASH_ASSET_DIR";
pub const ENV_FRAME_COUNT: &str = "SPLASH_FRAME_COUNT";
pub const ENV_FPS: &str = "SPLASH_FPS";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero, got {value:?}")]
    NotPositive { var: &'static str, value: String },
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Logical frames per second of the intro animation
    pub intro_fps: f64,
    pub asset_dir: PathBuf,
    pub frame_prefix: String,
    pub frame_count: usize,
    pub frame_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            intro_fps: INTRO_FPS,
            asset_dir: PathBuf::from(INTRO_ASSET_DIR),
            frame_prefix: INTRO_FRAME_PREFIX.to_string(),
            frame_count: INTRO_FRAME_COUNT,
            frame_extension: INTRO_FRAME_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `SPLASH_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_ASSET_DIR) {
            self.asset_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(ENV_FRAME_COUNT) {
            let count: usize = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::NotANumber { var: ENV_FRAME_COUNT, value: value.clone() })?;
            if count == 0 {
                return Err(ConfigError::NotPositive { var: ENV_FRAME_COUNT, value });
            }
            self.frame_count = count;
        }
        if let Some(value) = lookup(ENV_FPS) {
            let fps: f64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::NotANumber { var: ENV_FPS, value: value.clone() })?;
            if !fps.is_finite() || fps <= 0.0 {
                return Err(ConfigError::NotPositive { var: ENV_FPS, value });
            }
            self.intro_fps = fps;
        }
        Ok(self)
    }

    /// Ordered intro frame paths, numbered from 1
    pub fn frame_paths(&self) -> Vec<PathBuf> {
        (1..=self.frame_count)
            .map(|i| {
                self.asset_dir
                    .join(format!("{}{}.{}", self.frame_prefix, i, self.frame_extension))
            })
            .collect()
    }
}
