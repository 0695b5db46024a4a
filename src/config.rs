use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Row values are sent as `u64`, one bit per column.
pub const MAX_COLUMNS: u32 = 64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    Read(String, std::io::Error),
    #[error("Cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Default for Offset {
    fn default() -> Self {
        Self { x: 10, y: 10 }
    }
}

/// Construction-time settings. Every field has a default, so a config
/// file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub offset: Offset,
    pub fps: u32,
    pub slow: f64,
    /// Dump endpoint; without one dumps are only logged.
    pub endpoint: Option<String>,
    /// Window pixels per frame buffer pixel.
    pub scale: u32,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 8,
            cell_width: 20,
            cell_height: 20,
            offset: Offset::default(),
            fps: 60,
            slow: 1.0,
            endpoint: None,
            scale: 3,
            request_timeout_secs: 5,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        Self::from_json(&text)
    }

    /// Reads the file named by the first argument or `PIXELPAD_CONFIG`,
    /// falling back to defaults when neither is set.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("PIXELPAD_CONFIG").ok());
        match path {
            Some(path) => {
                log::info!("Loading config from {}", path);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid("grid needs at least one row and column".to_string()));
        }
        if self.columns > MAX_COLUMNS {
            return Err(ConfigError::Invalid(format!(
                "{} columns requested, at most {} supported",
                self.columns, MAX_COLUMNS
            )));
        }
        if self.cell_width < 2 || self.cell_height < 2 {
            return Err(ConfigError::Invalid("cells must be at least 2x2 pixels".to_string()));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".to_string()));
        }
        if !(self.slow > 0.0) {
            return Err(ConfigError::Invalid(format!("slow must be positive, got {}", self.slow)));
        }
        if self.scale == 0 {
            return Err(ConfigError::Invalid("scale must be positive".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_layout() {
        let config = Config::default();
        assert_eq!((config.columns, config.rows), (8, 8));
        assert_eq!((config.cell_width, config.cell_height), (20, 20));
        assert_eq!(config.offset, Offset { x: 10, y: 10 });
        assert_eq!(config.fps, 60);
        assert_eq!(config.slow, 1.0);
        assert!(config.endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_json(r#"{ "columns": 16, "endpoint": "http://10.0.0.7/" }"#).unwrap();
        assert_eq!(config.columns, 16);
        assert_eq!(config.rows, 8);
        assert_eq!(config.endpoint.as_deref(), Some("http://10.0.0.7/"));
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());

        let partial = Config::from_json(r#"{ "offset": { "x": 5 } }"#).unwrap();
        assert_eq!((partial.offset.x, partial.offset.y), (5, 10));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(Config::from_json(r#"{ "columns": 65 }"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_json(r#"{ "fps": 0 }"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_json(r#"{ "slow": -1.0 }"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(Config::from_json("{ columns"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::from_file("/nonexistent/pixelpad.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pixelpad.json"));
    }
}
