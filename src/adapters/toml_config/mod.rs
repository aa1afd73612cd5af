// TOML config adapter - Configuration loaded from TOML files and the environment

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::exec_ffmpeg::EncoderSettings;
use crate::domain::errors::*;
use crate::error::{ClipChunkError, ClipChunkResult};

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "clipchunk.toml";

/// Environment variables and the keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("CLIPCHUNK_OUTPUT_DIR", "output_dir"),
    ("CLIPCHUNK_CHUNK_PREFIX", "chunk_prefix"),
    ("CLIPCHUNK_JOBS", "jobs"),
    ("CLIPCHUNK_LOG_LEVEL", "log_level"),
    ("CLIPCHUNK_FFMPEG_PATH", "encoder.ffmpeg_path"),
    ("CLIPCHUNK_PRESET", "encoder.preset"),
    ("CLIPCHUNK_CRF", "encoder.crf"),
    ("CLIPCHUNK_AUDIO_BITRATE", "encoder.audio_bitrate"),
];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where exported chunks are written
    pub output_dir: PathBuf,
    /// File name prefix of transcoded chunks
    pub chunk_prefix: String,
    /// Exports running at the same time
    pub jobs: usize,
    /// Default tracing filter
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    pub encoder: EncoderSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            chunk_prefix: "WhatsApp_Chunk".to_string(),
            jobs: num_cpus::get().max(1),
            log_level: "info".to_string(),
            log_json: false,
            encoder: EncoderSettings::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str, origin: &str) -> ClipChunkResult<Self> {
        toml::from_str(content).map_err(|e| ClipChunkError::ConfigParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a configuration file
    pub fn load_file(path: &Path) -> ClipChunkResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content, &path.to_string_lossy())?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Explicit file if given, else `clipchunk.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> ClipChunkResult<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            Self::load_file(fallback)
        } else {
            info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply overrides from any variable lookup; returns how many applied
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<usize, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = 0;
        for (variable, key) in ENV_MAPPINGS {
            if let Some(value) = lookup(variable) {
                info!("Found environment override: {} = {}", variable, value);
                self.set(key, &value)?;
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Set one key from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        match key {
            "output_dir" => self.output_dir = PathBuf::from(value),
            "chunk_prefix" => self.chunk_prefix = value.to_string(),
            "jobs" => {
                self.jobs = value
                    .parse()
                    .map_err(|e| DomainError::Config(format!("Invalid jobs value '{}': {}", value, e)))?
            }
            "log_level" => self.log_level = value.to_string(),
            "encoder.ffmpeg_path" => self.encoder.ffmpeg_path = PathBuf::from(value),
            "encoder.preset" => self.encoder.preset = value.to_string(),
            "encoder.crf" => {
                self.encoder.crf = value
                    .parse()
                    .map_err(|e| DomainError::Config(format!("Invalid CRF value '{}': {}", value, e)))?
            }
            "encoder.audio_bitrate" => self.encoder.audio_bitrate = value.to_string(),
            other => return Err(DomainError::Config(format!("Unknown configuration key: {}", other))),
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.encoder.crf > 51 {
            return Err(DomainError::Config("CRF value cannot exceed 51".to_string()));
        }
        if self.jobs == 0 {
            return Err(DomainError::Config("jobs must be at least 1".to_string()));
        }
        if self.chunk_prefix.is_empty() || self.chunk_prefix.contains(['/', '\\']) {
            return Err(DomainError::Config(format!(
                "chunk_prefix must be a plain, non-empty file name part (got '{}')",
                self.chunk_prefix
            )));
        }
        if self.encoder.preset.trim().is_empty() {
            return Err(DomainError::Config("encoder preset cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_prefix, "WhatsApp_Chunk");
        assert_eq!(config.encoder.crf, 23);
        assert!(config.jobs >= 1);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            chunk_prefix = "Status"
            [encoder]
            crf = 28
            "#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.chunk_prefix, "Status");
        assert_eq!(config.encoder.crf, 28);
        assert_eq!(config.encoder.preset, "veryfast");
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = AppConfig::from_toml_str("jobs = \"many\"", "inline");
        assert!(matches!(result, Err(ClipChunkError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("clipchunk.toml");
        std::fs::write(&path, "output_dir = \"exports\"\njobs = 2\n").unwrap();

        let config = AppConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.jobs, 2);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(AppConfig::discover(Some(&temp_dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CLIPCHUNK_CRF", "30"),
            ("CLIPCHUNK_FFMPEG_PATH", "/opt/ffmpeg/bin/ffmpeg"),
            ("CLIPCHUNK_JOBS", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let applied = config
            .apply_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(applied, 3);
        assert_eq!(config.encoder.crf, 30);
        assert_eq!(config.jobs, 3);
        assert_eq!(config.encoder.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    }

    #[test]
    fn test_bad_override_is_config_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|name| {
            (name == "CLIPCHUNK_CRF").then(|| "high".to_string())
        });
        assert!(matches!(result, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.encoder.crf = 52;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.jobs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.chunk_prefix = "../escape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_key() {
        let mut config = AppConfig::default();
        assert!(config.set("colour", "blue").is_err());
    }
}
