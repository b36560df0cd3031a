use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use chrono::FixedOffset;
use tscodec::{InvalidArgument, WordOrder, date_utils};

/// Largest accepted display offset, one day either side of UTC
const MAX_OFFSET_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub decoding: DecodingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory where log files will be stored
    pub directory: String,
    /// Log file name prefix (date will be appended)
    pub file_prefix: String,
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: "./logs".to_string(),
            file_prefix: "timestamp_inspector".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodingConfig {
    /// Word order of word pairs and 4-byte arrays given on the command line
    pub word_order: WordOrder,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        Self {
            word_order: WordOrder::Reversed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime pattern for the human-readable line of a report
    pub pattern: String,
    /// Fixed offset from UTC applied to the human-readable line
    pub utc_offset_minutes: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            pattern: "%Y-%m-%d %H:%M:%S".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl DisplayConfig {
    pub fn offset(&self) -> Option<FixedOffset> {
        if self.utc_offset_minutes.unsigned_abs() >= MAX_OFFSET_MINUTES {
            return None;
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
    }

    /// Reject patterns chrono cannot render and offsets of a day or more
    pub fn validate(&self) -> Result<(), InvalidArgument> {
        date_utils::format_millis(0, &self.pattern)?;
        if self.offset().is_none() {
            return Err(InvalidArgument::OutOfRange(self.utc_offset_minutes as i64));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.display.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.decoding.word_order, WordOrder::Reversed);
        assert_eq!(config.display.pattern, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.display.utc_offset_minutes, 0);
        assert!(config.display.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{
            "decoding": { "word_order": "direct" },
            "display": { "pattern": "%d.%m.%Y %H:%M", "utc_offset_minutes": 180 },
            "logging": { "directory": "/var/log/ts", "file_prefix": "ts", "level": "debug" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.decoding.word_order, WordOrder::Direct);
        assert_eq!(config.display.pattern, "%d.%m.%Y %H:%M");
        assert_eq!(config.display.offset(), FixedOffset::east_opt(3 * 3600));
        assert_eq!(config.logging.directory, "/var/log/ts");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = serde_json::from_str(r#"{ "display": { "pattern": "%s" } }"#).unwrap();
        assert_eq!(config.decoding.word_order, WordOrder::Reversed);
        assert_eq!(config.display.utc_offset_minutes, 0);
        assert_eq!(config.logging.file_prefix, "timestamp_inspector");
    }

    #[test]
    fn test_partial_display_section_keeps_other_settings() {
        let json = r#"{
            "decoding": { "word_order": "direct" },
            "display": { "utc_offset_minutes": 60 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.decoding.word_order, WordOrder::Direct);
        assert_eq!(config.display.pattern, "%Y-%m-%d %H:%M:%S");
        assert_eq!(config.display.offset(), FixedOffset::east_opt(3600));
        assert!(config.display.validate().is_ok());
    }

    #[test]
    fn test_unknown_word_order_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{ "decoding": { "word_order": "swapped" } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display_validation() {
        let bad_pattern = DisplayConfig {
            pattern: "%Y-%Q".to_string(),
            utc_offset_minutes: 0,
        };
        assert!(matches!(bad_pattern.validate(), Err(InvalidArgument::Pattern(_))));

        let unrenderable = DisplayConfig {
            pattern: "%#z".to_string(),
            utc_offset_minutes: 0,
        };
        assert_eq!(unrenderable.validate(), Err(InvalidArgument::Pattern("%#z".to_string())));

        let bad_offset = DisplayConfig {
            pattern: "%Y".to_string(),
            utc_offset_minutes: 24 * 60,
        };
        assert_eq!(bad_offset.validate(), Err(InvalidArgument::OutOfRange(1440)));

        let west = DisplayConfig {
            pattern: "%Y".to_string(),
            utc_offset_minutes: -(23 * 60 + 59),
        };
        assert!(west.validate().is_ok());
    }

    #[test]
    fn test_from_file_missing() {
        assert!(Config::from_file("/nonexistent/config.json").is_err());
    }

    #[test]
    fn test_log_config_serialization() {
        let log_config = LogConfig {
            directory: "/var/log/ts".to_string(),
            file_prefix: "inspector".to_string(),
            level: "debug".to_string(),
        };

        let json = serde_json::to_string(&log_config).unwrap();
        let deserialized: LogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.directory, "/var/log/ts");
        assert_eq!(deserialized.file_prefix, "inspector");
        assert_eq!(deserialized.level, "debug");
    }
}
