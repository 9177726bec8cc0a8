// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub randomness: RandomnessConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Thresholds for the move filter pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Food-seeking runs while health is strictly below this
    pub food_health_threshold: i32,
    /// Flood fill stops after `multiplier * body length` cells
    pub cavern_cap_multiplier: usize,
    /// Space-folding runs while the best cavern is at most `ratio * body length`
    pub fold_activation_ratio: f64,
    pub avoid_enemy_heads: bool,
}

impl PipelineConfig {
    /// Whether the best cavern found is small enough to trigger space-folding
    pub fn is_cramped(&self, cavern_max: usize, body_len: usize) -> bool {
        (cavern_max as f64) <= self.fold_activation_ratio * body_len as f64
    }
}

/// Source of randomness for the final tie-break
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RandomnessConfig {
    /// Fixed seed for reproducible tie-breaks; OS entropy when absent
    pub seed: Option<u64>,
}

/// Metadata returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
    pub shout: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            pipeline: PipelineConfig {
                food_health_threshold: 75,
                cavern_cap_multiplier: 2,
                fold_activation_ratio: 1.5,
                avoid_enemy_heads: true,
            },
            randomness: RandomnessConfig { seed: None },
            appearance: AppearanceConfig {
                author: "cavern-snake".to_string(),
                color: "#00FF00".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                shout: "Measuring the cavern...".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Rejects values that would make the pipeline meaningless
    fn validate(&self) -> Result<(), String> {
        if self.pipeline.cavern_cap_multiplier == 0 {
            return Err("pipeline.cavern_cap_multiplier must be at least 1".to_string());
        }
        if !(self.pipeline.fold_activation_ratio >= 0.0) {
            return Err("pipeline.fold_activation_ratio must be non-negative".to_string());
        }
        Ok(())
    }
}
