//! Configuration management with validation and defaults
//!
//! Settings come from built-in defaults, an optional TOML file and
//! `RTPSIM_*` environment overrides, in that order.

use crate::errors::{ConfigurationError, SimResult};
use crate::games::odds::{OddsModel, OddsModelKind, DEFAULT_RTP};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level simulator configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub game: GameConfig,
    pub random: RandomConfig,
    pub report: ReportConfig,
    pub monitoring: MonitoringConfig,
}

/// Table rules and the opening player state
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_id: String,
    pub starting_balance: f64,
    pub min_bet: f64,
    /// RTP constant used by the linear odds model
    pub rtp: f64,
    pub odds_model: OddsModelKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_id: "player1".to_string(),
            starting_balance: 100.0,
            min_bet: 5.0,
            rtp: DEFAULT_RTP,
            odds_model: OddsModelKind::Tiered,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RandomSourceKind {
    /// Operating-system CSPRNG
    Secure,
    /// Reproducible `StdRng` stream, requires `seed`
    Seeded,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub source: RandomSourceKind,
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            source: RandomSourceKind::Secure,
            seed: None,
        }
    }
}

/// End-of-session RTP report
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub enabled: bool,
    pub iterations: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            iterations: 1_000_000,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: LogLevel,
    /// Emit each settled round as a JSON line at info level
    pub log_rounds_as_json: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_rounds_as_json: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl SimConfig {
    /// Reproducible runs for demos and tests
    pub fn deterministic(seed: u64) -> Self {
        Self {
            random: RandomConfig {
                source: RandomSourceKind::Seeded,
                seed: Some(seed),
            },
            report: ReportConfig {
                enabled: true,
                iterations: 10_000,
            },
            ..Default::default()
        }
    }

    /// Active odds model; `game.rtp` is the only RTP the linear model sees
    pub fn odds_model(&self) -> OddsModel {
        self.game.odds_model.with_rtp(self.game.rtp)
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.game.min_bet > 0.0) || !self.game.min_bet.is_finite() {
            return Err(ConfigValidationError::InvalidValue(
                "game.min_bet must be > 0".to_string()
            ));
        }

        if !(self.game.starting_balance >= 0.0) || !self.game.starting_balance.is_finite() {
            return Err(ConfigValidationError::InvalidValue(
                "game.starting_balance must be >= 0".to_string()
            ));
        }

        if !(self.game.rtp > 0.0) || !self.game.rtp.is_finite() {
            return Err(ConfigValidationError::InvalidValue(
                "game.rtp must be > 0".to_string()
            ));
        }

        if self.game.player_id.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "game.player_id".to_string()
            ));
        }

        if self.report.enabled && self.report.iterations == 0 {
            return Err(ConfigValidationError::LogicalInconsistency(
                "report.iterations must be > 0 when the report is enabled".to_string()
            ));
        }

        if self.random.source == RandomSourceKind::Seeded && self.random.seed.is_none() {
            return Err(ConfigValidationError::MissingRequired(
                "random.seed (required by the seeded source)".to_string()
            ));
        }

        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    InvalidValue(String),
    LogicalInconsistency(String),
    MissingRequired(String),
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValidationError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
            ConfigValidationError::LogicalInconsistency(msg) => write!(f, "Configuration logical inconsistency: {}", msg),
            ConfigValidationError::MissingRequired(msg) => write!(f, "Missing required configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

impl From<ConfigValidationError> for ConfigurationError {
    fn from(e: ConfigValidationError) -> Self {
        ConfigurationError::ValidationFailed(e.to_string())
    }
}

/// Configuration loader with environment variable support
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<String>,
    use_env: bool,
}

fn parse_env<T: std::str::FromStr>(field: &str, value: String, reason: &str) -> Result<T, ConfigurationError> {
    value.trim().parse().map_err(|_| ConfigurationError::InvalidValue {
        field: field.to_string(),
        value,
        reason: reason.to_string(),
    })
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            use_env: true,
        }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Skip `RTPSIM_*` overrides
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> SimResult<SimConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            SimConfig::default()
        };

        if self.use_env {
            self.apply_env_overrides(&mut config)?;
        }

        config.validate().map_err(ConfigurationError::from)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> SimResult<SimConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    fn apply_env_overrides(&self, config: &mut SimConfig) -> SimResult<()> {
        if let Ok(id) = env::var("RTPSIM_PLAYER_ID") {
            config.game.player_id = id;
        }
        if let Ok(value) = env::var("RTPSIM_STARTING_BALANCE") {
            config.game.starting_balance = parse_env("RTPSIM_STARTING_BALANCE", value, "Invalid amount")?;
        }
        if let Ok(value) = env::var("RTPSIM_MIN_BET") {
            config.game.min_bet = parse_env("RTPSIM_MIN_BET", value, "Invalid amount")?;
        }
        if let Ok(value) = env::var("RTPSIM_RTP") {
            config.game.rtp = parse_env("RTPSIM_RTP", value, "Invalid RTP constant")?;
        }
        if let Ok(value) = env::var("RTPSIM_SEED") {
            config.random.seed = Some(parse_env("RTPSIM_SEED", value, "Invalid seed")?);
            config.random.source = RandomSourceKind::Seeded;
        }
        if let Ok(value) = env::var("RTPSIM_LOG_LEVEL") {
            config.monitoring.log_level = LogLevel::parse(&value).ok_or_else(|| ConfigurationError::InvalidValue {
                field: "RTPSIM_LOG_LEVEL".to_string(),
                value: value.clone(),
                reason: "Expected error, warn, info, debug or trace".to_string(),
            })?;
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, config: &SimConfig, path: &str) -> SimResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> SimResult<()> {
    ConfigLoader::new().save(&SimConfig::default(), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimError;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.min_bet, 5.0);
        assert_eq!(config.game.starting_balance, 100.0);
        assert_eq!(config.game.rtp, 0.95);
        assert_eq!(config.game.odds_model, OddsModelKind::Tiered);
        assert_eq!(config.odds_model(), OddsModel::Tiered);
        assert_eq!(config.random.source, RandomSourceKind::Secure);
    }

    #[test]
    fn test_deterministic_config_is_valid() {
        let config = SimConfig::deterministic(9);
        assert!(config.validate().is_ok());
        assert_eq!(config.random.seed, Some(9));
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = SimConfig::default();
        config.game.min_bet = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.game.rtp = -0.5;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.report.iterations = 0;
        assert!(config.validate().is_err());
        config.report.enabled = false;
        assert!(config.validate().is_ok());

        let mut config = SimConfig::default();
        config.random.source = RandomSourceKind::Seeded;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_odds_model_uses_configured_rtp() {
        let mut config = SimConfig::default();
        config.game.odds_model = OddsModelKind::Linear;
        config.game.rtp = 0.9;
        assert_eq!(config.odds_model(), OddsModel::Linear { rtp: 0.9 });
    }

    #[test]
    fn test_save_and_load_config() -> SimResult<()> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        let mut original = SimConfig::deterministic(77);
        original.game.min_bet = 2.5;
        original.game.rtp = 0.6;
        original.game.odds_model = OddsModelKind::Linear;

        let loader = ConfigLoader::new();
        loader.save(&original, path)?;

        let loaded = ConfigLoader::new().without_env().with_path(path).load()?;

        assert_eq!(loaded.game.min_bet, 2.5);
        assert_eq!(loaded.random.seed, Some(77));
        assert_eq!(loaded.game.odds_model, OddsModelKind::Linear);
        assert_eq!(loaded.odds_model(), OddsModel::Linear { rtp: 0.6 });

        Ok(())
    }

    #[test]
    fn test_linear_rtp_from_file_is_used() {
        let toml = "[game]\nrtp = 0.5\nodds_model = \"linear\"\n";
        let config: SimConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.odds_model(), OddsModel::Linear { rtp: 0.5 });

        // a model table carrying its own rtp is not a valid odds model any more
        let nested = "[game]\nodds_model = { kind = \"linear\", rtp = 0.5 }\n";
        assert!(toml::from_str::<SimConfig>(nested).is_err());
    }

    #[test]
    fn test_generate_sample_config_loads_back() -> SimResult<()> {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        generate_sample_config(path)?;
        let loaded = ConfigLoader::new().without_env().with_path(path).load()?;

        assert_eq!(loaded.game.player_id, "player1");
        assert_eq!(loaded.odds_model(), OddsModel::Tiered);
        assert_eq!(loaded.random.source, RandomSourceKind::Secure);

        Ok(())
    }

    // Every RTPSIM_* variable is touched only here so parallel tests never see them.
    #[test]
    fn test_env_overrides() {
        const VARS: [&str; 6] = [
            "RTPSIM_PLAYER_ID",
            "RTPSIM_STARTING_BALANCE",
            "RTPSIM_MIN_BET",
            "RTPSIM_RTP",
            "RTPSIM_SEED",
            "RTPSIM_LOG_LEVEL",
        ];

        env::set_var("RTPSIM_PLAYER_ID", "alice");
        env::set_var("RTPSIM_STARTING_BALANCE", "250.5");
        env::set_var("RTPSIM_MIN_BET", " 2 ");
        env::set_var("RTPSIM_RTP", "0.8");
        env::set_var("RTPSIM_SEED", "1234");
        env::set_var("RTPSIM_LOG_LEVEL", "Debug");

        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.game.player_id, "alice");
        assert_eq!(config.game.starting_balance, 250.5);
        assert_eq!(config.game.min_bet, 2.0);
        assert_eq!(config.game.rtp, 0.8);
        assert_eq!(config.random.source, RandomSourceKind::Seeded);
        assert_eq!(config.random.seed, Some(1234));
        assert_eq!(config.monitoring.log_level, LogLevel::Debug);

        // without_env ignores all of them
        let plain = ConfigLoader::new().without_env().load().unwrap();
        assert_eq!(plain.game.player_id, "player1");
        assert_eq!(plain.random.source, RandomSourceKind::Secure);

        env::set_var("RTPSIM_LOG_LEVEL", "loud");
        match ConfigLoader::new().load() {
            Err(SimError::Configuration(ConfigurationError::InvalidValue { field, value, .. })) => {
                assert_eq!(field, "RTPSIM_LOG_LEVEL");
                assert_eq!(value, "loud");
            }
            other => panic!("expected invalid log level, got {:?}", other),
        }
        env::remove_var("RTPSIM_LOG_LEVEL");

        env::set_var("RTPSIM_SEED", "not-a-seed");
        match ConfigLoader::new().load() {
            Err(SimError::Configuration(ConfigurationError::InvalidValue { field, .. })) => {
                assert_eq!(field, "RTPSIM_SEED");
            }
            other => panic!("expected invalid seed, got {:?}", other),
        }

        env::set_var("RTPSIM_SEED", "1");
        env::set_var("RTPSIM_MIN_BET", "-1");
        assert!(matches!(
            ConfigLoader::new().load(),
            Err(SimError::Configuration(ConfigurationError::ValidationFailed(_)))
        ));

        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: SimConfig = toml::from_str("[game]\nmin_bet = 1.0\n").unwrap();
        assert_eq!(config.game.min_bet, 1.0);
        assert_eq!(config.game.starting_balance, 100.0);
        assert_eq!(config.report.iterations, 1_000_000);
    }

    #[test]
    fn test_missing_file_fails() {
        let result = ConfigLoader::new()
            .without_env()
            .with_path("/nonexistent/rtpsim.toml")
            .load();
        assert!(result.is_err());
    }
}
