//! Process configuration, read once from the environment at startup.

use partsbin_observability::LogFormat;

/// Load the sample parts and products at startup.
pub const SEED_VAR: &str = "PARTSBIN_SEED";

/// `pretty` or `json`.
pub const LOG_FORMAT_VAR: &str = "PARTSBIN_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed_sample_data: bool,
    pub log_format: LogFormat,
    /// Problems found while reading the environment. Logging is not set up
    /// yet when the config is read, so they are reported afterwards.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            log_format: LogFormat::Pretty,
            warnings: Vec::new(),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; unset keys keep their defaults,
    /// invalid values keep their defaults and record a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_VAR) {
            match parse_flag(&raw) {
                Some(seed) => config.seed_sample_data = seed,
                None => config
                    .warnings
                    .push(format!("{SEED_VAR}={raw:?} is not a boolean; seeding sample data")),
            }
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            match raw.parse::<LogFormat>() {
                Ok(format) => config.log_format = format,
                Err(e) => config
                    .warnings
                    .push(format!("{LOG_FORMAT_VAR}: {e}; using pretty output")),
            }
        }

        config
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }
}
