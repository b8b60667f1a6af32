use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::QuizError;
use crate::types::Difficulty;

pub const DEFAULT_PRIMARY_URL: &str = "https://api.api-ninjas.com/v1/country";
pub const DEFAULT_BULK_URL: &str = "https://restcountries.com/v3.1/all?fields=name,capital,population,area,region,languages,currencies,timezones,flags";
pub const DEFAULT_FLAG_CDN: &str = "https://flagcdn.com/w320";
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 10;

/// Settings for the country data sources. The credential comes from the host
/// environment only.
#[derive(Clone)]
pub struct DataSourceConfig {
    pub primary_source_enabled: bool,
    pub api_key: Option<String>,
    pub max_initial_fetch: usize,
    pub rate_limit_delay_ms: u64,
    pub primary_base_url: String,
    pub bulk_url: String,
    pub flag_cdn_base: String,
    pub request_timeout_ms: u64,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            primary_source_enabled: true,
            api_key: None,
            max_initial_fetch: 50,
            rate_limit_delay_ms: 1000,
            primary_base_url: DEFAULT_PRIMARY_URL.to_string(),
            bulk_url: DEFAULT_BULK_URL.to_string(),
            flag_cdn_base: DEFAULT_FLAG_CDN.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl DataSourceConfig {
    /// The by-name source is only used when switched on and credentialed.
    pub fn primary_usable(&self) -> bool {
        self.primary_source_enabled
            && self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

impl fmt::Debug for DataSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceConfig")
            .field("primary_source_enabled", &self.primary_source_enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("max_initial_fetch", &self.max_initial_fetch)
            .field("rate_limit_delay_ms", &self.rate_limit_delay_ms)
            .field("primary_base_url", &self.primary_base_url)
            .field("bulk_url", &self.bulk_url)
            .field("flag_cdn_base", &self.flag_cdn_base)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub data: DataSourceConfig,
    pub total_questions: u32,
    pub difficulty: Difficulty,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data: DataSourceConfig::default(),
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            difficulty: Difficulty::default(),
        }
    }
}

impl QuizConfig {
    /// Reads `.env` when present, then the process environment.
    pub fn from_env() -> Result<Self, QuizError> {
        match dotenvy::dotenv() {
            Ok(path) => log::info!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => log::debug!("No .env file found"),
            Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads a dotenv file without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let mut vars = HashMap::new();
        let iter = dotenvy::from_path_iter(path.as_ref())
            .map_err(|e| QuizError::InvalidConfig(e.to_string()))?;
        for item in iter {
            let (key, value) = item.map_err(|e| QuizError::InvalidConfig(e.to_string()))?;
            vars.insert(key, value);
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, QuizError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = QuizConfig::default();
        let data = &mut config.data;

        data.api_key = lookup("QUIZ_API_KEY").filter(|k| !k.trim().is_empty());
        if let Some(enabled) = lookup("QUIZ_PRIMARY_ENABLED") {
            data.primary_source_enabled = parse_bool("QUIZ_PRIMARY_ENABLED", &enabled)?;
        }
        if let Some(v) = lookup("QUIZ_MAX_INITIAL_FETCH") {
            data.max_initial_fetch = parse_number("QUIZ_MAX_INITIAL_FETCH", &v)?;
        }
        if let Some(v) = lookup("QUIZ_RATE_LIMIT_MS") {
            data.rate_limit_delay_ms = parse_number("QUIZ_RATE_LIMIT_MS", &v)?;
            if data.rate_limit_delay_ms == 0 {
                return Err(QuizError::InvalidConfig(
                    "QUIZ_RATE_LIMIT_MS must be greater than zero".to_string(),
                ));
            }
        }
        if let Some(v) = lookup("QUIZ_TIMEOUT_MS") {
            data.request_timeout_ms = parse_number("QUIZ_TIMEOUT_MS", &v)?;
        }
        if let Some(url) = lookup("QUIZ_PRIMARY_URL") {
            data.primary_base_url = url;
        }
        if let Some(url) = lookup("QUIZ_BULK_URL") {
            data.bulk_url = url;
        }
        if let Some(url) = lookup("QUIZ_FLAG_CDN") {
            data.flag_cdn_base = url.trim_end_matches('/').to_string();
        }

        if let Some(v) = lookup("QUIZ_TOTAL_QUESTIONS") {
            config.total_questions = parse_number("QUIZ_TOTAL_QUESTIONS", &v)?;
        }
        if let Some(level) = lookup("QUIZ_DIFFICULTY") {
            match level.parse::<Difficulty>() {
                Ok(difficulty) => config.difficulty = difficulty,
                Err(e) => log::warn!("{}; keeping {}", e, config.difficulty),
            }
        }

        Ok(config)
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, QuizError> {
    value
        .trim()
        .parse()
        .map_err(|_| QuizError::InvalidConfig(format!("{} must be a number, got '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, QuizError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(QuizError::InvalidConfig(format!("{} must be a boolean, got '{}'", key, value))),
    }
}
