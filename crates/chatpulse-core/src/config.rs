use crate::app_config::{AppConfig, Environment, LlmSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CHATPULSE_ENV", "development"))?;
    let log_level = or_default("CHATPULSE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("CHATPULSE_DATA_DIR", "./data"));
    let regions_path = PathBuf::from(or_default(
        "CHATPULSE_REGIONS_PATH",
        "./config/regions.yaml",
    ));
    let taxonomy_path = PathBuf::from(or_default(
        "CHATPULSE_TAXONOMY_PATH",
        "./config/taxonomy.yaml",
    ));

    let max_concurrent_regions = parse_usize("CHATPULSE_MAX_CONCURRENT_REGIONS", "2")?;
    let cache_ttl_secs = parse_u64("CHATPULSE_CACHE_TTL_SECS", "3600")?;
    let refresh_schedule = or_default("CHATPULSE_REFRESH_SCHEDULE", "0 0 0 * * *");

    let llm = LlmSettings {
        api_key: lookup("LLM_API_KEY").ok().filter(|k| !k.trim().is_empty()),
        base_url: or_default("CHATPULSE_LLM_BASE_URL", "https://api.deepseek.com/v1"),
        model: or_default("CHATPULSE_LLM_MODEL", "deepseek-reasoner"),
        max_tokens: parse_u32("CHATPULSE_LLM_MAX_TOKENS", "4000")?,
        timeout_secs: parse_u64("CHATPULSE_LLM_TIMEOUT_SECS", "600")?,
        max_retries: parse_u32("CHATPULSE_LLM_MAX_RETRIES", "3")?,
        retry_backoff_base_ms: parse_u64("CHATPULSE_LLM_RETRY_BACKOFF_BASE_MS", "2000")?,
    };

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        regions_path,
        taxonomy_path,
        max_concurrent_regions,
        cache_ttl_secs,
        refresh_schedule,
        llm,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CHATPULSE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
