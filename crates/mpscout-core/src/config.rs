use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that does not parse.
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
/// Returns `ConfigError` if a variable is set to a value that does not parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// config pointed at a local chromedriver.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("MPSCOUT_LOG_LEVEL", "info");
    let webdriver_url = or_default("MPSCOUT_WEBDRIVER_URL", "http://localhost:9515");
    let marketplace_origin = or_default("MPSCOUT_MARKETPLACE_ORIGIN", "https://www.facebook.com");
    let listing_base_url = or_default("MPSCOUT_LISTING_BASE_URL", "https://web.facebook.com");
    let browser_binary = lookup("MPSCOUT_BROWSER_BINARY")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    let headless = parse_bool("MPSCOUT_HEADLESS", &or_default("MPSCOUT_HEADLESS", "true"))?;
    let window_size = parse_window_size(&or_default("MPSCOUT_WINDOW_SIZE", "1920,1080"))?;

    let scroll_delay_ms = parse_u64("MPSCOUT_SCROLL_DELAY_MS", "2000")?;
    let max_scrolls = parse_u32("MPSCOUT_MAX_SCROLLS", "100")?;
    if max_scrolls == 0 {
        return Err(invalid("MPSCOUT_MAX_SCROLLS", "must be at least 1".into()));
    }
    let acquire_timeout_secs = parse_u64("MPSCOUT_ACQUIRE_TIMEOUT_SECS", "600")?;

    let fuzzy_threshold = or_default("MPSCOUT_FUZZY_THRESHOLD", "70")
        .parse::<u8>()
        .map_err(|e| invalid("MPSCOUT_FUZZY_THRESHOLD", e.to_string()))?;
    if fuzzy_threshold > 100 {
        return Err(invalid(
            "MPSCOUT_FUZZY_THRESHOLD",
            format!("{fuzzy_threshold} is outside 0..=100"),
        ));
    }

    let export_dir = PathBuf::from(or_default("MPSCOUT_EXPORT_DIR", "."));

    Ok(AppConfig {
        log_level,
        webdriver_url,
        marketplace_origin,
        listing_base_url,
        browser_binary,
        headless,
        window_size,
        scroll_delay_ms,
        max_scrolls,
        acquire_timeout_secs,
        fuzzy_threshold,
        export_dir,
    })
}

/// Parse a boolean flag. Accepts `true/false`, `1/0`, `yes/no` (any case).
fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

/// Parse `"W,H"` (or `"WxH"`, the form Chrome's `--window-size` examples use).
fn parse_window_size(raw: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "MPSCOUT_WINDOW_SIZE".to_string(),
        reason,
    };

    let (w, h) = raw
        .split_once(',')
        .or_else(|| raw.split_once('x'))
        .ok_or_else(|| invalid(format!("expected \"W,H\", got \"{raw}\"")))?;
    let w = w.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    let h = h.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
