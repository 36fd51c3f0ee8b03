use crate::app_config::{
    AnalysisConfig, AppConfig, SalesBand, TimelineMode, DEFAULT_MAX_INPUT_BYTES,
    DEFAULT_MAX_TIMELINE_MONTHS, DEFAULT_PLATFORM_NAME, DEFAULT_TRAILING_MONTHS,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let log_level = or_default("VINTALYZE_LOG_LEVEL", "info");
    let languages_path = optional("VINTALYZE_LANGUAGES_PATH").map(PathBuf::from);

    let max_input_bytes = parse_usize(
        "VINTALYZE_MAX_INPUT_BYTES",
        &DEFAULT_MAX_INPUT_BYTES.to_string(),
    )?;
    if max_input_bytes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VINTALYZE_MAX_INPUT_BYTES".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let sales_band = parse_sales_band(&or_default("VINTALYZE_SALES_BAND", "conservative"))?;

    let max_timeline_months = parse_u32(
        "VINTALYZE_MAX_TIMELINE_MONTHS",
        &DEFAULT_MAX_TIMELINE_MONTHS.to_string(),
    )?;
    if max_timeline_months == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VINTALYZE_MAX_TIMELINE_MONTHS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let trailing_months = parse_u32(
        "VINTALYZE_TRAILING_MONTHS",
        &DEFAULT_TRAILING_MONTHS.to_string(),
    )?;
    let timeline = parse_timeline(
        &or_default("VINTALYZE_TIMELINE", "adaptive"),
        trailing_months,
        max_timeline_months,
    )?;

    let fallback_language = optional("VINTALYZE_FALLBACK_LANGUAGE").map(|v| v.to_lowercase());
    let platform_name = or_default("VINTALYZE_PLATFORM_NAME", DEFAULT_PLATFORM_NAME);

    Ok(AppConfig {
        log_level,
        languages_path,
        analysis: AnalysisConfig {
            sales_band,
            timeline,
            fallback_language,
            platform_name,
            max_input_bytes,
            max_timeline_months,
        },
    })
}

fn parse_sales_band(s: &str) -> Result<SalesBand, ConfigError> {
    match s {
        "conservative" => Ok(SalesBand::Conservative),
        "symmetric" => Ok(SalesBand::Symmetric),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VINTALYZE_SALES_BAND".to_string(),
            reason: format!("expected conservative or symmetric, got '{other}'"),
        }),
    }
}

fn parse_timeline(
    s: &str,
    trailing_months: u32,
    max_months: u32,
) -> Result<TimelineMode, ConfigError> {
    match s {
        "adaptive" => Ok(TimelineMode::Adaptive),
        "trailing" if trailing_months == 0 => Err(ConfigError::InvalidEnvVar {
            var: "VINTALYZE_TRAILING_MONTHS".to_string(),
            reason: "must be at least 1".to_string(),
        }),
        "trailing" if trailing_months > max_months => Err(ConfigError::InvalidEnvVar {
            var: "VINTALYZE_TRAILING_MONTHS".to_string(),
            reason: format!("must not exceed {max_months}"),
        }),
        "trailing" => Ok(TimelineMode::Trailing {
            months: trailing_months,
        }),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VINTALYZE_TIMELINE".to_string(),
            reason: format!("expected adaptive or trailing, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
