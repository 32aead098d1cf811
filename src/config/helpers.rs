use crate::error::ConfigError;

// ==================== Env access ====================

/// Read a setting from the environment.
///
/// Surrounding whitespace is dropped, and a blank value counts as unset, so a
/// `.env` line like `HF_API_TOKEN=` falls back to the default.
pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    let raw = match std::env::var(key) {
        Ok(raw) => raw,
        Err(std::env::VarError::NotPresent) => return Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => {
            return Err(ConfigError::ParseError(format!(
                "{key} is not valid UTF-8"
            )));
        }
    };

    let value = raw.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

/// Parse a setting with [`FromStr`](std::str::FromStr), or use `default` when unset.
pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = optional_env(key)? else {
        return Ok(default);
    };
    value.parse().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{value}': {e}"),
    })
}

/// Env vars are process-global, so tests that mutate them serialize on this.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
