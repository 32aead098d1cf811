use crate::config::helpers::optional_env;
use crate::error::ConfigError;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "sentiscope=info,tower_http=info";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "invalid log format '{}', expected 'pretty' or 'json'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let format = match optional_env("LOG_FORMAT")? {
            Some(s) => s.parse().map_err(|e| ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                message: e,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            filter: optional_env("RUST_LOG")?.unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parse() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
