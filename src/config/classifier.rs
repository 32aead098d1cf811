use secrecy::{ExposeSecret, SecretString};

use crate::config::helpers::{optional_env, parse_optional_env};
use crate::error::ConfigError;

/// Default hosted sentiment model (binary SST-2 fine-tune of DistilBERT).
pub const DEFAULT_SENTIMENT_MODEL: &str =
    "distilbert/distilbert-base-uncased-finetuned-sst-2-english";

/// Default base URL for the hosted inference API.
pub const DEFAULT_HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Which sentiment classifier backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierBackend {
    /// Hosted text-classification model over HTTP (default).
    #[default]
    HuggingFace,
    /// Built-in word lexicon, no network access.
    Lexicon,
}

impl std::str::FromStr for ClassifierBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hugging_face" | "hf" => Ok(Self::HuggingFace),
            "lexicon" | "local" | "offline" => Ok(Self::Lexicon),
            _ => Err(format!(
                "invalid classifier backend '{}', expected 'huggingface' or 'lexicon'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ClassifierBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HuggingFace => write!(f, "huggingface"),
            Self::Lexicon => write!(f, "lexicon"),
        }
    }
}

/// Sentiment classifier configuration.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub backend: ClassifierBackend,
    /// Model identifier on the inference host.
    pub model: String,
    pub base_url: String,
    pub api_token: Option<SecretString>,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            model: DEFAULT_SENTIMENT_MODEL.to_string(),
            base_url: DEFAULT_HF_BASE_URL.to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

impl ClassifierConfig {
    pub(crate) fn resolve() -> Result<Self, ConfigError> {
        let backend: ClassifierBackend = if let Some(b) = optional_env("CLASSIFIER_BACKEND")? {
            b.parse().map_err(|e| ConfigError::InvalidValue {
                key: "CLASSIFIER_BACKEND".to_string(),
                message: e,
            })?
        } else {
            ClassifierBackend::default()
        };

        let base_url =
            optional_env("CLASSIFIER_BASE_URL")?.unwrap_or_else(|| DEFAULT_HF_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "CLASSIFIER_BASE_URL".to_string(),
                message: "must start with http:// or https://".to_string(),
            });
        }

        let timeout_secs = parse_optional_env("CLASSIFIER_TIMEOUT_SECS", 30u64)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CLASSIFIER_TIMEOUT_SECS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            backend,
            model: optional_env("CLASSIFIER_MODEL")?
                .unwrap_or_else(|| DEFAULT_SENTIMENT_MODEL.to_string()),
            base_url,
            api_token: optional_env("HF_API_TOKEN")?.map(SecretString::from),
            timeout_secs,
        })
    }

    /// Get the inference API token (exposes the secret).
    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_ref().map(|k| k.expose_secret())
    }
}
