//! Error types for Sentiscope.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("LibSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

/// Sentiment classifier errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Classifier {backend} request failed: {reason}")]
    RequestFailed { backend: String, reason: String },

    #[error("Classifier {backend} rejected the credentials")]
    AuthFailed { backend: String },

    #[error("Classifier {backend} rate limited")]
    RateLimited { backend: String },

    #[error("Classifier {backend} model is still loading")]
    ModelLoading { backend: String },

    #[error("Classifier {backend} returned an invalid response: {reason}")]
    InvalidResponse { backend: String, reason: String },
}

/// HTTP server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Server failed to start: {reason}")]
    StartupFailed { reason: String },
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
