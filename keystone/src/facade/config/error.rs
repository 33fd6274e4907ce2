use config::ConfigError;
use thiserror::Error;

/// A cloneable representation of a configuration error.
///
/// The upstream [`ConfigError`] is not [`Clone`], while a failed configuration
/// lookup may need to be reported more than once (e.g., logged and returned).
/// This enum mirrors the useful parts of [`ConfigError`] with stringified
/// causes, and adds the failures of the static initial configuration itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppConfigError {
    /// The initial configuration has already been seeded.
    #[error("the initial application configuration is already seeded")]
    AlreadySeeded,

    /// The initial configuration was accessed before it was seeded.
    #[error("the initial application configuration is not seeded yet")]
    NotSeeded,

    /// The equivalent of [`ConfigError::NotFound`].
    #[error("configuration property {0} not found")]
    NotFound(String),

    /// The equivalent of [`ConfigError::FileParse`].
    #[error("{cause_message}{}", .uri.as_deref().map(|uri| format!(" in {uri}")).unwrap_or_default())]
    FileParse {
        /// The equivalent of the `uri` field on [`ConfigError::FileParse`].
        uri: Option<String>,

        /// The stringified `cause` of [`ConfigError::FileParse`].
        cause_message: String,
    },

    /// The equivalent of [`ConfigError::Type`].
    #[error(
        "invalid type: {unexpected_content}, expected {expected}{}",
        .key.as_deref().map(|key| format!(" for key `{key}`")).unwrap_or_default(),
    )]
    Type {
        /// The stringified `unexpected` value of [`ConfigError::Type`].
        unexpected_content: String,

        /// The equivalent of the `expected` field on [`ConfigError::Type`].
        expected: &'static str,

        /// The equivalent of the `key` field on [`ConfigError::Type`].
        key: Option<String>,
    },

    /// The equivalent of [`ConfigError::Message`].
    #[error("{0}")]
    Message(String),

    /// Any other variant of [`ConfigError`], stringified.
    #[error("{0}")]
    Other(String),
}

impl From<ConfigError> for AppConfigError {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::NotFound(value) => Self::NotFound(value),
            ConfigError::FileParse { uri, cause } => Self::FileParse {
                uri,
                cause_message: cause.to_string(),
            },
            ConfigError::Type {
                unexpected,
                expected,
                key,
                ..
            } => Self::Type {
                unexpected_content: unexpected.to_string(),
                expected,
                key,
            },
            ConfigError::Message(value) => Self::Message(value),
            other => Self::Other(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_not_found() {
        // Given
        let upstream = ConfigError::NotFound("http.port".to_string());

        // When
        let error = AppConfigError::from(upstream);

        // Then
        assert_eq!(error, AppConfigError::NotFound("http.port".to_string()));
        assert_eq!(error.to_string(), "configuration property http.port not found");
    }

    #[test]
    fn from_message() {
        let error = AppConfigError::from(ConfigError::Message("boom".to_string()));

        assert_eq!(error.clone(), AppConfigError::Message("boom".to_string()));
        assert_eq!(error.to_string(), "boom");
    }

    #[test]
    fn type_mismatch_names_the_key() {
        // Given
        let error = AppConfigError::Type {
            unexpected_content: "string \"abc\"".to_string(),
            expected: "an integer",
            key: Some("http.port".to_string()),
        };

        // When
        let message = error.to_string();

        // Then
        assert_eq!(
            message,
            "invalid type: string \"abc\", expected an integer for key `http.port`",
        );
    }
}
