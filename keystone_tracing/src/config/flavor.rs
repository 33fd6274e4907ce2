use serde::Deserialize;

/// A preset of the [event formatter](tracing_subscriber::fmt::format::Format)
/// used for log output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatFlavor {
    /// Single-line [`Full`](tracing_subscriber::fmt::format::Full) formatting.
    #[default]
    Full,

    /// Shorter single-line
    /// [`Compact`](tracing_subscriber::fmt::format::Compact) formatting.
    Compact,

    /// Multi-line [`Pretty`](tracing_subscriber::fmt::format::Pretty)
    /// formatting.
    Pretty,

    /// Newline-delimited [`Json`](tracing_subscriber::fmt::format::Json)
    /// formatting.
    #[cfg(feature = "json")]
    Json,
}
