//! Error types
//!
//! `FetchError` is local to a single fetch strategy and never aborts a scrape
//! on its own. `ScrapeError::NoContent` is the one fatal condition.

/// Failure of a single fetch strategy.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Response arrived but the body could not be read.
    #[error("failed to read body: {0}")]
    Read(String),

    /// Strategy succeeded but produced nothing but whitespace.
    #[error("empty response body")]
    EmptyBody,

    /// Strategy cannot run in this environment (e.g. no browser installed).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Browser launched but rendering failed.
    #[error("browser error: {0}")]
    Browser(String),
}

/// Error type for a scrape invocation.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Every fetch strategy failed.
    #[error("unable to fetch page content")]
    NoContent,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error writing a report to disk.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;
