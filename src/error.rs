//! Error types for glint
//!
//! The highlighting core (scanner, classifier, renderer) is total and never
//! produces errors. Errors only arise at the edges: loading configuration,
//! reading and writing pages, and talking to the host page.

use thiserror::Error;

/// Errors raised at the edges of the highlighting pipeline
#[derive(Error, Debug)]
pub enum GlintError {
    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Token stream could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page could not be parsed or serialized
    #[error("HTML error: {0}")]
    Html(String),

    /// A single highlightable node could not be read or updated
    #[error("Node error: {0}")]
    Node(String),

    /// The readiness signal was dropped before it fired
    #[error("Readiness signal dropped before firing")]
    ReadinessDropped,
}

/// Result type alias for glint operations
pub type Result<T> = std::result::Result<T, GlintError>;
