//! Error types for the hobson-deck renderer.

use std::io;
use thiserror::Error;

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or saving a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when saving the finished document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the underlying PDF object model.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// An embedded image payload could not be decoded.
    ///
    /// Raised only by strict decode paths; the assembler itself logs and
    /// skips malformed images instead of failing the export.
    #[error("Image decoding error: {0}")]
    Image(String),

    /// Error during document assembly.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A plan file did not contain the requested section.
    #[error("Unknown section id: {0}")]
    UnknownSection(String),

    /// A plan file could not be parsed.
    #[error("Plan parsing error: {0}")]
    PlanParse(#[from] serde_json::Error),
}
