//! Error types for the report pipeline

use std::io;
use std::path::PathBuf;

use dnscover_common::model::ModelError;
use thiserror::Error;

/// Everything that can stop a report from being produced.
#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not exist
    #[error("input file {} not found", .path.display())]
    InputNotFound { path: PathBuf },

    /// The input exists but could not be read
    #[error("could not read input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input could not be decoded into an inventory
    #[error("could not parse input file {}: {source}", .path.display())]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The finished document could not be persisted
    #[error("could not write {}: {source}", .path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A percentage outside 0..=100 reached the chart projector
    #[error("percentage {0} is outside the range 0..=100")]
    InvalidPercentage(f64),

    /// Chart or logo bitmap could not be encoded/decoded
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// The layout engine rejected the document
    #[error("document rendering failed: {0}")]
    Render(String),
}

impl Error {
    /// Check if the error originates from the input side
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InputNotFound { .. } | Error::InputUnreadable { .. } | Error::InputMalformed { .. }
        )
    }
}

/// Reasons the input text is not a valid inventory.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error(transparent)]
    Invalid(#[from] ModelError),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
