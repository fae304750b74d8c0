use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("malformed varint: no terminating byte after {bytes_read} bytes")]
    MalformedVarint { bytes_read: usize },
    #[error("truncated frame: need {needed} bytes but only {available} remain")]
    TruncatedFrame { needed: usize, available: usize },
    #[error("unrecognized api key: {0}")]
    UnrecognizedApiKey(i16),
    #[error("metadata log error: {0}")]
    MetadataLog(String),
}

impl ApplicationError {
    /// Errors that leave the byte stream in an unknown position.
    /// The connection is closed without a reply for every error, these are
    /// the ones that indicate a misbehaving peer rather than a local fault.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(
            self,
            ApplicationError::MalformedVarint { .. }
                | ApplicationError::TruncatedFrame { .. }
                | ApplicationError::UnrecognizedApiKey(_)
                | ApplicationError::Protocol(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ApplicationError>;
