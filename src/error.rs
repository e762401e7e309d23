//! Error types for gmail-lookup

use thiserror::Error;

use crate::decode::DecodeError;

#[derive(Error, Debug)]
pub enum Error {
    /// A message body failed to decode. Fatal for the whole run.
    #[error("Body decode failed for message {id}: {source}")]
    Decode {
        /// Gmail message ID of the offending message.
        id: String,
        source: DecodeError,
    },

    #[error("Gmail label not found: {0}")]
    LabelNotFound(String),

    #[error("Gmail API error: {0}")]
    Fetch(String),

    #[error("Invalid lookup pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
