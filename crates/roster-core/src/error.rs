//! Error types shared across the workspace

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input collection a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSide {
    Profile,
    Conversation,
}

impl fmt::Display for RecordSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSide::Profile => write!(f, "profile"),
            RecordSide::Conversation => write!(f, "conversation"),
        }
    }
}

/// An input record without a usable phone number. The record is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{side} record at position {position} has no phone number")]
pub struct MalformedInputError {
    pub side: RecordSide,
    pub position: usize,
}

/// Startup configuration problems. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no {0} source configured")]
    MissingSource(&'static str),
}
