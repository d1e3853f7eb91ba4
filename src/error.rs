//! Error types for validation, fetching, assembly and the run as a whole.
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected command-line or settings input. Raised before any network activity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid url `{0}`: expected an absolute http or https url")]
    InvalidUrl(String),

    #[error("invalid part count {0}: expected a positive number")]
    InvalidCount(i64),

    #[error("invalid destination `{0}`: expected a plain local filename")]
    InvalidDestination(String),
}

/// Failure of a single part.
#[derive(Debug, Error)]
pub enum PartError {
    /// The request never produced a response (connect, DNS, timeout before headers).
    #[error("part {index}: no response: {source}")]
    NoResponse {
        index: u32,
        #[source]
        source: reqwest::Error,
    },

    /// A response arrived, but reading its body failed.
    #[error("part {index}: transport error after {status} response: {source}")]
    Transport {
        index: u32,
        status: StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("part {index}: server answered {status} instead of 206 Partial Content")]
    UnexpectedStatus { index: u32, status: StatusCode },

    #[error("part {index}: cannot write {}: {source}", .path.display())]
    TempFile {
        index: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PartError {
    pub fn index(&self) -> u32 {
        match self {
            PartError::NoResponse { index, .. }
            | PartError::Transport { index, .. }
            | PartError::UnexpectedStatus { index, .. }
            | PartError::TempFile { index, .. } => *index,
        }
    }
}

/// Failure while stitching part files into the destination.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("part {index} is missing ({}): {source}", .path.display())]
    MissingPart {
        index: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read part {index} ({}): {source}", .path.display())]
    ReadPart {
        index: u32,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("destination {} is the file of part {index}", .path.display())]
    DestinationIsPart { index: u32, path: PathBuf },

    #[error("cannot write destination {}: {source}", .path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot remove temporary file {}: {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Aggregate error of a run.
#[derive(Debug, Error)]
pub enum MultiGetError {
    #[error(transparent)]
    Part(#[from] PartError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("part {index}: task failed: {source}")]
    Task {
        index: u32,
        #[source]
        source: tokio::task::JoinError,
    },
}
