//! Error types for the companion session, transport and CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a command channel.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The link to the receiver is gone.
    #[error("link closed")]
    Closed,

    /// The channel refused or failed the write.
    #[error("write rejected: {0}")]
    Rejected(String),

    /// Socket error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned synchronously by [`Session::send`](crate::Session::send).
///
/// Asynchronous write failures are logged by the spawned task and surface
/// through its join handle as a [`TransportError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// No channel is attached, or the attached channel is not ready.
    #[error("transport unavailable")]
    TransportUnavailable,

    /// `send` was called outside a tokio runtime.
    #[error("no async runtime to run the write on")]
    NoRuntime,
}

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors surfaced by the `omc` binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect to {address}: {source}")]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Send(#[from] SendError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to install metrics exporter: {0}")]
    Metrics(String),

    #[error("{0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for the CLI.
pub type CliResult<T> = Result<T, CliError>;
