use crate::network::SocketError;
use std::{error::Error as StdError, io};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Failed to parse backend configuration")]
    Config(#[source] serde_yaml::Error),

    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Socket operation failed")]
    Socket(#[from] SocketError),

    #[error("Failed to encode leases")]
    Encode(#[source] serde_yaml::Error),
}

/// Formats an error followed by each of its sources, separated by `: `.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
