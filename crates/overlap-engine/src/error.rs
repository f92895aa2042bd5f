//! Error types for conversion and overlap operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported zone: {0}")]
    UnsupportedZone(String),

    #[error("Unresolvable instant: {0}")]
    UnresolvableInstant(String),

    #[error("Assistant reply not parseable: {0}")]
    BridgeParse(String),

    #[error("No assistant capability available")]
    BridgeUnavailable,
}

pub type Result<T> = std::result::Result<T, ConvertError>;
