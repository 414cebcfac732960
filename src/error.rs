use std::io;

/// Error type for loading dictionaries and paging through them.
///
/// Matching itself never fails: a query with no dictionary word under the
/// cursor yields `None`, not an error.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LookupError {
    #[error("IO Error: {0}")]
    Io(String),
    #[error("Invalid Format: {0}")]
    InvalidFormat(String),
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
    #[error("Not Loaded: {0}")]
    NotLoaded(String),
}

impl From<io::Error> for LookupError {
    fn from(e: io::Error) -> Self {
        LookupError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            LookupError::Io(e.to_string())
        } else {
            LookupError::InvalidFormat(e.to_string())
        }
    }
}

impl From<fst::Error> for LookupError {
    fn from(e: fst::Error) -> Self {
        LookupError::InvalidFormat(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
