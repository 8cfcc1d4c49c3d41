//! Error types for the fake handler.

use std::sync::Arc;
use thiserror::Error;

/// A specialized Result type for fake handler operations.
pub type Result<T> = std::result::Result<T, FakeError>;

#[derive(Error, Debug, Clone)]
pub enum FakeError {
    /// The configured content could not be turned into a response body.
    #[error("failed to generate response content: {0}")]
    Content(#[source] Arc<serde_json::Error>),
}

impl FakeError {
    /// Looks for a [`FakeError`] behind an error returned by a
    /// [`hyperax::Client`] call.
    pub fn find(err: &hyperax::Error) -> Option<&FakeError> {
        match err {
            hyperax::Error::Transport(source) => source.downcast_ref::<FakeError>(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FakeError {
    fn from(err: serde_json::Error) -> Self {
        FakeError::Content(Arc::new(err))
    }
}

impl From<FakeError> for hyperax::Error {
    fn from(err: FakeError) -> Self {
        hyperax::Error::transport(err)
    }
}
