use crate::error::{FakeError, Result};
use bytes::Bytes;
use hyperax::{HeaderMap, HeaderValue, StatusCode, Version};
use serde::Serialize;
use std::sync::Arc;

/// Body configured for the fake response.
#[derive(Clone, Debug)]
pub enum Content {
    Json(Bytes),
    Text(String),
    Bytes(Bytes),
    /// Serialization failed while configuring; reported when a response is
    /// produced.
    Invalid(Arc<serde_json::Error>),
}

impl Content {
    pub fn json<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_vec(value) {
            Ok(bytes) => Content::Json(Bytes::from(bytes)),
            Err(err) => Content::Invalid(Arc::new(err)),
        }
    }

    pub fn content_type(&self) -> Option<HeaderValue> {
        match self {
            Content::Json(_) => Some(HeaderValue::from_static("application/json; charset=utf-8")),
            Content::Text(_) => Some(HeaderValue::from_static("text/plain; charset=utf-8")),
            Content::Bytes(_) | Content::Invalid(_) => None,
        }
    }

    /// The response payload.
    pub fn render(&self) -> Result<Bytes> {
        match self {
            Content::Json(bytes) | Content::Bytes(bytes) => Ok(bytes.clone()),
            Content::Text(text) => Ok(Bytes::from(text.clone())),
            Content::Invalid(err) => Err(FakeError::Content(err.clone())),
        }
    }
}

/// Everything needed to synthesize a response.
#[derive(Clone, Debug)]
pub struct ResponseSpec {
    pub(crate) status: StatusCode,
    pub(crate) version: Version,
    pub(crate) headers: HeaderMap,
    pub(crate) trailers: HeaderMap,
    pub(crate) content: Option<Content>,
    /// Derive `content-type` from the content kind when none is configured.
    pub(crate) implied_content_type: bool,
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            version: Version::HTTP_10,
            headers: HeaderMap::new(),
            trailers: HeaderMap::new(),
            content: None,
            implied_content_type: false,
        }
    }
}

impl ResponseSpec {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn trailers(&self) -> &HeaderMap {
        &self.trailers
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn implied_content_type(&self) -> bool {
        self.implied_content_type
    }
}

/// What the simulated environment's response model supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub trailers: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { trailers: true }
    }
}

impl Capabilities {
    /// An environment without trailing header support.
    pub fn legacy() -> Self {
        Self { trailers: false }
    }
}
