//! Re-exports of commonly used types from hyper and related crates

pub use hyper::{
    body::Bytes,
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method, Request, Response, StatusCode, Uri, Version,
};
pub use async_trait::async_trait;
