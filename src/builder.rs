//! Fluent configuration of a [`FakeHandler`].
//!
//! Every method consumes the handler and returns it, so configuration reads
//! as a single chain ending in [`FakeHandler::into_client`].

use crate::handler::FakeHandler;
use crate::response_spec::{Capabilities, Content};
use bytes::Bytes;
use hyperax::{HeaderMap, HeaderName, HeaderValue, StatusCode, Version};
use serde::Serialize;
use tracing::warn;

impl FakeHandler {
    /// A handler answering `200 OK`, HTTP/1.0, no headers and an empty body.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status_code(mut self, status: StatusCode) -> Self {
        self.spec.status = status;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.spec.version = version;
        self
    }

    /// Sets a response header. A header configured earlier under the same
    /// name is replaced, not merged.
    pub fn with_response_header(self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.with_response_header_values(name, [value])
    }

    /// Sets a multi-valued response header, replacing earlier values.
    pub fn with_response_header_values<I, V>(mut self, name: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        set_header(&mut self.spec.headers, name.as_ref(), values);
        self
    }

    /// Sets a trailing header. Only emitted when the handler's
    /// [`Capabilities`] allow trailers.
    pub fn with_trailing_response_header(
        self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Self {
        self.with_trailing_response_header_values(name, [value])
    }

    pub fn with_trailing_response_header_values<I, V>(
        mut self,
        name: impl AsRef<str>,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        set_header(&mut self.spec.trailers, name.as_ref(), values);
        self
    }

    /// Serializes `content` as the JSON response body. Slices and vectors
    /// become JSON arrays.
    ///
    /// A value that fails to serialize is not reported here; every request
    /// answered by the handler fails with [`FakeError::Content`] instead.
    ///
    /// [`FakeError::Content`]: crate::FakeError::Content
    pub fn with_expected_content<T>(mut self, content: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.spec.content = Some(Content::json(content));
        self
    }

    pub fn with_text_content(mut self, text: impl Into<String>) -> Self {
        self.spec.content = Some(Content::Text(text.into()));
        self
    }

    pub fn with_bytes_content(mut self, bytes: impl Into<Bytes>) -> Self {
        self.spec.content = Some(Content::Bytes(bytes.into()));
        self
    }

    /// Adds the content type matching the configured body (JSON or text)
    /// unless a `content-type` header was set explicitly. Off by default, so
    /// a response only carries the headers configured on the handler.
    pub fn with_implied_content_type(mut self) -> Self {
        self.spec.implied_content_type = true;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn without_trailer_support(self) -> Self {
        self.with_capabilities(Capabilities::legacy())
    }
}

fn set_header<I, V>(headers: &mut HeaderMap, name: &str, values: I)
where
    I: IntoIterator<Item = V>,
    V: AsRef<str>,
{
    let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
        warn!(name, "skipping invalid header name");
        return;
    };

    let mut parsed = Vec::new();
    for value in values {
        match HeaderValue::from_str(value.as_ref()) {
            Ok(value) => parsed.push(value),
            Err(_) => {
                warn!(%name, value = value.as_ref(), "skipping invalid header value");
                return;
            }
        }
    }

    headers.remove(&name);
    for value in parsed {
        headers.append(name.clone(), value);
    }
}
