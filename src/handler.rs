use crate::error::Result;
use crate::response_spec::{Capabilities, ResponseSpec};
use async_trait::async_trait;
use bytes::Bytes;
use hyperax::{
    Client, HeaderMap, Method, Request, Response, Trailers, Transport, Uri, CONTENT_TYPE,
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, trace};

/// A request seen by a [`FakeHandler`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Fake transport answering every request with the configured response.
///
/// Clones share the list of received requests but not the configuration, so
/// reconfiguring a clone never changes what the original returns.
#[derive(Clone, Debug, Default)]
pub struct FakeHandler {
    pub(crate) spec: ResponseSpec,
    pub(crate) capabilities: Capabilities,
    received: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeHandler {
    pub fn spec(&self) -> &ResponseSpec {
        &self.spec
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Requests intercepted so far, oldest first.
    pub fn received_requests(&self) -> Vec<RecordedRequest> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn received_count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Wraps the handler in a client that never touches the network.
    pub fn into_client(self) -> Client {
        Client::with_transport(self)
    }

    /// Builds a fresh response from the current configuration.
    pub fn materialize(&self) -> Result<Response<Bytes>> {
        let body = match &self.spec.content {
            Some(content) => content.render()?,
            None => Bytes::new(),
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.spec.status;
        *response.version_mut() = self.spec.version;
        *response.headers_mut() = self.spec.headers.clone();

        let implied = self
            .spec
            .content
            .as_ref()
            .filter(|_| self.spec.implied_content_type)
            .and_then(|c| c.content_type());
        if let Some(content_type) = implied {
            response
                .headers_mut()
                .entry(CONTENT_TYPE)
                .or_insert(content_type);
        }

        if !self.spec.trailers.is_empty() {
            if self.capabilities.trailers {
                response
                    .extensions_mut()
                    .insert(Trailers(self.spec.trailers.clone()));
            } else {
                trace!(
                    count = self.spec.trailers.len(),
                    "trailing headers unsupported, dropping"
                );
            }
        }

        Ok(response)
    }

    fn record(&self, request: Request<Bytes>) {
        let (parts, body) = request.into_parts();
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });
    }
}

#[async_trait]
impl Transport for FakeHandler {
    async fn send(
        &self,
        request: Request<Bytes>,
    ) -> std::result::Result<Response<Bytes>, hyperax::Error> {
        debug!(
            method = %request.method(),
            uri = %request.uri(),
            status = %self.spec.status,
            "intercepted request"
        );
        self.record(request);
        Ok(self.materialize()?)
    }
}
