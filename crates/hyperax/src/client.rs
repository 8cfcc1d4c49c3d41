use crate::error::Error;
use crate::transport::{HttpTransport, Transport};
use hyper::body::Bytes;
use hyper::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    headers: HeaderMap,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a client that hands every request to `transport`.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::builder().transport(transport).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub async fn request<T>(&self, req: Request<T>) -> Result<Response<Bytes>, Error>
    where
        T: Into<Bytes>,
    {
        let (mut parts, body) = req.into_parts();
        if let Some(base) = &self.base_url {
            let uri = format!("{}{}", base, parts.uri);
            parts.uri = uri
                .parse()
                .map_err(|e| Error::Request(hyper::http::Error::from(e)))?;
        }
        for (k, v) in self.headers.iter() {
            if !parts.headers.contains_key(k) {
                parts.headers.insert(k, v.clone());
            }
        }

        debug!("Dispatching {} request to {}", parts.method, parts.uri);
        self.transport
            .send(Request::from_parts(parts, body.into()))
            .await
    }

    pub async fn get(&self, uri: &str) -> Result<Response<Bytes>, Error> {
        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Bytes::new())?;
        self.request(req).await
    }

    pub async fn post<T>(&self, uri: &str, body: T) -> Result<Response<Bytes>, Error>
    where
        T: Into<Bytes>,
    {
        let req = Request::builder().method(Method::POST).uri(uri).body(body)?;
        self.request(req).await
    }

    /// Serializes `body` as JSON and posts it with a matching content type.
    pub async fn post_json<B>(&self, uri: &str, body: &B) -> Result<Response<Bytes>, Error>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Bytes::from(payload))?;
        self.request(req).await
    }

    pub async fn put<T>(&self, uri: &str, body: T) -> Result<Response<Bytes>, Error>
    where
        T: Into<Bytes>,
    {
        let req = Request::builder().method(Method::PUT).uri(uri).body(body)?;
        self.request(req).await
    }

    pub async fn delete(&self, uri: &str) -> Result<Response<Bytes>, Error> {
        let req = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Bytes::new())?;
        self.request(req).await
    }

    pub async fn patch<T>(&self, uri: &str, body: T) -> Result<Response<Bytes>, Error>
    where
        T: Into<Bytes>,
    {
        let req = Request::builder().method(Method::PATCH).uri(uri).body(body)?;
        self.request(req).await
    }

    pub async fn head(&self, uri: &str) -> Result<Response<Bytes>, Error> {
        let req = Request::builder()
            .method(Method::HEAD)
            .uri(uri)
            .body(Bytes::new())?;
        self.request(req).await
    }
}

pub struct ClientBuilder {
    timeout: Option<Duration>,
    base_url: Option<String>,
    headers: HeaderMap,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            base_url: None,
            headers: HeaderMap::new(),
            transport: None,
        }
    }

    /// Timeout for the default [`HttpTransport`]. Ignored once a custom
    /// transport is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_ref().as_bytes()),
            HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Client {
        let timeout = self.timeout;
        Client {
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpTransport::with_timeout(timeout))),
            base_url: self.base_url,
            headers: self.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Remembers the last request and answers 200 with its body.
    #[derive(Default)]
    struct EchoTransport {
        last: Mutex<Option<(Method, String, HeaderMap)>>,
    }

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, Error> {
            let (parts, body) = request.into_parts();
            *self.last.lock().unwrap() =
                Some((parts.method, parts.uri.to_string(), parts.headers));
            Ok(Response::new(body))
        }
    }

    fn last(transport: &EchoTransport) -> (Method, String, HeaderMap) {
        transport.last.lock().unwrap().clone().unwrap()
    }

    #[tokio::test]
    async fn test_client_methods() {
        let transport = Arc::new(EchoTransport::default());
        let client = Client::with_transport(transport.clone());

        let response = client.get("http://test.com/a").await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(last(&transport).0, Method::GET);
        assert_eq!(last(&transport).1, "http://test.com/a");

        let response = client.post("http://test.com/a", "payload").await.unwrap();
        assert_eq!(response.body(), &Bytes::from("payload"));
        assert_eq!(last(&transport).0, Method::POST);

        client.put("http://test.com/a", Bytes::new()).await.unwrap();
        assert_eq!(last(&transport).0, Method::PUT);
        client.patch("http://test.com/a", Bytes::new()).await.unwrap();
        assert_eq!(last(&transport).0, Method::PATCH);
        client.delete("http://test.com/a").await.unwrap();
        assert_eq!(last(&transport).0, Method::DELETE);
        client.head("http://test.com/a").await.unwrap();
        assert_eq!(last(&transport).0, Method::HEAD);
    }

    #[tokio::test]
    async fn test_base_url_and_default_headers() {
        let transport = Arc::new(EchoTransport::default());
        let client = Client::builder()
            .base_url("http://test.com")
            .header("X-Test", "value")
            .header("User-Agent", "hyperax")
            .transport(transport.clone())
            .build();

        let req = Request::builder()
            .uri("/path?q=1")
            .header("user-agent", "override")
            .body(Bytes::new())
            .unwrap();
        client.request(req).await.unwrap();

        let (_, uri, headers) = last(&transport);
        assert_eq!(uri, "http://test.com/path?q=1");
        assert_eq!(headers.get("x-test").unwrap(), "value");
        assert_eq!(headers.get("user-agent").unwrap(), "override");
    }

    #[tokio::test]
    async fn test_post_json() {
        let transport = Arc::new(EchoTransport::default());
        let client = Client::with_transport(transport.clone());

        let response = client
            .post_json("http://test.com/items", &serde_json::json!({ "id": 7 }))
            .await
            .unwrap();

        assert_eq!(response.body(), &Bytes::from(r#"{"id":7}"#));
        let (_, _, headers) = last(&transport);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = Client::builder()
            .base_url("not a url")
            .transport(EchoTransport::default())
            .build();

        let result = tokio_test::block_on(client.get("/path"));
        assert!(matches!(result, Err(Error::Request(_))));
    }

    #[test]
    fn test_client_builder() {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .base_url("http://test.com")
            .header("User-Agent", "test")
            .header("bad header", "ignored");

        assert_eq!(builder.timeout, Some(Duration::from_secs(30)));
        assert_eq!(builder.base_url.as_deref(), Some("http://test.com"));
        assert!(builder.headers.contains_key("user-agent"));
        assert_eq!(builder.headers.len(), 1);

        let client = builder.build();
        assert_eq!(client.base_url.as_deref(), Some("http://test.com"));
        assert!(Client::builder().no_timeout().timeout.is_none());
    }
}
