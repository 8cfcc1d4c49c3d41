use crate::common::Trailers;
use crate::error::Error;
use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{HeaderValue, HOST};
use hyper::{Request, Response, Uri};
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::{debug, error};

/// Turns a request into a response.
///
/// [`Client`](crate::Client) hands every request it builds to a transport.
/// [`HttpTransport`] does so over the network; tests plug in their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, Error>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, Error> {
        (**self).send(request).await
    }
}

async fn connect(uri: &Uri) -> std::io::Result<TokioIo<TcpStream>> {
    if uri.scheme_str().is_some_and(|scheme| scheme != "http") {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "only plain http is supported",
        ));
    }
    let host = uri
        .host()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid uri"))?;
    let port = uri.port_u16().unwrap_or(80);
    // IPv6 literals come bracketed out of the authority.
    let host = host.trim_start_matches('[').trim_end_matches(']');

    let stream = TcpStream::connect((host, port)).await?;
    stream.set_nodelay(true)?;
    Ok(TokioIo::new(stream))
}

/// HTTP/1 transport over a fresh TCP connection per request.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    timeout: Option<Duration>,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>, Error> {
        let (mut parts, body) = request.into_parts();
        let io = connect(&parts.uri).await?;

        // hyper's connection-level API sends the target verbatim, so switch to
        // origin-form and carry host and port in Host.
        if let Some(host) = parts.uri.host() {
            if !parts.headers.contains_key(HOST) {
                // Never from the authority, which may carry userinfo.
                let host = match parts.uri.port_u16() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.to_string(),
                };
                let host = HeaderValue::from_str(&host).map_err(hyper::http::Error::from)?;
                parts.headers.insert(HOST, host);
            }
        }
        parts.uri = match parts.uri.path_and_query() {
            Some(path) => path.as_str().parse::<Uri>().map_err(hyper::http::Error::from)?,
            None => Uri::from_static("/"),
        };

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io).await?;
        tokio::task::spawn(async move {
            if let Err(err) = conn.await {
                error!("Connection failed: {:?}", err);
            }
        });

        let response = sender
            .send_request(Request::from_parts(parts, Full::new(body)))
            .await?;
        let (mut parts, body) = response.into_parts();
        let collected = body.collect().await?;
        if let Some(trailers) = collected.trailers() {
            parts.extensions.insert(Trailers(trailers.clone()));
        }
        Ok(Response::from_parts(parts, collected.to_bytes()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request<Bytes>) -> Result<Response<Bytes>, Error> {
        debug!("Sending {} request to {}", request.method(), request.uri());
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.round_trip(request))
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => self.round_trip(request).await,
        }
    }
}
