use hyper::header::HeaderMap;
use hyper::Response;

/// Header fields delivered after the response body.
///
/// Stored as a response extension. A response only carries it when the
/// transport that produced it supports trailing headers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trailers(pub HeaderMap);

impl Trailers {
    pub fn headers(&self) -> &HeaderMap {
        &self.0
    }
}

/// Returns the trailing headers of `response`, if its transport produced any.
pub fn trailers<B>(response: &Response<B>) -> Option<&HeaderMap> {
    response.extensions().get::<Trailers>().map(Trailers::headers)
}
