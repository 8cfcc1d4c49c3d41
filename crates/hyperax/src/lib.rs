pub mod client;
pub mod common;
pub mod error;
pub mod transport;
mod export;

pub use client::{Client, ClientBuilder};
pub use common::{trailers, Trailers};
pub use error::Error;
pub use transport::{HttpTransport, Transport};
pub use export::*;
