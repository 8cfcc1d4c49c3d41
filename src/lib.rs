//! A fake [`hyperax::Transport`] for unit tests.
//!
//! Configure the response once, hand the handler to a [`hyperax::Client`]
//! and exercise the code under test without any network I/O:
//!
//! ```
//! use fake_handler::FakeHandler;
//! use hyperax::StatusCode;
//!
//! let client = FakeHandler::new()
//!     .with_status_code(StatusCode::ACCEPTED)
//!     .with_response_header("x-request-id", "42")
//!     .with_expected_content(&["a", "b"])
//!     .into_client();
//! # let _ = client;
//! ```

mod builder;
pub mod error;
pub mod handler;
pub mod response_spec;

pub use error::{FakeError, Result};
pub use handler::{FakeHandler, RecordedRequest};
pub use response_spec::{Capabilities, Content, ResponseSpec};
