//! HTTP access to the portfolio backend.

pub mod content_client;
pub mod transport;

pub use content_client::HttpContentClient;
pub use transport::{HttpRequest, HttpTransport, RawResponse};
