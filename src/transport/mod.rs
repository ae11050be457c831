//! Transport layer: one HTTP exchange with a deadline.

mod http;

pub use http::{HttpTransport, RawResponse, DEFAULT_TIMEOUT_MS};
