//! HTTP layer and API status mapping.

mod http;

pub use http::{HttpTransport, DEFAULT_TIMEOUT};
