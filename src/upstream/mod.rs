//! Upstream client - the seam between the gateway and the backend service

pub mod http;
pub mod traits;

pub use http::HttpUpstream;
pub use traits::{DataUpstream, FetchError};
