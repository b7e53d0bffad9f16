pub mod types;
pub mod adapter;
pub mod client;

pub use types::*;
pub use adapter::*;
pub use client::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggingError {
    #[error("Tagger service is not reachable at {0}")]
    Connection(String),

    #[error("Tagger returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed tagger response: {0}")]
    MalformedResponse(String),

    #[error("Tagger unavailable: {0}")]
    Unavailable(String),
}
