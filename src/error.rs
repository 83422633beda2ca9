//! Crate-wide error type.
//!
//! ERROR HANDLING
//! ==============
//! Authorization failures (HTTP 401) are handled inside the API client with
//! a compensating side effect: the stale credential is evicted and a
//! [`crate::session::SessionEvent::AuthExpired`] event is emitted for the
//! composition root. The [`ClientError::AuthExpired`] variant returned to the
//! caller is a marker that the failure was already handled, not an error to
//! present. Every other failure crosses the boundary unmodified, carrying the
//! backend's `detail` string when the body provides one.

use crate::session::Slot;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{slot} session expired; credential evicted")]
    AuthExpired { slot: Slot },
    #[error("navigation to {0} did not settle; redirect loop")]
    RedirectLoop(String),
}
