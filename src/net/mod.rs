//! API access layer.
//!
//! One [`ApiClient`] per backend area, each parameterized by which
//! credential slot it prefers and by a fixed request timeout. Area modules
//! (`auth`, `health`, `ai`, `knowledge`) are thin endpoint wrappers over the
//! shared client; the contract (bearer attachment, response normalization,
//! uniform expiry handling) lives in [`http`].

pub mod ai;
pub mod auth;
pub mod health;
pub mod http;
pub mod knowledge;
pub mod types;

pub use http::{ApiClient, TokenPreference};
