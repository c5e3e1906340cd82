//! Upstream UV index provider adapters
//!
//! This crate talks to the currentuvindex.com forecast API and converts
//! its payload into the core report shape. A simulated provider is
//! included for offline development and tests.

pub mod api;
pub mod models;
pub mod simulator;

pub use api::*;
pub use models::*;
pub use simulator::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
