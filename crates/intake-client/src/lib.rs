//! HTTP access to the document extraction service.

#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod http;

pub use client::{ExtractionClient, HealthStatus};
pub use error::ClientError;
