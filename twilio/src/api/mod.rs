//! Twilio REST API client and per-product operations

pub mod accounts;
pub mod autopilot;
pub mod chat;
pub mod client;
pub mod common;
pub mod conversations;
pub mod error;
pub mod flex;
pub mod iam;
pub mod proxy;
pub mod serverless;
pub mod sip;
pub mod taskrouter;
#[cfg(test)]
pub mod test_helpers;
pub mod trunking;
pub mod video;

pub use client::{Client, Credentials, Product, RetryConfig};
pub use common::Form;
pub use error::ApiError;
