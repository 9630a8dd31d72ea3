//! Test helpers for the Twilio API
#![allow(clippy::disallowed_methods)]

use super::{Client, Credentials, RetryConfig};

pub const TEST_ACCOUNT_SID: &str = "ACaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Client routing every product to the mock server, with near-instant retries
pub fn create_test_client(url: &str) -> Client {
    Client::with_config(
        Credentials::AuthToken {
            account_sid: TEST_ACCOUNT_SID.to_string(),
            auth_token: "token".to_string(),
        },
        Some(url.to_string()),
        RetryConfig {
            max_retries: 1,
            initial_backoff_ms: 1,
            max_backoff_ms: 5,
            timeout_seconds: 5,
        },
    )
    .unwrap()
}

/// Configuration or state from a JSON literal
pub fn dynamic(value: serde_json::Value) -> tfplug::DynamicValue {
    tfplug::DynamicValue::decode_json(value.to_string().as_bytes()).unwrap()
}
