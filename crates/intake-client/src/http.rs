//! HTTP client construction from the `[api]` configuration section.

use std::time::Duration;

use intake_core::config::ApiConfig;

use crate::error::ClientError;

/// Build the client used for all calls to the extraction service.
///
/// Config: `intake/{version}` user-agent, redirect limit 10, rustls TLS,
/// request and connect timeouts from `api` where `0` leaves them unset.
///
/// # Errors
///
/// Returns `ClientError::Http` if the TLS backend cannot be initialized.
pub fn build_client(api: &ApiConfig) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(concat!("intake/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10));
    if api.request_timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(api.request_timeout_secs));
    }
    if api.connect_timeout_secs > 0 {
        builder = builder.connect_timeout(Duration::from_secs(api.connect_timeout_secs));
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_defaults() {
        build_client(&ApiConfig::default()).unwrap();
    }

    #[test]
    fn client_builds_without_timeouts() {
        let api = ApiConfig {
            request_timeout_secs: 0,
            connect_timeout_secs: 0,
            ..ApiConfig::default()
        };
        build_client(&api).unwrap();
    }
}
