use intake_core::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<ClientError> for TransportError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Http(e) if e.is_timeout() => Self::Timeout,
            ClientError::Http(e) => Self::Network(e.to_string()),
            ClientError::Json(e) => Self::Malformed(e.to_string()),
            ClientError::Status { status, body } => Self::Status { status, body },
        }
    }
}
