use std::future::Future;

use crate::encoding::SubmissionBody;
use crate::error::TransportError;

/// Raw HTTP reply from the extraction service. Interpretation of status and
/// body belongs to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub body: String,
}

impl BackendReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Remote document extraction endpoint.
pub trait ExtractionBackend: Send + Sync {
    /// Send the encoded documents and return whatever the service replied.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if no reply was received.
    fn process(
        &self,
        body: &SubmissionBody,
    ) -> impl Future<Output = Result<BackendReply, TransportError>> + Send;
}
