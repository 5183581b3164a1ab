use crate::preview::format_file_size;
use crate::slot::UploadSlot;

/// A selected file was rejected before it could occupy a slot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "file too large: {size} bytes exceeds the {max} byte limit ({})",
        format_file_size(*.max)
    )]
    TooLarge { size: u64, max: u64 },

    #[error("unsupported type: {mime}; allowed: {}", .allowed.join(", "))]
    UnsupportedType { mime: String, allowed: Vec<String> },
}

/// Reading a slot's content for transport failed.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("file read error: {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file read error: {name}: not a base64 data URI")]
    InvalidDataUri { name: String },

    #[error("file changed since selection: {name}: expected {expected} bytes, read {actual}")]
    Changed {
        name: String,
        expected: u64,
        actual: u64,
    },
}

/// The request did not produce an interpretable reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Terminal failure of one submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("missing uploads: {}", join_slots(.missing))]
    Incomplete { missing: Vec<UploadSlot> },

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Application(String),
}

fn join_slots(slots: &[UploadSlot]) -> String {
    slots
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_large_display() {
        let err = ValidationError::TooLarge {
            size: 6_291_456,
            max: 5_242_880,
        };
        assert_eq!(
            err.to_string(),
            "file too large: 6291456 bytes exceeds the 5242880 byte limit (5 MB)"
        );
    }

    #[test]
    fn unsupported_type_display() {
        let err = ValidationError::UnsupportedType {
            mime: "application/pdf".into(),
            allowed: vec!["image/jpeg".into(), "image/png".into()],
        };
        assert_eq!(
            err.to_string(),
            "unsupported type: application/pdf; allowed: image/jpeg, image/png"
        );
    }

    #[test]
    fn status_display_carries_code_and_body() {
        let err = SubmissionError::from(TransportError::Status {
            status: 500,
            body: "internal error".into(),
        });
        assert_eq!(err.to_string(), "HTTP 500: internal error");
    }

    #[test]
    fn incomplete_lists_missing_slots() {
        let err = SubmissionError::Incomplete {
            missing: vec![UploadSlot::BackId, UploadSlot::ProofOfAddress],
        };
        assert_eq!(
            err.to_string(),
            "missing uploads: ID card (back), Proof of address"
        );
    }

    #[test]
    fn read_error_mentions_file() {
        let err = EncodingError::Read {
            name: "front.jpg".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "file read error: front.jpg: gone");
    }

    #[test]
    fn changed_error_reports_both_sizes() {
        let err = EncodingError::Changed {
            name: "front.jpg".into(),
            expected: 3,
            actual: 6_291_456,
        };
        assert_eq!(
            err.to_string(),
            "file changed since selection: front.jpg: expected 3 bytes, read 6291456"
        );
    }
}
