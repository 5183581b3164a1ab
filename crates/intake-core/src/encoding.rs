use std::collections::BTreeMap;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::document::{DocumentFile, FileSource};
use crate::error::{EncodingError, SubmissionError};
use crate::slot::UploadSlot;
use crate::state::UploadSlotState;

/// Transport record for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    /// Raw base64 of the file content, without any data-URI preamble.
    pub base64: String,
    pub filename: String,
    pub content_type: String,
    pub size: u64,
}

/// Request body: one payload per slot, keyed by wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionBody(pub BTreeMap<UploadSlot, EncodedPayload>);

impl SubmissionBody {
    #[must_use]
    pub fn get(&self, slot: UploadSlot) -> Option<&EncodedPayload> {
        self.0.get(&slot)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Return the payload of a base64 data URI (everything after the first `,`).
#[must_use]
pub fn strip_data_uri_prefix(data_uri: &str) -> Option<&str> {
    let rest = data_uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    header.ends_with(";base64").then_some(payload)
}

/// Encode one file's content for transport.
///
/// # Errors
///
/// Returns `EncodingError` if the content cannot be read, or if a file on
/// disk no longer has the size it was validated with.
pub async fn encode(file: &DocumentFile) -> Result<EncodedPayload, EncodingError> {
    let base64 = match &file.source {
        FileSource::Path(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| EncodingError::Read {
                    name: file.name.clone(),
                    source,
                })?;
            let actual = bytes.len() as u64;
            if actual != file.size_bytes {
                return Err(EncodingError::Changed {
                    name: file.name.clone(),
                    expected: file.size_bytes,
                    actual,
                });
            }
            STANDARD.encode(bytes)
        }
        FileSource::Bytes(bytes) => STANDARD.encode(bytes),
        FileSource::DataUri(uri) => strip_data_uri_prefix(uri)
            .ok_or_else(|| EncodingError::InvalidDataUri {
                name: file.name.clone(),
            })?
            .to_owned(),
    };
    Ok(EncodedPayload {
        base64,
        filename: file.name.clone(),
        content_type: file.mime_type.clone(),
        size: file.size_bytes,
    })
}

/// Encode every slot concurrently. The first failure aborts the whole body.
///
/// # Errors
///
/// Returns `SubmissionError::Incomplete` if any slot is empty, otherwise the
/// first `EncodingError` observed.
pub async fn encode_all(state: &UploadSlotState) -> Result<SubmissionBody, SubmissionError> {
    if !state.is_complete() {
        return Err(SubmissionError::Incomplete {
            missing: state.missing(),
        });
    }
    let jobs = state.iter().map(|(slot, file)| async move {
        let payload = encode(file).await?;
        tracing::debug!(slot = %slot, size = payload.size, "slot encoded");
        Ok::<_, EncodingError>((slot, payload))
    });
    let encoded = futures::future::try_join_all(jobs).await?;
    Ok(SubmissionBody(encoded.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use proptest::prelude::*;

    use super::*;

    fn filled_state() -> UploadSlotState {
        let mut state = UploadSlotState::default();
        state
            .assign(
                UploadSlot::FrontId,
                DocumentFile::from_bytes("front.jpg", "image/jpeg", b"front".to_vec()),
            )
            .unwrap();
        state
            .assign(
                UploadSlot::BackId,
                DocumentFile::from_bytes("back.jpg", "image/jpeg", b"back".to_vec()),
            )
            .unwrap();
        state
            .assign(
                UploadSlot::ProofOfAddress,
                DocumentFile::from_bytes("bill.png", "image/png", b"bill".to_vec()),
            )
            .unwrap();
        state
    }

    #[test]
    fn strip_prefix_returns_payload() {
        assert_eq!(
            strip_data_uri_prefix("data:image/jpeg;base64,/9j/4AAQ"),
            Some("/9j/4AAQ")
        );
        assert_eq!(strip_data_uri_prefix("data:;base64,"), Some(""));
    }

    #[test]
    fn strip_prefix_rejects_non_base64_uris() {
        assert_eq!(strip_data_uri_prefix("data:text/plain,hello"), None);
        assert_eq!(strip_data_uri_prefix("/9j/4AAQ"), None);
        assert_eq!(strip_data_uri_prefix("data:image/png;base64"), None);
    }

    #[tokio::test]
    async fn encode_bytes_carries_metadata() {
        let file = DocumentFile::from_bytes("a.png", "image/png", b"hello".to_vec());
        let payload = encode(&file).await.unwrap();
        assert_eq!(payload.base64, "aGVsbG8=");
        assert_eq!(payload.filename, "a.png");
        assert_eq!(payload.content_type, "image/png");
        assert_eq!(payload.size, 5);
    }

    #[tokio::test]
    async fn encode_data_uri_strips_preamble() {
        let file =
            DocumentFile::from_data_uri("a.png", "image/png", 5, "data:image/png;base64,aGVsbG8=");
        let payload = encode(&file).await.unwrap();
        assert_eq!(payload.base64, "aGVsbG8=");
    }

    #[tokio::test]
    async fn encode_invalid_data_uri_fails() {
        let file = DocumentFile::from_data_uri("a.png", "image/png", 5, "hello");
        let err = encode(&file).await.unwrap_err();
        assert!(matches!(err, EncodingError::InvalidDataUri { .. }));
    }

    #[tokio::test]
    async fn encode_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0x89, b'P', b'N', b'G'])
            .unwrap();
        let file = DocumentFile::from_path(&path).await.unwrap();
        let payload = encode(&file).await.unwrap();
        assert_eq!(STANDARD.decode(payload.base64).unwrap(), [0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn encode_path_removed_after_selection_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");
        std::fs::write(&path, b"x").unwrap();
        let file = DocumentFile::from_path(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = encode(&file).await.unwrap_err();
        assert!(matches!(err, EncodingError::Read { ref name, .. } if name == "gone.jpg"));
    }

    #[tokio::test]
    async fn encode_path_grown_after_selection_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();
        let file = DocumentFile::from_path(&path).await.unwrap();
        std::fs::write(&path, vec![0u8; 6 * 1024 * 1024]).unwrap();

        let err = encode(&file).await.unwrap_err();
        assert!(matches!(
            err,
            EncodingError::Changed { ref name, expected: 3, actual: 6_291_456 } if name == "front.jpg"
        ));
    }

    #[tokio::test]
    async fn encode_all_keys_by_slot() {
        let body = encode_all(&filled_state()).await.unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(body.get(UploadSlot::BackId).unwrap().filename, "back.jpg");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["rg_frente"]["base64"], "ZnJvbnQ=");
        assert_eq!(json["rg_verso"]["content_type"], "image/jpeg");
        assert_eq!(json["comprovante"]["size"], 4);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn encode_all_requires_complete_state() {
        let mut state = filled_state();
        state.clear(UploadSlot::FrontId);
        let err = encode_all(&state).await.unwrap_err();
        assert!(
            matches!(err, SubmissionError::Incomplete { ref missing } if missing == &[UploadSlot::FrontId])
        );
    }

    #[tokio::test]
    async fn encode_all_fails_fast_on_one_bad_slot() {
        let mut state = filled_state();
        state
            .assign(
                UploadSlot::BackId,
                DocumentFile::from_data_uri("back.jpg", "image/jpeg", 3, "not a uri"),
            )
            .unwrap();
        let err = encode_all(&state).await.unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Encoding(EncodingError::InvalidDataUri { .. })
        ));
    }

    proptest! {
        #[test]
        fn data_uri_round_trip_reproduces_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let uri = format!("data:image/png;base64,{}", STANDARD.encode(&bytes));
            let payload = strip_data_uri_prefix(&uri).unwrap();
            prop_assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
        }

        #[test]
        fn encoded_bytes_decode_to_original(bytes in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let file = DocumentFile::from_bytes("x.png", "image/png", bytes.clone());
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let payload = rt.block_on(encode(&file)).unwrap();
            prop_assert_eq!(STANDARD.decode(payload.base64).unwrap(), bytes);
        }
    }
}
