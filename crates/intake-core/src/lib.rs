//! Document intake core: upload slots, validation, transport encoding,
//! the submission state machine and result rendering.

pub mod backend;
pub mod config;
pub mod controller;
pub mod document;
pub mod encoding;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod preview;
pub mod render;
pub mod result;
pub mod slot;
pub mod state;
pub mod surface;
pub mod validator;

pub use backend::{BackendReply, ExtractionBackend};
pub use controller::{Phase, SubmissionController};
pub use document::{DocumentFile, FileSource};
pub use encoding::{EncodedPayload, SubmissionBody};
pub use error::{EncodingError, SubmissionError, TransportError, ValidationError};
pub use result::{ExtractedFields, ExtractionResult};
pub use slot::UploadSlot;
pub use state::UploadSlotState;
pub use validator::{PolicyTable, ValidationPolicy};
