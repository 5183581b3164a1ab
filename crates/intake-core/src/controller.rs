use crate::backend::{BackendReply, ExtractionBackend};
use crate::document::DocumentFile;
use crate::encoding::encode_all;
use crate::error::{SubmissionError, TransportError, ValidationError};
use crate::preview::FilePreview;
use crate::render::render;
use crate::result::{ExtractedFields, ExtractionResponse, ExtractionResult};
use crate::slot::UploadSlot;
use crate::state::UploadSlotState;
use crate::surface::{NotificationLevel, Panels, SlotStatus, SubmitGate, Surface};
use crate::validator::PolicyTable;

pub const INCOMPLETE_WARNING: &str = "Complete all uploads before processing.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Encoding,
    Submitting,
    Rendered { success: bool },
}

/// Drives one intake session: slot selection, submission and reset.
///
/// Rendering is terminal for a submission. Files stay assigned after a
/// failure so the user can resubmit; only [`reset`](Self::reset) returns the
/// session to [`Phase::Idle`].
pub struct SubmissionController<B, S> {
    backend: B,
    surface: S,
    slots: UploadSlotState,
    phase: Phase,
    last_result: Option<ExtractionResult>,
}

impl<B: ExtractionBackend, S: Surface> SubmissionController<B, S> {
    pub fn new(backend: B, surface: S, policies: PolicyTable) -> Self {
        let mut controller = Self {
            backend,
            surface,
            slots: UploadSlotState::new(policies),
            phase: Phase::Idle,
            last_result: None,
        };
        controller.show_idle();
        controller
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn slots(&self) -> &UploadSlotState {
        &self.slots
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&ExtractionResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Handle a file chosen for `slot`. A rejected file is reported at the
    /// slot and leaves the slot's previous content in place.
    ///
    /// # Errors
    ///
    /// Returns the validation failure after reporting it to the surface.
    pub fn select(
        &mut self,
        slot: UploadSlot,
        file: DocumentFile,
    ) -> Result<FilePreview, ValidationError> {
        let preview = FilePreview::of(slot, &file);
        match self.slots.assign(slot, file) {
            Ok(()) => {
                tracing::info!(slot = %slot, name = %preview.name, size = %preview.size_label, "file selected");
                self.surface
                    .slot_status(slot, &SlotStatus::Loaded(preview.clone()));
                self.refresh_gate();
                Ok(preview)
            }
            Err(e) => {
                tracing::warn!(slot = %slot, name = %preview.name, "file rejected: {e}");
                self.surface
                    .slot_status(slot, &SlotStatus::Rejected(e.to_string()));
                Err(e)
            }
        }
    }

    pub fn clear(&mut self, slot: UploadSlot) {
        self.slots.clear(slot);
        self.surface.slot_status(slot, &SlotStatus::Empty);
        self.refresh_gate();
    }

    /// Encode all slots, submit them and render the outcome.
    ///
    /// Returns `None` without side effects other than a warning when a slot
    /// is still empty.
    pub async fn submit(&mut self) -> Option<&ExtractionResult> {
        let previous = self.phase;
        self.phase = Phase::Validating;
        if !self.slots.is_complete() {
            tracing::warn!(missing = ?self.slots.missing(), "submit rejected: uploads incomplete");
            self.surface
                .notify(NotificationLevel::Warning, INCOMPLETE_WARNING);
            self.phase = previous;
            return None;
        }

        let result = match self.run().await {
            Ok(fields) => {
                tracing::info!("document processing succeeded");
                ExtractionResult::Success { fields }
            }
            Err(e) => {
                tracing::warn!("document processing failed: {e}");
                ExtractionResult::Failure {
                    message: e.to_string(),
                }
            }
        };
        self.finish(result);
        self.last_result.as_ref()
    }

    /// Clear every slot, preview and status and return to [`Phase::Idle`].
    pub fn reset(&mut self) {
        self.slots.clear_all();
        self.last_result = None;
        self.phase = Phase::Idle;
        self.show_idle();
        tracing::debug!("intake session reset");
    }

    async fn run(&mut self) -> Result<ExtractedFields, SubmissionError> {
        self.phase = Phase::Encoding;
        self.surface.show_panels(Panels::BUSY);
        let body = encode_all(&self.slots).await?;

        self.phase = Phase::Submitting;
        tracing::info!(slots = body.len(), "submitting documents");
        let reply = self.backend.process(&body).await?;
        tracing::info!(status = reply.status, "extraction service replied");
        interpret(reply)
    }

    fn finish(&mut self, result: ExtractionResult) {
        let success = result.is_success();
        self.phase = Phase::Rendered { success };
        let view = render(&result);
        self.surface.show_panels(Panels::RENDERED);
        self.surface.render_result(&view);
        match &result {
            ExtractionResult::Success { .. } => self
                .surface
                .notify(NotificationLevel::Success, "Documents processed."),
            ExtractionResult::Failure { message } => self.surface.notify(
                NotificationLevel::Error,
                &format!("Failed to process documents: {message}"),
            ),
        }
        self.last_result = Some(result);
    }

    fn show_idle(&mut self) {
        for slot in UploadSlot::ALL {
            self.surface.slot_status(slot, &SlotStatus::Empty);
        }
        self.refresh_gate();
        self.surface.show_panels(Panels::IDLE);
    }

    fn refresh_gate(&mut self) {
        self.surface
            .submit_gate(&SubmitGate::for_completion(self.slots.is_complete()));
    }
}

/// Turn a raw reply into extracted fields.
///
/// # Errors
///
/// Non-2xx replies become `TransportError::Status` with the body verbatim;
/// an unparseable 2xx body is `TransportError::Malformed`; `success: false`
/// is `SubmissionError::Application`.
pub fn interpret(reply: BackendReply) -> Result<ExtractedFields, SubmissionError> {
    if !reply.is_success() {
        return Err(TransportError::Status {
            status: reply.status,
            body: reply.body,
        }
        .into());
    }
    let resp: ExtractionResponse = serde_json::from_str(&reply.body)
        .map_err(|e| TransportError::Malformed(e.to_string()))?;
    match ExtractionResult::from(resp) {
        ExtractionResult::Success { fields } => Ok(fields),
        ExtractionResult::Failure { message } => Err(SubmissionError::Application(message)),
    }
}
