use crate::preview::FilePreview;
use crate::render::ResultView;
use crate::slot::UploadSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Which panels are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub form: bool,
    pub loading: bool,
    pub results: bool,
}

impl Panels {
    pub const IDLE: Self = Self {
        form: true,
        loading: false,
        results: false,
    };
    pub const BUSY: Self = Self {
        form: false,
        loading: true,
        results: false,
    };
    pub const RENDERED: Self = Self {
        form: true,
        loading: false,
        results: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    Empty,
    Loaded(FilePreview),
    Rejected(String),
}

impl SlotStatus {
    /// Status line shown under the slot.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Loaded(preview) => format!("File loaded: {}", preview.name),
            Self::Rejected(reason) => reason.clone(),
        }
    }
}

/// Submit control state, recomputed after every slot change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitGate {
    pub enabled: bool,
    pub label: &'static str,
}

impl SubmitGate {
    #[must_use]
    pub fn for_completion(complete: bool) -> Self {
        Self {
            enabled: complete,
            label: if complete {
                "Process documents"
            } else {
                "Complete all uploads"
            },
        }
    }
}

/// Presentation surface driven by the controller. All calls happen on the
/// thread that owns the controller.
pub trait Surface {
    fn notify(&mut self, level: NotificationLevel, message: &str);

    fn show_panels(&mut self, panels: Panels);

    fn slot_status(&mut self, slot: UploadSlot, status: &SlotStatus);

    fn submit_gate(&mut self, gate: &SubmitGate);

    fn render_result(&mut self, view: &ResultView);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_label_tracks_completion() {
        assert_eq!(
            SubmitGate::for_completion(false),
            SubmitGate {
                enabled: false,
                label: "Complete all uploads"
            }
        );
        assert!(SubmitGate::for_completion(true).enabled);
        assert_eq!(SubmitGate::for_completion(true).label, "Process documents");
    }

    #[test]
    fn status_messages() {
        assert_eq!(SlotStatus::Empty.message(), "");
        assert_eq!(
            SlotStatus::Rejected("unsupported type: image/gif".into()).message(),
            "unsupported type: image/gif"
        );
        let preview = FilePreview {
            slot: UploadSlot::FrontId,
            name: "front.jpg".into(),
            size_label: "1 KB".into(),
            mime_type: "image/jpeg".into(),
        };
        assert_eq!(SlotStatus::Loaded(preview).message(), "File loaded: front.jpg");
    }
}
