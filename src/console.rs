use std::io::Write;

use intake_core::UploadSlot;
use intake_core::render::ResultView;
use intake_core::surface::{NotificationLevel, Panels, SlotStatus, SubmitGate, Surface};

/// Terminal surface: slot status and results go to the writer, panel changes
/// are reduced to a progress line.
pub struct ConsoleSurface<W: Write> {
    out: W,
    last_view: Option<ResultView>,
    last_panels: Option<Panels>,
}

impl ConsoleSurface<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_view: None,
            last_panels: None,
        }
    }

    #[must_use]
    pub fn last_view(&self) -> Option<&ResultView> {
        self.last_view.as_ref()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn notify(&mut self, level: NotificationLevel, message: &str) {
        let _ = writeln!(self.out, "[{}] {message}", level.as_str());
    }

    fn show_panels(&mut self, panels: Panels) {
        if panels.loading && self.last_panels != Some(panels) {
            let _ = writeln!(self.out, "Processing documents...");
        }
        self.last_panels = Some(panels);
    }

    fn slot_status(&mut self, slot: UploadSlot, status: &SlotStatus) {
        match status {
            SlotStatus::Empty => {}
            SlotStatus::Loaded(preview) => {
                let _ = writeln!(
                    self.out,
                    "{}: {} ({}, {})",
                    slot.label(),
                    status.message(),
                    preview.size_label,
                    preview.mime_type
                );
            }
            SlotStatus::Rejected(_) => {
                let _ = writeln!(self.out, "{}: {}", slot.label(), status.message());
            }
        }
    }

    fn submit_gate(&mut self, gate: &SubmitGate) {
        tracing::debug!(enabled = gate.enabled, label = gate.label, "submit gate");
    }

    fn render_result(&mut self, view: &ResultView) {
        let _ = writeln!(self.out, "\n{view}");
        self.last_view = Some(view.clone());
    }
}
