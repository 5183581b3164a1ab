//! Test-only backend and surface doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{BackendReply, ExtractionBackend};
use crate::encoding::SubmissionBody;
use crate::error::TransportError;
use crate::render::ResultView;
use crate::slot::UploadSlot;
use crate::surface::{NotificationLevel, Panels, SlotStatus, SubmitGate, Surface};

/// Backend that answers every request with the same canned reply.
#[derive(Debug, Clone)]
pub struct StaticBackend {
    reply: Result<BackendReply, TransportError>,
    calls: Arc<AtomicUsize>,
    last_body: Arc<Mutex<Option<SubmissionBody>>>,
}

impl StaticBackend {
    #[must_use]
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self::with_result(Ok(BackendReply {
            status,
            body: body.into(),
        }))
    }

    #[must_use]
    pub fn failing(err: TransportError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(reply: Result<BackendReply, TransportError>) -> Self {
        Self {
            reply,
            calls: Arc::new(AtomicUsize::new(0)),
            last_body: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn last_body(&self) -> Option<SubmissionBody> {
        self.last_body
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExtractionBackend for StaticBackend {
    async fn process(&self, body: &SubmissionBody) -> Result<BackendReply, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_body
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(body.clone());
        self.reply.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Notify(NotificationLevel, String),
    Panels(Panels),
    SlotStatus(UploadSlot, SlotStatus),
    SubmitGate(SubmitGate),
    Result(ResultView),
}

/// Surface that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    #[must_use]
    pub fn notifications(&self, level: NotificationLevel) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Notify(l, msg) if *l == level => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn last_panels(&self) -> Option<Panels> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Panels(p) => Some(*p),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_result(&self) -> Option<&ResultView> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::Result(v) => Some(v),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_gate(&self) -> Option<&SubmitGate> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::SubmitGate(g) => Some(g),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_slot_status(&self, slot: UploadSlot) -> Option<&SlotStatus> {
        self.events.iter().rev().find_map(|e| match e {
            SurfaceEvent::SlotStatus(s, status) if *s == slot => Some(status),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Surface for RecordingSurface {
    fn notify(&mut self, level: NotificationLevel, message: &str) {
        self.events
            .push(SurfaceEvent::Notify(level, message.to_owned()));
    }

    fn show_panels(&mut self, panels: Panels) {
        self.events.push(SurfaceEvent::Panels(panels));
    }

    fn slot_status(&mut self, slot: UploadSlot, status: &SlotStatus) {
        self.events
            .push(SurfaceEvent::SlotStatus(slot, status.clone()));
    }

    fn submit_gate(&mut self, gate: &SubmitGate) {
        self.events.push(SurfaceEvent::SubmitGate(gate.clone()));
    }

    fn render_result(&mut self, view: &ResultView) {
        self.events.push(SurfaceEvent::Result(view.clone()));
    }
}
