// Panel view - the rendering collaborator backed by watch channels
use crate::application::polling_service::Renderer;
use crate::domain::derived::DerivedState;
use crate::domain::history::HistorySeries;
use crate::domain::snapshot::Snapshot;
use chrono::Local;
use serde::Serialize;
use tokio::sync::watch;

/// Latest snapshot and the state derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct PanelFrame {
    pub snapshot: Snapshot,
    pub derived: DerivedState,
    pub received_at: String,
}

/// Write side, owned by the polling loop.
pub struct PanelView {
    frame: watch::Sender<Option<PanelFrame>>,
    history: watch::Sender<HistorySeries>,
}

/// Read side, cloned into the HTTP handlers.
#[derive(Clone)]
pub struct PanelReader {
    frame: watch::Receiver<Option<PanelFrame>>,
    history: watch::Receiver<HistorySeries>,
    clock: watch::Receiver<String>,
}

impl PanelView {
    pub fn new(clock: watch::Receiver<String>) -> (Self, PanelReader) {
        let (frame_tx, frame_rx) = watch::channel(None);
        let (history_tx, history_rx) = watch::channel(HistorySeries::default());

        let view = Self {
            frame: frame_tx,
            history: history_tx,
        };
        let reader = PanelReader {
            frame: frame_rx,
            history: history_rx,
            clock,
        };
        (view, reader)
    }
}

impl Renderer for PanelView {
    fn render_state(&self, snapshot: &Snapshot, derived: &DerivedState) {
        self.frame.send_replace(Some(PanelFrame {
            snapshot: snapshot.clone(),
            derived: derived.clone(),
            received_at: Local::now().to_rfc3339(),
        }));
    }

    fn render_history(&self, series: HistorySeries) {
        self.history.send_replace(series);
    }
}

impl PanelReader {
    /// `None` until the first successful poll.
    pub fn frame(&self) -> Option<PanelFrame> {
        self.frame.borrow().clone()
    }

    pub fn history(&self) -> HistorySeries {
        self.history.borrow().clone()
    }

    pub fn clock(&self) -> String {
        self.clock.borrow().clone()
    }
}
