// Polling service - fetch, derive, render and record one snapshot per cycle
use crate::application::tank_gateway::SnapshotSource;
use crate::domain::derived::{derive_state, DerivedState};
use crate::domain::history::{HistoryBuffer, HistorySample, HistorySeries};
use crate::domain::snapshot::Snapshot;
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Delay between the end of one cycle and the start of the next.
pub const POLL_DELAY: Duration = Duration::from_millis(1000);

/// Rendering collaborator. Receives pre-shaped data and hands nothing back.
pub trait Renderer: Send + Sync {
    fn render_state(&self, snapshot: &Snapshot, derived: &DerivedState);

    fn render_history(&self, series: HistorySeries);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Rendered,
    Skipped,
}

pub struct PollingLoop {
    source: Arc<dyn SnapshotSource>,
    renderer: Arc<dyn Renderer>,
    history: HistoryBuffer,
    delay: Duration,
}

impl PollingLoop {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        renderer: Arc<dyn Renderer>,
        delay: Duration,
    ) -> Self {
        Self {
            source,
            renderer,
            history: HistoryBuffer::new(),
            delay,
        }
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Run cycles until `cancel` fires.
    ///
    /// The next cycle is only scheduled once the current one has resolved, so
    /// there is never more than one fetch in flight. A slow backend lowers the
    /// effective poll rate instead of piling up requests. Cancellation is
    /// observed between cycles; an in-flight fetch is allowed to finish.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(delay_ms = self.delay.as_millis() as u64, "polling loop started");

        let mut rendered = 0u64;
        let mut skipped = 0u64;
        while !cancel.is_cancelled() {
            match self.run_cycle().await {
                CycleOutcome::Rendered => rendered += 1,
                CycleOutcome::Skipped => skipped += 1,
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        tracing::info!(
            rendered,
            skipped,
            history_len = self.history().len(),
            "polling loop stopped"
        );
    }

    /// One polling cycle. Fetch errors are logged and the cycle is skipped
    /// without touching the history.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let snapshot = match self.source.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "poll cycle skipped");
                return CycleOutcome::Skipped;
            }
        };

        let derived = derive_state(&snapshot);
        self.renderer.render_state(&snapshot, &derived);

        self.history.append(HistorySample::new(
            timestamp_label(),
            snapshot.flow_in,
            snapshot.flow_out,
            snapshot.level_mm,
        ));
        self.renderer.render_history(self.history.series());

        tracing::debug!(
            level_mm = snapshot.level_mm,
            capacity_pct = derived.capacity_pct,
            alarm = ?derived.alarm_color,
            sensor = ?derived.sensor_status,
            history_len = self.history.len(),
            "poll cycle rendered"
        );
        CycleOutcome::Rendered
    }
}

fn timestamp_label() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
