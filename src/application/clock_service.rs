// Wall-clock publisher, independent of the polling loop
use chrono::Local;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

pub fn wall_clock_label() -> String {
    Local::now().format("%d/%m/%Y %H:%M:%S").to_string()
}

/// Publish the local date and time once per second until cancelled.
pub async fn run_clock(display: watch::Sender<String>, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(CLOCK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                display.send_replace(wall_clock_label());
            }
        }
    }

    tracing::debug!("clock task stopped");
}
