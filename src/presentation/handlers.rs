// HTTP request handlers for the local panel API
use crate::domain::control::{ControlCommand, ControlTarget};
use crate::domain::history::HistorySeries;
use crate::presentation::app_state::AppState;
use crate::presentation::view::PanelFrame;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Serialize)]
pub struct PanelResponse {
    pub clock: String,
    pub frame: Option<PanelFrame>,
}

#[derive(Deserialize)]
pub struct CommitRequest {
    pub value: f64,
}

pub fn panel_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/panel", get(panel))
        .route("/api/history", get(history))
        .route("/api/commit/:target", post(commit))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest frame plus the wall clock
pub async fn panel(State(state): State<Arc<AppState>>) -> Json<PanelResponse> {
    Json(PanelResponse {
        clock: state.panel.clock(),
        frame: state.panel.frame(),
    })
}

/// Rolling history as parallel chart series
pub async fn history(State(state): State<Arc<AppState>>) -> Json<HistorySeries> {
    Json(state.panel.history())
}

/// A widget committed its final value. The command is dispatched in the
/// background and the request returns without waiting for the backend.
pub async fn commit(
    Path(target): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommitRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Some(control) = ControlTarget::from_slug(&target) else {
        return Err((
            StatusCode::NOT_FOUND,
            format!("unknown control target: {}", target),
        ));
    };

    let Some(command) = ControlCommand::committed(control, request.value) else {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("value for {} must be a finite number", control),
        ));
    };

    tracing::debug!(control = %command.target, value = command.value, "widget commit");
    state.dispatcher.dispatch(command);
    Ok(StatusCode::ACCEPTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::control_service::ControlDispatcher;
    use crate::application::polling_service::Renderer;
    use crate::application::tank_gateway::{ControlSink, GatewayError};
    use crate::domain::derived::derive_state;
    use crate::domain::snapshot::Snapshot;
    use crate::presentation::view::PanelView;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::watch;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<ControlCommand>>,
    }

    #[async_trait]
    impl ControlSink for RecordingSink {
        async fn send_command(&self, command: &ControlCommand) -> Result<(), GatewayError> {
            self.sent.lock().unwrap().push(*command);
            Ok(())
        }
    }

    struct Harness {
        base_url: String,
        view: PanelView,
        sink: Arc<RecordingSink>,
        _clock: watch::Sender<String>,
    }

    async fn spawn_panel() -> Harness {
        let (clock_tx, clock_rx) = watch::channel("18/10/2026 10:00:00".to_string());
        let (view, reader) = PanelView::new(clock_rx);
        let sink = Arc::new(RecordingSink::default());
        let state = Arc::new(AppState {
            panel: reader,
            dispatcher: ControlDispatcher::new(sink.clone()),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, panel_router(state)).await.unwrap();
        });

        Harness {
            base_url: format!("http://{}", addr),
            view,
            sink,
            _clock: clock_tx,
        }
    }

    async fn wait_for_commands(sink: &RecordingSink, count: usize) -> Vec<ControlCommand> {
        for _ in 0..100 {
            {
                let sent = sink.sent.lock().unwrap();
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        sink.sent.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_health_check() {
        let harness = spawn_panel().await;
        let body = reqwest::get(format!("{}/healthz", harness.base_url))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_panel_is_empty_until_first_frame() {
        let harness = spawn_panel().await;
        let url = format!("{}/api/panel", harness.base_url);

        let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
        assert_eq!(body["clock"], "18/10/2026 10:00:00");
        assert!(body["frame"].is_null());

        let snapshot = Snapshot {
            level_mm: 3000.0,
            system_state: "TANQUE LLENO".to_string(),
            fill_time_min: 0.0,
            sensor_ok: true,
            ..Snapshot::default()
        };
        harness.view.render_state(&snapshot, &derive_state(&snapshot));

        let body: Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
        let derived = &body["frame"]["derived"];
        assert_eq!(derived["capacity_pct"], json!(100.0));
        assert_eq!(derived["alarm_color"], "warning");
        assert_eq!(derived["sensor_status"], "ONLINE");
        assert_eq!(derived["fill_phrase"], "FULL");
        assert_eq!(body["frame"]["snapshot"]["nivel_mm"], json!(3000.0));
    }

    #[tokio::test]
    async fn test_history_endpoint_returns_parallel_series() {
        let harness = spawn_panel().await;
        harness.view.render_history(HistorySeries {
            timestamps: vec!["10:00:00".to_string(), "10:00:01".to_string()],
            flow_in: vec![4.0, 4.5],
            flow_out: vec![3.0, 3.5],
            level: vec![1200.0, 1210.0],
        });

        let body: Value = reqwest::get(format!("{}/api/history", harness.base_url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            body,
            json!({
                "timestamps": ["10:00:00", "10:00:01"],
                "flow_in": [4.0, 4.5],
                "flow_out": [3.0, 3.5],
                "level": [1200.0, 1210.0]
            })
        );
    }

    #[tokio::test]
    async fn test_commit_dispatches_clamped_command() {
        let harness = spawn_panel().await;
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/api/commit/rpm", harness.base_url))
            .json(&json!({ "value": 4500.0 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);

        let sent = wait_for_commands(&harness.sink, 1).await;
        assert_eq!(sent, vec![ControlCommand::new(ControlTarget::Rpm, 3000.0)]);
    }

    #[tokio::test]
    async fn test_commit_unknown_target_is_not_found() {
        let harness = spawn_panel().await;
        let response = reqwest::Client::new()
            .post(format!("{}/api/commit/heater", harness.base_url))
            .json(&json!({ "value": 1.0 }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        assert!(harness.sink.sent.lock().unwrap().is_empty());
    }
}
