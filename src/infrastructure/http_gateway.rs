// HTTP gateway to the tank backend
use crate::application::tank_gateway::{ControlSink, GatewayError, SnapshotSource};
use crate::domain::control::ControlCommand;
use crate::domain::snapshot::{DecodeError, Snapshot};
use async_trait::async_trait;
use std::time::Duration;

const SNAPSHOT_PATH: &str = "/api/datos";
/// Bound on establishing the TCP connection, independent of the request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct HttpTankGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTankGateway {
    pub fn new(base_url: String, request_timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pass 2xx responses through; turn anything else into `GatewayError::Status`
/// carrying the body text when it can be read.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl SnapshotSource for HttpTankGateway {
    async fn fetch_snapshot(&self) -> Result<Snapshot, GatewayError> {
        let response = self
            .client
            .get(self.url(SNAPSHOT_PATH))
            .header("Accept", "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let body = response.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&body).map_err(DecodeError::from)?;
        Ok(Snapshot::from_value(value)?)
    }
}

#[async_trait]
impl ControlSink for HttpTankGateway {
    async fn send_command(&self, command: &ControlCommand) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url(command.endpoint()))
            .json(&command.payload())
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
