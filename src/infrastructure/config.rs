use crate::application::polling_service::POLL_DELAY;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "config/monitor";

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub backend: BackendSettings,
    pub polling: PollingSettings,
    pub panel: PanelSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    /// Upper bound on one backend request; 0 disables it.
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelSettings {
    pub bind: String,
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("backend.base_url", "http://localhost:5000")?
        .set_default("backend.request_timeout_ms", 5000_i64)?
        .set_default("polling.interval_ms", POLL_DELAY.as_millis() as i64)?
        .set_default("panel.bind", "127.0.0.1:8090")?)
}

/// Load `config/monitor.{toml,yaml,json,...}` over the built-in defaults.
/// The file is optional.
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = defaults()?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
