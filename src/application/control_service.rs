// Control service - fire-and-forget actuator commands
use crate::application::tank_gateway::ControlSink;
use crate::domain::control::ControlCommand;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub struct ControlDispatcher {
    sink: Arc<dyn ControlSink>,
}

impl ControlDispatcher {
    pub fn new(sink: Arc<dyn ControlSink>) -> Self {
        Self { sink }
    }

    /// Send `command` on its own task and return immediately. The outcome is
    /// only logged; the effect shows up in a later poll snapshot. Commands may
    /// overlap each other and the polling loop.
    pub fn dispatch(&self, command: ControlCommand) -> JoinHandle<()> {
        let sink = self.sink.clone();
        tokio::spawn(async move {
            deliver(sink.as_ref(), command).await;
        })
    }
}

async fn deliver(sink: &dyn ControlSink, command: ControlCommand) -> bool {
    match sink.send_command(&command).await {
        Ok(()) => {
            tracing::info!(
                control = %command.target,
                value = command.value,
                "control command sent"
            );
            true
        }
        Err(e) => {
            tracing::error!(
                control = %command.target,
                value = command.value,
                error = %e,
                "control command failed"
            );
            false
        }
    }
}
