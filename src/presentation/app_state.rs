// Application state for HTTP handlers
use crate::application::control_service::ControlDispatcher;
use crate::presentation::view::PanelReader;

#[derive(Clone)]
pub struct AppState {
    pub panel: PanelReader,
    pub dispatcher: ControlDispatcher,
}
