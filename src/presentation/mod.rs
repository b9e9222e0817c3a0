// Presentation layer - Panel view and local HTTP API
pub mod app_state;
pub mod handlers;
pub mod view;
