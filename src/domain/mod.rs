// Domain layer - Tank readings, derived display state and history window
pub mod control;
pub mod derived;
pub mod history;
pub mod snapshot;
