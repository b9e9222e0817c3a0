// Application layer - Polling, control dispatch and clock use cases
pub mod clock_service;
pub mod control_service;
pub mod polling_service;
pub mod tank_gateway;
