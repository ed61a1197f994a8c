/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Notification formatting and dispatch
pub mod notify;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
