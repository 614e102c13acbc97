/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for HTTP endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Data records
pub mod model;
/// Repositories
pub mod repo;
/// Subscription orchestration
pub mod service;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
/// HTML rendering
pub mod view;
