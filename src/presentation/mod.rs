// Presentation layer - HTTP handlers and response mapping
pub mod app_state;
pub mod error;
pub mod handlers;
