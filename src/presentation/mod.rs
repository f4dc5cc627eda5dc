// Presentation layer - HTTP surface for the render models
pub mod app_state;
pub mod error;
pub mod handlers;
