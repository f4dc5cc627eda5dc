// Weather telemetry charts - windowing engine and HTTP gateway
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
