// Application layer - Windowing engine, chart assembly and refresh plumbing
pub mod chart_service;
pub mod feeds;
pub mod normalizer;
pub mod range_resolver;
pub mod scheduler;
pub mod sequenced;
pub mod session;
pub mod summary;
pub mod telemetry_source;
pub mod windowing;
