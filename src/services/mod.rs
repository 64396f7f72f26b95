pub mod dataset;
pub mod event_index;
pub mod impact_service;
pub mod indicators;
pub mod loader;
pub mod metrics;
pub mod query_service;
