pub mod diagnostics;
pub mod error;
pub mod metrics;
pub mod repository;
pub mod store;
