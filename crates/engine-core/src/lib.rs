pub mod context;
pub mod metrics;
pub mod retry;
