// Domain layer - Dashboard document model
pub mod dashboard;
pub mod error;
pub mod label;
pub mod metrics;
