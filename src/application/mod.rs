// Application layer - Pipeline use cases
pub mod assembler;
pub mod dashboard_service;
pub mod loaders;
pub mod publisher;
pub mod source_repository;
