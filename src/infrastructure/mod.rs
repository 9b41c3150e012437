// Infrastructure layer - Filesystem adapters and configuration
pub mod atomic_file;
pub mod config;
pub mod csv_reader;
pub mod inbox_repository;
pub mod json_publisher;
pub mod number;
