pub mod aggregate;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod streaming;
pub mod upstream;
