pub mod analyzer;
pub mod app;
pub mod cli;
pub mod config;
pub mod documents;
pub mod error;
pub mod export;
pub mod interactive;
pub mod loader;
