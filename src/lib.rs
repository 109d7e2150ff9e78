// altgen - image alt-text generation engine with pluggable captioning backends

pub mod backend;
pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod metrics;
pub mod reconcile;
pub mod server;
pub mod sources;
pub mod utils;
