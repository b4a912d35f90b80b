//! Novita AI model provider
//!
//! Tooling behind a host plugin that adds Novita AI as a model provider:
//! - API key validation with a minimal chat completion
//! - An OpenAI-compatible client for the Novita endpoints
//! - Sync of the remote model list into per-model YAML manifests and a
//!   `_position.yaml` ordering file

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
