//! Infrastructure layer - External service implementations

pub mod catalog;
pub mod credentials;
pub mod llm;
pub mod logging;
pub mod services;
