//! Domain layer - Core entities and traits

pub mod catalog;
pub mod credentials;
pub mod error;
pub mod llm;

pub use catalog::{
    convert_price, determine_features, manifest_file_name, render_position_file, ApiModel,
    ManifestChange, ManifestRepository, ModelFeature, ModelList, ModelManifest, ModelSource,
    StoredManifest,
};
pub use credentials::{Credential, CredentialProvider, CredentialType};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmConnector, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole,
    SamplingParams, Usage,
};
