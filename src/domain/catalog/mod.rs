//! Model catalog domain
//!
//! The remote platform publishes its model list as OpenAI-compatible
//! `/models` records. Each model is mirrored locally as a YAML manifest that
//! the host application reads, plus a `_position.yaml` ordering file.

mod api_model;
mod feature;
mod manifest;
mod position;
mod pricing;
mod repository;
mod source;

pub use api_model::{display_label, ApiModel, ModelList};
pub use feature::{determine_features, ModelFeature};
pub use manifest::{
    manifest_file_name, Label, ManifestChange, ModelManifest, ModelProperties, ParameterRule,
    Pricing, RuleValue,
};
pub use position::{render_position_file, title_case, POSITION_FILE_NAME};
pub use pricing::{convert_price, PRICE_UNIT};
pub use repository::{ManifestRepository, StoredManifest};
pub use source::ModelSource;

#[cfg(test)]
pub use source::mock::MockModelSource;
