use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Mapping;

use super::{convert_price, determine_features, display_label, ApiModel, PRICE_UNIT};

/// Model manifest as stored on disk, one YAML file per model.
///
/// Keys the sync does not manage are kept in `extra` so hand edits survive a
/// rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub model: String,
    pub label: Label,
    #[serde(default = "default_model_type")]
    pub model_type: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub model_properties: ModelProperties,
    #[serde(default)]
    pub parameter_rules: Vec<ParameterRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(rename = "zh_Hans", default)]
    pub zh_hans: String,
    #[serde(rename = "en_US", default)]
    pub en_us: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProperties {
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub context_size: Option<u64>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<RuleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<RuleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<RuleValue>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Scalar bound or default of a parameter rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(deserialize_with = "price_string")]
    pub input: String,
    #[serde(deserialize_with = "price_string")]
    pub output: String,
    #[serde(default = "default_unit", deserialize_with = "price_string")]
    pub unit: String,
    pub currency: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A single field the sync changed on an existing manifest
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestChange {
    ContextSize { old: Option<u64>, new: u64 },
    InputPrice { old: Option<String>, new: String },
    OutputPrice { old: Option<String>, new: String },
    Labels { old_zh_hans: String, old_en_us: String, new: String },
    Features { old: Vec<String>, new: Vec<String> },
}

fn default_model_type() -> String {
    "llm".to_string()
}

fn default_mode() -> String {
    "chat".to_string()
}

fn default_unit() -> String {
    PRICE_UNIT.to_string()
}

/// Hand-written manifests sometimes carry prices as bare numbers
fn price_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a price string or number, got {:?}",
            other
        ))),
    }
}

impl RuleValue {
    /// Numeric value, if the rule holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Boolean(_) | Self::Text(_) => None,
        }
    }
}

impl ParameterRule {
    fn templated(name: &str, min: RuleValue, max: RuleValue, default: RuleValue) -> Self {
        Self {
            name: name.to_string(),
            use_template: Some(name.to_string()),
            min: Some(min),
            max: Some(max),
            default: Some(default),
            extra: Mapping::new(),
        }
    }

    /// Rules every newly created chat manifest starts with
    pub fn default_chat_rules() -> Vec<ParameterRule> {
        use RuleValue::Integer;

        vec![
            Self::templated("temperature", Integer(0), Integer(2), Integer(1)),
            Self::templated("top_p", Integer(0), Integer(1), Integer(1)),
            Self::templated("max_tokens", Integer(1), Integer(2048), Integer(512)),
            Self::templated("frequency_penalty", Integer(-2), Integer(2), Integer(0)),
            Self::templated("presence_penalty", Integer(-2), Integer(2), Integer(0)),
        ]
    }
}

impl Pricing {
    pub fn new(input: String, output: String, currency: impl Into<String>) -> Self {
        Self {
            input,
            output,
            unit: PRICE_UNIT.to_string(),
            currency: currency.into(),
            extra: Mapping::new(),
        }
    }
}

impl ModelManifest {
    /// Build a fresh manifest for a model that has no file yet
    pub fn from_api(model: &ApiModel, currency: &str) -> Self {
        let label = display_label(model);

        Self {
            model: model.id.clone(),
            label: Label {
                zh_hans: label.clone(),
                en_us: label,
                extra: Mapping::new(),
            },
            model_type: default_model_type(),
            features: feature_names(model),
            model_properties: ModelProperties {
                mode: default_mode(),
                context_size: Some(model.context_size),
                extra: Mapping::new(),
            },
            parameter_rules: ParameterRule::default_chat_rules(),
            pricing: Some(Pricing::new(
                convert_price(model.input_token_price_per_m),
                convert_price(model.output_token_price_per_m),
                currency,
            )),
            extra: Mapping::new(),
        }
    }

    /// Bring the synced fields in line with the remote model.
    ///
    /// Returns every change applied; an empty list means the manifest
    /// already matched and need not be rewritten.
    pub fn reconcile(&mut self, model: &ApiModel, currency: &str) -> Vec<ManifestChange> {
        let mut changes = Vec::new();

        if self.model_properties.context_size != Some(model.context_size) {
            changes.push(ManifestChange::ContextSize {
                old: self.model_properties.context_size,
                new: model.context_size,
            });
            self.model_properties.context_size = Some(model.context_size);
        }

        let input = convert_price(model.input_token_price_per_m);
        let output = convert_price(model.output_token_price_per_m);
        let pricing = self
            .pricing
            .get_or_insert_with(|| Pricing::new(String::new(), String::new(), currency));

        if pricing.input != input {
            changes.push(ManifestChange::InputPrice {
                old: non_empty(&pricing.input),
                new: input.clone(),
            });
            pricing.input = input;
        }

        if pricing.output != output {
            changes.push(ManifestChange::OutputPrice {
                old: non_empty(&pricing.output),
                new: output.clone(),
            });
            pricing.output = output;
        }

        let title = display_label(model);
        if self.label.zh_hans != title || self.label.en_us != title {
            changes.push(ManifestChange::Labels {
                old_zh_hans: self.label.zh_hans.clone(),
                old_en_us: self.label.en_us.clone(),
                new: title.clone(),
            });
            self.label.zh_hans = title.clone();
            self.label.en_us = title;
        }

        let features = feature_names(model);
        let current: BTreeSet<&str> = self.features.iter().map(String::as_str).collect();
        let wanted: BTreeSet<&str> = features.iter().map(String::as_str).collect();
        if current != wanted {
            changes.push(ManifestChange::Features {
                old: self.features.clone(),
                new: features.clone(),
            });
            self.features = features;
        }

        changes
    }
}

fn feature_names(model: &ApiModel) -> Vec<String> {
    determine_features(model)
        .into_iter()
        .map(|f| f.as_str().to_string())
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// File name for a new manifest: the id without its family prefix.
///
/// `meta-llama/llama-3-8b-instruct` becomes `llama-3-8b-instruct.yaml`; ids
/// without a family keep their full name.
pub fn manifest_file_name(model_id: &str) -> String {
    let stem = match model_id.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => rest.split('/').collect::<Vec<_>>().join("-"),
        Some((family, _)) => family.to_string(),
        None => model_id.to_string(),
    };

    format!("{}.yaml", stem)
}

impl fmt::Display for ManifestChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextSize { old, new } => {
                write!(f, "context_size: {} -> {}", display_opt(old), new)
            }
            Self::InputPrice { old, new } => {
                write!(f, "input_price: {} -> {}", display_opt(old), new)
            }
            Self::OutputPrice { old, new } => {
                write!(f, "output_price: {} -> {}", display_opt(old), new)
            }
            Self::Labels {
                old_zh_hans,
                old_en_us,
                new,
            } => write!(
                f,
                "labels: zh_Hans: {}, en_US: {} -> {}",
                old_zh_hans, old_en_us, new
            ),
            Self::Features { old, new } => {
                write!(f, "features: [{}] -> [{}]", old.join(", "), new.join(", "))
            }
        }
    }
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}
