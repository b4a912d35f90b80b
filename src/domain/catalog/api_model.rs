use serde::{Deserialize, Serialize};

/// A model record as returned by the platform's `/models` endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiModel {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub context_size: u64,
    /// Price per million input tokens, in units of 0.0001
    #[serde(default)]
    pub input_token_price_per_m: f64,
    /// Price per million output tokens, in units of 0.0001
    #[serde(default)]
    pub output_token_price_per_m: f64,
    /// Raw capability flags (`function-calling`, `vision`, ...)
    #[serde(default)]
    pub features: Vec<String>,
}

impl ApiModel {
    pub fn new(id: impl Into<String>, context_size: u64) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            description: String::new(),
            context_size,
            input_token_price_per_m: 0.0,
            output_token_price_per_m: 0.0,
            features: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prices(mut self, input_per_m: f64, output_per_m: f64) -> Self {
        self.input_token_price_per_m = input_per_m;
        self.output_token_price_per_m = output_per_m;
        self
    }

    pub fn with_feature(mut self, feature: impl Into<String>) -> Self {
        self.features.push(feature.into());
        self
    }

    /// Model family, i.e. the segment before the first `/`
    pub fn family(&self) -> &str {
        self.id.split('/').next().unwrap_or_default()
    }
}

/// `GET /models` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ModelList {
    pub data: Vec<ApiModel>,
}

/// Label shown for a model: the trimmed display name, or the id when blank
pub fn display_label(model: &ApiModel) -> String {
    let name = model.display_name.trim();
    if name.is_empty() {
        model.id.clone()
    } else {
        name.to_string()
    }
}
