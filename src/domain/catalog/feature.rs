use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ApiModel;

/// Parameter count above which a model is considered capable of agent thought
const AGENT_THOUGHT_MIN_BILLIONS: u64 = 70;

/// Description keywords advertising reasoning ("thinking", "reasoning", "thought")
const THINKING_KEYWORDS: [&str; 3] = ["思维", "推理", "思考"];

/// First `<digits>b` run in a lowercased model id, e.g. `405b`
static MODEL_SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)b").unwrap());

/// Capabilities a manifest can advertise to the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFeature {
    ToolCall,
    MultiToolCall,
    AgentThought,
    Vision,
    StreamToolCall,
    Document,
    Video,
    Audio,
    StructuredOutput,
}

impl ModelFeature {
    pub const ALL: [ModelFeature; 9] = [
        ModelFeature::ToolCall,
        ModelFeature::MultiToolCall,
        ModelFeature::AgentThought,
        ModelFeature::Vision,
        ModelFeature::StreamToolCall,
        ModelFeature::Document,
        ModelFeature::Video,
        ModelFeature::Audio,
        ModelFeature::StructuredOutput,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFeature::ToolCall => "tool-call",
            ModelFeature::MultiToolCall => "multi-tool-call",
            ModelFeature::AgentThought => "agent-thought",
            ModelFeature::Vision => "vision",
            ModelFeature::StreamToolCall => "stream-tool-call",
            ModelFeature::Document => "document",
            ModelFeature::Video => "video",
            ModelFeature::Audio => "audio",
            ModelFeature::StructuredOutput => "structured-output",
        }
    }

    /// Manifest features implied by one raw API capability flag
    fn from_api_flag(flag: &str) -> &'static [ModelFeature] {
        match flag {
            "function-calling" => &[
                ModelFeature::ToolCall,
                ModelFeature::MultiToolCall,
                ModelFeature::StreamToolCall,
            ],
            "structured-outputs" => &[ModelFeature::StructuredOutput],
            "vision" => &[ModelFeature::Vision],
            _ => &[],
        }
    }
}

impl fmt::Display for ModelFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the manifest feature set for a remote model.
///
/// Returned without duplicates, in `ModelFeature` declaration order.
pub fn determine_features(model: &ApiModel) -> Vec<ModelFeature> {
    let mut features: Vec<ModelFeature> = model
        .features
        .iter()
        .flat_map(|flag| ModelFeature::from_api_flag(flag).iter().copied())
        .collect();

    if has_agent_thought(model) {
        features.push(ModelFeature::AgentThought);
    }

    features.sort();
    features.dedup();
    features
}

fn has_agent_thought(model: &ApiModel) -> bool {
    let id = model.id.to_lowercase();

    if id.contains("think") {
        return true;
    }

    if THINKING_KEYWORDS
        .iter()
        .any(|keyword| model.description.contains(keyword))
    {
        return true;
    }

    MODEL_SIZE_PATTERN
        .captures(&id)
        .and_then(|caps| caps.get(1))
        .and_then(|size| size.as_str().parse::<u64>().ok())
        .map(|billions| billions > AGENT_THOUGHT_MIN_BILLIONS)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_calling_expands_to_tool_features() {
        let model = ApiModel::new("meta-llama/llama-3-8b-instruct", 8192)
            .with_feature("function-calling");

        assert_eq!(
            determine_features(&model),
            vec![
                ModelFeature::ToolCall,
                ModelFeature::MultiToolCall,
                ModelFeature::StreamToolCall,
            ]
        );
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let model = ApiModel::new("mistralai/mistral-7b-instruct", 32768)
            .with_feature("reasoning")
            .with_feature("vision")
            .with_feature("structured-outputs");

        assert_eq!(
            determine_features(&model),
            vec![ModelFeature::Vision, ModelFeature::StructuredOutput]
        );
    }

    #[test]
    fn test_duplicate_flags_are_deduplicated() {
        let model = ApiModel::new("qwen/qwen-vl", 8192)
            .with_feature("vision")
            .with_feature("vision");

        assert_eq!(determine_features(&model), vec![ModelFeature::Vision]);
    }

    #[test]
    fn test_agent_thought_from_id() {
        let model = ApiModel::new("qwen/qwen3-8b-Thinking", 32768);
        assert_eq!(determine_features(&model), vec![ModelFeature::AgentThought]);
    }

    #[test]
    fn test_agent_thought_from_description() {
        let model = ApiModel::new("deepseek/deepseek-r1-distill-qwen-14b", 32768)
            .with_description("具备强大推理能力的模型");

        assert_eq!(determine_features(&model), vec![ModelFeature::AgentThought]);
    }

    #[test]
    fn test_agent_thought_from_model_size() {
        let large = ApiModel::new("meta-llama/llama-3.1-405b-instruct", 32768);
        let boundary = ApiModel::new("meta-llama/llama-3-70b-instruct", 8192);
        let small = ApiModel::new("meta-llama/llama-3-8b-instruct", 8192);

        assert_eq!(determine_features(&large), vec![ModelFeature::AgentThought]);
        assert!(determine_features(&boundary).is_empty());
        assert!(determine_features(&small).is_empty());
    }

    #[test]
    fn test_only_first_size_match_counts() {
        // "3b" is found before "72b"
        let model = ApiModel::new("vendor/mix-3b-72b", 4096);
        assert!(determine_features(&model).is_empty());
    }

    #[test]
    fn test_feature_serialization() {
        let yaml = serde_yaml::to_string(&ModelFeature::StructuredOutput).unwrap();
        assert_eq!(yaml.trim(), "structured-output");

        for feature in ModelFeature::ALL {
            let value = serde_json::to_value(feature).unwrap();
            assert_eq!(value, serde_json::json!(feature.as_str()));
        }
    }
}
