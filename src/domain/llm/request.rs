use serde::Serialize;

use super::Message;
use crate::domain::catalog::ParameterRule;
use crate::domain::DomainError;

/// Optional sampling settings of a chat completion.
///
/// Field names match the `parameter_rules` entries of a model manifest, so a
/// request can be checked against the bounds a manifest advertises.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SamplingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
}

impl SamplingParams {
    pub fn temperature(mut self, value: f32) -> Self {
        self.temperature = Some(value);
        self
    }

    pub fn top_p(mut self, value: f32) -> Self {
        self.top_p = Some(value);
        self
    }

    pub fn max_tokens(mut self, value: u32) -> Self {
        self.max_tokens = Some(value);
        self
    }

    pub fn frequency_penalty(mut self, value: f32) -> Self {
        self.frequency_penalty = Some(value);
        self
    }

    pub fn presence_penalty(mut self, value: f32) -> Self {
        self.presence_penalty = Some(value);
        self
    }

    fn values(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("temperature", self.temperature.map(f64::from)),
            ("top_p", self.top_p.map(f64::from)),
            ("max_tokens", self.max_tokens.map(f64::from)),
            ("frequency_penalty", self.frequency_penalty.map(f64::from)),
            ("presence_penalty", self.presence_penalty.map(f64::from)),
        ]
    }

    /// Reject values outside the `min`/`max` of the matching rule.
    ///
    /// Unset values, rules without numeric bounds and settings no rule
    /// names are accepted.
    pub fn check(&self, rules: &[ParameterRule]) -> Result<(), DomainError> {
        for (name, value) in self.values() {
            let Some(value) = value else { continue };
            let Some(rule) = rules.iter().find(|r| r.name == name) else {
                continue;
            };

            let min = rule.min.as_ref().and_then(|v| v.as_f64());
            let max = rule.max.as_ref().and_then(|v| v.as_f64());
            let below = min.is_some_and(|min| value < min);
            let above = max.is_some_and(|max| value > max);

            if below || above {
                return Err(DomainError::validation(format!(
                    "{} = {} is outside [{}, {}]",
                    name,
                    value,
                    min.map_or("-inf".to_string(), |v| v.to_string()),
                    max.map_or("inf".to_string(), |v| v.to_string()),
                )));
            }
        }

        Ok(())
    }
}

/// A non-streaming chat completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub params: SamplingParams,
}

impl LlmRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            params: SamplingParams::default(),
        }
    }

    /// Single user message
    pub fn prompt(content: impl Into<String>) -> Self {
        Self::new(vec![Message::user(content)])
    }

    pub fn with_params(mut self, params: SamplingParams) -> Self {
        self.params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_request_serializes_only_set_params() {
        let request =
            LlmRequest::prompt("ping").with_params(SamplingParams::default().max_tokens(5));

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "messages": [{ "role": "user", "content": "ping" }],
                "max_tokens": 5
            })
        );
    }

    #[test]
    fn test_check_accepts_values_within_default_rules() {
        let params = SamplingParams::default()
            .temperature(2.0)
            .top_p(0.9)
            .max_tokens(5)
            .presence_penalty(-2.0);

        params.check(&ParameterRule::default_chat_rules()).unwrap();
    }

    #[test]
    fn test_check_rejects_out_of_range_value() {
        let params = SamplingParams::default().max_tokens(4096);

        let err = params
            .check(&ParameterRule::default_chat_rules())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: max_tokens = 4096 is outside [1, 2048]"
        );
    }

    #[test]
    fn test_check_ignores_unknown_rules() {
        let params = SamplingParams::default().temperature(5.0);
        params.check(&[]).unwrap();
    }
}
