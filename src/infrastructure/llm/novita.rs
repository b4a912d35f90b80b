use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::catalog::ParameterRule;
use crate::domain::{
    ApiModel, DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message,
    MessageRole, ModelList, ModelSource, Usage,
};

pub const DEFAULT_NOVITA_BASE_URL: &str = "https://api.novita.ai/v3/openai";

/// Novita AI client speaking the OpenAI-compatible API
#[derive(Debug)]
pub struct NovitaClient<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    base_url: String,
}

impl<C: HttpClientTrait> NovitaClient<C> {
    pub fn new(client: C, api_key: impl AsRef<str>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_NOVITA_BASE_URL)
    }

    pub fn with_base_url(client: C, api_key: impl AsRef<str>, base_url: impl Into<String>) -> Self {
        let auth_header = format!("Bearer {}", api_key.as_ref());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header: Some(auth_header),
            base_url,
        }
    }

    /// Client without credentials; only public endpoints such as the model
    /// list will answer.
    pub fn anonymous(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            auth_header: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref auth) = self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let messages: Vec<ChatMessage> = request.messages.iter().map(ChatMessage::from_domain).collect();

        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        if let (Some(body), Ok(serde_json::Value::Object(params))) =
            (body.as_object_mut(), serde_json::to_value(&request.params))
        {
            body.extend(params);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: ChatResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("novita", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("novita", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());
        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(reason) = choice.finish_reason {
            llm_response = llm_response.with_finish_reason(FinishReason::parse(&reason));
        }

        if let Some(usage) = response.usage {
            llm_response =
                llm_response.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for NovitaClient<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        request.params.check(&ParameterRule::default_chat_rules())?;

        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);

        debug!(model, url = %url, "Sending chat completion");
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "novita"
    }
}

#[async_trait]
impl<C: HttpClientTrait> ModelSource for NovitaClient<C> {
    async fn list_models(&self) -> Result<Vec<ApiModel>, DomainError> {
        let url = self.models_url();

        debug!(url = %url, "Fetching model list");
        let response = self.client.get_json(&url, self.headers()).await?;

        let list: ModelList = serde_json::from_value(response).map_err(|e| {
            DomainError::provider("novita", format!("Failed to parse model list: {}", e))
        })?;

        Ok(list.data)
    }
}

// OpenAI-compatible wire types

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn from_domain(message: &'a Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };

        Self {
            role,
            content: &message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
