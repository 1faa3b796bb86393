//! OpenAI-compatible LLM client (Chat Completions API) with tool calling.
//!
//! Works with any endpoint that speaks the OpenAI wire format (OpenAI, Groq, ...).
//! Bound tools are sent as `tools`; `tool_calls` in the reply become `ToolCall`s.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmError, LlmResponse};
use crate::message::{ContentPart, Message, MessageContent};
use crate::state::ToolCall;
use crate::tool_source::ToolSpec;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key, usually from `OPENAI_API_KEY`.
    pub api_key: String,
    /// Base URL without trailing slash, default `https://api.openai.com/v1`.
    pub base_url: String,
    /// Model id, e.g. `gpt-4o-mini`.
    pub model: String,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `OPENAI_MODEL` (optional).
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::Auth("OPENAI_API_KEY not set".to_string()))?
            .trim()
            .to_string();
        if api_key.is_empty() {
            return Err(LlmError::Auth("OPENAI_API_KEY is empty".to_string()));
        }
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, base_url, model))
    }

    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    parameters: Value,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct RequestBody {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ResponseFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ResponseToolCall {
    id: String,
    function: ResponseFunction,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<Value>,
    #[serde(default)]
    tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    choices: Vec<ResponseChoice>,
}

fn to_wire(message: &Message) -> WireMessage {
    match message {
        Message::System(s) | Message::User(s) => WireMessage {
            role: message.role(),
            content: Some(s.clone()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        },
        Message::Assistant(a) => WireMessage {
            role: "assistant",
            content: Some(a.content.to_text()).filter(|s| !s.is_empty()),
            tool_calls: a
                .tool_calls
                .iter()
                .map(|tc| WireToolCall {
                    id: tc.id.clone(),
                    kind: "function",
                    function: WireFunctionCall {
                        name: tc.name.clone(),
                        arguments: tc.arguments.to_string(),
                    },
                })
                .collect(),
            tool_call_id: None,
        },
        Message::Tool(t) => WireMessage {
            role: "tool",
            content: Some(t.content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: Some(t.call_id.clone()),
        },
    }
}

/// Maps reply content (string, array of parts, or null) to `MessageContent`.
fn parse_content(content: Option<Value>) -> MessageContent {
    match content {
        Some(Value::String(s)) => MessageContent::Text(s),
        Some(Value::Array(parts)) => MessageContent::Parts(
            parts
                .into_iter()
                .map(|p| {
                    let kind = p.get("type").and_then(Value::as_str).unwrap_or("text");
                    match (kind, p.get("text").and_then(Value::as_str)) {
                        ("text", Some(text)) => ContentPart::Text {
                            text: text.to_string(),
                        },
                        ("text", None) => ContentPart::Text {
                            text: String::new(),
                        },
                        (other, _) => ContentPart::Other {
                            kind: other.to_string(),
                        },
                    }
                })
                .collect(),
        ),
        _ => MessageContent::default(),
    }
}

/// Arguments arrive as a JSON string; unparseable text is kept as a JSON string
/// so argument validation reports it instead of silently dropping it.
fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_response(text: &str) -> Result<LlmResponse, LlmError> {
    let parsed: ResponseBody =
        serde_json::from_str(text).map_err(|e| LlmError::Parsing(format!("{e}: {text}")))?;
    let message = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Parsing("no choices in response".to_string()))?
        .message;
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall {
            id: tc.id,
            name: tc.function.name,
            arguments: parse_arguments(&tc.function.arguments),
        })
        .collect();
    Ok(LlmResponse {
        content: parse_content(message.content),
        tool_calls,
    })
}

/// OpenAI-compatible chat client implementing `LlmClient`.
///
/// **Interaction**: Used by `ClassifyNode` (no tools) and `AssistantNode`
/// (tools bound via `with_tools`, usually from `ToolSource::list_tools`).
#[derive(Debug)]
pub struct ChatOpenAI {
    config: OpenAiConfig,
    client: reqwest::Client,
    tools: Vec<ToolSpec>,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;
        Ok(Self {
            config,
            client,
            tools: Vec::new(),
            temperature: None,
        })
    }

    /// Builds from environment (see `OpenAiConfig::from_env`).
    pub fn from_env() -> Result<Self, LlmError> {
        OpenAiConfig::from_env().and_then(Self::new)
    }

    /// Binds tools; the model may then answer with tool calls.
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn build_body(&self, messages: &[Message]) -> RequestBody {
        RequestBody {
            model: self.config.model.clone(),
            messages: messages.iter().map(to_wire).collect(),
            tools: self
                .tools
                .iter()
                .map(|t| WireTool {
                    kind: "function",
                    function: WireFunction {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: t.input_schema.clone(),
                    },
                })
                .collect(),
            temperature: self.temperature,
        }
    }

    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = self.build_body(messages);
        debug!(model = %self.config.model, messages = messages.len(), tools = self.tools.len(), "chat completion request");
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth(text),
                429 => LlmError::RateLimit(text),
                400..=499 => LlmError::InvalidRequest(text),
                _ => LlmError::ApiError(text),
            });
        }
        parse_response(&text)
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        Ok(self.chat(messages).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::AssistantMessage;

    #[test]
    fn parses_text_reply() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"greeting"}}]}"#;
        let r = parse_response(body).unwrap();
        assert_eq!(r.content, MessageContent::Text("greeting".into()));
        assert!(r.tool_calls.is_empty());
    }

    #[test]
    fn parses_tool_calls_with_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null,
            "tool_calls":[{"id":"call_1","type":"function",
            "function":{"name":"fetch_stock_price","arguments":"{\"symbol\":\"ABC\"}"}}]}}]}"#;
        let r = parse_response(body).unwrap();
        assert!(r.content.is_empty());
        assert_eq!(r.tool_calls.len(), 1);
        assert_eq!(r.tool_calls[0].id, "call_1");
        assert_eq!(r.tool_calls[0].arguments, serde_json::json!({"symbol": "ABC"}));
        assert!(!r.is_degenerate());
    }

    #[test]
    fn parses_multipart_content() {
        let body = r#"{"choices":[{"message":{"content":[{"type":"text","text":""},{"type":"image_url"}]}}]}"#;
        let r = parse_response(body).unwrap();
        assert!(matches!(r.content, MessageContent::Parts(ref p) if p.len() == 2));
        assert!(r.is_degenerate());
    }

    #[test]
    fn malformed_arguments_are_kept_as_string() {
        assert_eq!(parse_arguments("not json"), Value::String("not json".into()));
        assert_eq!(parse_arguments("  "), serde_json::json!({}));
    }

    #[test]
    fn no_choices_is_a_parse_error() {
        let err = parse_response(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, LlmError::Parsing(_)));
    }

    #[test]
    fn wire_mapping_keeps_tool_pairing() {
        let assistant = Message::Assistant(AssistantMessage {
            content: MessageContent::default(),
            tool_calls: vec![ToolCall::new("c1", "get_current_weather", serde_json::json!({"location": "Oslo"}))],
        });
        let wire = to_wire(&assistant);
        assert_eq!(wire.role, "assistant");
        assert!(wire.content.is_none());
        assert_eq!(wire.tool_calls[0].function.arguments, r#"{"location":"Oslo"}"#);

        let tool = to_wire(&Message::tool("c1", "get_current_weather", "sunny"));
        assert_eq!(tool.role, "tool");
        assert_eq!(tool.tool_call_id.as_deref(), Some("c1"));
    }
}
