//! Configuration: LLM endpoint, model and run options.
//!
//! **Interaction**: Used by `main` to build the LLM client for either pipeline.
//! Loads from environment and CLI args via `Config::from_env_and_args`.

use std::sync::Arc;

use agentgraph::{ChatOpenAI, LlmClient, LlmResponse, MockLlm, OpenAiConfig, ToolCall, ToolSpec};
use anyhow::{Context, Result};

/// Resolved configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// `None` in offline mode.
    pub openai: Option<OpenAiConfig>,
    pub temperature: f32,
}

impl Config {
    /// Resolves config from environment and CLI. Caller should run
    /// `dotenv::dotenv().ok()` first. `--model` overrides `OPENAI_MODEL`.
    pub fn from_env_and_args(model: Option<String>, temperature: f32, offline: bool) -> Result<Self> {
        if offline {
            return Ok(Self {
                openai: None,
                temperature,
            });
        }
        let mut openai = OpenAiConfig::from_env()
            .context("OPENAI_API_KEY not set (put it in .env or environment, or pass --offline)")?;
        if let Some(model) = model {
            openai = openai.with_model(model);
        }
        Ok(Self {
            openai: Some(openai),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        self.openai.as_ref().map_or("offline", |c| c.model.as_str())
    }

    /// LLM for the classifier (no tools).
    pub fn classifier_llm(&self, question: &str) -> Result<Arc<dyn LlmClient>> {
        match &self.openai {
            Some(cfg) => Ok(Arc::new(
                ChatOpenAI::new(cfg.clone())?.with_temperature(self.temperature),
            )),
            None => Ok(Arc::new(offline_classifier(question))),
        }
    }

    /// LLM for the assistant, bound to `tools`.
    pub fn agent_llm(&self, tools: Vec<ToolSpec>, inputs: &[String]) -> Result<Arc<dyn LlmClient>> {
        match &self.openai {
            Some(cfg) => Ok(Arc::new(
                ChatOpenAI::new(cfg.clone())?
                    .with_tools(tools)
                    .with_temperature(self.temperature),
            )),
            None => Ok(Arc::new(offline_agent(inputs))),
        }
    }
}

/// Keyword stand-in for the classifier model.
fn offline_classifier(question: &str) -> MockLlm {
    let first = question
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    let label = if matches!(first.as_str(), "hi" | "hello" | "hey") {
        "greeting"
    } else {
        "search"
    };
    MockLlm::with_no_tool_calls(label)
}

/// Scripted stand-in for the assistant: asks for a quote when a turn mentions a
/// price, the weather when it mentions weather, otherwise answers directly.
fn offline_agent(inputs: &[String]) -> MockLlm {
    let mut script = Vec::new();
    for (turn, input) in inputs.iter().enumerate() {
        let lower = input.to_lowercase();
        let last_word = input
            .split_whitespace()
            .last()
            .unwrap_or("")
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_string();
        let call = if lower.contains("price") {
            Some(ToolCall::new(
                format!("call_{}", turn),
                "fetch_stock_price",
                serde_json::json!({ "symbol": last_word.to_uppercase() }),
            ))
        } else if lower.contains("weather") {
            Some(ToolCall::new(
                format!("call_{}", turn),
                "get_current_weather",
                serde_json::json!({ "location": last_word }),
            ))
        } else {
            None
        };
        match call {
            Some(call) => {
                script.push(LlmResponse::tool_calls(vec![call]));
                script.push(LlmResponse::text("Here is what the tool reported."));
            }
            None => script.push(LlmResponse::text(format!("(offline) You said: {}", input))),
        }
    }
    MockLlm::scripted(script)
}
