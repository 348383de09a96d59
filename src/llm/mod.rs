use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::gateway::LlmService;
use crate::utils::{AnalyzerError, AnalyzerResult};

const MAX_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.3;

/// Bedrock Anthropic Messages 请求体
#[derive(Serialize)]
struct InvokeRequest<'a> {
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
    anthropic_version: &'a str,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// Bedrock Anthropic Messages 响应体
#[derive(Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub struct BedrockService {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
    anthropic_version: String,
}

impl BedrockService {
    pub fn new(sdk_config: &SdkConfig, config: &LlmConfig) -> Self {
        Self::with_client(aws_sdk_bedrockruntime::Client::new(sdk_config), config)
    }

    pub fn with_client(client: aws_sdk_bedrockruntime::Client, config: &LlmConfig) -> Self {
        Self {
            client,
            model_id: config.model_id_or_default().to_string(),
            anthropic_version: config.anthropic_version_or_default().to_string(),
        }
    }
}

#[async_trait]
impl LlmService for BedrockService {
    async fn generate_text(&self, prompt: &str) -> AnalyzerResult<String> {
        let body = build_request_body(prompt, &self.anthropic_version)?;
        debug!("调用模型 {}: 提示词 {} 字符", self.model_id, prompt.len());

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| AnalyzerError::LlmError(DisplayErrorContext(&e).to_string()))?;

        let text = parse_response_body(response.body().as_ref())?;
        info!("模型返回 {} 字符", text.len());
        Ok(text)
    }
}

/// 单轮对话：一条 user 消息携带完整提示词
fn build_request_body(prompt: &str, anthropic_version: &str) -> AnalyzerResult<Vec<u8>> {
    let request = InvokeRequest {
        messages: vec![Message {
            role: "user",
            content: prompt,
        }],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        anthropic_version,
    };
    Ok(serde_json::to_vec(&request)?)
}

fn parse_response_body(body: &[u8]) -> AnalyzerResult<String> {
    let response: InvokeResponse = serde_json::from_slice(body)?;
    response
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or(AnalyzerError::NoContent)
}
