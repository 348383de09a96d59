//! 测试替身：按输入注入响应、错误与延迟

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{LlmService, OcrService};
use crate::utils::{AnalyzerError, AnalyzerResult};

#[derive(Default)]
pub struct FakeLlmService {
    responses: HashMap<String, String>,
    errors: HashMap<String, String>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl FakeLlmService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(prompt.into(), response.into());
        self
    }

    pub fn with_error(mut self, prompt: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(prompt.into(), message.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for FakeLlmService {
    async fn generate_text(&self, prompt: &str) -> AnalyzerResult<String> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(message) = self.errors.get(prompt) {
            return Err(AnalyzerError::LlmError(message.clone()));
        }

        if let Some(response) = self.responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(format!("Mock response for: {}", prompt))
    }
}

#[derive(Default)]
pub struct FakeOcrService {
    responses: HashMap<Vec<u8>, String>,
    errors: HashMap<Vec<u8>, String>,
    delay: Duration,
    calls: Mutex<usize>,
}

impl FakeOcrService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, document: impl Into<Vec<u8>>, text: impl Into<String>) -> Self {
        self.responses.insert(document.into(), text.into());
        self
    }

    pub fn with_error(mut self, document: impl Into<Vec<u8>>, message: impl Into<String>) -> Self {
        self.errors.insert(document.into(), message.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl OcrService for FakeOcrService {
    async fn extract_text(&self, document: &[u8]) -> AnalyzerResult<String> {
        *self.calls.lock().unwrap() += 1;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(message) = self.errors.get(document) {
            return Err(AnalyzerError::OcrError(message.clone()));
        }

        Ok(self.responses.get(document).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn llm_fake_serves_injected_responses_and_errors() {
        let fake = FakeLlmService::new()
            .with_response("custom prompt", "custom response")
            .with_error("error prompt", "test error");

        assert_eq!(fake.generate_text("custom prompt").await.unwrap(), "custom response");
        assert_eq!(
            fake.generate_text("other").await.unwrap(),
            "Mock response for: other"
        );

        let err = fake.generate_text("error prompt").await.unwrap_err();
        assert!(err.to_string().contains("test error"));

        assert_eq!(fake.calls(), vec!["custom prompt", "other", "error prompt"]);
    }

    #[tokio::test(start_paused = true)]
    async fn llm_fake_applies_delay() {
        let fake = FakeLlmService::new().with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        fake.generate_text("slow").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn ocr_fake_keys_on_document_bytes() {
        let fake = FakeOcrService::new()
            .with_response(b"doc-a".to_vec(), "Name: A\n")
            .with_error(b"doc-b".to_vec(), "throttled")
            .with_delay(Duration::from_millis(1));

        assert_eq!(fake.extract_text(b"doc-a").await.unwrap(), "Name: A\n");
        assert!(fake.extract_text(b"doc-b").await.is_err());
        assert_eq!(fake.extract_text(b"unknown").await.unwrap(), "");
        assert_eq!(fake.call_count(), 3);
    }
}
