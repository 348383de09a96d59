#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use tracing::info;

use crate::utils::{AnalyzerError, AnalyzerResult};

/// 文档文字识别服务
#[async_trait]
pub trait OcrService: Send + Sync {
    /// 识别整份文档，返回按行拼接的文本（每行以换行结尾）
    async fn extract_text(&self, document: &[u8]) -> AnalyzerResult<String>;
}

/// 文本生成服务
#[async_trait]
pub trait LlmService: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> AnalyzerResult<String>;
}

/// 加载指定区域的 AWS 配置，并在开始批处理前解析一次默认凭证链
pub async fn load_aws_config(region: &str) -> AnalyzerResult<SdkConfig> {
    if region.trim().is_empty() {
        return Err(AnalyzerError::ConfigError("AWS region 未配置".to_string()));
    }

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;

    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        AnalyzerError::ConfigError(format!("未找到 AWS 凭证 (region: {})", region))
    })?;
    provider.provide_credentials().await.map_err(|e| {
        AnalyzerError::ConfigError(format!(
            "未找到 AWS 凭证 (region: {}): {}",
            region,
            DisplayErrorContext(&e)
        ))
    })?;

    info!("AWS 配置加载完成: {}", region);
    Ok(sdk_config)
}
