use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{Context, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/settings.toml";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-5-sonnet-20240620-v1:0";
pub const DEFAULT_ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// 环境变量前缀，如 RESUME_ANALYZER_LLM__MODEL_ID
const ENV_PREFIX: &str = "RESUME_ANALYZER";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub ocr: OcrConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrConfig {
    pub region: String,
    /// 按页拆分后逐页识别，否则整份文档一次请求
    pub split_pages: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub region: String,
    pub model_id: String,
    pub anthropic_version: String,
}

impl LlmConfig {
    pub fn model_id_or_default(&self) -> &str {
        if self.model_id.trim().is_empty() {
            DEFAULT_MODEL_ID
        } else {
            &self.model_id
        }
    }

    pub fn anthropic_version_or_default(&self) -> &str {
        if self.anthropic_version.trim().is_empty() {
            DEFAULT_ANTHROPIC_VERSION
        } else {
            &self.anthropic_version
        }
    }
}

impl AppConfig {
    /// 默认值 < 配置文件 < 环境变量
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let defaults = config::Config::try_from(&Self::default())
            .context("默认配置序列化失败")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("读取配置失败: {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("解析配置失败: {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig {
                region: "us-east-1".to_string(),
                split_pages: true,
            },
            llm: LlmConfig {
                region: "ap-southeast-1".to_string(),
                model_id: DEFAULT_MODEL_ID.to_string(),
                anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            },
        }
    }
}
