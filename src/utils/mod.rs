pub mod logger;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("序列化错误: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("CSV写入错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("PDF处理错误: {0}")]
    PdfError(String),

    #[error("PDF page {page} is too large: {size} bytes (max 5MB)")]
    PageTooLarge { page: usize, size: usize },

    #[error("OCR服务错误: {0}")]
    OcrError(String),

    #[error("模型调用错误: {0}")]
    LlmError(String),

    #[error("no content in response")]
    NoContent,
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;
