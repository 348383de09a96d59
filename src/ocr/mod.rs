pub mod splitter;

pub use splitter::PdfSplitter;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_textract::error::DisplayErrorContext;
use aws_sdk_textract::primitives::Blob;
use aws_sdk_textract::types::{Block, BlockType, Document};
use tracing::{debug, info};

use crate::config::OcrConfig;
use crate::gateway::OcrService;
use crate::utils::{AnalyzerError, AnalyzerResult};

/// Textract 同步接口的单次请求上限
pub const MAX_PAGE_BYTES: usize = 5 * 1024 * 1024;

/// AWS Textract DetectDocumentText 适配器
pub struct TextractService {
    client: aws_sdk_textract::Client,
    splitter: PdfSplitter,
    split_pages: bool,
}

impl TextractService {
    pub fn new(sdk_config: &SdkConfig, config: &OcrConfig) -> Self {
        Self::with_client(aws_sdk_textract::Client::new(sdk_config), config)
    }

    pub fn with_client(client: aws_sdk_textract::Client, config: &OcrConfig) -> Self {
        Self {
            client,
            splitter: PdfSplitter::new(),
            split_pages: config.split_pages,
        }
    }

    async fn detect_lines(&self, payload: &[u8]) -> AnalyzerResult<String> {
        let document = Document::builder().bytes(Blob::new(payload)).build();

        let response = self
            .client
            .detect_document_text()
            .document(document)
            .send()
            .await
            .map_err(|e| AnalyzerError::OcrError(DisplayErrorContext(&e).to_string()))?;

        Ok(collect_lines(response.blocks()))
    }
}

#[async_trait]
impl OcrService for TextractService {
    async fn extract_text(&self, document: &[u8]) -> AnalyzerResult<String> {
        let payloads = if self.split_pages {
            self.splitter.split(document)?
        } else {
            vec![document.to_vec()]
        };

        let mut text = String::new();
        for (index, payload) in payloads.iter().enumerate() {
            let page = index + 1;
            check_page_size(page, payload)?;

            debug!("识别第 {}/{} 页", page, payloads.len());
            text.push_str(&self.detect_lines(payload).await?);
        }

        info!("识别完成: {} 页, {} 字符", payloads.len(), text.len());
        Ok(text)
    }
}

pub fn check_page_size(page: usize, payload: &[u8]) -> AnalyzerResult<()> {
    if payload.len() > MAX_PAGE_BYTES {
        return Err(AnalyzerError::PageTooLarge {
            page,
            size: payload.len(),
        });
    }
    Ok(())
}

/// 只保留 LINE 类型且有文本的块，按返回顺序逐行拼接
pub fn collect_lines(blocks: &[Block]) -> String {
    let mut text = String::new();
    for block in blocks {
        if block.block_type() != Some(&BlockType::Line) {
            continue;
        }
        if let Some(line) = block.text() {
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}
