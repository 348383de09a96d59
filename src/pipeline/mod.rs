//! 批处理流程：逐个文件顺序处理，单个文件失败只记录并跳过

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{error, info, warn};

use crate::extractor::{ApplicantInfo, SUMMARY_SUFFIX};
use crate::gateway::{LlmService, OcrService};
use crate::prompts;
use crate::report;

#[derive(Debug, Clone)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// 一次批处理的结果
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<String>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    fn record_failure(&mut self, file: String, err: anyhow::Error) {
        error!("处理 {} 失败: {:#}", file, err);
        self.failed.push(FileFailure {
            file,
            error: format!("{:#}", err),
        });
    }

    fn log_summary(&self, stage: &str) {
        info!(
            "✅ {}完成: {} 成功, {} 失败",
            stage,
            self.processed.len(),
            self.failed.len()
        );
        for failure in &self.failed {
            warn!("  ✗ {}: {}", failure.file, failure.error);
        }
    }
}

#[derive(Debug, Default)]
pub struct Consolidation {
    pub report: BatchReport,
    pub applicants: Vec<ApplicantInfo>,
}

/// OCR：`*.pdf` -> `<stem>.txt`
pub async fn convert_pdfs(
    ocr: &dyn OcrService,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    let files = list_files(input_dir, ".pdf").await?;
    info!("找到 {} 个PDF文件", files.len());
    ensure_dir(output_dir).await?;

    let mut report = BatchReport::default();
    for file in files {
        info!("识别 {}...", file);
        let stem = file.strip_suffix(".pdf").unwrap_or(&file);
        let output_path = output_dir.join(format!("{}.txt", stem));

        match convert_one(ocr, &input_dir.join(&file), &output_path).await {
            Ok(()) => report.processed.push(file),
            Err(e) => report.record_failure(file, e),
        }
    }

    report.log_summary("识别");
    Ok(report)
}

async fn convert_one(ocr: &dyn OcrService, input_path: &Path, output_path: &Path) -> Result<()> {
    let document = tokio::fs::read(input_path)
        .await
        .with_context(|| format!("读取失败: {}", input_path.display()))?;

    let text = ocr.extract_text(&document).await.context("Textract 识别失败")?;

    tokio::fs::write(output_path, text)
        .await
        .with_context(|| format!("写入失败: {}", output_path.display()))?;
    info!("已保存: {}", output_path.display());
    Ok(())
}

/// 摘要：`*.txt` -> `<stem>_summary.txt`
pub async fn summarize(
    llm: &dyn LlmService,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    let files = list_files(input_dir, ".txt").await?;
    info!("找到 {} 个文本文件", files.len());
    ensure_dir(output_dir).await?;

    let mut report = BatchReport::default();
    for file in files {
        info!("生成摘要 {}...", file);
        let stem = file.strip_suffix(".txt").unwrap_or(&file);
        let output_path = output_dir.join(format!("{}{}", stem, SUMMARY_SUFFIX));

        match summarize_one(llm, &input_dir.join(&file), &output_path).await {
            Ok(()) => report.processed.push(file),
            Err(e) => report.record_failure(file, e),
        }
    }

    report.log_summary("摘要");
    Ok(report)
}

async fn summarize_one(llm: &dyn LlmService, input_path: &Path, output_path: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(input_path)
        .await
        .with_context(|| format!("读取失败: {}", input_path.display()))?;

    let prompt = prompts::summary_prompt(&content);
    let summary = llm.generate_text(&prompt).await.context("Bedrock 调用失败")?;

    tokio::fs::write(output_path, summary)
        .await
        .with_context(|| format!("写入失败: {}", output_path.display()))?;
    info!("摘要已保存: {}", output_path.display());
    Ok(())
}

/// 汇总：`*_summary.txt` -> 字段抽取 -> CSV
pub async fn consolidate(
    llm: &dyn LlmService,
    input_dir: &Path,
    output_file: &Path,
) -> Result<Consolidation> {
    let files = list_files(input_dir, SUMMARY_SUFFIX).await?;
    info!("找到 {} 个摘要文件", files.len());

    let mut consolidation = Consolidation::default();
    for file in files {
        info!("抽取 {}...", file);
        match extract_one(llm, &input_dir.join(&file), &file).await {
            Ok(applicant) => {
                consolidation.applicants.push(applicant);
                consolidation.report.processed.push(file);
            }
            Err(e) => consolidation.report.record_failure(file, e),
        }
    }

    let table = report::render_csv(&consolidation.applicants).context("汇总表生成失败")?;
    if let Some(parent) = output_file.parent() {
        ensure_dir(parent).await?;
    }
    tokio::fs::write(output_file, table)
        .await
        .with_context(|| format!("汇总表写入失败: {}", output_file.display()))?;

    consolidation.report.log_summary("汇总");
    info!("汇总表已保存: {}", output_file.display());
    Ok(consolidation)
}

async fn extract_one(llm: &dyn LlmService, input_path: &Path, file_name: &str) -> Result<ApplicantInfo> {
    let summary = tokio::fs::read_to_string(input_path)
        .await
        .with_context(|| format!("读取失败: {}", input_path.display()))?;

    let prompt = prompts::extraction_prompt(&summary);
    let response = llm.generate_text(&prompt).await.context("Bedrock 调用失败")?;

    Ok(ApplicantInfo::from_response(&response, file_name))
}

/// 将目录下所有 `*.txt` 合并为一次提问
pub async fn query(llm: &dyn LlmService, question: &str, input_dir: &Path) -> Result<String> {
    let files = list_files(input_dir, ".txt").await?;

    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        info!("读取 {}...", file);
        match tokio::fs::read_to_string(input_dir.join(&file)).await {
            Ok(text) => documents.push((file, text)),
            Err(e) => error!("读取 {} 失败: {}", file, e),
        }
    }

    if documents.is_empty() {
        anyhow::bail!("输入目录中没有 .txt 文件: {}", input_dir.display());
    }

    let prompt = prompts::query_prompt(question, &documents);
    info!("发送查询，共 {} 份简历", documents.len());

    let answer = llm.generate_text(&prompt).await.context("Bedrock 查询失败")?;
    Ok(answer)
}

/// 按文件名排序列出目录下以 suffix 结尾的文件（跳过子目录）
async fn list_files(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("读取输入目录失败: {}", dir.display()))?;

    let mut files = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("跳过无法读取的目录项: {}", e);
                continue;
            }
        };
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => continue,
            Ok(_) => {}
            Err(e) => {
                warn!("跳过无法识别类型的文件 {:?}: {}", entry.file_name(), e);
                continue;
            }
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("跳过非 UTF-8 文件名: {:?}", raw);
                continue;
            }
        };
        if name.ends_with(suffix) {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("创建输出目录失败: {}", dir.display()))
}
