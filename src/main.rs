mod config;
mod extractor;
mod gateway;
mod llm;
mod ocr;
mod pipeline;
mod prompts;
mod report;
mod utils;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::AppConfig;
use crate::llm::BedrockService;
use crate::ocr::TextractService;
use crate::utils::logger;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "简历批量识别、摘要与汇总工具 (AWS Textract + Bedrock)", long_about = None)]
struct Cli {
    /// 配置文件路径
    #[arg(long, global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 生成默认配置文件
    Init,
    /// 用 Textract 将目录中的PDF转为文本
    ConvertPdfs {
        /// PDF 所在目录
        #[arg(short, long)]
        input: PathBuf,
        /// 文本输出目录
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 用 Bedrock 为文本生成摘要
    Summarize {
        /// .txt 所在目录
        #[arg(short, long)]
        input: PathBuf,
        /// 摘要输出目录
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 将所有摘要汇总为一张 CSV 表
    Consolidate {
        /// *_summary.txt 所在目录
        #[arg(short, long)]
        input: PathBuf,
        /// CSV 输出文件
        #[arg(short, long)]
        output: PathBuf,
    },
    /// 针对全部简历文本提一个问题
    Query {
        /// 问题
        #[arg(short, long)]
        prompt: String,
        /// .txt 所在目录
        #[arg(short, long)]
        input: PathBuf,
        /// 结果输出文件，不指定则打印到终端
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init_logger();

    let cli = Cli::parse();
    info!("resume-analyzer 启动");

    match cli.command {
        Commands::Init => {
            init_command(&cli.config)?;
        }
        Commands::ConvertPdfs { input, output } => {
            convert_command(&cli.config, &input, &output).await?;
        }
        Commands::Summarize { input, output } => {
            summarize_command(&cli.config, &input, &output).await?;
        }
        Commands::Consolidate { input, output } => {
            consolidate_command(&cli.config, &input, &output).await?;
        }
        Commands::Query { prompt, input, output } => {
            query_command(&cli.config, &prompt, &input, output.as_deref()).await?;
        }
    }

    Ok(())
}

fn init_command(config_path: &Path) -> Result<()> {
    info!("初始化配置...");

    let app_config = AppConfig::default();
    app_config.save(config_path)?;
    info!("已生成配置文件: {}", config_path.display());

    info!("下一步:");
    info!("  1. 按需修改 region / model_id");
    info!("  2. 配置 AWS 凭证 (环境变量、~/.aws/credentials 或实例角色)");
    info!("  3. 运行 'resume-analyzer convert-pdfs -i <pdf目录> -o <文本目录>'");

    Ok(())
}

async fn build_ocr(app_config: &AppConfig) -> Result<TextractService> {
    let sdk_config = gateway::load_aws_config(&app_config.ocr.region)
        .await
        .context("Textract 初始化失败")?;
    Ok(TextractService::new(&sdk_config, &app_config.ocr))
}

async fn build_llm(app_config: &AppConfig) -> Result<BedrockService> {
    let sdk_config = gateway::load_aws_config(&app_config.llm.region)
        .await
        .context("Bedrock 初始化失败")?;
    info!("使用模型: {}", app_config.llm.model_id_or_default());
    Ok(BedrockService::new(&sdk_config, &app_config.llm))
}

async fn convert_command(config_path: &Path, input: &Path, output: &Path) -> Result<()> {
    info!("开始识别: {} -> {}", input.display(), output.display());

    let app_config = AppConfig::load(config_path)?;
    let ocr = build_ocr(&app_config).await?;

    pipeline::convert_pdfs(&ocr, input, output).await?;
    Ok(())
}

async fn summarize_command(config_path: &Path, input: &Path, output: &Path) -> Result<()> {
    info!("开始生成摘要: {} -> {}", input.display(), output.display());

    let app_config = AppConfig::load(config_path)?;
    let llm = build_llm(&app_config).await?;

    pipeline::summarize(&llm, input, output).await?;
    Ok(())
}

async fn consolidate_command(config_path: &Path, input: &Path, output: &Path) -> Result<()> {
    info!("开始汇总: {} -> {}", input.display(), output.display());

    let app_config = AppConfig::load(config_path)?;
    let llm = build_llm(&app_config).await?;

    let consolidation = pipeline::consolidate(&llm, input, output).await?;
    info!("共 {} 位候选人", consolidation.applicants.len());
    Ok(())
}

async fn query_command(
    config_path: &Path,
    question: &str,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let app_config = AppConfig::load(config_path)?;
    let llm = build_llm(&app_config).await?;

    let answer = pipeline::query(&llm, question, input).await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &answer)
                .await
                .with_context(|| format!("结果写入失败: {}", path.display()))?;
            info!("结果已保存: {}", path.display());
        }
        None => {
            let rule = "=".repeat(80);
            println!("\n{}", rule);
            println!("BEDROCK RESPONSE");
            println!("{}", rule);
            println!("{}", answer);
            println!("{}", rule);
        }
    }

    Ok(())
}
