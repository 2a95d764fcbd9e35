//! 创建模式 - 编排层
//!
//! ## 流程
//!
//! ```text
//! 发现 CSV → 规范化题目 → 补全科目/标题 → 组装正文
//!     → 生成识别码图片 → 合并模板 → 打印 PDF
//! ```
//!
//! 任何一步失败都会终止本次运行；识别码图片等已产生的文件保留在磁盘上。

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::assembly::{assemble, CodeImages};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::exam::ExamContext;
use crate::models::loaders::load_question_bank;
use crate::models::question::QuestionRecord;
use crate::orchestrator::discovery::{select_input_file, RESTART_DELAY};
use crate::services::{generate_all, CodeGenerator, DocumentEmitter, ExamHeader, QrSvgGenerator};
use crate::utils::logging::{
    log_build_start, log_headers, log_questions, print_final_stats,
};
use crate::utils::prompt::prompt_line;

/// 命令行提供的试卷信息，缺省项交互输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub subject: Option<String>,
    pub title: Option<String>,
    pub time_allowed: Option<String>,
    pub year: Option<String>,
}

/// 组装完成、等待渲染的试卷
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedExam {
    pub header: ExamHeader,
    pub markup: String,
    pub codes: CodeImages,
}

/// 补全科目和标题，缺省时提示输入
pub fn resolve_context<R, W>(
    options: &CreateOptions,
    input: &mut R,
    output: &mut W,
) -> AppResult<ExamContext>
where
    R: BufRead,
    W: Write,
{
    let mut ask = |current: &Option<String>, message: &str| -> AppResult<String> {
        match current {
            Some(value) => Ok(value.clone()),
            None => prompt_line(input, output, message).map_err(|e| AppError::io("<stdin>", e)),
        }
    };

    let subject = ask(&options.subject, "[AutoExam] 请输入考试科目: ")?;
    let title = ask(&options.title, "[AutoExam] 请输入考试标题: ")?;

    Ok(ExamContext::new(subject, title)
        .with_time_allowed(options.time_allowed.clone())
        .with_year(options.year.clone()))
}

/// 组装正文并生成识别码图片
pub fn prepare_exam<G>(
    records: &[QuestionRecord],
    ctx: &ExamContext,
    generator: &G,
) -> AppResult<PreparedExam>
where
    G: CodeGenerator + ?Sized,
{
    log_build_start(records.len());

    let assembly = assemble(records, ctx);
    let codes = generate_all(generator, assembly.code_requests())?;
    let markup = assembly.markup(&codes);

    Ok(PreparedExam {
        header: ExamHeader {
            subject: ctx.subject.clone(),
            title: ctx.title.clone(),
            time_allowed: ctx.resolved_time_allowed(assembly.total_marks),
            total_marks: assembly.total_marks,
            year: ctx.year.clone(),
        },
        markup,
        codes,
    })
}

/// 运行创建模式
///
/// # 参数
/// - `work_dir`: 扫描 CSV 的目录
/// - `input` / `output`: 交互输入输出
///
/// # 返回
/// 返回生成的 PDF 路径
pub async fn run_create<R, W>(
    config: &Config,
    options: &CreateOptions,
    work_dir: &Path,
    input: &mut R,
    output: &mut W,
) -> AppResult<PathBuf>
where
    R: BufRead,
    W: Write,
{
    info!("[AutoExam] 进入创建模式");

    let csv_path = select_input_file(work_dir, input, output, RESTART_DELAY).await?;
    info!("[AutoExam] 正在处理 CSV: {}", csv_path.display());

    let bank = load_question_bank(&csv_path)?;
    log_headers(&bank.headers);
    log_questions(&bank.questions);

    let ctx = resolve_context(options, input, output)?;
    let generator = QrSvgGenerator::new(&config.code_dir);
    let prepared = prepare_exam(&bank.questions, &ctx, &generator)?;

    let emitter = DocumentEmitter::new(config);
    let pdf_path = emitter.emit(&prepared.markup, &prepared.header).await?;

    print_final_stats(
        &pdf_path,
        prepared.header.total_marks,
        &prepared.header.time_allowed,
        prepared.codes.len(),
    );
    Ok(pdf_path)
}
