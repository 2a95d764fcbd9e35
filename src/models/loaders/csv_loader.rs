use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::debug;

use crate::error::{AppResult, RecordDecodeError};
use crate::models::exam::MAX_QUESTION_MARKS;
use crate::models::question::{QuestionFormat, QuestionRecord};

/// 必填列数：题号、分值、题干、图示、格式、分区
pub const REQUIRED_COLUMNS: usize = 6;

/// 从 CSV 读出的题库
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    /// 表头（仅用于日志）
    pub headers: Vec<String>,
    pub questions: Vec<QuestionRecord>,
}

/// 从文件加载题库
pub fn load_question_bank(csv_path: &Path) -> AppResult<QuestionBank> {
    let reader = csv_reader_builder()
        .from_path(csv_path)
        .map_err(|e| unreadable(csv_path, e))?;
    read_rows(reader, csv_path)
}

/// 从任意输入流加载题库，`source_name` 仅用于错误信息
pub fn read_question_bank<R: Read>(input: R, source_name: &Path) -> AppResult<QuestionBank> {
    read_rows(csv_reader_builder().from_reader(input), source_name)
}

fn csv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // 第 7 列可选，行长度不固定
    builder.has_headers(false).flexible(true).quote(b'"');
    builder
}

fn read_rows<R: Read>(mut reader: csv::Reader<R>, source_name: &Path) -> AppResult<QuestionBank> {
    let mut bank = QuestionBank::default();
    let mut header_seen = false;

    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| unreadable(source_name, e))?;

        if !header_seen {
            bank.headers = record.iter().map(str::to_string).collect();
            header_seen = true;
            continue;
        }

        // 表头占第 1 行，数据行的序号即题目顺序号
        let question = parse_row(&record, row_index + 1, row_index)?;
        debug!(
            "解析第 {} 题: {} [{}]",
            question.order_number, question.display_number, question.format
        );
        bank.questions.push(question);
    }

    if !header_seen {
        return Err(RecordDecodeError::MissingHeader {
            path: source_name.to_path_buf(),
        }
        .into());
    }

    Ok(bank)
}

/// 按列位置把一行转换为题目记录
///
/// - `row`: 文件中的行号（从 1 开始，含表头）
/// - `order_number`: 题目顺序号（从 1 开始）
pub fn parse_row(
    record: &StringRecord,
    row: usize,
    order_number: usize,
) -> Result<QuestionRecord, RecordDecodeError> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(RecordDecodeError::MissingColumns {
            row,
            found: record.len(),
        });
    }

    let field = |index: usize| record.get(index).unwrap_or_default();

    let total_marks = parse_integer(field(1), row, "total_marks")?;
    if total_marks > MAX_QUESTION_MARKS {
        return Err(RecordDecodeError::MarksOutOfRange {
            row,
            value: total_marks,
            max: MAX_QUESTION_MARKS,
        });
    }
    let section = parse_integer(field(5), row, "section")?;
    if section == 0 {
        return Err(RecordDecodeError::InvalidSection { row });
    }

    Ok(QuestionRecord {
        order_number,
        display_number: field(0).to_string(),
        total_marks,
        body: field(2).to_string(),
        diagram_markup: field(3).to_string(),
        format: QuestionFormat::from(field(4)),
        section,
        choices: field(6).to_string(),
    })
}

fn parse_integer(value: &str, row: usize, column: &'static str) -> Result<u32, RecordDecodeError> {
    value
        .trim()
        .parse()
        .map_err(|_| RecordDecodeError::InvalidInteger {
            row,
            column,
            value: value.to_string(),
        })
}

fn unreadable(path: &Path, source: csv::Error) -> crate::error::AppError {
    RecordDecodeError::Unreadable {
        path: PathBuf::from(path),
        source,
    }
    .into()
}
