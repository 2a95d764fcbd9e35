//! 试卷结构节点
//!
//! 组装阶段只产出节点树，序列化为标记的工作交给 `markup` 模块。

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::models::exam::answer_line_count;
use crate::models::question::{parse_choices, QuestionFormat};

/// 题目序号 → 识别码图片的绝对路径
pub type CodeImages = BTreeMap<usize, PathBuf>;

/// 试卷正文中的一个块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// 分页
    PageBreak,
    /// 分区标题
    SectionHeading { section: u32 },
    /// 一道题目（含作答区域和图示）
    Question(QuestionBlock),
}

/// 题目块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBlock {
    pub order_number: usize,
    pub display_number: String,
    pub body: String,
    /// 分区内第一个块且为 0 分说明时使用标题样式
    pub heading_style: bool,
    /// 计分题才有分值栏
    pub marks: Option<MarksCell>,
    pub affordance: Option<AnswerAffordance>,
    pub diagram: Option<String>,
}

/// 分值栏：分值加识别码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarksCell {
    pub total_marks: u32,
    pub code: IdentifierCode,
}

/// 需要生成的题目识别码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierCode {
    pub order_number: usize,
    /// `{科目}|{标题}|{序号}`
    pub payload: String,
}

impl IdentifierCode {
    /// 识别码图片文件名
    pub fn file_name(&self) -> String {
        format!("qrcode-{}.svg", self.order_number)
    }
}

/// 作答区域
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerAffordance {
    /// 空白横线
    Lines { count: usize },
    /// 是 / 否 二选一
    YesNo,
    /// 带复选框的选项列表
    Choices(Vec<String>),
}

impl AnswerAffordance {
    /// 按题目格式决定作答区域，未知格式没有作答区域
    pub fn for_format(format: &QuestionFormat, total_marks: u32, choices: &str) -> Option<Self> {
        match format {
            f if f.is_written() => Some(AnswerAffordance::Lines {
                count: answer_line_count(total_marks),
            }),
            QuestionFormat::Boolean => Some(AnswerAffordance::YesNo),
            QuestionFormat::MultipleChoice => Some(AnswerAffordance::Choices(parse_choices(choices))),
            _ => None,
        }
    }
}

impl Block {
    pub fn as_question(&self) -> Option<&QuestionBlock> {
        match self {
            Block::Question(question) => Some(question),
            _ => None,
        }
    }
}
