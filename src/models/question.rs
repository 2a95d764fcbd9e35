use std::fmt;
use std::str::FromStr;

/// 题目作答格式
///
/// 决定计分题下方渲染哪种作答区域，无法识别的值归入 `Other`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QuestionFormat {
    ShortWritten,
    LongWritten,
    ShortAnswer,
    LongAnswer,
    Boolean,
    MultipleChoice,
    /// 不渲染任何作答区域，保留原始字符串用于日志
    Other(String),
}

impl QuestionFormat {
    /// CSV 中使用的标准名称
    pub fn name(&self) -> &str {
        match self {
            QuestionFormat::ShortWritten => "short-written",
            QuestionFormat::LongWritten => "long-written",
            QuestionFormat::ShortAnswer => "short-answer",
            QuestionFormat::LongAnswer => "long-answer",
            QuestionFormat::Boolean => "boolean",
            QuestionFormat::MultipleChoice => "multiple-choice",
            QuestionFormat::Other(raw) => raw,
        }
    }

    /// 是否为书写作答（横线区域）
    pub fn is_written(&self) -> bool {
        matches!(
            self,
            QuestionFormat::ShortWritten
                | QuestionFormat::LongWritten
                | QuestionFormat::ShortAnswer
                | QuestionFormat::LongAnswer
        )
    }
}

impl From<&str> for QuestionFormat {
    fn from(s: &str) -> Self {
        match s {
            "short-written" => QuestionFormat::ShortWritten,
            "long-written" => QuestionFormat::LongWritten,
            "short-answer" => QuestionFormat::ShortAnswer,
            "long-answer" => QuestionFormat::LongAnswer,
            "boolean" => QuestionFormat::Boolean,
            "multiple-choice" => QuestionFormat::MultipleChoice,
            other => QuestionFormat::Other(other.to_string()),
        }
    }
}

impl FromStr for QuestionFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(QuestionFormat::from(s))
    }
}

impl fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 一道题目的规范化数据，对应 CSV 中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// 按输入顺序分配的序号（从 1 开始），识别码唯一依据
    pub order_number: usize,
    /// 显示题号，可以不是数字（如 "1a"）
    pub display_number: String,
    /// 分值，0 表示说明性标题而非计分题
    pub total_marks: u32,
    /// 题干（原样输出的标记）
    pub body: String,
    /// 图示标记，非空时原样附加
    pub diagram_markup: String,
    pub format: QuestionFormat,
    /// 分区编号，变化时插入分区标题
    pub section: u32,
    /// 选项原始字符串，仅选择题使用
    pub choices: String,
}

impl QuestionRecord {
    /// 是否为计分题
    pub fn is_scored(&self) -> bool {
        self.total_marks > 0
    }
}

/// 解析选项字段
///
/// 支持 `[A, B, C]` 这种列表字面量：去掉首尾的方括号后按 `", "` 切分。
/// 空字段或格式错误时得到一个空选项，而不是报错。
/// 选项本身包含逗号或方括号的情况不受支持。
pub fn parse_choices(raw: &str) -> Vec<String> {
    raw.trim_matches(|c| c == '[' || c == ']')
        .split(", ")
        .map(str::to_string)
        .collect()
}
