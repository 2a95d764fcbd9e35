/// 作答横线系数：`floor(分值 * 1.5) + 1` 行
pub const ANSWER_LINES_PER_MARK: f64 = 1.5;

/// 单题分值上限，超过时视为输入错误
pub const MAX_QUESTION_MARKS: u32 = 1000;

/// 默认考试时长系数：`floor(总分 * 1.5)` 分钟
pub const MINUTES_PER_MARK: f64 = 1.5;

/// 单次运行的考试上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamContext {
    pub subject: String,
    pub title: String,
    /// 命令行指定的考试时长，缺省时按总分推算
    pub time_allowed: Option<String>,
    /// 年级，仅传给模板
    pub year: Option<String>,
}

impl ExamContext {
    pub fn new(subject: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            title: title.into(),
            time_allowed: None,
            year: None,
        }
    }

    pub fn with_time_allowed(mut self, time_allowed: Option<String>) -> Self {
        self.time_allowed = time_allowed;
        self
    }

    pub fn with_year(mut self, year: Option<String>) -> Self {
        self.year = year;
        self
    }

    /// 题目识别码内容：`{科目}|{标题}|{序号}`
    ///
    /// 科目和标题中的 `|` 不做转义。
    pub fn code_payload(&self, order_number: usize) -> String {
        format!("{}|{}|{}", self.subject, self.title, order_number)
    }

    /// 考试时长，未指定时为 `floor(总分 * 1.5)`
    pub fn resolved_time_allowed(&self, total_marks: u64) -> String {
        match &self.time_allowed {
            Some(time) => time.clone(),
            None => default_time_allowed(total_marks).to_string(),
        }
    }
}

/// 计分题的作答横线行数，分值按 `MAX_QUESTION_MARKS` 截断
pub fn answer_line_count(total_marks: u32) -> usize {
    let marks = total_marks.min(MAX_QUESTION_MARKS);
    (f64::from(marks) * ANSWER_LINES_PER_MARK).floor() as usize + 1
}

/// 按总分推算的默认考试时长（分钟）
pub fn default_time_allowed(total_marks: u64) -> u64 {
    (total_marks as f64 * MINUTES_PER_MARK).floor() as u64
}
