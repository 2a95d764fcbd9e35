//! 试卷模板服务 - 业务能力层
//!
//! 把试卷头信息和正文合并成完整的 HTML 文档。
//! 占位符写作 `{{ name }}`，未知名称渲染为空。

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::{debug, info};

use crate::error::{AppResult, RenderError};

/// 内置试卷模板（A4 打印样式）
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{ exam_title }} - {{ exam_subject }}</title>
<style>
  body { font-family: "Helvetica Neue", Arial, sans-serif; font-size: 12pt; }
  .exam-header { text-align: center; margin-bottom: 24px; }
  .exam-header h1 { margin: 0; }
  .exam-meta { width: 100%; margin-top: 12px; }
  .page-break { page-break-after: always; break-after: page; }
  table.print-friendly { width: 100%; border-collapse: collapse; page-break-inside: avoid; margin-bottom: 12px; }
  table.question-heading td.question { font-weight: bold; font-size: 13pt; }
  td.question { vertical-align: top; padding: 4px; }
  td.question-number { width: 40px; font-weight: bold; }
  td.question-marks-available { width: 90px; text-align: right; }
  td.question-marks-available img { display: block; width: 80px; height: 80px; margin-left: auto; }
  td.question-break { height: 8px; }
  tr.answer-area td.answer-area { height: 28px; border-bottom: 1px solid #555; }
  ul.multiple-choice { list-style: none; padding-left: 40px; }
  li.multiple-choice { margin: 6px 0; }
  span.multiple-choice { font-size: 16pt; margin-right: 8px; }
  .diagram { text-align: center; margin: 8px 0; }
</style>
</head>
<body>
<div class="exam-header">
  <h1>{{ exam_subject }}</h1>
  <h2>{{ exam_title }}</h2>
  <table class="exam-meta">
    <tr>
      <td>Year: {{ exam_year }}</td>
      <td>Total marks: {{ exam_total_marks }}</td>
      <td>Time allowed: {{ exam_time_allowed }} minutes</td>
    </tr>
  </table>
</div>
{{ questions }}
</body>
</html>
"#;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
    })
}

/// 模板变量
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// 试卷模板
#[derive(Debug, Clone)]
pub struct ExamTemplate {
    source: String,
}

impl ExamTemplate {
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn builtin() -> Self {
        Self::from_source(DEFAULT_TEMPLATE)
    }

    /// 模板文件存在时读取，否则使用内置模板
    pub fn load_or_builtin(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            info!(
                "[AutoExam] 未找到模板 {}，使用内置模板",
                path.display()
            );
            return Ok(Self::builtin());
        }

        let source = fs::read_to_string(path).map_err(|e| RenderError::Template {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("已加载模板: {} ({} 字节)", path.display(), source.len());
        Ok(Self::from_source(source))
    }

    /// 替换所有占位符，值原样插入
    pub fn render(&self, context: &TemplateContext) -> String {
        placeholder_pattern()
            .replace_all(&self.source, |caps: &Captures| {
                context.get(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }
}
