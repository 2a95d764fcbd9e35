//! 文档输出服务 - 业务能力层
//!
//! 职责：
//! - 合并试卷头信息与正文
//! - 写出调试用的完整 HTML（每次覆盖）
//! - 调用无头浏览器打印 PDF

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::browser::launch_headless_browser;
use crate::config::Config;
use crate::error::{AppError, AppResult, RenderError};
use crate::infrastructure::{PageLayout, PdfPrinter};
use crate::services::template::{ExamTemplate, TemplateContext};
use crate::utils::file_url::file_url;

/// 试卷头信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamHeader {
    pub subject: String,
    pub title: String,
    pub time_allowed: String,
    pub total_marks: u64,
    pub year: Option<String>,
}

impl ExamHeader {
    /// 页脚标签：`{标题} - {科目}`
    pub fn footer_label(&self) -> String {
        format!("{} - {}", self.title, self.subject)
    }

    /// 模板变量
    pub fn template_context(&self, markup_body: &str) -> TemplateContext {
        let mut context = TemplateContext::new();
        context
            .insert("exam_subject", self.subject.as_str())
            .insert("exam_title", self.title.as_str())
            .insert("exam_time_allowed", self.time_allowed.as_str())
            .insert("exam_total_marks", self.total_marks.to_string())
            .insert("exam_year", self.year.clone().unwrap_or_default())
            .insert("questions", markup_body);
        context
    }
}

/// 输出文件名：`{科目}_{标题}_{时间戳}.pdf`，空格替换为下划线
pub fn output_file_name(subject: &str, title: &str, timestamp: &DateTime<Local>) -> String {
    format!(
        "{}_{}_{}.pdf",
        subject,
        title,
        timestamp.format("%Y-%m-%d_%H-%M-%S")
    )
    .replace(' ', "_")
}

/// 文档输出服务
pub struct DocumentEmitter {
    template_path: PathBuf,
    debug_dump_path: PathBuf,
    output_dir: PathBuf,
    browser_executable: Option<PathBuf>,
}

impl DocumentEmitter {
    pub fn new(config: &Config) -> Self {
        Self {
            template_path: config.template_path.clone(),
            debug_dump_path: config.debug_dump_path.clone(),
            output_dir: config.output_dir.clone(),
            browser_executable: config.browser_executable.clone(),
        }
    }

    /// 合并模板并写出调试文件，返回调试文件的绝对路径
    pub fn prepare(&self, markup_body: &str, header: &ExamHeader) -> AppResult<PathBuf> {
        let template = ExamTemplate::load_or_builtin(&self.template_path)?;
        let document = template.render(&header.template_context(markup_body));

        fs::write(&self.debug_dump_path, &document)
            .map_err(|e| AppError::write_failed(&self.debug_dump_path, e))?;
        let dump = fs::canonicalize(&self.debug_dump_path)
            .map_err(|e| AppError::io(&self.debug_dump_path, e))?;
        debug!("完整 HTML 已写入: {}", dump.display());

        Ok(dump)
    }

    /// 生成 PDF
    ///
    /// # 返回
    /// 返回生成的 PDF 文件路径
    pub async fn emit(&self, markup_body: &str, header: &ExamHeader) -> AppResult<PathBuf> {
        let dump = self.prepare(markup_body, header)?;

        let file_name = output_file_name(&header.subject, &header.title, &Local::now());
        let output_path = self.output_dir.join(file_name);

        let browser = launch_headless_browser(self.browser_executable.as_deref()).await?;
        let result = self
            .print_document(&browser, &dump, &output_path, header)
            .await;
        browser.shutdown().await;
        result?;

        info!("[AutoExam] ✅ 已生成文件 {}", output_path.display());
        Ok(output_path)
    }

    async fn print_document(
        &self,
        browser: &crate::browser::HeadlessBrowser,
        dump: &Path,
        output_path: &Path,
        header: &ExamHeader,
    ) -> AppResult<()> {
        let page = browser
            .browser()
            .new_page("about:blank")
            .await
            .map_err(|e| AppError::browser_launch_failed(format!("创建页面失败: {e}")))?;
        let printer = PdfPrinter::new(page);

        let url = file_url(dump).ok_or_else(|| RenderError::FileUrl {
            path: dump.to_path_buf(),
        })?;
        printer.open(url.as_str()).await?;
        let bytes = printer.print(&PageLayout::new(header.footer_label())).await?;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| AppError::write_failed(parent, e))?;
            }
        }
        fs::write(output_path, bytes).map_err(|e| AppError::write_failed(output_path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn header() -> ExamHeader {
        ExamHeader {
            subject: "Computer Science".to_string(),
            title: "End of Year".to_string(),
            time_allowed: "9".to_string(),
            total_marks: 6,
            year: None,
        }
    }

    #[test]
    fn file_name_replaces_spaces() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            output_file_name("Computer Science", "End of Year", &timestamp),
            "Computer_Science_End_of_Year_2024-03-05_14-07-09.pdf"
        );
    }

    #[test]
    fn footer_label_is_title_then_subject() {
        assert_eq!(header().footer_label(), "End of Year - Computer Science");
    }

    #[test]
    fn prepare_writes_debug_dump() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            template_path: dir.path().join("index.html"),
            debug_dump_path: dir.path().join("log.html"),
            output_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        fs::write(
            &config.template_path,
            "<h1>{{ exam_title }}</h1>[{{ exam_total_marks }}]{{ questions }}",
        )
        .unwrap();

        let emitter = DocumentEmitter::new(&config);
        let dump = emitter.prepare("<table></table>", &header()).unwrap();

        assert!(dump.is_absolute());
        assert_eq!(
            fs::read_to_string(dump).unwrap(),
            "<h1>End of Year</h1>[6]<table></table>"
        );
    }

    #[test]
    fn prepare_overwrites_previous_dump() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            template_path: dir.path().join("missing.html"),
            debug_dump_path: dir.path().join("log.html"),
            ..Config::default()
        };
        fs::write(&config.debug_dump_path, "old run").unwrap();

        let dump = DocumentEmitter::new(&config).prepare("", &header()).unwrap();

        let content = fs::read_to_string(dump).unwrap();
        assert!(!content.contains("old run"));
        assert!(content.contains("End of Year"));
    }
}
