/// 日志工具模块
///
/// 提供运行过程日志的格式化输出
use std::path::Path;

use tracing::info;

use crate::models::question::QuestionRecord;

/// 题干预览的最大字符数
const PREVIEW_LEN: usize = 80;

/// 记录程序启动信息
pub fn log_startup(version: &str) {
    info!("[AutoExam] 运行中，版本 {}", version);
}

/// 记录检测到的表头
pub fn log_headers(headers: &[String]) {
    info!("[AutoExam] 检测到以下表头:");
    for header in headers {
        info!("[AutoExam] - {}", header);
    }
}

/// 记录检测到的题目列表
pub fn log_questions(questions: &[QuestionRecord]) {
    if questions.is_empty() {
        info!("[AutoExam] 未检测到题目");
        return;
    }

    info!("[AutoExam] 检测到以下题目:");
    for question in questions {
        info!(
            "[AutoExam] [{}] {} {}",
            question.order_number,
            question.display_number,
            truncate_text(&question.body, PREVIEW_LEN)
        );
    }
}

/// 记录开始生成 PDF
pub fn log_build_start(question_count: usize) {
    info!(
        "[AutoExam] 正在生成 PDF，共 {} 道题目...",
        question_count
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `output`: 生成的 PDF 路径
/// - `total_marks`: 总分
/// - `time_allowed`: 考试时长
/// - `code_count`: 识别码数量
pub fn print_final_stats(output: &Path, total_marks: u64, time_allowed: &str, code_count: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 试卷生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 文件: {}", output.display());
    info!("✅ 总分: {}", total_marks);
    info!("⏱️ 考试时长: {} 分钟", time_allowed);
    info!("🔳 识别码: {} 个", code_count);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("一二三四五", 3), "一二三...");
    }
}
