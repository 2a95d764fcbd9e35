//! 节点树 → HTML 标记
//!
//! 题干、题号、图示都是原样输出的标记，不做转义。

use std::fmt::Write;

use tracing::warn;

use crate::assembly::node::{AnswerAffordance, Block, CodeImages, QuestionBlock};
use crate::utils::file_url::file_url_attr;

/// 空白复选框
pub const CHECKBOX_GLYPH: &str = "☐";

pub const PAGE_BREAK: &str = r#"<div class="page-break"></div>"#;
pub const QUESTION_BREAK_ROW: &str =
    r#"<tr><td colspan="100%" class="question-break"></td></tr>"#;
pub const ANSWER_LINE_ROW: &str =
    r#"<tr class="answer-area"><td colspan="100%" class="answer-area"></td></tr>"#;
pub const YES_NO_ROW: &str = r#"<tr><td colspan="100%" style="text-align:center;">Yes _____ &nbsp;&nbsp;&nbsp;&nbsp;&nbsp; No _____</td></tr>"#;

/// 序列化整个正文
pub fn render_blocks(blocks: &[Block], images: &CodeImages) -> String {
    let mut out = String::new();
    for block in blocks {
        render_block(&mut out, block, images);
    }
    out
}

fn render_block(out: &mut String, block: &Block, images: &CodeImages) {
    match block {
        Block::PageBreak => out.push_str(PAGE_BREAK),
        Block::SectionHeading { section } => {
            // 写入 String 不会失败
            let _ = write!(
                out,
                r#"<h2 style="text-align:center;">Section {section}</h2><br/>"#
            );
        }
        Block::Question(question) => render_question(out, question, images),
    }
}

fn render_question(out: &mut String, question: &QuestionBlock, images: &CodeImages) {
    let table_class = if question.heading_style {
        "print-friendly question-heading"
    } else {
        "print-friendly"
    };

    let _ = write!(
        out,
        r#"<table class="{table_class}"><tbody><tr colspan="100%" class="question">"#
    );
    let _ = write!(
        out,
        r#"<td class="question question-number question-table-cell">{}</td>"#,
        question.display_number
    );
    let _ = write!(out, r#"<td class="question">{}</td>"#, question.body);

    match &question.marks {
        None => out.push_str("</tr>"),
        Some(marks) => {
            let _ = write!(
                out,
                r#"<td class="question question-marks-available">[{}]"#,
                marks.total_marks
            );
            match images.get(&marks.code.order_number).map(|p| file_url_attr(p)) {
                Some(Some(src)) => {
                    let _ = write!(out, r#"<img src="{src}"></img>"#);
                }
                Some(None) => warn!(
                    "[AutoExam] ⚠️ 题目 {} 的识别码图片不是绝对路径",
                    marks.code.order_number
                ),
                None => warn!(
                    "[AutoExam] ⚠️ 题目 {} 缺少识别码图片",
                    marks.code.order_number
                ),
            }
            out.push_str("</td></tr>");
            out.push_str(QUESTION_BREAK_ROW);

            if let Some(affordance) = &question.affordance {
                render_affordance(out, affordance);
            }
        }
    }

    if let Some(diagram) = &question.diagram {
        let _ = write!(out, r#"<div class="diagram">{diagram}</div>"#);
    }

    out.push_str("</tbody></table>");
}

fn render_affordance(out: &mut String, affordance: &AnswerAffordance) {
    match affordance {
        AnswerAffordance::Lines { count } => out.push_str(&ANSWER_LINE_ROW.repeat(*count)),
        AnswerAffordance::YesNo => out.push_str(YES_NO_ROW),
        AnswerAffordance::Choices(choices) => {
            out.push_str(r#"<tr><td colspan="100%"><ul class="multiple-choice">"#);
            for choice in choices {
                let _ = write!(
                    out,
                    r#"<li class="multiple-choice"><span class="multiple-choice">{CHECKBOX_GLYPH}</span>{choice}</li>"#
                );
            }
            out.push_str("</ul></td></tr>");
        }
    }
}
