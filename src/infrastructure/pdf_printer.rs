//! PDF 打印器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"把页面打印成 PDF"的能力

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Page;
use tracing::debug;

use crate::error::{AppResult, RenderError};

/// A4 纸宽（英寸）
pub const A4_WIDTH_IN: f64 = 8.27;
/// A4 纸高（英寸）
pub const A4_HEIGHT_IN: f64 = 11.69;
/// 四边页边距（英寸）
pub const MARGIN_IN: f64 = 1.0;

/// 页面打印参数
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// 页脚居中文字
    pub footer_label: String,
}

impl PageLayout {
    pub fn new(footer_label: impl Into<String>) -> Self {
        Self {
            footer_label: footer_label.into(),
        }
    }

    /// 页脚：居中为试卷标签，右侧为 "第 N 页 / 共 M 页"
    pub fn footer_template(&self) -> String {
        format!(
            concat!(
                r#"<div style="font-size:8px; width:100%; padding:0 1in; display:flex;">"#,
                r#"<span style="flex:1;"></span>"#,
                r#"<span style="flex:1; text-align:center;">{}</span>"#,
                r#"<span style="flex:1; text-align:right;">"#,
                r#"<span class="pageNumber"></span> of <span class="totalPages"></span>"#,
                r#"</span></div>"#
            ),
            escape_html(&self.footer_label)
        )
    }

    /// 固定的 A4 纵向打印参数
    pub fn to_params(&self) -> PrintToPdfParams {
        PrintToPdfParams {
            landscape: Some(false),
            display_header_footer: Some(true),
            print_background: Some(true),
            scale: Some(1.0),
            paper_width: Some(A4_WIDTH_IN),
            paper_height: Some(A4_HEIGHT_IN),
            margin_top: Some(MARGIN_IN),
            margin_bottom: Some(MARGIN_IN),
            margin_left: Some(MARGIN_IN),
            margin_right: Some(MARGIN_IN),
            header_template: Some("<span></span>".to_string()),
            footer_template: Some(self.footer_template()),
            prefer_css_page_size: Some(false),
            ..Default::default()
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// PDF 打印器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 打开本地文档并打印
/// - 不认识 Question / Exam
pub struct PdfPrinter {
    page: Page,
}

impl PdfPrinter {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 打开文档并等待加载完成
    pub async fn open(&self, url: &str) -> AppResult<()> {
        debug!("打开文档: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                source: e,
            })?;
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                source: e,
            })?;
        Ok(())
    }

    /// 把当前页面打印为 PDF 字节
    pub async fn print(&self, layout: &PageLayout) -> AppResult<Vec<u8>> {
        let bytes = self
            .page
            .pdf(layout.to_params())
            .await
            .map_err(|e| RenderError::Print { source: e })?;
        debug!("PDF 打印完成: {} 字节", bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footer_shows_label_and_page_counter() {
        let layout = PageLayout::new("Mock <1> - Physics");
        let footer = layout.footer_template();
        assert!(footer.contains("Mock &lt;1&gt; - Physics"));
        assert!(footer.contains(r#"<span class="pageNumber"></span> of <span class="totalPages"></span>"#));
    }

    #[test]
    fn params_use_fixed_a4_layout() {
        let params = PageLayout::new("x").to_params();
        assert_eq!(params.paper_width, Some(A4_WIDTH_IN));
        assert_eq!(params.paper_height, Some(A4_HEIGHT_IN));
        assert_eq!(params.margin_left, Some(MARGIN_IN));
        assert_eq!(params.landscape, Some(false));
        assert_eq!(params.display_header_footer, Some(true));
    }
}
