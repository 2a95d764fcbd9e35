//! 识别码生成服务 - 业务能力层
//!
//! 只负责"把一个识别码内容写成图片文件"的能力

use std::fs;
use std::path::PathBuf;

use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use tracing::{debug, info};

use crate::assembly::{CodeImages, IdentifierCode};
use crate::error::{AppError, AppResult, RenderError};

/// 每个二维码模块的边长（像素）
const MODULE_SIZE: u32 = 15;

/// 识别码图片生成能力
///
/// 渲染后端只能按路径引用图片，所以返回值必须是磁盘上存在的绝对路径。
pub trait CodeGenerator {
    fn generate(&self, code: &IdentifierCode) -> AppResult<PathBuf>;
}

/// 二维码 SVG 生成器
///
/// 职责：
/// - 按 `qrcode-{序号}.svg` 写入输出目录
/// - 覆盖同名旧文件，运行结束后不清理
pub struct QrSvgGenerator {
    output_dir: PathBuf,
}

impl QrSvgGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 把识别码内容渲染为 SVG 文本
    pub fn render_svg(code: &IdentifierCode) -> AppResult<String> {
        let qr = QrCode::with_error_correction_level(code.payload.as_bytes(), EcLevel::H)
            .map_err(|e| {
                AppError::Render(RenderError::CodeGeneration {
                    order_number: code.order_number,
                    message: e.to_string(),
                })
            })?;

        Ok(qr
            .render::<svg::Color>()
            .module_dimensions(MODULE_SIZE, MODULE_SIZE)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .quiet_zone(true)
            .build())
    }
}

impl CodeGenerator for QrSvgGenerator {
    fn generate(&self, code: &IdentifierCode) -> AppResult<PathBuf> {
        let svg_text = Self::render_svg(code)?;

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| AppError::write_failed(&self.output_dir, e))?;
        let path = self.output_dir.join(code.file_name());
        fs::write(&path, svg_text).map_err(|e| AppError::write_failed(&path, e))?;

        let absolute = fs::canonicalize(&path).map_err(|e| AppError::io(&path, e))?;
        debug!("识别码已写入: {} ({})", absolute.display(), code.payload);
        Ok(absolute)
    }
}

/// 为所有计分题生成识别码图片
pub fn generate_all<'a, G, I>(generator: &G, codes: I) -> AppResult<CodeImages>
where
    G: CodeGenerator + ?Sized,
    I: IntoIterator<Item = &'a IdentifierCode>,
{
    let mut images = CodeImages::new();
    for code in codes {
        let path = generator.generate(code)?;
        images.insert(code.order_number, path);
    }
    info!("[AutoExam] ✓ 已生成 {} 个识别码", images.len());
    Ok(images)
}
