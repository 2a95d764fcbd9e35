//! # AutoExam
//!
//! 把 CSV 题库转换为可打印试卷 PDF 的 Rust 应用程序，每道计分题附带二维码识别码
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动无头浏览器
//! - `infrastructure/` - `PdfPrinter` 持有唯一的 page，只提供打印能力
//!
//! ### ② 业务能力层（Services）
//! - `QrSvgGenerator` - 识别码图片生成
//! - `ExamTemplate` - 试卷头 + 正文合并
//! - `DocumentEmitter` - 调试 HTML 与 PDF 输出
//!
//! ### ③ 组装层（Assembly）
//! - `assembly/` - 题目序列 → 节点树 → HTML 正文，核心判断逻辑都在这里
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/discovery` - CSV 文件发现与交互选择
//! - `orchestrator/create_mode` - 创建模式完整流程
//!
//! ## 模块结构

pub mod assembly;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use assembly::{assemble, AssemblyResult, Block};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{ExamContext, QuestionFormat, QuestionRecord};
pub use orchestrator::run_create;
