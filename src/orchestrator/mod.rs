//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `discovery` - 输入文件发现
//! - 扫描当前目录的 CSV 文件
//! - 多个文件时显示编号菜单
//!
//! ### `create_mode` - 创建模式
//! - 规范化 → 组装 → 识别码 → PDF
//! - 输出最终统计信息
//!
//! ## 层次关系
//!
//! ```text
//! create_mode (一次运行)
//!     ↓
//! assembly (Vec<QuestionRecord> → 正文)
//!     ↓
//! services (能力层：识别码 / 模板 / 文档输出)
//!     ↓
//! infrastructure (基础设施：PdfPrinter)
//! ```

pub mod create_mode;
pub mod discovery;

pub use create_mode::{prepare_exam, resolve_context, run_create, CreateOptions, PreparedExam};
pub use discovery::{discover, list_csv_files, select_input_file, Discovered};
