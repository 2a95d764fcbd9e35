//! 组装层（Assembly）
//!
//! ```text
//! Vec<QuestionRecord> ──fold──▶ Vec<Block> ──markup──▶ HTML 正文
//!                                   │
//!                                   └──▶ 识别码需求（由 services 生成图片）
//! ```

pub mod engine;
pub mod markup;
pub mod node;

pub use engine::{assemble, AssemblyResult, AssemblyState};
pub use node::{AnswerAffordance, Block, CodeImages, IdentifierCode, MarksCell, QuestionBlock};
