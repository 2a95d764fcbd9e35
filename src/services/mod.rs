pub mod code_generator;
pub mod document_emitter;
pub mod template;

pub use code_generator::{generate_all, CodeGenerator, QrSvgGenerator};
pub use document_emitter::{DocumentEmitter, ExamHeader};
pub use template::{ExamTemplate, TemplateContext};
