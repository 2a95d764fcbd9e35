pub mod exam;
pub mod loaders;
pub mod question;

pub use exam::ExamContext;
pub use loaders::{load_question_bank, read_question_bank, QuestionBank};
pub use question::{parse_choices, QuestionFormat, QuestionRecord};
