pub mod csv_loader;

pub use csv_loader::{load_question_bank, read_question_bank, QuestionBank};
