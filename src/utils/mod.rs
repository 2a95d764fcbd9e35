pub mod file_url;
pub mod logging;
pub mod prompt;
