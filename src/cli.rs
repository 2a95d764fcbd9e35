//! 命令行参数定义

use clap::Parser;

use crate::orchestrator::CreateOptions;

#[derive(Debug, Parser)]
#[command(
    name = "AutoExam",
    version,
    about = "Create print-ready exams from a CSV question bank.",
    long_about = "Create print-ready exams from a CSV question bank.\n\n\
                  Each scored question carries a QR code encoding subject, title and question order."
)]
pub struct Cli {
    /// Create mode: pick a CSV in the current directory and build the exam PDF.
    #[arg(short = 'c', conflicts_with = "view")]
    pub create: bool,

    /// View mode (not implemented yet).
    #[arg(short = 'v')]
    pub view: bool,

    /// The subject of the exam.
    #[arg(long)]
    pub subject: Option<String>,

    /// The title of the exam.
    #[arg(long)]
    pub title: Option<String>,

    /// The amount of time allowed for the exam (in minutes).
    #[arg(long = "time_allowed")]
    pub time_allowed: Option<String>,

    /// The year group of the exam.
    #[arg(long)]
    pub year: Option<String>,
}

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    View,
    None,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.create {
            Mode::Create
        } else if self.view {
            Mode::View
        } else {
            Mode::None
        }
    }

    pub fn create_options(&self) -> CreateOptions {
        CreateOptions {
            subject: self.subject.clone(),
            title: self.title.clone(),
            time_allowed: self.time_allowed.clone(),
            year: self.year.clone(),
        }
    }
}
