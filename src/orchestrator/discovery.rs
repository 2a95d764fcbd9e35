//! 输入文件发现与选择
//!
//! - 0 个 CSV：报错
//! - 1 个：直接使用
//! - 2..=10 个：编号菜单，只接受单个数字
//! - 超过 10 个：报错

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::error::{AppError, AppResult, DiscoveryError, SelectionError};
use crate::utils::prompt::prompt_line;

/// 菜单最多列出的文件数
pub const MAX_MENU_FILES: usize = 10;

/// 无效编号后重新扫描前的等待时间
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

/// 扫描结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    /// 只有一个候选文件
    Single(PathBuf),
    /// 需要用户选择
    Menu(Vec<PathBuf>),
}

/// 菜单选择结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Selected(PathBuf),
    /// 编号超出范围，需要重新扫描
    Restart,
}

/// 列出目录中扩展名为 `csv` 的文件（区分大小写），按文件名排序
pub fn list_csv_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let read_err = |e: io::Error| DiscoveryError::DirectoryRead {
        dir: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// 扫描目录并判断是否需要菜单
pub fn discover(dir: &Path) -> AppResult<Discovered> {
    let mut files = list_csv_files(dir)?;
    info!("[AutoExam] 检测到 {} 个 CSV 文件", files.len());

    match files.len() {
        0 => Err(DiscoveryError::NoFiles {
            dir: dir.to_path_buf(),
        }
        .into()),
        1 => Ok(Discovered::Single(files.remove(0))),
        count if count <= MAX_MENU_FILES => Ok(Discovered::Menu(files)),
        count => Err(DiscoveryError::TooManyFiles { count }.into()),
    }
}

/// 解析菜单输入，返回从 0 开始的下标
pub fn parse_selection(input: &str, file_count: usize) -> Result<usize, SelectionError> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let digit = match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10),
        _ => None,
    }
    .ok_or_else(|| SelectionError::NotADigit {
        input: trimmed.to_string(),
    })?;

    if digit == 0 || digit as usize > file_count {
        return Err(SelectionError::OutOfRange {
            choice: digit,
            max: file_count,
        });
    }
    Ok(digit as usize - 1)
}

/// 显示编号菜单并读取选择
///
/// 非数字输入重新提示；编号超出范围返回 `Restart`。
pub fn run_menu<R, W>(files: &[PathBuf], input: &mut R, output: &mut W) -> io::Result<MenuOutcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "\n[AutoExam] 检测到以下文件:")?;
    for (index, file) in files.iter().enumerate() {
        writeln!(output, "[AutoExam] {}. {}", index + 1, display_name(file))?;
    }

    loop {
        let line = prompt_line(input, output, "\n[AutoExam] 请选择要使用的文件: ")?;
        match parse_selection(&line, files.len()) {
            Ok(index) => {
                let selected = files[index].clone();
                writeln!(output, "[AutoExam] 已选择 {}", display_name(&selected))?;
                return Ok(MenuOutcome::Selected(selected));
            }
            Err(SelectionError::NotADigit { .. }) => continue,
            Err(e @ SelectionError::OutOfRange { .. }) => {
                warn!("[AutoExam] 无效输入: {}", e);
                writeln!(output, "[AutoExam] 无效输入，请从列表中选择文件。正在重新开始...")?;
                return Ok(MenuOutcome::Restart);
            }
        }
    }
}

/// 发现并选择输入文件，无效编号时重新扫描目录
pub async fn select_input_file<R, W>(
    dir: &Path,
    input: &mut R,
    output: &mut W,
    restart_delay: Duration,
) -> AppResult<PathBuf>
where
    R: BufRead,
    W: Write,
{
    loop {
        match discover(dir)? {
            Discovered::Single(file) => return Ok(file),
            Discovered::Menu(files) => {
                let outcome = run_menu(&files, input, output).map_err(|e| AppError::io(dir, e))?;
                match outcome {
                    MenuOutcome::Selected(file) => return Ok(file),
                    MenuOutcome::Restart => sleep(restart_delay).await,
                }
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn dir_with(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), "h\n").unwrap();
        }
        dir
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let dir = dir_with(&["b.csv", "a.csv", "C.CSV", "notes.txt"]);
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn no_files_is_an_error() {
        let dir = dir_with(&["readme.md"]);
        assert!(matches!(
            discover(dir.path()),
            Err(AppError::Discovery(DiscoveryError::NoFiles { .. }))
        ));
    }

    #[test]
    fn single_file_is_selected_automatically() {
        let dir = dir_with(&["bank.csv"]);
        match discover(dir.path()).unwrap() {
            Discovered::Single(path) => assert!(path.ends_with("bank.csv")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn eleven_files_is_too_many() {
        let names: Vec<String> = (0..11).map(|i| format!("f{i}.csv")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let dir = dir_with(&refs);
        assert!(matches!(
            discover(dir.path()),
            Err(AppError::Discovery(DiscoveryError::TooManyFiles { count: 11 }))
        ));
    }

    #[test]
    fn ten_files_get_a_menu() {
        let names: Vec<String> = (0..10).map(|i| format!("f{i}.csv")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let dir = dir_with(&refs);
        assert!(matches!(discover(dir.path()).unwrap(), Discovered::Menu(files) if files.len() == 10));
    }

    #[test]
    fn selection_accepts_single_digit_only() {
        assert_eq!(parse_selection("2", 3), Ok(1));
        assert_eq!(parse_selection(" 1 ", 3), Ok(0));
        assert!(matches!(parse_selection("12", 3), Err(SelectionError::NotADigit { .. })));
        assert!(matches!(parse_selection("a", 3), Err(SelectionError::NotADigit { .. })));
        assert!(matches!(parse_selection("", 3), Err(SelectionError::NotADigit { .. })));
    }

    #[test]
    fn selection_out_of_range() {
        assert_eq!(
            parse_selection("0", 3),
            Err(SelectionError::OutOfRange { choice: 0, max: 3 })
        );
        assert_eq!(
            parse_selection("4", 3),
            Err(SelectionError::OutOfRange { choice: 4, max: 3 })
        );
    }

    #[test]
    fn menu_reprompts_until_digit() {
        let files = vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")];
        let mut input = Cursor::new("x\n10\n2\n");
        let mut output = Vec::new();

        let outcome = run_menu(&files, &mut input, &mut output).unwrap();

        assert_eq!(outcome, MenuOutcome::Selected(PathBuf::from("b.csv")));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("1. a.csv"));
        assert_eq!(shown.matches("请选择要使用的文件").count(), 3);
    }

    #[test]
    fn menu_restarts_on_out_of_range() {
        let files = vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")];
        let mut input = Cursor::new("7\n");
        let outcome = run_menu(&files, &mut input, &mut Vec::new()).unwrap();
        assert_eq!(outcome, MenuOutcome::Restart);
    }

    #[tokio::test]
    async fn restart_rescans_then_selects() {
        let dir = dir_with(&["a.csv", "b.csv"]);
        let mut input = Cursor::new("9\n1\n");
        let mut output = Vec::new();

        let selected = select_input_file(dir.path(), &mut input, &mut output, Duration::ZERO)
            .await
            .unwrap();

        assert!(selected.ends_with("a.csv"));
        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("检测到以下文件").count(), 2);
    }

    #[tokio::test]
    async fn closed_input_aborts_selection() {
        let dir = dir_with(&["a.csv", "b.csv"]);
        let mut input = Cursor::new("");
        let err = select_input_file(dir.path(), &mut input, &mut Vec::new(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
