use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入文件发现错误
    #[error("输入文件错误: {0}")]
    Discovery(#[from] DiscoveryError),
    /// 题目记录解析错误
    #[error("题目解析错误: {0}")]
    Decode(#[from] RecordDecodeError),
    /// 渲染后端错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件读写错误
    #[error("文件操作失败 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 输入文件发现错误
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// 当前目录没有 CSV 文件
    #[error("目录 {} 中没有检测到 CSV 文件", dir.display())]
    NoFiles { dir: PathBuf },
    /// CSV 文件过多，无法提供选择菜单
    #[error("检测到 {count} 个 CSV 文件，超过 10 个")]
    TooManyFiles { count: usize },
    /// 读取目录失败
    #[error("无法读取目录 {}: {source}", dir.display())]
    DirectoryRead {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 题目记录解析错误
///
/// 任何一行出错都会终止整个运行，不会输出部分文档。
#[derive(Debug, Error)]
pub enum RecordDecodeError {
    /// 无法读取 CSV 源
    #[error("无法读取 CSV 文件 {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// 文件为空，缺少表头行
    #[error("CSV 文件 {} 为空，缺少表头", path.display())]
    MissingHeader { path: PathBuf },
    /// 列数不足
    #[error("第 {row} 行只有 {found} 列，至少需要 6 列")]
    MissingColumns { row: usize, found: usize },
    /// 分数或分区列不是整数
    #[error("第 {row} 行的 {column} 列不是有效整数: '{value}'")]
    InvalidInteger {
        row: usize,
        column: &'static str,
        value: String,
    },
    /// 分值超过单题上限
    #[error("第 {row} 行的分值 {value} 超过上限 {max}")]
    MarksOutOfRange { row: usize, value: u32, max: u32 },
    /// 分区编号必须为正整数
    #[error("第 {row} 行的分区编号必须大于 0")]
    InvalidSection { row: usize },
}

/// 渲染后端错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 模板读取失败
    #[error("无法读取模板 {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 识别码生成失败
    #[error("题目 {order_number} 的识别码生成失败: {message}")]
    CodeGeneration { order_number: usize, message: String },
    /// 浏览器启动失败
    #[error("无头浏览器启动失败: {message}")]
    BrowserLaunch { message: String },
    /// 路径无法转换为 file:// 地址
    #[error("无法把 {} 转换为 file:// 地址", path.display())]
    FileUrl { path: PathBuf },
    /// 页面加载失败
    #[error("无法加载 {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// PDF 打印失败
    #[error("PDF 打印失败: {source}")]
    Print {
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 写入输出文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("配置文件 {} 解析失败: {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 交互选择错误
///
/// 只在选择菜单内部使用，通过重新提示恢复，不会终止运行。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// 输入不是单个数字
    #[error("输入 '{input}' 不是单个数字")]
    NotADigit { input: String },
    /// 编号超出文件列表
    #[error("编号 {choice} 不在 1..={max} 范围内")]
    OutOfRange { choice: u32, max: usize },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读写错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建输出文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Render(RenderError::Write {
            path: path.into(),
            source,
        })
    }

    /// 创建浏览器启动错误
    pub fn browser_launch_failed(message: impl Into<String>) -> Self {
        AppError::Render(RenderError::BrowserLaunch {
            message: message.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
