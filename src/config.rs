use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AppResult, ConfigError};

/// 默认配置文件名（当前目录）
pub const CONFIG_FILE_NAME: &str = "autoexam.toml";

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// HTML 模板路径，不存在时使用内置模板
    pub template_path: PathBuf,
    /// 完整 HTML 调试输出，每次运行覆盖
    pub debug_dump_path: PathBuf,
    /// PDF 输出目录
    pub output_dir: PathBuf,
    /// 识别码图片目录
    pub code_dir: PathBuf,
    /// 浏览器可执行文件，未设置时自动查找
    pub browser_executable: Option<PathBuf>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("index.html"),
            debug_dump_path: PathBuf::from("log.html"),
            output_dir: PathBuf::from("."),
            code_dir: PathBuf::from("."),
            browser_executable: None,
            verbose_logging: false,
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    template_path: Option<PathBuf>,
    debug_dump_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    code_dir: Option<PathBuf>,
    browser_executable: Option<PathBuf>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 加载配置：默认值 → 配置文件 → 环境变量
    pub fn load() -> AppResult<Self> {
        let file_path = std::env::var("AUTOEXAM_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME));

        let mut config = Self::default();
        if file_path.exists() {
            config = config.merge_file(&file_path)?;
        }
        config.apply_env(|name| std::env::var(name).ok())
    }

    /// 合并 TOML 配置文件
    pub fn merge_file(self, path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!("已读取配置文件: {}", path.display());

        Ok(Self {
            template_path: file.template_path.unwrap_or(self.template_path),
            debug_dump_path: file.debug_dump_path.unwrap_or(self.debug_dump_path),
            output_dir: file.output_dir.unwrap_or(self.output_dir),
            code_dir: file.code_dir.unwrap_or(self.code_dir),
            browser_executable: file.browser_executable.or(self.browser_executable),
            verbose_logging: file.verbose_logging.unwrap_or(self.verbose_logging),
        })
    }

    /// 应用环境变量覆盖，`lookup` 便于测试注入
    pub fn apply_env<F>(self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path_var = |name: &str| lookup(name).map(PathBuf::from);

        let verbose_logging = match lookup("AUTOEXAM_VERBOSE") {
            Some(value) => value.parse().map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: "AUTOEXAM_VERBOSE".to_string(),
                value,
                expected_type: "bool".to_string(),
            })?,
            None => self.verbose_logging,
        };

        Ok(Self {
            template_path: path_var("AUTOEXAM_TEMPLATE").unwrap_or(self.template_path),
            debug_dump_path: path_var("AUTOEXAM_DEBUG_DUMP").unwrap_or(self.debug_dump_path),
            output_dir: path_var("AUTOEXAM_OUTPUT_DIR").unwrap_or(self.output_dir),
            code_dir: path_var("AUTOEXAM_CODE_DIR").unwrap_or(self.code_dir),
            browser_executable: path_var("AUTOEXAM_BROWSER").or(self.browser_executable),
            verbose_logging,
        })
    }
}
