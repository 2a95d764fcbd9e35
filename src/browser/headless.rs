use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{AppError, AppResult};

/// 运行中的无头浏览器
///
/// 持有浏览器和事件处理任务，`shutdown` 时一起关闭。
pub struct HeadlessBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl HeadlessBrowser {
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// 关闭浏览器进程
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!("关闭浏览器时出错: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器退出时出错: {}", e);
        }
        self.handler_task.abort();
    }
}

/// 启动无头浏览器
///
/// # 参数
/// - `executable`: 浏览器可执行文件路径，`None` 时由 chromiumoxide 自动查找
///
/// # 返回
/// 返回已启动的浏览器，允许页面访问本地文件（识别码图片按路径引用）
pub async fn launch_headless_browser(executable: Option<&Path>) -> AppResult<HeadlessBrowser> {
    info!("[AutoExam] 🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--allow-file-access-from-files",
        "--enable-local-file-accesses",
    ]);
    if let Some(path) = executable {
        debug!("浏览器路径: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        AppError::browser_launch_failed(e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AppError::browser_launch_failed(e.to_string())
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    Ok(HeadlessBrowser {
        browser,
        handler_task,
    })
}
