//! 日志初始化
//!
//! `RUST_LOG` 优先，否则默认 `info`，详细模式下为 `debug`。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认日志级别
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "auto_exam=debug,info"
    } else {
        "info"
    }
}

/// 初始化全局日志，重复调用时忽略
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
