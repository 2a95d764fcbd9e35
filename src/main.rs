use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use auto_exam::cli::{Cli, Mode};
use auto_exam::orchestrator::run_create;
use auto_exam::utils::logging::log_startup;
use auto_exam::{logger, Config};
use clap::Parser;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[AutoExam] 错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // 加载配置
    let config = Config::load();
    let verbose = config.as_ref().map(|c| c.verbose_logging).unwrap_or(false);

    // 初始化日志
    logger::init(verbose);
    let config = config.context("加载配置失败")?;
    log_startup(env!("CARGO_PKG_VERSION"));

    match cli.mode() {
        Mode::Create => {
            let work_dir = std::env::current_dir().context("无法获取当前目录")?;
            let mut input = io::stdin().lock();
            let mut output = io::stdout();

            run_create(
                &config,
                &cli.create_options(),
                &work_dir,
                &mut input,
                &mut output,
            )
            .await?;
        }
        Mode::View => info!("[AutoExam] 查看模式即将推出"),
        Mode::None => info!("[AutoExam] 未选择运行模式..."),
    }

    Ok(())
}
