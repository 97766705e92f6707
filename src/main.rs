//! # 图标生成工具 — 应用入口
//!
//! 本文件仅负责日志初始化与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs`。

use std::io;
use std::process::ExitCode;

use icon_generator::icon_handler::IconConfig;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();

    match icon_generator::run(IconConfig::default(), &mut stdin.lock(), &mut stdout.lock()) {
        Ok(icons) => {
            log::debug!("共生成 {} 个图标", icons.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("图标生成失败: {err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
