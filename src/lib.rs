//! # 图标生成工具 — 库入口
//!
//! 从一张源图生成浏览器扩展所需的三档 PNG 图标：
//!
//! ```text
//! icons/icon16.png    16x16
//! icons/icon48.png    48x48
//! icons/icon128.png   128x128
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，入口层的返回类型 |
//! | [`icon_handler`] | 源图加载、解码、重采样与 PNG 写入 |
//! | [`input`] | 交互提示与路径读取 |

pub mod error;
pub mod icon_handler;
pub mod input;

use std::io::{BufRead, Write};

use error::AppError;
use icon_handler::{GeneratedIcon, IconConfig, IconGenerator};

/// 完整的一次交互运行：提示 → 读取路径 → 生成图标 → 每写一个文件输出一行 `Created ...`。
pub fn run<R: BufRead, W: Write>(
    config: IconConfig,
    reader: &mut R,
    writer: &mut W,
) -> Result<Vec<GeneratedIcon>, AppError> {
    let generator = IconGenerator::new(config)?;
    let input_path = input::prompt_input_path(reader, writer)?;

    let mut report_error = None;
    let icons = generator.generate_with_progress(&input_path, |icon| {
        if report_error.is_none() {
            if let Err(err) = writeln!(writer, "Created {}", icon.path.display()) {
                report_error = Some(err);
            }
        }
    })?;

    if let Some(err) = report_error {
        return Err(err.into());
    }

    Ok(icons)
}
