//! 交互输入模块
//!
//! 打印提示并从标准输入读取一行作为源图路径。读写端以泛型传入，便于测试。

use std::io::{BufRead, Write};

use crate::error::AppError;

/// 交互提示语。
pub const INPUT_PROMPT: &str = "Enter the path to the input image: ";

/// 输出提示并读取一行输入，仅去掉行尾换行符。
///
/// 输入流在读到任何内容之前就结束时返回 `AppError::Input`。
pub fn prompt_input_path<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<String, AppError> {
    writer.write_all(INPUT_PROMPT.as_bytes())?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(AppError::Input("未读取到图片路径（输入已结束）".to_string()));
    }

    let path = line.trim_end_matches(['\r', '\n']).to_string();
    log::debug!("⌨️ 读取到输入路径: {:?}", path);
    Ok(path)
}
