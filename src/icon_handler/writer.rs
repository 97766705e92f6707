//! # 输出模块
//!
//! ## 设计思路
//!
//! 负责输出目录准备与 PNG 落盘。编码先在内存中完成，再一次性写文件，
//! 使“编码失败”和“写入失败”在错误类型上可区分。
//!
//! 同名文件直接覆盖；写入中途失败时已写出的图标保留在磁盘上，不做回滚。

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use super::source::GeneratedIcon;
use super::{IconError, IconGenerator};

impl IconGenerator {
    /// 确保输出目录存在（已存在时不报错，也不触碰其中的文件）。
    pub(crate) fn ensure_output_dir(dir: &Path) -> Result<(), IconError> {
        fs::create_dir_all(dir).map_err(|e| {
            IconError::FileSystem(format!("创建输出目录 '{}' 失败：{}", dir.display(), e))
        })
    }

    /// 将图标编码为 PNG 并写入 `path`。
    pub(crate) fn write_png(image: &DynamicImage, path: &Path) -> Result<GeneratedIcon, IconError> {
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| IconError::Encode(format!("PNG 编码失败：{}", e)))?;
        let bytes = cursor.into_inner();

        fs::write(path, &bytes).map_err(|e| {
            IconError::FileSystem(format!("写入图标 '{}' 失败：{}", path.display(), e))
        })?;

        log::debug!("💾 已写入 {}（{} 字节）", path.display(), bytes.len());

        Ok(GeneratedIcon {
            size: image.width(),
            path: path.to_path_buf(),
            bytes_written: bytes.len(),
        })
    }
}
