//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“尺寸表”和“流水线中间结果”解耦：
//! - `SizeSpec` 表示一档固定输出尺寸
//! - `RawImageData` 表示已加载但未解码的字节
//! - `SourceImage` 表示解码后、在整次运行中共享的源图
//! - `GeneratedIcon` 表示一次成功写入的结果

use std::path::PathBuf;

use image::DynamicImage;

/// 一档图标尺寸：边长与输出文件名。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeSpec {
    /// 正方形边长（像素）。
    pub size: u32,
    /// 输出目录下的文件名。
    pub file_name: &'static str,
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 解码阶段输出：整次运行只解码一次的源图。
pub(crate) struct SourceImage {
    pub(crate) image: DynamicImage,
    pub(crate) source_hint: String,
}

/// 单个图标的写入结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcon {
    /// 图标边长（像素）。
    pub size: u32,
    /// 写入的文件路径。
    pub path: PathBuf,
    /// PNG 编码后的字节数。
    pub bytes_written: usize,
}
