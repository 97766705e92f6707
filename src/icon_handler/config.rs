//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `IconConfig`，保证运行时行为可观测、可测试。
//! 尺寸表本身不可配置，固定为 16 / 48 / 128 三档（见 `ICON_SIZES`）。
//!
//! ## 实现思路
//!
//! - `Default` 提供与命令行脚本一致的行为：输出到 `icons/`，Lanczos3 重采样。
//! - `validate` 在构建生成器时统一校验，拒绝最近邻滤镜与非法上限。

use std::path::PathBuf;

use image::imageops::FilterType;

use super::IconError;
use super::source::SizeSpec;

/// 默认输出目录（相对当前工作目录）。
pub const DEFAULT_OUTPUT_DIR: &str = "icons";

/// 固定的图标尺寸表。
pub const ICON_SIZES: [SizeSpec; 3] = [
    SizeSpec {
        size: 16,
        file_name: "icon16.png",
    },
    SizeSpec {
        size: 48,
        file_name: "icon48.png",
    },
    SizeSpec {
        size: 128,
        file_name: "icon128.png",
    },
];

/// 图标生成配置。
///
/// 字段覆盖了读取、解码、重采样与输出四个阶段。
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// 图标输出目录，不存在时自动创建。
    pub output_dir: PathBuf,
    /// 重采样滤镜，三档尺寸统一使用。
    pub resize_filter: FilterType,
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            resize_filter: FilterType::Lanczos3,
            max_file_size: 256 * 1024 * 1024,
            max_decoded_pixels: 100_000_000,
            max_decoded_bytes: 400 * 1024 * 1024,
        }
    }
}

impl IconConfig {
    /// 使用默认策略，仅替换输出目录。
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// 校验配置合法性。
    ///
    /// 最近邻会在缩小时产生明显锯齿，因此直接拒绝。
    pub fn validate(&self) -> Result<(), IconError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(IconError::InvalidFormat("输出目录不能为空".to_string()));
        }
        if matches!(self.resize_filter, FilterType::Nearest) {
            return Err(IconError::InvalidFormat(
                "resize_filter 不能为 Nearest（缩小时会产生锯齿）".to_string(),
            ));
        }
        if self.max_file_size == 0 {
            return Err(IconError::InvalidFormat("max_file_size 必须大于 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(IconError::InvalidFormat("max_decoded_pixels 必须大于 0".to_string()));
        }
        if self.max_decoded_bytes == 0 {
            return Err(IconError::InvalidFormat("max_decoded_bytes 必须大于 0".to_string()));
        }

        Ok(())
    }

    /// 尺寸表中某一项对应的完整输出路径。
    pub fn output_path(&self, spec: &SizeSpec) -> PathBuf {
        self.output_dir.join(spec.file_name)
    }
}
