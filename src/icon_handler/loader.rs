//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 负责本地源图的原始字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 存在性检查 → metadata 体积限制 → 读取 → 文件签名（magic bytes）校验。
//! - 签名能识别但不是图片（如 zip / pdf）时直接拒绝；
//!   无法识别的签名交给解码器判断（TGA 等格式没有 magic bytes）。

use std::path::Path;

use super::source::RawImageData;
use super::{IconConfig, IconError, IconGenerator};

impl IconGenerator {
    /// 从本地路径加载源图原始字节。
    pub(crate) fn load_from_file(
        &self,
        path: &Path,
        config: &IconConfig,
    ) -> Result<RawImageData, IconError> {
        log::info!("📁 开始读取源图 - 路径: {}", path.display());

        if !path.exists() {
            return Err(IconError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| IconError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(IconError::FileSystem(format!(
                "路径不是文件：{}",
                path.display()
            )));
        }

        if metadata.len() > config.max_file_size {
            return Err(IconError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| IconError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), IconError> {
        if bytes.is_empty() {
            return Err(IconError::Decode("图片内容为空".to_string()));
        }

        match infer::get(bytes) {
            Some(kind) if kind.matcher_type() != infer::MatcherType::Image => {
                Err(IconError::Decode(format!(
                    "文件签名不是图片类型：{}",
                    kind.mime_type()
                )))
            }
            Some(_) => Ok(()),
            None => {
                log::debug!("🔍 文件签名未识别，交由解码器判断");
                Ok(())
            }
        }
    }
}
