//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconGenerator` 只负责流程编排与配置持有，不直接与终端交互。
//! 处理链路固定为：
//! 1. 确保输出目录存在（先于解码执行）
//! 2. 读取源图原始字节
//! 3. 解码一次，得到共享源图
//! 4. 按尺寸表依次重采样、编码、写入，并逐个回报
//!
//! ## 实现思路
//!
//! - 任一阶段失败立即返回，已写出的图标保留在磁盘上。
//! - 源图在函数返回时随作用域释放，成功与失败路径一致。
//! - 记录 `load/decode/resize/write/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::{Duration, Instant};

use super::config::ICON_SIZES;
use super::source::GeneratedIcon;
use super::{IconConfig, IconError};

/// 图标生成器。
pub struct IconGenerator {
    pub(super) config: IconConfig,
}

impl IconGenerator {
    /// 根据配置创建生成器，配置非法时返回 `InvalidFormat`。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use icon_generator::icon_handler::{IconConfig, IconGenerator};
    ///
    /// let generator = IconGenerator::new(IconConfig::default())?;
    /// # Ok::<(), icon_generator::icon_handler::IconError>(())
    /// ```
    pub fn new(config: IconConfig) -> Result<Self, IconError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 当前生效配置。
    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// 生成全部图标，返回每个图标的写入结果（按尺寸表顺序）。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use icon_generator::icon_handler::{IconConfig, IconGenerator};
    ///
    /// let generator = IconGenerator::new(IconConfig::default())?;
    /// let icons = generator.generate("logo.png")?;
    /// assert_eq!(icons.len(), 3);
    /// # Ok::<(), icon_generator::icon_handler::IconError>(())
    /// ```
    pub fn generate(&self, input_path: impl AsRef<Path>) -> Result<Vec<GeneratedIcon>, IconError> {
        self.generate_with_progress(input_path, |_| {})
    }

    /// 生成全部图标，每写入一个文件立即回调 `on_written`。
    pub fn generate_with_progress<F>(
        &self,
        input_path: impl AsRef<Path>,
        mut on_written: F,
    ) -> Result<Vec<GeneratedIcon>, IconError>
    where
        F: FnMut(&GeneratedIcon),
    {
        let config = &self.config;
        let input_path = input_path.as_ref();
        let total_start = Instant::now();

        Self::ensure_output_dir(&config.output_dir)?;

        let load_start = Instant::now();
        let raw = self.load_from_file(input_path, config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let source = self.decode_source(raw, config)?;
        let decode_elapsed = decode_start.elapsed();

        let mut resize_elapsed = Duration::ZERO;
        let mut write_elapsed = Duration::ZERO;
        let mut generated = Vec::with_capacity(ICON_SIZES.len());

        for spec in &ICON_SIZES {
            let resize_start = Instant::now();
            let resized = self.resize_square(&source, spec.size, config)?;
            resize_elapsed += resize_start.elapsed();

            let write_start = Instant::now();
            let icon = Self::write_png(&resized, &config.output_path(spec))?;
            write_elapsed += write_start.elapsed();

            on_written(&icon);
            generated.push(icon);
        }

        log::info!(
            "✅ 图标生成完成 - 来源: {} 数量: {} load={}ms decode={}ms resize={}ms write={}ms total={}ms",
            source.source_hint,
            generated.len(),
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            resize_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(generated)
    }
}
