//! # 图标生成模块（icon_handler）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载校验 → 解码 → 正方形重采样 → PNG 落盘”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线
//! - `loader`：负责本地文件加载与签名校验
//! - `pipeline`：负责解码、像素限制、重采样
//! - `writer`：负责输出目录与 PNG 写入
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（交互输入）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ writer.rs（确保输出目录）
//!    ├─ loader.rs（读取 + 签名校验）
//!    ├─ pipeline.rs（解码 + 像素限制）
//!    └─ 16 / 48 / 128 逐档：
//!         pipeline.rs（重采样）→ writer.rs（PNG 写入）
//!    ↓
//! 返回 IconError 给入口层
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;
mod writer;

pub use config::{DEFAULT_OUTPUT_DIR, ICON_SIZES, IconConfig};
pub use error::IconError;
pub use handler::IconGenerator;
pub use source::{GeneratedIcon, SizeSpec};
