//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，入口层只面对这一种错误类型，
//! 替代分散的 `.map_err(|e| e.to_string())`、`expect()` 等不一致模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `IconError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::icon_handler::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标生成流水线错误（读取 / 解码 / 重采样 / 写入）
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 终端读写失败
    #[error("终端读写失败: {0}")]
    Io(#[from] std::io::Error),

    /// 交互输入无效
    #[error("输入无效: {0}")]
    Input(String),
}
