//! 中国象棋对局服务
//!
//! 包含:
//! - 会话管理（按会话串行化、状态广播）
//! - AI 走棋调度（超时、过期结果丢弃）
//! - 服务配置

pub mod config;
pub mod error;
pub mod manager;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use manager::{SessionEvent, SessionManager};
