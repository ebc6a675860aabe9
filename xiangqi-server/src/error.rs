//! 服务端错误类型

use thiserror::Error;
use xiangqi_core::{ChessError, SessionId, Side};

/// 会话管理错误
#[derive(Error, Debug)]
pub enum ServerError {
    /// 会话不存在
    #[error("Session {0} not found")]
    SessionNotFound(SessionId),

    /// 规则引擎拒绝了操作
    #[error(transparent)]
    Chess(#[from] ChessError),

    /// AI 思考超时
    #[error("AI search timed out after {timeout_ms} ms")]
    AiTimeout { timeout_ms: u64 },

    /// AI 没有可走的棋
    #[error("AI found no legal move for {side:?}")]
    AiNoMove { side: Side },

    /// AI 计算期间对局已变化
    #[error("Session changed during AI search (ply {expected} -> {actual})")]
    StaleAiMove { expected: usize, actual: usize },

    /// AI 任务异常退出
    #[error("AI task failed: {0}")]
    AiTask(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
