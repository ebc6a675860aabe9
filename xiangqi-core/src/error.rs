//! 错误类型定义

use thiserror::Error;

use crate::piece::{Side, Square};

/// 规则引擎错误
///
/// 所有错误都可由调用方就地恢复，不会破坏对局状态。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// 对局不在进行中
    #[error("Session is not active")]
    NotActive,

    /// 不是该方的回合
    #[error("Not {side:?}'s turn")]
    WrongTurn { side: Side },

    /// 起点没有己方棋子
    #[error("No {side:?} piece at {square}")]
    NoPiece { side: Side, square: Square },

    /// 目标不在合法走法集合内
    #[error("Illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    /// 该方已绑定玩家
    #[error("{side:?} is already bound")]
    SideAlreadyBound { side: Side },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 棋谱内容无效
    #[error("Invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// 重放棋谱时某一步被拒绝
    #[error("Replay failed at ply {ply}: {source}")]
    Replay {
        ply: usize,
        #[source]
        source: Box<ChessError>,
    },
}

/// 规则引擎操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
