//! 中国象棋规则引擎
//!
//! 包含:
//! - 棋子、棋盘、格点等核心数据结构
//! - 走法生成和规则验证（将军、将死、困毙）
//! - 对局状态机
//! - 棋谱格式 (JSON, FEN)

mod board;
mod constants;
mod error;
mod fen;
mod moves;
mod piece;
mod record;
mod rules;
mod session;

pub use board::Board;
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, Position, INITIAL_FEN};
pub use moves::{Move, MoveGenerator};
pub use piece::{Piece, PieceKind, Side, Square};
pub use record::{GameMetadata, GameRecord, MoveRecord};
pub use rules::Rules;
pub use session::{GameSession, GameStatus, PlayerId, SessionConfig, SessionId, SessionSnapshot};
