//! 中国象棋 AI 引擎
//!
//! 包含:
//! - 子力 + 灵活度评估
//! - Negamax + Alpha-Beta 搜索
//! - 可设种子的同分走法随机选择

mod evaluate;
mod search;

pub use evaluate::{Evaluator, MOBILITY_WEIGHT};
pub use search::{ordered_moves, select_move, AiConfig, AiEngine, Difficulty, MATE_SCORE};
