//! 棋谱记录格式
//!
//! 以 JSON 保存开局 FEN、双方绑定和走法序列，足以确定性地重放整局。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::RECORD_VERSION;
use crate::fen::INITIAL_FEN;
use crate::piece::{Side, Square};
use crate::session::{GameStatus, PlayerId, SessionConfig};

/// 对局元数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// 红方玩家
    pub red_player: Option<PlayerId>,
    /// 黑方玩家
    pub black_player: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// 导出时的对局状态
    pub status: GameStatus,
    pub winner: Option<Side>,
    /// 对局配置，重放时按此判定和棋
    #[serde(default)]
    pub config: SessionConfig,
}

/// 走法记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 起始位置 [file, rank]
    pub from: [u8; 2],
    /// 目标位置 [file, rank]
    pub to: [u8; 2],
}

impl MoveRecord {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from: [from.file, from.rank],
            to: [to.file, to.rank],
        }
    }

    /// 还原为格点，越界时返回 None
    pub fn squares(&self) -> Option<(Square, Square)> {
        let from = Square::new(self.from[0], self.from[1])?;
        let to = Square::new(self.to[0], self.to[1])?;
        Some((from, to))
    }
}

/// 完整的棋谱记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    pub metadata: GameMetadata,
    /// 初始局面 FEN
    pub initial_fen: String,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
}

impl GameRecord {
    /// 以指定开局创建空棋谱
    pub fn new(initial_fen: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            metadata: GameMetadata {
                red_player: None,
                black_player: None,
                started_at: None,
                ended_at: None,
                status: GameStatus::Waiting,
                winner: None,
                config: SessionConfig::default(),
            },
            initial_fen,
            moves: Vec::new(),
        }
    }

    /// 添加走法
    pub fn add_move(&mut self, mv: MoveRecord) {
        self.moves.push(mv);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new(INITIAL_FEN.to_string())
    }
}
