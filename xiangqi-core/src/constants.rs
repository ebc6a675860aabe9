//! 规则引擎常量定义

/// 棋盘宽度（纵线数）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（横线数）
pub const BOARD_HEIGHT: usize = 10;

/// 棋盘格点总数
pub const BOARD_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 九宫纵线范围
pub const PALACE_FILES: std::ops::RangeInclusive<u8> = 3..=5;

/// 黑方九宫横线范围（上方）
pub const BLACK_PALACE_RANKS: std::ops::RangeInclusive<u8> = 0..=2;

/// 红方九宫横线范围（下方）
pub const RED_PALACE_RANKS: std::ops::RangeInclusive<u8> = 7..=9;

/// 黑方半场的最后一条横线，河界位于第 4 与第 5 横线之间
pub const RIVER_BLACK_EDGE: u8 = 4;

/// 红方半场的第一条横线
pub const RIVER_RED_EDGE: u8 = 5;

/// 默认无吃子判和步数（单方一步计 1，120 即 60 回合）
pub const DEFAULT_NO_CAPTURE_DRAW_PLIES: u32 = 120;

/// 棋谱格式版本
pub const RECORD_VERSION: &str = "1.0";

/// 默认 AI 思考超时（毫秒）
pub const DEFAULT_AI_TIMEOUT_MS: u64 = 5_000;
