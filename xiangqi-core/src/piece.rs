//! 棋子与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLACK_PALACE_RANKS, BOARD_HEIGHT, BOARD_WIDTH, PALACE_FILES, RED_PALACE_RANKS,
    RIVER_BLACK_EDGE, RIVER_RED_EDGE,
};

/// 棋子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 将/帅
    General,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马/傌
    Horse,
    /// 车/俥
    Chariot,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Soldier,
}

impl PieceKind {
    /// 全部棋子种类
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    /// 子力分值（用于 AI 评估），将/帅不计分
    pub fn material_value(&self) -> i32 {
        match self {
            PieceKind::General => 0,
            PieceKind::Chariot => 900,
            PieceKind::Cannon => 450,
            PieceKind::Horse => 400,
            PieceKind::Elephant => 200,
            PieceKind::Advisor => 200,
            PieceKind::Soldier => 100,
        }
    }

    /// 获取 FEN 字符（红方大写，黑方小写）
    pub fn to_fen_char(&self, side: Side) -> char {
        let c = match self {
            PieceKind::General => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Chariot => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Soldier => 'p',
        };
        match side {
            Side::Red => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Red
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::General,
            'a' => PieceKind::Advisor,
            'b' | 'e' => PieceKind::Elephant,
            'n' | 'h' => PieceKind::Horse,
            'r' => PieceKind::Chariot,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Soldier,
            _ => return None,
        };
        Some((kind, side))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 红方（先手，在下方）
    Red,
    /// 黑方（后手，在上方）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 兵/卒前进方向上的横线增量
    pub fn forward(&self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::Red => 'r',
            Side::Black => 'b',
        }
    }

    /// 从 FEN 字符解析（`w` 视为红方）
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'r' | 'R' | 'w' | 'W' => Some(Side::Red),
            'b' | 'B' => Some(Side::Black),
            _ => None,
        }
    }
}

/// 棋子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    /// 创建新棋子
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// 获取棋子显示的汉字
    pub fn display_char(&self) -> char {
        match (self.kind, self.side) {
            (PieceKind::General, Side::Red) => '帥',
            (PieceKind::General, Side::Black) => '將',
            (PieceKind::Advisor, Side::Red) => '仕',
            (PieceKind::Advisor, Side::Black) => '士',
            (PieceKind::Elephant, Side::Red) => '相',
            (PieceKind::Elephant, Side::Black) => '象',
            (PieceKind::Horse, Side::Red) => '傌',
            (PieceKind::Horse, Side::Black) => '馬',
            (PieceKind::Chariot, Side::Red) => '俥',
            (PieceKind::Chariot, Side::Black) => '車',
            (PieceKind::Cannon, Side::Red) => '炮',
            (PieceKind::Cannon, Side::Black) => '砲',
            (PieceKind::Soldier, Side::Red) => '兵',
            (PieceKind::Soldier, Side::Black) => '卒',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.side)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceKind::from_fen_char(c).map(|(kind, side)| Piece { kind, side })
    }

    /// 获取子力分值
    pub fn material_value(&self) -> i32 {
        self.kind.material_value()
    }
}

/// 棋盘格点
///
/// `file` 从红方视角自左向右 0-8，`rank` 0 为黑方底线、9 为红方底线。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    /// 纵线 (0-8)
    pub file: u8,
    /// 横线 (0-9)
    pub rank: u8,
}

impl Square {
    /// 创建格点，越界返回 None
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_WIDTH && (rank as usize) < BOARD_HEIGHT {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    /// 创建格点（不检查边界，内部及测试使用）
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// 检查格点是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.file as usize) < BOARD_WIDTH && (self.rank as usize) < BOARD_HEIGHT
    }

    /// 是否位于指定阵营的半场
    pub fn is_on_home_side(&self, side: Side) -> bool {
        match side {
            Side::Black => self.rank <= RIVER_BLACK_EDGE,
            Side::Red => self.rank >= RIVER_RED_EDGE,
        }
    }

    /// 对指定阵营而言是否已过河
    pub fn has_crossed_river(&self, side: Side) -> bool {
        !self.is_on_home_side(side)
    }

    /// 检查格点是否在指定阵营的九宫内
    pub fn is_in_palace(&self, side: Side) -> bool {
        let ranks = match side {
            Side::Black => BLACK_PALACE_RANKS,
            Side::Red => RED_PALACE_RANKS,
        };
        PALACE_FILES.contains(&self.file) && ranks.contains(&self.rank)
    }

    /// 获取偏移后的格点，越界返回 None
    pub fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if file < 0 || rank < 0 {
            return None;
        }
        Square::new(file as u8, rank as u8)
    }

    /// 转换为数组索引
    pub fn to_index(&self) -> usize {
        self.rank as usize * BOARD_WIDTH + self.file as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_WIDTH * BOARD_HEIGHT {
            Some(Square {
                file: (index % BOARD_WIDTH) as u8,
                rank: (index / BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }

    /// 遍历全部 90 个格点（按横线优先）
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_WIDTH * BOARD_HEIGHT).filter_map(Square::from_index)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.file, self.rank)
    }
}
