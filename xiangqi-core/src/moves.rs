//! 走法与伪合法走法生成
//!
//! 每种棋子的走法规则通过 `PieceKind` 分派到对应的生成函数。
//! 这里只考虑几何规则（蹩腿、塞眼、炮架、九宫、河界），
//! 不考虑走后是否送将，后者见 `rules` 模块。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Piece, PieceKind, Side, Square};

/// 正交方向
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// 斜向方向
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// 马的 8 个落点及对应的马腿（长边方向的相邻格）
const HORSE_JUMPS: [((i8, i8), (i8, i8)); 8] = [
    ((1, 2), (0, 1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((-1, -2), (0, -1)),
    ((2, 1), (1, 0)),
    ((2, -1), (1, 0)),
    ((-2, 1), (-1, 0)),
    ((-2, -1), (-1, 0)),
];

/// 走法
///
/// 一经写入对局历史即不再修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格点
    pub from: Square,
    /// 目标格点
    pub to: Square,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Square, to: Square, captured: Piece) -> Self {
        Self {
            from,
            to,
            captured: Some(captured),
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.captured {
            Some(piece) => write!(f, "{} x{} {}", self.from, piece.display_char(), self.to),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 指定格点上棋子的伪合法落点；格点为空时返回空集
    pub fn pseudo_legal_moves(board: &Board, from: Square) -> Vec<Square> {
        match board.piece_at(from) {
            Some(piece) => {
                let mut moves = Vec::with_capacity(17);
                Self::generate_piece_moves(board, from, piece, &mut moves);
                moves.into_iter().map(|mv| mv.to).collect()
            }
            None => Vec::new(),
        }
    }

    /// 生成指定阵营的所有伪合法走法（不考虑将军）
    pub fn pseudo_legal_for_side(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (square, piece) in board.pieces(side) {
            Self::generate_piece_moves(board, square, piece, &mut moves);
        }

        moves
    }

    /// 生成单个棋子的伪合法走法（含吃子信息）
    pub fn piece_moves(board: &Board, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = board.piece_at(from) {
            Self::generate_piece_moves(board, from, piece, &mut moves);
        }
        moves
    }

    fn generate_piece_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece.kind {
            PieceKind::General => Self::generate_general_moves(board, from, piece.side, moves),
            PieceKind::Advisor => Self::generate_advisor_moves(board, from, piece.side, moves),
            PieceKind::Elephant => Self::generate_elephant_moves(board, from, piece.side, moves),
            PieceKind::Horse => Self::generate_horse_moves(board, from, piece.side, moves),
            PieceKind::Chariot => Self::generate_chariot_moves(board, from, piece.side, moves),
            PieceKind::Cannon => Self::generate_cannon_moves(board, from, piece.side, moves),
            PieceKind::Soldier => Self::generate_soldier_moves(board, from, piece.side, moves),
        }
    }

    /// 将/帅：九宫内正交一步
    fn generate_general_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        for (df, dr) in ORTHOGONAL {
            if let Some(to) = from.offset(df, dr) {
                if to.is_in_palace(side) {
                    Self::try_add_move(board, from, to, side, moves);
                }
            }
        }
    }

    /// 士/仕：九宫内斜向一步
    fn generate_advisor_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        for (df, dr) in DIAGONAL {
            if let Some(to) = from.offset(df, dr) {
                if to.is_in_palace(side) {
                    Self::try_add_move(board, from, to, side, moves);
                }
            }
        }
    }

    /// 象/相：走田字，塞象眼不可走，不可过河
    fn generate_elephant_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        for (df, dr) in DIAGONAL {
            let (Some(eye), Some(to)) = (from.offset(df, dr), from.offset(2 * df, 2 * dr)) else {
                continue;
            };
            if board.is_occupied(eye, None) || !to.is_on_home_side(side) {
                continue;
            }
            Self::try_add_move(board, from, to, side, moves);
        }
    }

    /// 马/傌：走日字，蹩马腿不可走
    fn generate_horse_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        for ((df, dr), (lf, lr)) in HORSE_JUMPS {
            let (Some(leg), Some(to)) = (from.offset(lf, lr), from.offset(df, dr)) else {
                continue;
            };
            if board.is_occupied(leg, None) {
                continue;
            }
            Self::try_add_move(board, from, to, side, moves);
        }
    }

    /// 车/俥：直线任意格，遇子止步，敌子可吃
    fn generate_chariot_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        for (df, dr) in ORTHOGONAL {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                if let Some(target) = board.piece_at(to) {
                    if target.side != side {
                        moves.push(Move::with_capture(from, to, target));
                    }
                    break;
                }
                moves.push(Move::new(from, to));
                current = to;
            }
        }
    }

    /// 炮/砲：不吃子时同车，吃子须隔且仅隔一个炮架
    fn generate_cannon_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        for (df, dr) in ORTHOGONAL {
            let mut current = from;
            let mut screened = false;

            while let Some(to) = current.offset(df, dr) {
                match board.piece_at(to) {
                    None if !screened => moves.push(Move::new(from, to)),
                    None => {}
                    Some(_) if !screened => screened = true,
                    Some(target) => {
                        if target.side != side {
                            moves.push(Move::with_capture(from, to, target));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    /// 兵/卒：过河前只能前进，过河后可左右，永不后退
    fn generate_soldier_moves(board: &Board, from: Square, side: Side, moves: &mut Vec<Move>) {
        if let Some(to) = from.offset(0, side.forward()) {
            Self::try_add_move(board, from, to, side, moves);
        }

        if from.has_crossed_river(side) {
            for df in [-1i8, 1i8] {
                if let Some(to) = from.offset(df, 0) {
                    Self::try_add_move(board, from, to, side, moves);
                }
            }
        }
    }

    /// 目标为空或敌子时加入走法，己方棋子占据时跳过
    fn try_add_move(board: &Board, from: Square, to: Square, side: Side, moves: &mut Vec<Move>) {
        match board.piece_at(to) {
            Some(target) if target.side != side => {
                moves.push(Move::with_capture(from, to, target));
            }
            Some(_) => {}
            None => moves.push(Move::new(from, to)),
        }
    }

    /// 检查 `from` 上的棋子能否一步到达 `target`
    ///
    /// 目标不是己方棋子时，与 `pseudo_legal_moves(board, from).contains(&target)`
    /// 结果一致，但不生成完整走法列表，供将军检测使用。
    pub fn attacks(board: &Board, from: Square, target: Square) -> bool {
        let Some(piece) = board.piece_at(from) else {
            return false;
        };
        let df = target.file as i8 - from.file as i8;
        let dr = target.rank as i8 - from.rank as i8;

        match piece.kind {
            PieceKind::General => {
                df.abs() + dr.abs() == 1 && target.is_in_palace(piece.side)
            }
            PieceKind::Advisor => {
                df.abs() == 1 && dr.abs() == 1 && target.is_in_palace(piece.side)
            }
            PieceKind::Elephant => {
                if df.abs() != 2 || dr.abs() != 2 || !target.is_on_home_side(piece.side) {
                    return false;
                }
                from.offset(df / 2, dr / 2)
                    .is_some_and(|eye| !board.is_occupied(eye, None))
            }
            PieceKind::Horse => {
                let is_jump = (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1);
                if !is_jump {
                    return false;
                }
                let (lf, lr) = if df.abs() == 2 { (df.signum(), 0) } else { (0, dr.signum()) };
                from.offset(lf, lr)
                    .is_some_and(|leg| !board.is_occupied(leg, None))
            }
            PieceKind::Chariot => {
                Self::is_straight(from, target) && board.count_between(from, target) == 0
            }
            PieceKind::Cannon => {
                if !Self::is_straight(from, target) {
                    return false;
                }
                // 吃子须隔一个炮架，平移则中间不能有子
                let screens = board.count_between(from, target);
                if board.is_occupied(target, None) {
                    screens == 1
                } else {
                    screens == 0
                }
            }
            PieceKind::Soldier => {
                let forward = dr == piece.side.forward() && df == 0;
                let sideways = dr == 0 && df.abs() == 1 && from.has_crossed_river(piece.side);
                forward || sideways
            }
        }
    }

    fn is_straight(from: Square, target: Square) -> bool {
        from != target && (from.file == target.file || from.rank == target.rank)
    }
}
