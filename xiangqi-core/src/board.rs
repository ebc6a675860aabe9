//! 棋盘模型
//!
//! 纯粹的占位结构：只负责记录每个格点上的棋子，不做任何规则校验。
//! 规则相关的判断见 `moves` 与 `rules` 模块。

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_SQUARES, BOARD_WIDTH};
use crate::piece::{Piece, PieceKind, Side, Square};

/// 底线棋子排列（从左到右）
const BACK_RANK: [PieceKind; 9] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// 9x10 棋盘，索引为 rank * 9 + file，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; BOARD_SQUARES],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for (side, back, cannon, soldier) in [(Side::Black, 0, 2, 3), (Side::Red, 9, 7, 6)] {
            for (file, kind) in BACK_RANK.iter().enumerate() {
                board.place(Piece::new(*kind, side), Square::new_unchecked(file as u8, back));
            }
            for file in [1, 7] {
                board.place(
                    Piece::new(PieceKind::Cannon, side),
                    Square::new_unchecked(file, cannon),
                );
            }
            for file in (0..9).step_by(2) {
                board.place(
                    Piece::new(PieceKind::Soldier, side),
                    Square::new_unchecked(file, soldier),
                );
            }
        }

        board
    }

    /// 获取指定格点的棋子
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.to_index()]
        } else {
            None
        }
    }

    /// 放置棋子，返回被覆盖的棋子
    pub fn place(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.to_index()].replace(piece)
        } else {
            None
        }
    }

    /// 移除棋子
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.to_index()].take()
        } else {
            None
        }
    }

    /// 格点是否被占据；指定 `side` 时只统计该方棋子
    pub fn is_occupied(&self, square: Square, side: Option<Side>) -> bool {
        match (self.piece_at(square), side) {
            (Some(piece), Some(side)) => piece.side == side,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.remove(from) {
            Some(piece) => self.place(piece, to),
            None => None,
        }
    }

    /// 查找指定阵营的将/帅位置
    pub fn find_general(&self, side: Side) -> Option<Square> {
        self.all_pieces()
            .into_iter()
            .find(|(_, piece)| piece.kind == PieceKind::General && piece.side == side)
            .map(|(square, _)| square)
    }

    /// 获取指定阵营的所有棋子
    pub fn pieces(&self, side: Side) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（按横线、纵线顺序）
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                let piece = (*slot)?;
                Square::from_index(index).map(|square| (square, piece))
            })
            .collect()
    }

    /// 棋子总数
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|slot| slot.is_some()).count()
    }

    /// 同一直线上两点之间（不含端点）的棋子数，不共线时为 0
    pub fn count_between(&self, a: Square, b: Square) -> usize {
        if a.file == b.file {
            let (low, high) = if a.rank < b.rank { (a.rank, b.rank) } else { (b.rank, a.rank) };
            ((low + 1)..high)
                .filter(|&rank| self.is_occupied(Square::new_unchecked(a.file, rank), None))
                .count()
        } else if a.rank == b.rank {
            let (low, high) = if a.file < b.file { (a.file, b.file) } else { (b.file, a.file) };
            ((low + 1)..high)
                .filter(|&file| self.is_occupied(Square::new_unchecked(file, a.rank), None))
                .count()
        } else {
            0
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in 0..BOARD_HEIGHT as u8 {
            for file in 0..BOARD_WIDTH as u8 {
                let c = self
                    .piece_at(Square::new_unchecked(file, rank))
                    .map_or('．', |piece| piece.display_char());
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        // 红帅在下方
        assert_eq!(
            board.piece_at(Square::new_unchecked(4, 9)),
            Some(Piece::new(PieceKind::General, Side::Red))
        );
        // 黑将在上方
        assert_eq!(
            board.piece_at(Square::new_unchecked(4, 0)),
            Some(Piece::new(PieceKind::General, Side::Black))
        );
        assert_eq!(
            board.piece_at(Square::new_unchecked(1, 7)),
            Some(Piece::new(PieceKind::Cannon, Side::Red))
        );
        assert_eq!(
            board.piece_at(Square::new_unchecked(0, 3)),
            Some(Piece::new(PieceKind::Soldier, Side::Black))
        );
        assert_eq!(board.piece_count(), 32);
        assert_eq!(board.pieces(Side::Red).len(), 16);
        assert_eq!(board.pieces(Side::Black).len(), 16);
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::empty();
        let sq = Square::new_unchecked(2, 5);
        let horse = Piece::new(PieceKind::Horse, Side::Red);

        assert_eq!(board.place(horse, sq), None);
        assert!(board.is_occupied(sq, None));
        assert!(board.is_occupied(sq, Some(Side::Red)));
        assert!(!board.is_occupied(sq, Some(Side::Black)));

        assert_eq!(board.remove(sq), Some(horse));
        assert!(!board.is_occupied(sq, None));
        assert_eq!(board.remove(sq), None);
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();

        let from = Square::new_unchecked(1, 7);
        let to = Square::new_unchecked(1, 0);

        // 炮打马（不校验规则）
        let captured = board.move_piece(from, to);
        assert_eq!(captured, Some(Piece::new(PieceKind::Horse, Side::Black)));
        assert!(board.piece_at(from).is_none());
        assert_eq!(board.piece_at(to), Some(Piece::new(PieceKind::Cannon, Side::Red)));
        assert_eq!(board.piece_count(), 31);
    }

    #[test]
    fn test_move_from_empty_square_is_noop() {
        let mut board = Board::initial();
        let before = board.clone();
        assert_eq!(board.move_piece(Square::new_unchecked(4, 4), Square::new_unchecked(4, 5)), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::initial();
        let mut copy = board.clone();
        copy.remove(Square::new_unchecked(0, 9));
        assert!(board.is_occupied(Square::new_unchecked(0, 9), None));
        assert!(!copy.is_occupied(Square::new_unchecked(0, 9), None));
    }

    #[test]
    fn test_find_general() {
        let board = Board::initial();
        assert_eq!(board.find_general(Side::Red), Some(Square::new_unchecked(4, 9)));
        assert_eq!(board.find_general(Side::Black), Some(Square::new_unchecked(4, 0)));
        assert_eq!(Board::empty().find_general(Side::Red), None);
    }

    #[test]
    fn test_count_between() {
        let board = Board::initial();
        // 帅与将之间隔着兵和卒
        assert_eq!(
            board.count_between(Square::new_unchecked(4, 9), Square::new_unchecked(4, 0)),
            2
        );
        // 底线车与车之间 7 子
        assert_eq!(
            board.count_between(Square::new_unchecked(0, 9), Square::new_unchecked(8, 9)),
            7
        );
        // 不在同一直线
        assert_eq!(
            board.count_between(Square::new_unchecked(0, 0), Square::new_unchecked(1, 1)),
            0
        );
    }
}
