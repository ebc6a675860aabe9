//! 合法性与将军检测
//!
//! 所有试走都在棋盘副本上进行，被拒绝的候选走法不会改动真实棋盘。

use crate::board::Board;
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Side, Square};

/// 规则判定
pub struct Rules;

impl Rules {
    /// 两将是否照面：同一纵线且中间无子
    pub fn generals_facing(board: &Board) -> bool {
        match (board.find_general(Side::Red), board.find_general(Side::Black)) {
            (Some(red), Some(black)) => {
                red.file == black.file && board.count_between(red, black) == 0
            }
            _ => false,
        }
    }

    /// 指定阵营是否被将军
    ///
    /// 敌方任一棋子可以走到己方将/帅所在格点，或两将照面，均视为被将军。
    pub fn is_in_check(board: &Board, side: Side) -> bool {
        let Some(general) = board.find_general(side) else {
            return false;
        };

        if Self::generals_facing(board) {
            return true;
        }

        board
            .pieces(side.opponent())
            .into_iter()
            .any(|(from, _)| MoveGenerator::attacks(board, from, general))
    }

    /// 试走一步后己方是否仍安全
    fn leaves_general_safe(board: &Board, from: Square, to: Square, side: Side) -> bool {
        let mut test_board = board.clone();
        test_board.move_piece(from, to);
        !Self::is_in_check(&test_board, side)
    }

    /// 指定格点上棋子的合法落点
    pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
        let Some(piece) = board.piece_at(from) else {
            return Vec::new();
        };

        MoveGenerator::pseudo_legal_moves(board, from)
            .into_iter()
            .filter(|&to| Self::leaves_general_safe(board, from, to, piece.side))
            .collect()
    }

    /// 指定阵营的全部合法走法（含吃子信息）
    pub fn legal_moves_for_side(board: &Board, side: Side) -> Vec<Move> {
        MoveGenerator::pseudo_legal_for_side(board, side)
            .into_iter()
            .filter(|mv| Self::leaves_general_safe(board, mv.from, mv.to, side))
            .collect()
    }

    /// 指定阵营是否至少有一步合法走法
    pub fn has_legal_move(board: &Board, side: Side) -> bool {
        MoveGenerator::pseudo_legal_for_side(board, side)
            .into_iter()
            .any(|mv| Self::leaves_general_safe(board, mv.from, mv.to, side))
    }

    /// 指定阵营合法落点总数
    pub fn mobility(board: &Board, side: Side) -> usize {
        Self::legal_moves_for_side(board, side).len()
    }

    /// `from -> to` 对 `from` 上的棋子是否合法
    pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
        Self::legal_moves(board, from).contains(&to)
    }

    /// 是否被将死：被将军且无合法走法
    pub fn is_checkmate(board: &Board, side: Side) -> bool {
        Self::is_in_check(board, side) && !Self::has_legal_move(board, side)
    }

    /// 是否困毙：未被将军但无合法走法（按本规则判负）
    pub fn is_stalemate(board: &Board, side: Side) -> bool {
        !Self::is_in_check(board, side) && !Self::has_legal_move(board, side)
    }
}
