//! 棋局评估函数

use xiangqi_core::{Board, Rules, Side};

/// 每多一个合法落点的加分
pub const MOBILITY_WEIGHT: i32 = 2;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局（`side` 视角，正值对 `side` 有利）
    ///
    /// 子力差加上双方合法走法数之差的少量加成。将/帅不计子力。
    pub fn evaluate(board: &Board, side: Side) -> i32 {
        let material = match side {
            Side::Red => Self::evaluate_material(board),
            Side::Black => -Self::evaluate_material(board),
        };
        material + MOBILITY_WEIGHT * Self::mobility_difference(board, side)
    }

    /// 子力差（红方视角）
    pub fn evaluate_material(board: &Board) -> i32 {
        board
            .all_pieces()
            .into_iter()
            .map(|(_, piece)| match piece.side {
                Side::Red => piece.material_value(),
                Side::Black => -piece.material_value(),
            })
            .sum()
    }

    /// 己方合法走法数减去对方合法走法数
    pub fn mobility_difference(board: &Board, side: Side) -> i32 {
        Rules::mobility(board, side) as i32 - Rules::mobility(board, side.opponent()) as i32
    }
}
