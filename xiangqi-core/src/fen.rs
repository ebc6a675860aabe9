//! FEN 格式解析和生成
//!
//! 中国象棋 FEN 格式：
//! `<棋盘> <走子方> [<无吃子步数> [<回合数>]]`
//!
//! 棋盘部分共 10 行，第一行是第 0 横线（黑方底线）。示例：
//! `rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r 0 1`

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::ChessError;
use crate::piece::{Piece, Side, Square};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r 0 1";

/// 局面：棋盘加走子方等附加信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Side,
    /// 连续无吃子的单步数
    pub no_capture_plies: u32,
    /// 完整回合数（黑方走完后 +1）
    pub round: u32,
}

impl Position {
    /// 初始局面
    pub fn initial() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Side::Red,
            no_capture_plies: 0,
            round: 1,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为局面
    pub fn parse(fen: &str) -> Result<Position, ChessError> {
        let mut parts = fen.split_whitespace();
        let board_str = parts.next().ok_or_else(|| ChessError::InvalidFen {
            reason: "Empty FEN string".to_string(),
        })?;

        let board = Self::parse_board(board_str)?;

        // 走子方（默认红方）
        let side_to_move = match parts.next() {
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", s),
                        })
                    }
                }
            }
            None => Side::Red,
        };

        let no_capture_plies = Self::parse_counter(parts.next(), 0, "no-capture count")?;
        let round = Self::parse_counter(parts.next(), 1, "round")?;

        Ok(Position {
            board,
            side_to_move,
            no_capture_plies,
            round,
        })
    }

    fn parse_counter(field: Option<&str>, default: u32, name: &str) -> Result<u32, ChessError> {
        match field {
            // 部分 FEN 在计数位置写 '-'
            Some("-") | None => Ok(default),
            Some(s) => s.parse().map_err(|_| ChessError::InvalidFen {
                reason: format!("Invalid {}: {}", name, s),
            }),
        }
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_HEIGHT {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_HEIGHT, rows.len()),
            });
        }

        for (rank, row) in rows.iter().enumerate() {
            let mut file = 0usize;

            for c in row.chars() {
                if file >= BOARD_WIDTH {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", rank),
                    });
                }

                if let Some(empty) = c.to_digit(10) {
                    file += empty as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.place(piece, Square::new_unchecked(file as u8, rank as u8));
                    file += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if file != BOARD_WIDTH {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", rank, file, BOARD_WIDTH),
                });
            }
        }

        Ok(board)
    }

    /// 将局面转换为 FEN 字符串
    pub fn to_string(position: &Position) -> String {
        format!(
            "{} {} {} {}",
            Self::board_to_string(&position.board),
            position.side_to_move.to_fen_char(),
            position.no_capture_plies,
            position.round
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_HEIGHT);

        for rank in 0..BOARD_HEIGHT as u8 {
            let mut row = String::new();
            let mut empty_count = 0;

            for file in 0..BOARD_WIDTH as u8 {
                if let Some(piece) = board.piece_at(Square::new_unchecked(file, rank)) {
                    if empty_count > 0 {
                        row.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row.push_str(&empty_count.to_string());
            }

            rows.push(row);
        }

        rows.join("/")
    }

    /// 初始局面
    pub fn initial() -> Position {
        Position::initial()
    }
}
