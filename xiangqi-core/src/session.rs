//! 对局状态机
//!
//! `Waiting -> Playing -> {Checkmate, Stalemate, Forfeit, Draw}`。
//! 对局只能通过 `start`、`make_move`、`forfeit` 改变，进入终局后不再变化。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::constants::DEFAULT_NO_CAPTURE_DRAW_PLIES;
use crate::error::{ChessError, Result};
use crate::fen::{Fen, Position};
use crate::moves::Move;
use crate::piece::{PieceKind, Side, Square};
use crate::record::{GameRecord, MoveRecord};
use crate::rules::Rules;

/// 对局 ID
pub type SessionId = u64;

/// 玩家 ID（对引擎不透明）
pub type PlayerId = u64;

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// 等待双方就位
    Waiting,
    /// 对局进行中
    Playing,
    /// 将死
    Checkmate,
    /// 困毙（被困方判负）
    Stalemate,
    /// 认输
    Forfeit,
    /// 和棋
    Draw,
}

impl GameStatus {
    /// 是否为终局状态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Waiting | GameStatus::Playing)
    }
}

/// 对局配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 连续无吃子达到该步数判和，None 表示不启用
    pub no_capture_draw_plies: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            no_capture_draw_plies: Some(DEFAULT_NO_CAPTURE_DRAW_PLIES),
        }
    }
}

/// 对外暴露的只读快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub board: Board,
    pub current_turn: Side,
    pub status: GameStatus,
    pub winner: Option<Side>,
    /// 当前走子方是否被将军
    pub in_check: bool,
    pub last_move: Option<Move>,
    /// 已走单步数
    pub ply: usize,
}

/// 对局
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    board: Board,
    /// 开局局面（用于棋谱重放）
    initial: Position,
    red_player: Option<PlayerId>,
    black_player: Option<PlayerId>,
    current_turn: Side,
    status: GameStatus,
    winner: Option<Side>,
    move_history: Vec<Move>,
    no_capture_plies: u32,
    config: SessionConfig,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// 以标准开局创建对局
    pub fn new(id: SessionId) -> Self {
        Self::from_position(id, Position::initial())
    }

    /// 从 FEN 创建对局
    ///
    /// 局面必须双方各有一个将/帅，将/士在九宫内、象不过河，且非走子方不能处于被将军状态。
    pub fn from_fen(id: SessionId, fen: &str) -> Result<Self> {
        let position = Fen::parse(fen)?;

        for (square, piece) in position.board.all_pieces() {
            let misplaced = match piece.kind {
                PieceKind::General | PieceKind::Advisor => !square.is_in_palace(piece.side),
                PieceKind::Elephant => !square.is_on_home_side(piece.side),
                _ => false,
            };
            if misplaced {
                return Err(ChessError::InvalidFen {
                    reason: format!("{:?} {:?} cannot stand on {}", piece.side, piece.kind, square),
                });
            }
        }

        for side in [Side::Red, Side::Black] {
            let generals = position
                .board
                .pieces(side)
                .iter()
                .filter(|(_, piece)| piece.kind == PieceKind::General)
                .count();
            if generals != 1 {
                return Err(ChessError::InvalidFen {
                    reason: format!("{:?} has {} generals", side, generals),
                });
            }
        }
        if Rules::is_in_check(&position.board, position.side_to_move.opponent()) {
            return Err(ChessError::InvalidFen {
                reason: "Side not to move is in check".to_string(),
            });
        }

        Ok(Self::from_position(id, position))
    }

    fn from_position(id: SessionId, position: Position) -> Self {
        Self {
            id,
            board: position.board.clone(),
            current_turn: position.side_to_move,
            no_capture_plies: position.no_capture_plies,
            initial: position,
            red_player: None,
            black_player: None,
            status: GameStatus::Waiting,
            winner: None,
            move_history: Vec::new(),
            config: SessionConfig::default(),
            started_at: None,
            ended_at: None,
        }
    }

    /// 设置对局配置
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// 绑定玩家到指定阵营
    ///
    /// 等待阶段可以换人；对局开始后已绑定的阵营不能再改。
    pub fn bind(&mut self, side: Side, player: PlayerId) -> Result<()> {
        let waiting = self.status == GameStatus::Waiting;
        let slot = match side {
            Side::Red => &mut self.red_player,
            Side::Black => &mut self.black_player,
        };
        if slot.is_some() && !waiting {
            return Err(ChessError::SideAlreadyBound { side });
        }
        *slot = Some(player);
        Ok(())
    }

    /// 获取指定阵营的玩家
    pub fn player(&self, side: Side) -> Option<PlayerId> {
        match side {
            Side::Red => self.red_player,
            Side::Black => self.black_player,
        }
    }

    /// 获取玩家所在阵营
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.red_player == Some(player) {
            Some(Side::Red)
        } else if self.black_player == Some(player) {
            Some(Side::Black)
        } else {
            None
        }
    }

    /// 双方是否都已就位
    pub fn is_ready(&self) -> bool {
        self.red_player.is_some() && self.black_player.is_some()
    }

    /// 开始对局；未就位或已开始时不做任何事，返回是否发生了状态切换
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::Waiting || !self.is_ready() {
            return false;
        }
        self.status = GameStatus::Playing;
        self.started_at = Some(Utc::now());
        info!(session = self.id, "对局开始");

        // 自定义局面可能一开始就无子可走
        self.evaluate_terminal(self.current_turn.opponent());
        true
    }

    /// 执行走棋
    pub fn make_move(&mut self, side: Side, from: Square, to: Square) -> Result<SessionSnapshot> {
        if self.status != GameStatus::Playing {
            return Err(ChessError::NotActive);
        }
        if side != self.current_turn {
            return Err(ChessError::WrongTurn { side });
        }
        match self.board.piece_at(from) {
            Some(piece) if piece.side == side => {}
            _ => return Err(ChessError::NoPiece { side, square: from }),
        }
        if !Rules::is_legal(&self.board, from, to) {
            return Err(ChessError::IllegalMove { from, to });
        }
        if self
            .board
            .piece_at(to)
            .is_some_and(|target| target.kind == PieceKind::General)
        {
            return Err(ChessError::IllegalMove { from, to });
        }

        let captured = self.board.move_piece(from, to);
        let mv = Move { from, to, captured };
        self.move_history.push(mv);

        if captured.is_some() {
            self.no_capture_plies = 0;
        } else {
            self.no_capture_plies += 1;
        }
        self.current_turn = self.current_turn.opponent();

        debug!(session = self.id, ply = self.move_history.len(), "{:?} 走棋 {}", side, mv);

        self.evaluate_terminal(side);
        Ok(self.state())
    }

    /// 走棋后判定终局，`mover` 为刚走完的一方
    fn evaluate_terminal(&mut self, mover: Side) {
        let to_move = self.current_turn;
        if Rules::is_checkmate(&self.board, to_move) {
            self.finish(GameStatus::Checkmate, Some(mover));
        } else if Rules::is_stalemate(&self.board, to_move) {
            self.finish(GameStatus::Stalemate, Some(mover));
        } else if self
            .config
            .no_capture_draw_plies
            .is_some_and(|limit| self.no_capture_plies >= limit)
        {
            self.finish(GameStatus::Draw, None);
        }
    }

    /// 认输
    pub fn forfeit(&mut self, side: Side) -> Result<SessionSnapshot> {
        if self.status != GameStatus::Playing {
            return Err(ChessError::NotActive);
        }
        self.finish(GameStatus::Forfeit, Some(side.opponent()));
        Ok(self.state())
    }

    fn finish(&mut self, status: GameStatus, winner: Option<Side>) {
        self.status = status;
        self.winner = winner;
        self.ended_at = Some(Utc::now());
        info!(session = self.id, ?status, ?winner, "对局结束");
    }

    /// 当前快照
    pub fn state(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            board: self.board.clone(),
            current_turn: self.current_turn,
            status: self.status,
            winner: self.winner,
            in_check: Rules::is_in_check(&self.board, self.current_turn),
            last_move: self.move_history.last().copied(),
            ply: self.move_history.len(),
        }
    }

    /// 当前局面（含走子方）
    pub fn position(&self) -> Position {
        Position {
            board: self.board.clone(),
            side_to_move: self.current_turn,
            no_capture_plies: self.no_capture_plies,
            round: self.initial.round + self.round_offset(),
        }
    }

    fn round_offset(&self) -> u32 {
        // 黑方每走完一步回合数 +1
        let plies = self.move_history.len() as u32;
        match self.initial.side_to_move {
            Side::Red => plies / 2,
            Side::Black => (plies + 1) / 2,
        }
    }

    /// 导出棋谱
    pub fn to_record(&self) -> GameRecord {
        let mut record = GameRecord::new(Fen::to_string(&self.initial));
        record.metadata.red_player = self.red_player;
        record.metadata.black_player = self.black_player;
        record.metadata.started_at = self.started_at;
        record.metadata.ended_at = self.ended_at;
        record.metadata.status = self.status;
        record.metadata.winner = self.winner;
        record.metadata.config = self.config;
        for mv in &self.move_history {
            record.add_move(MoveRecord::new(mv.from, mv.to));
        }
        record
    }

    /// 按棋谱重放出对局
    ///
    /// 每一步都经由 `make_move` 校验；认输结局也会被复现。
    pub fn replay(id: SessionId, record: &GameRecord) -> Result<Self> {
        let mut session = Self::from_fen(id, &record.initial_fen)?.with_config(record.metadata.config);
        if let Some(player) = record.metadata.red_player {
            session.bind(Side::Red, player)?;
        }
        if let Some(player) = record.metadata.black_player {
            session.bind(Side::Black, player)?;
        }
        session.start();

        for (ply, mv) in record.moves.iter().enumerate() {
            let (from, to) = mv.squares().ok_or_else(|| ChessError::Replay {
                ply,
                source: Box::new(ChessError::InvalidRecord {
                    reason: format!("Off-board move {:?} -> {:?}", mv.from, mv.to),
                }),
            })?;
            let side = session.current_turn;
            session
                .make_move(side, from, to)
                .map_err(|source| ChessError::Replay {
                    ply,
                    source: Box::new(source),
                })?;
        }

        if record.metadata.status == GameStatus::Forfeit && session.status == GameStatus::Playing {
            if let Some(winner) = record.metadata.winner {
                session.forfeit(winner.opponent())?;
            }
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::INITIAL_FEN;
    use crate::piece::Piece;

    fn sq(file: u8, rank: u8) -> Square {
        Square::new_unchecked(file, rank)
    }

    fn started(mut session: GameSession) -> GameSession {
        session.bind(Side::Red, 1).unwrap();
        session.bind(Side::Black, 2).unwrap();
        assert!(session.start());
        session
    }

    #[test]
    fn test_start_requires_both_sides() {
        let mut session = GameSession::new(1);
        assert_eq!(session.status(), GameStatus::Waiting);
        assert!(!session.start());

        session.bind(Side::Red, 100).unwrap();
        assert!(!session.start());
        assert_eq!(session.status(), GameStatus::Waiting);

        session.bind(Side::Black, 200).unwrap();
        assert!(session.start());
        assert_eq!(session.status(), GameStatus::Playing);
        assert!(session.started_at().is_some());

        // 重复开始无效果
        assert!(!session.start());
    }

    #[test]
    fn test_bind() {
        let mut session = GameSession::new(1);
        session.bind(Side::Black, 7).unwrap();
        assert_eq!(session.player(Side::Black), Some(7));
        assert_eq!(session.side_of(7), Some(Side::Black));
        assert!(!session.is_ready());

        // 等待阶段允许换人
        session.bind(Side::Black, 8).unwrap();
        assert_eq!(session.side_of(7), None);
        assert_eq!(session.side_of(8), Some(Side::Black));

        session.bind(Side::Red, 1).unwrap();
        assert!(session.start());
        assert_eq!(
            session.bind(Side::Black, 9),
            Err(ChessError::SideAlreadyBound { side: Side::Black })
        );
        assert_eq!(session.player(Side::Black), Some(8));
    }

    #[test]
    fn test_make_move_errors() {
        let mut session = GameSession::new(1);

        // 未开始
        assert_eq!(
            session.make_move(Side::Red, sq(7, 7), sq(4, 7)),
            Err(ChessError::NotActive)
        );

        let mut session = started(session);

        // 不是黑方回合
        assert_eq!(
            session.make_move(Side::Black, sq(7, 2), sq(4, 2)),
            Err(ChessError::WrongTurn { side: Side::Black })
        );

        // 空格点
        assert_eq!(
            session.make_move(Side::Red, sq(4, 4), sq(4, 3)),
            Err(ChessError::NoPiece { side: Side::Red, square: sq(4, 4) })
        );

        // 对方棋子
        assert_eq!(
            session.make_move(Side::Red, sq(7, 2), sq(4, 2)),
            Err(ChessError::NoPiece { side: Side::Red, square: sq(7, 2) })
        );

        // 马被蹩腿
        assert_eq!(
            session.make_move(Side::Red, sq(1, 9), sq(3, 8)),
            Err(ChessError::IllegalMove { from: sq(1, 9), to: sq(3, 8) })
        );

        // 失败的走法不改变状态
        assert_eq!(session.board(), &Board::initial());
        assert_eq!(session.current_turn(), Side::Red);
        assert!(session.move_history().is_empty());
    }

    #[test]
    fn test_make_move_flips_turn_and_records() {
        let mut session = started(GameSession::new(1));

        let snapshot = session.make_move(Side::Red, sq(7, 7), sq(4, 7)).unwrap();
        assert_eq!(snapshot.current_turn, Side::Black);
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.ply, 1);
        assert_eq!(snapshot.last_move, Some(Move::new(sq(7, 7), sq(4, 7))));
        assert!(!snapshot.in_check);

        session.make_move(Side::Black, sq(7, 0), sq(6, 2)).unwrap();
        // 炮打中卒
        let snapshot = session.make_move(Side::Red, sq(4, 7), sq(4, 3)).unwrap();
        assert_eq!(
            snapshot.last_move.and_then(|m| m.captured),
            Some(Piece::new(PieceKind::Soldier, Side::Black))
        );
        assert_eq!(session.move_history().len(), 3);
        assert_eq!(session.board().piece_count(), 31);
    }

    #[test]
    fn test_checkmate_ends_session() {
        // 黑方走车到底线完成将死
        let session = GameSession::from_fen(1, "5k3/9/9/9/9/9/9/r8/1r7/3K5 b").unwrap();
        let mut session = started(session);

        let snapshot = session.make_move(Side::Black, sq(0, 7), sq(0, 9)).unwrap();
        assert_eq!(snapshot.status, GameStatus::Checkmate);
        assert_eq!(snapshot.winner, Some(Side::Black));
        assert!(snapshot.in_check);
        assert!(session.ended_at().is_some());

        // 终局后不可再走
        assert_eq!(
            session.make_move(Side::Red, sq(3, 9), sq(3, 8)),
            Err(ChessError::NotActive)
        );
        assert_eq!(session.forfeit(Side::Red), Err(ChessError::NotActive));
    }

    #[test]
    fn test_stalemate_is_loss_for_side_to_move() {
        // 黑车从 (8,7) 平到 (8,8)，红帅无处可走但未被将军
        let session = GameSession::from_fen(1, "4rk3/9/9/9/9/9/9/8r/9/3K5 b").unwrap();
        let mut session = started(session);

        let snapshot = session.make_move(Side::Black, sq(8, 7), sq(8, 8)).unwrap();
        assert_eq!(snapshot.status, GameStatus::Stalemate);
        assert_eq!(snapshot.winner, Some(Side::Black));
        assert!(!snapshot.in_check);
    }

    #[test]
    fn test_forfeit() {
        let mut session = GameSession::new(1);
        assert_eq!(session.forfeit(Side::Red), Err(ChessError::NotActive));

        let mut session = started(session);
        let snapshot = session.forfeit(Side::Red).unwrap();
        assert_eq!(snapshot.status, GameStatus::Forfeit);
        assert_eq!(snapshot.winner, Some(Side::Black));
        assert!(session.status().is_terminal());
    }

    #[test]
    fn test_no_capture_draw() {
        let config = SessionConfig {
            no_capture_draw_plies: Some(4),
        };
        let mut session = started(GameSession::new(1).with_config(config));

        // 双方来回走马
        let shuffle = [
            (Side::Red, sq(1, 9), sq(2, 7)),
            (Side::Black, sq(1, 0), sq(2, 2)),
            (Side::Red, sq(2, 7), sq(1, 9)),
        ];
        for (side, from, to) in shuffle {
            let snapshot = session.make_move(side, from, to).unwrap();
            assert_eq!(snapshot.status, GameStatus::Playing);
        }
        let snapshot = session.make_move(Side::Black, sq(2, 2), sq(1, 0)).unwrap();
        assert_eq!(snapshot.status, GameStatus::Draw);
        assert_eq!(snapshot.winner, None);
    }

    #[test]
    fn test_draw_rule_disabled() {
        let config = SessionConfig {
            no_capture_draw_plies: None,
        };
        let mut session = started(GameSession::new(1).with_config(config));
        for _ in 0..10 {
            session.make_move(Side::Red, sq(1, 9), sq(2, 7)).unwrap();
            session.make_move(Side::Black, sq(1, 0), sq(2, 2)).unwrap();
            session.make_move(Side::Red, sq(2, 7), sq(1, 9)).unwrap();
            session.make_move(Side::Black, sq(2, 2), sq(1, 0)).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn test_from_fen_validation() {
        // 缺少黑将
        assert!(GameSession::from_fen(1, "9/9/9/9/9/9/9/9/9/4K4 r").is_err());
        // 红方走子时黑方已被将军
        assert!(GameSession::from_fen(1, "4k4/9/9/9/9/9/9/9/4R4/3K5 r").is_err());
        assert!(GameSession::from_fen(1, "4k4/9/9/9/9/9/9/9/4R4/3K5 b").is_ok());
    }

    #[test]
    fn test_from_fen_rejects_misplaced_pieces() {
        // 帅出九宫
        assert!(matches!(
            GameSession::from_fen(1, "4k4/9/9/9/9/9/4K4/9/9/9 r"),
            Err(ChessError::InvalidFen { .. })
        ));
        // 士出九宫
        assert!(GameSession::from_fen(1, "4k4/9/9/9/9/9/9/9/A8/3K5 r").is_err());
        // 象过河
        assert!(GameSession::from_fen(1, "4k4/9/9/9/2b6/9/9/9/9/3K5 r").is_ok());
        assert!(GameSession::from_fen(1, "4k4/9/9/9/9/2b6/9/9/9/3K5 r").is_err());
        assert!(GameSession::from_fen(1, "4k4/9/9/9/9/2B6/9/9/9/3K5 r").is_ok());
        assert!(GameSession::from_fen(1, "4k4/9/9/9/2B6/9/9/9/9/3K5 r").is_err());
        // 标准开局合法
        assert!(GameSession::from_fen(1, INITIAL_FEN).is_ok());
    }

    #[test]
    fn test_replay_keeps_disabled_draw_rule() {
        let config = SessionConfig {
            no_capture_draw_plies: None,
        };
        let mut session = started(GameSession::new(2).with_config(config));
        // 31 轮往返走马，共 124 步无吃子
        for _ in 0..31 {
            session.make_move(Side::Red, sq(1, 9), sq(2, 7)).unwrap();
            session.make_move(Side::Black, sq(1, 0), sq(2, 2)).unwrap();
            session.make_move(Side::Red, sq(2, 7), sq(1, 9)).unwrap();
            session.make_move(Side::Black, sq(2, 2), sq(1, 0)).unwrap();
        }
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.move_history().len(), 124);

        let json = session.to_record().to_json().unwrap();
        let replayed = GameSession::replay(2, &GameRecord::from_json(&json).unwrap()).unwrap();
        assert_eq!(replayed.status(), GameStatus::Playing);
        assert_eq!(replayed.move_history().len(), 124);
        assert_eq!(replayed.config(), config);
    }

    #[test]
    fn test_replay_keeps_short_draw_limit() {
        let config = SessionConfig {
            no_capture_draw_plies: Some(4),
        };
        let mut session = started(GameSession::new(4).with_config(config));
        session.make_move(Side::Red, sq(1, 9), sq(2, 7)).unwrap();
        session.make_move(Side::Black, sq(1, 0), sq(2, 2)).unwrap();
        session.make_move(Side::Red, sq(2, 7), sq(1, 9)).unwrap();
        session.make_move(Side::Black, sq(2, 2), sq(1, 0)).unwrap();
        assert_eq!(session.status(), GameStatus::Draw);

        let replayed = GameSession::replay(4, &session.to_record()).unwrap();
        assert_eq!(replayed.status(), GameStatus::Draw);
        assert_eq!(replayed.winner(), None);
    }

    #[test]
    fn test_replay_reproduces_board() {
        let mut session = started(GameSession::new(9));
        let moves = [
            (sq(7, 7), sq(4, 7)),
            (sq(7, 0), sq(6, 2)),
            (sq(7, 9), sq(6, 7)),
            (sq(8, 0), sq(7, 0)),
            (sq(4, 7), sq(4, 3)),
            (sq(0, 3), sq(0, 4)),
        ];
        for (from, to) in moves {
            let side = session.current_turn();
            session.make_move(side, from, to).unwrap();
        }

        let record = session.to_record();
        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();
        let replayed = GameSession::replay(9, &parsed).unwrap();

        assert_eq!(replayed.board(), session.board());
        assert_eq!(replayed.current_turn(), session.current_turn());
        assert_eq!(replayed.move_history(), session.move_history());
        assert_eq!(replayed.status(), session.status());
        assert_eq!(replayed.position(), session.position());
    }

    #[test]
    fn test_replay_forfeit_and_rejects_bad_move() {
        let mut session = started(GameSession::new(3));
        session.make_move(Side::Red, sq(7, 7), sq(4, 7)).unwrap();
        session.forfeit(Side::Black).unwrap();

        let replayed = GameSession::replay(3, &session.to_record()).unwrap();
        assert_eq!(replayed.status(), GameStatus::Forfeit);
        assert_eq!(replayed.winner(), Some(Side::Red));

        // 第二步黑车被己方卒挡住
        let mut bad = GameRecord::new(INITIAL_FEN.to_string());
        bad.metadata.red_player = Some(1);
        bad.metadata.black_player = Some(2);
        bad.add_move(MoveRecord::new(sq(7, 7), sq(4, 7)));
        bad.add_move(MoveRecord::new(sq(0, 0), sq(0, 5)));
        assert!(matches!(
            GameSession::replay(3, &bad),
            Err(ChessError::Replay { ply: 1, .. })
        ));
    }

    #[test]
    fn test_position_round() {
        let mut session = started(GameSession::new(1));
        assert_eq!(session.position().round, 1);
        session.make_move(Side::Red, sq(7, 7), sq(4, 7)).unwrap();
        assert_eq!(session.position().round, 1);
        session.make_move(Side::Black, sq(7, 0), sq(6, 2)).unwrap();
        assert_eq!(session.position().round, 2);
        assert_eq!(session.position().no_capture_plies, 2);
    }
}
