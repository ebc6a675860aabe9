//! 搜索引擎
//!
//! 实现 Negamax + Alpha-Beta 剪枝。搜索只读取棋盘副本，不持有任何对局状态。

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use xiangqi_core::{Board, Move, PieceKind, Rules, Side};

use crate::evaluate::Evaluator;

/// 将死分值，实际得分为 `MATE_SCORE - ply`，越快将死分越高
pub const MATE_SCORE: i32 = 100_000;

const INFINITY: i32 = 1_000_000;

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// 搜索深度（单步数）
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub depth: u8,
    /// 随机种子，指定后同一局面的选择可复现
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            depth: difficulty.depth(),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            nodes_searched: 0,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 为 `side` 选择走法，无合法走法时返回 None
    pub fn select_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        let started = Instant::now();
        let mut search = Search::default();
        let mv = search.root(board, side, self.config.depth, &mut self.rng);
        self.nodes_searched = search.nodes;

        debug!(
            ?side,
            depth = self.config.depth,
            nodes = search.nodes,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "AI 选择走法: {:?}",
            mv
        );
        mv
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 搜索核心：为 `side` 选出最佳走法，同分走法之间由 `rng` 均匀选择
///
/// 深度至少按 1 处理。
pub fn select_move<R: Rng + ?Sized>(board: &Board, side: Side, depth: u8, rng: &mut R) -> Option<Move> {
    Search::default().root(board, side, depth, rng)
}

/// 合法走法，吃子优先（先按被吃子价值降序，再按攻击子价值升序）
///
/// 吃将/帅的走法不会出现在结果中。
pub fn ordered_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves: Vec<Move> = Rules::legal_moves_for_side(board, side)
        .into_iter()
        .filter(|mv| !mv.captured.is_some_and(|p| p.kind == PieceKind::General))
        .collect();

    moves.sort_by_key(|mv| match mv.captured {
        Some(victim) => {
            let attacker = board.piece_at(mv.from).map_or(0, |p| p.material_value());
            (0, -victim.material_value(), attacker)
        }
        None => (1, 0, 0),
    });
    moves
}

#[derive(Default)]
struct Search {
    nodes: u64,
}

impl Search {
    fn root<R: Rng + ?Sized>(&mut self, board: &Board, side: Side, depth: u8, rng: &mut R) -> Option<Move> {
        let depth = depth.max(1);
        let moves = ordered_moves(board, side);
        if moves.is_empty() {
            return None;
        }

        let mut best_score = -INFINITY;
        let mut best_moves = Vec::new();

        for mv in moves {
            let mut next = board.clone();
            next.move_piece(mv.from, mv.to);

            // 下界取 best-1，使同分走法得到精确值
            let alpha = if best_score == -INFINITY { -INFINITY } else { best_score - 1 };
            let score = -self.negamax(&next, side.opponent(), depth - 1, -INFINITY, -alpha, 1);

            if score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        best_moves.choose(rng).copied()
    }

    fn negamax(&mut self, board: &Board, side: Side, depth: u8, mut alpha: i32, beta: i32, ply: i32) -> i32 {
        self.nodes += 1;

        let moves = ordered_moves(board, side);
        // 将死与困毙都判负
        if moves.is_empty() {
            return -(MATE_SCORE - ply);
        }
        if depth == 0 {
            return Evaluator::evaluate(board, side);
        }

        for mv in moves {
            let mut next = board.clone();
            next.move_piece(mv.from, mv.to);

            let score = -self.negamax(&next, side.opponent(), depth - 1, -beta, -alpha, ply + 1);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}
