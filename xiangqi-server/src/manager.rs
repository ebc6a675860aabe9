//! 会话管理
//!
//! 每个会话各自持有一把锁：同一会话的操作串行执行，不同会话互不阻塞。
//! 每次成功的状态变更都会向订阅者广播 `SessionEvent`。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};
use xiangqi_ai::{AiConfig, AiEngine, Difficulty};
use xiangqi_core::{
    ChessError, Fen, GameRecord, GameSession, GameStatus, PlayerId, SessionConfig, SessionId,
    SessionSnapshot, Side, Square,
};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};

/// 广播给外部的状态事件
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub session_id: SessionId,
    pub snapshot: SessionSnapshot,
}

type SharedSession = Arc<Mutex<GameSession>>;

/// 会话管理器
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
    next_id: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
    session_config: SessionConfig,
    ai_timeout: Duration,
    /// 为每次 AI 请求派生种子
    rng: Mutex<ChaCha8Rng>,
}

impl SessionManager {
    pub fn new(config: &ServerConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            events,
            session_config: config.session_config(),
            ai_timeout: config.ai_timeout(),
            rng: Mutex::new(rng),
        }
    }

    /// 生成新的会话 ID
    fn generate_id(&self) -> SessionId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// 以标准开局创建会话并绑定玩家
    pub async fn create(&self, bindings: &[(Side, PlayerId)]) -> Result<SessionId> {
        let id = self.generate_id();
        self.insert(GameSession::new(id), bindings).await
    }

    /// 以自定义局面创建会话
    pub async fn create_from_fen(&self, fen: &str, bindings: &[(Side, PlayerId)]) -> Result<SessionId> {
        let id = self.generate_id();
        let session = GameSession::from_fen(id, fen)?;
        self.insert(session, bindings).await
    }

    async fn insert(&self, session: GameSession, bindings: &[(Side, PlayerId)]) -> Result<SessionId> {
        let mut session = session.with_config(self.session_config);
        for &(side, player) in bindings {
            session.bind(side, player)?;
        }
        let id = session.id();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        info!(session = id, "创建会话");
        Ok(id)
    }

    async fn session(&self, id: SessionId) -> Result<SharedSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ServerError::SessionNotFound(id))
    }

    fn publish(&self, snapshot: &SessionSnapshot) {
        // 没有订阅者时发送失败，忽略即可
        let _ = self.events.send(SessionEvent {
            session_id: snapshot.session_id,
            snapshot: snapshot.clone(),
        });
    }

    /// 订阅状态事件
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn bind(&self, id: SessionId, side: Side, player: PlayerId) -> Result<()> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        session.bind(side, player)?;
        Ok(())
    }

    /// 开始对局；只有真正发生状态切换时才广播
    pub async fn start(&self, id: SessionId) -> Result<SessionSnapshot> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        let started = session.start();
        let snapshot = session.state();
        if started {
            self.publish(&snapshot);
        }
        Ok(snapshot)
    }

    /// 提交走法（人类与 AI 共用此入口）
    pub async fn make_move(&self, id: SessionId, side: Side, from: Square, to: Square) -> Result<SessionSnapshot> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        let snapshot = session.make_move(side, from, to)?;
        self.publish(&snapshot);
        Ok(snapshot)
    }

    pub async fn forfeit(&self, id: SessionId, side: Side) -> Result<SessionSnapshot> {
        let session = self.session(id).await?;
        let mut session = session.lock().await;
        let snapshot = session.forfeit(side)?;
        self.publish(&snapshot);
        Ok(snapshot)
    }

    pub async fn snapshot(&self, id: SessionId) -> Result<SessionSnapshot> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(session.state())
    }

    /// 导出棋谱
    pub async fn record(&self, id: SessionId) -> Result<GameRecord> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(session.to_record())
    }

    /// 当前局面的 FEN
    pub async fn fen(&self, id: SessionId) -> Result<String> {
        let session = self.session(id).await?;
        let session = session.lock().await;
        Ok(Fen::to_string(&session.position()))
    }

    /// 移除会话，返回是否存在
    pub async fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session = id, "移除会话");
        }
        removed
    }

    /// 会话数量
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// 让 AI 为 `side` 走一步
    ///
    /// 搜索在阻塞线程池中对棋盘副本进行，不持有会话锁。
    /// 搜索结束时若对局已走过别的棋则丢弃结果。
    ///
    /// 超时只会让本调用返回 `AiTimeout`，搜索线程不会被中断，
    /// 会一直占用阻塞线程池直到搜完当前深度，其结果随后被丢弃。
    pub async fn request_ai_move(&self, id: SessionId, side: Side, difficulty: Difficulty) -> Result<SessionSnapshot> {
        let session = self.session(id).await?;

        let (board, ply_before) = {
            let session = session.lock().await;
            if session.status() != GameStatus::Playing {
                return Err(ChessError::NotActive.into());
            }
            if session.current_turn() != side {
                return Err(ChessError::WrongTurn { side }.into());
            }
            (session.board().clone(), session.move_history().len())
        };

        let seed = self.rng.lock().await.gen::<u64>();
        let config = AiConfig::from_difficulty(difficulty).with_seed(seed);
        debug!(session = id, ?side, ?difficulty, "AI 开始思考");

        let task = tokio::task::spawn_blocking(move || AiEngine::new(config).select_move(&board, side));
        let proposal = match tokio::time::timeout(self.ai_timeout, task).await {
            Ok(joined) => joined?,
            Err(_) => {
                let timeout_ms = self.ai_timeout.as_millis() as u64;
                warn!(session = id, timeout_ms, "AI 思考超时");
                return Err(ServerError::AiTimeout { timeout_ms });
            }
        };
        let mv = proposal.ok_or(ServerError::AiNoMove { side })?;

        let mut session = session.lock().await;
        let ply_now = session.move_history().len();
        if ply_now != ply_before {
            warn!(session = id, "AI 计算期间对局状态已改变，丢弃 AI 走法");
            return Err(ServerError::StaleAiMove {
                expected: ply_before,
                actual: ply_now,
            });
        }

        let snapshot = session.make_move(side, mv.from, mv.to)?;
        self.publish(&snapshot);
        Ok(snapshot)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}
