use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xiangqi_core::{GameStatus, Side};
use xiangqi_server::{ServerConfig, SessionManager};

/// 自对弈中双方的玩家 ID
const RED_AI: u64 = 1;
const BLACK_AI: u64 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("xiangqi_server=debug".parse()?))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::load(Path::new(&path))?,
        None => ServerConfig::default(),
    };
    info!(?config, "中国象棋对局服务启动中...");

    let manager = Arc::new(SessionManager::new(&config));

    let mut events = manager.subscribe();
    let logger = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(
                    session = event.session_id,
                    ply = event.snapshot.ply,
                    status = ?event.snapshot.status,
                    in_check = event.snapshot.in_check,
                    "对局事件"
                ),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "事件处理过慢，已跳过部分事件"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let id = manager.create(&[(Side::Red, RED_AI), (Side::Black, BLACK_AI)]).await?;
    let mut snapshot = manager.start(id).await?;

    while snapshot.status == GameStatus::Playing && snapshot.ply < config.max_plies {
        let side = snapshot.current_turn;
        snapshot = manager
            .request_ai_move(id, side, config.difficulty_for(side))
            .await?;
    }

    if snapshot.status == GameStatus::Playing {
        info!(max_plies = config.max_plies, "达到最大步数，停止对局");
    } else {
        info!(status = ?snapshot.status, winner = ?snapshot.winner, "对局结束");
    }

    let fen = manager.fen(id).await?;
    let record = manager.record(id).await?;

    // 关闭广播通道，等待日志任务退出
    drop(manager);
    let _ = logger.await;

    println!("{}", fen);
    println!("{}", record.to_json()?);

    Ok(())
}
