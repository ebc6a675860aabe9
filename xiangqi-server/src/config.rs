//! 服务配置
//!
//! JSON 文件，所有字段可省略，缺省值见 `Default`。

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xiangqi_ai::Difficulty;
use xiangqi_core::{SessionConfig, Side, DEFAULT_AI_TIMEOUT_MS, DEFAULT_NO_CAPTURE_DRAW_PLIES};

/// 默认事件通道容量
const DEFAULT_EVENT_CAPACITY: usize = 256;

/// 自对弈默认最大步数
const DEFAULT_MAX_PLIES: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// AI 单步思考超时（毫秒）
    pub ai_timeout_ms: u64,
    /// 无吃子判和步数，null 表示不启用
    pub no_capture_draw_plies: Option<u32>,
    pub red_difficulty: Difficulty,
    pub black_difficulty: Difficulty,
    /// 自对弈最多走多少步
    pub max_plies: usize,
    /// AI 随机种子
    pub seed: Option<u64>,
    /// 广播通道容量
    pub event_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ai_timeout_ms: DEFAULT_AI_TIMEOUT_MS,
            no_capture_draw_plies: Some(DEFAULT_NO_CAPTURE_DRAW_PLIES),
            red_difficulty: Difficulty::Medium,
            black_difficulty: Difficulty::Medium,
            max_plies: DEFAULT_MAX_PLIES,
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("解析配置文件失败: {:?}", path))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            no_capture_draw_plies: self.no_capture_draw_plies,
        }
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_millis(self.ai_timeout_ms)
    }

    pub fn difficulty_for(&self, side: Side) -> Difficulty {
        match side {
            Side::Red => self.red_difficulty,
            Side::Black => self.black_difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.ai_timeout(), Duration::from_millis(DEFAULT_AI_TIMEOUT_MS));
        assert_eq!(config.session_config(), SessionConfig::default());
        assert_eq!(config.difficulty_for(Side::Red), Difficulty::Medium);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "black_difficulty": "hard", "seed": 42, "no_capture_draw_plies": null }}"#
        )
        .unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.black_difficulty, Difficulty::Hard);
        assert_eq!(config.red_difficulty, Difficulty::Medium);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.session_config().no_capture_draw_plies, None);
        assert_eq!(config.max_plies, DEFAULT_MAX_PLIES);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = ServerConfig::load(&missing).unwrap_err();
        assert!(err.to_string().contains("读取配置文件失败"));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        let err = ServerConfig::load(&bad).unwrap_err();
        assert!(err.to_string().contains("解析配置文件失败"));
    }
}
