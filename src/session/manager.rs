//! ゲームセッション管理モジュール
//! 同時にプレイするユーザーのセッションを管理し、
//! セッション数制限、タイムアウト処理、クリーンアップを担当する。

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{GameError, Result};
use crate::game::{Difficulty, Game, GameStatus};

/// 1プレイヤー分のゲームセッション
/// ゲーム本体と選択中の難易度、アクティビティ時刻を保持する
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub id: Uuid,
    pub game: Game,
    pub difficulty: Difficulty,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl GameSession {
    /// 新しいセッションを作成する
    /// セッションIDはゲームIDと一致させる
    pub fn new(difficulty: Difficulty, width: usize, height: usize) -> Self {
        let game = Game::new(width, height, difficulty.tick_interval_ms());

        Self {
            id: game.id,
            game,
            difficulty,
            created_at: Utc::now(),
            last_activity: Utc::now(),
        }
    }

    /// アクティビティ時刻を現在時刻に更新する
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }
}

/// ゲームセッションの管理を行うメイン構造体
/// スレッドセーフなDashMapで同時アクセスを効率的に処理
#[derive(Debug, Clone)]
pub struct GameSessionManager {
    /// アクティブセッションのコレクション
    sessions: Arc<DashMap<Uuid, GameSession>>,
    /// 同時存在可能な最大セッション数
    max_sessions: usize,
    /// セッションのタイムアウト時間（分）
    session_timeout_minutes: i64,
}

impl GameSessionManager {
    /// デフォルトタイムアウト（30分）でセッションマネージャーを作成
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            session_timeout_minutes: 30,
        }
    }

    /// カスタムタイムアウトでセッションマネージャーを作成
    pub fn with_timeout(max_sessions: usize, timeout_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_sessions,
            session_timeout_minutes: timeout_minutes,
        }
    }

    /// 新しいゲームセッションを作成する
    /// 最大セッション数に達している場合はエラーを返す
    pub fn create_session(
        &self,
        difficulty: Difficulty,
        width: usize,
        height: usize,
    ) -> Result<Uuid> {
        // セッション数制限をチェック
        if self.sessions.len() >= self.max_sessions {
            return Err(GameError::SessionLimitExceeded {
                max: self.max_sessions,
            });
        }

        let session = GameSession::new(difficulty, width, height);
        let session_id = session.id;

        self.sessions.insert(session_id, session);

        Ok(session_id)
    }

    /// 指定したIDのセッションのコピーを取得する
    pub fn get_session(&self, session_id: &Uuid) -> Result<GameSession> {
        match self.sessions.get(session_id) {
            Some(session) => Ok(session.clone()),
            None => Err(GameError::GameNotFound {
                game_id: *session_id,
            }),
        }
    }

    /// 指定したセッションをロックしたままクロージャで更新する
    /// tick処理とクリック処理はこのエントリロックで直列化される
    pub fn with_session_mut<F, R>(&self, session_id: &Uuid, f: F) -> Result<R>
    where
        F: FnOnce(&mut GameSession) -> R,
    {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                let result = f(&mut session);
                session.touch();
                Ok(result)
            }
            None => Err(GameError::GameNotFound {
                game_id: *session_id,
            }),
        }
    }

    pub fn remove_session(&self, session_id: &Uuid) -> Result<GameSession> {
        match self.sessions.remove(session_id) {
            Some((_, session)) => Ok(session),
            None => Err(GameError::GameNotFound {
                game_id: *session_id,
            }),
        }
    }

    pub fn list_sessions(&self) -> Vec<GameSession> {
        self.sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_exists(&self, session_id: &Uuid) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// タイムアウトしたセッションを削除し、削除したIDのリストを返す
    /// 稼働中タイマーの停止は呼び出し側（サービス層）が行う
    pub fn cleanup_inactive_sessions(&self) -> Vec<Uuid> {
        let cutoff_time = Utc::now() - Duration::minutes(self.session_timeout_minutes);

        let expired_ids: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|entry| entry.value().last_activity < cutoff_time)
            .map(|entry| *entry.key())
            .collect();

        let mut removed = Vec::new();
        for session_id in expired_ids {
            if self.sessions.remove(&session_id).is_some() {
                removed.push(session_id);
            }
        }

        removed
    }

    pub fn get_stats(&self) -> SessionStats {
        let total_sessions = self.sessions.len();
        let running_count = self
            .sessions
            .iter()
            .filter(|entry| entry.value().is_running())
            .count();
        let finished_count = self
            .sessions
            .iter()
            .filter(|entry| matches!(entry.value().game.status, GameStatus::Finished { .. }))
            .count();

        let mut difficulty_counts = std::collections::HashMap::new();
        for entry in self.sessions.iter() {
            *difficulty_counts.entry(entry.value().difficulty).or_insert(0) += 1;
        }

        SessionStats {
            total_sessions,
            max_sessions: self.max_sessions,
            running_count,
            finished_count,
            difficulty_counts,
        }
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new(100)
    }
}

#[derive(Debug)]
pub struct SessionStats {
    pub total_sessions: usize,
    pub max_sessions: usize,
    pub running_count: usize,
    pub finished_count: usize,
    pub difficulty_counts: std::collections::HashMap<Difficulty, usize>,
}
