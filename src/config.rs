//! アプリケーション設定管理モジュール
//! サーバー、盤面、セッションなどの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, time::Duration};

use crate::game::Difficulty;

/// Duration型をJSONでシリアライズするためのモジュール
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    /// Durationを(secs, nanos)のタプルとしてシリアライズ
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let secs = duration.as_secs();
        let nanos = duration.subsec_nanos();
        (secs, nanos).serialize(serializer)
    }

    /// (secs, nanos)のタプルからDurationをデシリアライズ
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos) = <(u64, u32)>::deserialize(deserializer)?;
        Ok(Duration::new(secs, nanos))
    }
}

/// システムの制限値を定義する構造体
/// 同時ゲーム数、タイムアウト値などのリソース制限を管理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLimits {
    /// 同時実行可能なゲーム数の上限
    pub max_concurrent_games: usize,
    /// セッションのタイムアウト時間
    #[serde(with = "duration_serde")]
    pub session_timeout: Duration,
    /// 1盤面あたりのセル数の上限
    pub max_board_cells: usize,
}

impl Default for SystemLimits {
    /// バランスの取れたデフォルト制限値
    fn default() -> Self {
        Self {
            max_concurrent_games: 100,
            session_timeout: Duration::from_secs(3600), // 1時間
            max_board_cells: 1024,
        }
    }
}

/// サーバーの設定を管理する構造体
/// ポート番号、ホスト名、CORS設定などを含む
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub enable_cors: bool,
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

/// 盤面とゲームプレイの設定を管理する構造体
/// デフォルト盤面サイズ、難易度、タイマー間隔の下限など
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub default_board_width: usize,
    pub default_board_height: usize,
    pub max_board_width: usize,
    pub max_board_height: usize,
    pub default_difficulty: Difficulty,
    /// タイマー間隔の下限（これ未満の間隔は拒否する）
    pub min_tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_board_width: 10,
            default_board_height: 10,
            max_board_width: 32,
            max_board_height: 32,
            default_difficulty: Difficulty::Medium,
            min_tick_interval_ms: 50,
        }
    }
}

/// ゲームセッションの設定を管理する構造体
/// セッション数制限、タイムアウト、クリーンアップ設定など
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub max_sessions: usize,
    pub session_timeout_minutes: i64,
    pub enable_session_cleanup: bool,
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 100,
            session_timeout_minutes: 30,
            enable_session_cleanup: true,
            cleanup_interval_minutes: 5,
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
/// 各サブシステムの設定をまとめて管理する
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub system_limits: SystemLimits,
    pub server: ServerConfig,
    pub game: GameConfig,
    pub session: SessionConfig,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 環境変数で指定された項目だけを現在の値に上書きする
    /// 未指定の項目は呼び出し時点の値を保持する
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(port) = env::var("SERVER_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::EnvVarError {
                name: "SERVER_PORT".to_string(),
                value: port,
            })?;
        }

        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(max_sessions) = env::var("GAME_MAX_SESSIONS") {
            self.session.max_sessions =
                max_sessions.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GAME_MAX_SESSIONS".to_string(),
                    value: max_sessions,
                })?;
        }

        if let Ok(session_timeout) = env::var("GAME_SESSION_TIMEOUT_MINUTES") {
            self.session.session_timeout_minutes =
                session_timeout.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GAME_SESSION_TIMEOUT_MINUTES".to_string(),
                    value: session_timeout,
                })?;
        }

        if let Ok(difficulty) = env::var("GAME_DEFAULT_DIFFICULTY") {
            self.game.default_difficulty =
                difficulty.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GAME_DEFAULT_DIFFICULTY".to_string(),
                    value: difficulty,
                })?;
        }

        if let Ok(width) = env::var("GAME_BOARD_WIDTH") {
            self.game.default_board_width =
                width.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GAME_BOARD_WIDTH".to_string(),
                    value: width,
                })?;
        }

        if let Ok(height) = env::var("GAME_BOARD_HEIGHT") {
            self.game.default_board_height =
                height.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GAME_BOARD_HEIGHT".to_string(),
                    value: height,
                })?;
        }

        if let Ok(min_interval) = env::var("GAME_MIN_TICK_INTERVAL_MS") {
            self.game.min_tick_interval_ms =
                min_interval.parse().map_err(|_| ConfigError::EnvVarError {
                    name: "GAME_MIN_TICK_INTERVAL_MS".to_string(),
                    value: min_interval,
                })?;
        }

        Ok(())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    ///
    /// デフォルト値 → 設定ファイル → 環境変数の順に重ね、指定されなかった
    /// 項目は前の層の値を保持する。設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Ok(file_config) = Self::from_file("config.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("config/app.json") {
            config = file_config;
        } else if let Ok(file_config) = Self::from_file("/etc/whackamole/config.json") {
            config = file_config;
        }

        // 環境変数で指定された項目だけを上書き（不正な値があれば環境変数層は捨てる）
        let mut overridden = config.clone();
        if overridden.apply_env_overrides().is_ok() {
            config = overridden;
        }

        config
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: self.server.port.to_string(),
            });
        }

        if self.session.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.max_sessions".to_string(),
                value: self.session.max_sessions.to_string(),
            });
        }

        if self.game.default_board_width == 0 || self.game.default_board_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "game.default_board_size".to_string(),
                value: format!(
                    "{}x{}",
                    self.game.default_board_width, self.game.default_board_height
                ),
            });
        }

        if self.game.default_board_width > self.game.max_board_width
            || self.game.default_board_height > self.game.max_board_height
        {
            return Err(ConfigError::InvalidValue {
                field: "game.default_board_size".to_string(),
                value: format!(
                    "{}x{}",
                    self.game.default_board_width, self.game.default_board_height
                ),
            });
        }

        if self.game.min_tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "game.min_tick_interval_ms".to_string(),
                value: self.game.min_tick_interval_ms.to_string(),
            });
        }

        if self.game.max_board_width * self.game.max_board_height
            > self.system_limits.max_board_cells
        {
            return Err(ConfigError::InvalidValue {
                field: "game.max_board_size".to_string(),
                value: format!(
                    "{}x{}",
                    self.game.max_board_width, self.game.max_board_height
                ),
            });
        }

        Ok(())
    }

    /// サーバーポート番号を取得する
    pub fn server_port(&self) -> u16 {
        self.server.port
    }

    /// デフォルト難易度のタイマー間隔を取得する
    pub fn default_tick_interval_ms(&self) -> u64 {
        self.game.default_difficulty.tick_interval_ms()
    }
}
