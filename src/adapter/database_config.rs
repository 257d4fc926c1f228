use crate::adapter::database_error::DatabaseError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3306;
const DEFAULT_DATABASE: &str = "oms_db";
const DEFAULT_USER: &str = "oms_user";
const DEFAULT_PASSWORD: &str = "oms_password";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 予約テーブルを持つMySQLへの接続設定
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
}

/// 設定エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {name}={value} ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl DatabaseConfig {
    /// .envファイルを読み込んだ上で環境変数から設定を読み取る
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// 環境変数から設定を読み取る
    /// 環境変数が設定されていない場合はデフォルト値を使用
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: string_var("DATABASE_HOST", DEFAULT_HOST),
            port: parsed_var("DATABASE_PORT", DEFAULT_PORT)?,
            database: string_var("DATABASE_NAME", DEFAULT_DATABASE),
            username: string_var("DATABASE_USER", DEFAULT_USER),
            password: string_var("DATABASE_PASSWORD", DEFAULT_PASSWORD),
            max_connections: parsed_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    /// MySQL接続文字列を生成
    pub fn connection_string(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database
        )
    }

    /// 設定からMySQL接続プールを作成
    pub async fn connect(&self) -> Result<MySqlPool, DatabaseError> {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.connection_string())
            .await
            .map_err(|e| DatabaseError::from_sqlx("接続プールの作成に失敗しました", e))
    }
}

fn string_var(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
