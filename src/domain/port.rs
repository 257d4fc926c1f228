// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::event::ReservationEvent;
use crate::domain::model::{
    OmsProductOfferReservation, OmsStateCollection, ProductOfferReference, ReservationCriteria,
    SalesOrderItemStateAggregation,
};
use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// デバッグレベルのログを出力
    fn debug(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 情報レベルのログを出力
    fn info(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// 警告レベルのログを出力
    fn warn(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );

    /// エラーレベルのログを出力
    fn error(
        &self,
        component: &str,
        message: &str,
        correlation_id: Option<Uuid>,
        context: Option<HashMap<String, String>>,
    );
}

/// リポジトリエラー型
/// 永続化操作で発生するエラーを表現する
/// アプリケーション層はこの値を変換せずに呼び出し側へ伝播する
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
    /// データベース接続に失敗
    ConnectionFailed(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
    /// 一意制約などの制約違反
    ConstraintViolation(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
            RepositoryError::ConstraintViolation(msg) => {
                write!(f, "Constraint violation: {}", msg)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// 商品オファー予約リポジトリトレイト
/// 読み取り専用の永続化操作を抽象化する
#[async_trait]
pub trait OmsProductOfferReservationRepository: Send + Sync {
    /// 一意キーで予約レコードを検索する
    ///
    /// # Arguments
    /// * `criteria` - 商品オファー参照とストアIDの組
    ///
    /// # Returns
    /// * `Ok(Some(OmsProductOfferReservation))` - レコードが見つかった
    /// * `Ok(None)` - レコードが見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_reservation(
        &self,
        criteria: &ReservationCriteria,
    ) -> Result<Option<OmsProductOfferReservation>, RepositoryError>;

    /// 販売注文アイテムを状態ごとに集計する
    /// 状態名の昇順、次にプロセス名の昇順で並べて返す
    ///
    /// # Arguments
    /// * `product_offer_reference` - 対象の商品オファー参照
    /// * `store_name` - 販売注文のストア名
    /// * `reserved_states` - 集計対象の状態名（空であってはならない）
    ///
    /// # Returns
    /// * `Ok(Vec<SalesOrderItemStateAggregation>)` - 集計結果
    /// * `Err(RepositoryError)` - 取得失敗
    async fn get_aggregated_reservations(
        &self,
        product_offer_reference: &ProductOfferReference,
        store_name: &str,
        reserved_states: &OmsStateCollection,
    ) -> Result<Vec<SalesOrderItemStateAggregation>, RepositoryError>;
}

/// 商品オファー予約エンティティマネージャートレイト
/// 予約レコードの作成・更新・削除を抽象化する
#[async_trait]
pub trait OmsProductOfferReservationEntityManager: Send + Sync {
    /// 予約レコードを作成する
    /// 同じ一意キーのレコードが既に存在する場合は制約違反
    async fn create(
        &self,
        reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError>;

    /// 既存の予約レコードの数量を更新する
    /// 一意キーに一致するレコードが無い場合は`RepositoryError::OperationFailed`を返し、
    /// 何も書き込まない
    async fn update(
        &self,
        reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError>;

    /// 一意キーに一致する予約レコードを削除する
    async fn delete(&self, criteria: &ReservationCriteria) -> Result<(), RepositoryError>;
}

/// イベント発行エラー
#[derive(Debug, Clone, thiserror::Error)]
pub enum PublisherError {
    #[error("Event publishing failed: {0}")]
    PublishingFailed(String),
}

/// イベント発行者トレイト
/// 予約エンティティの変更通知を外部へ届けるポート
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: &ReservationEvent) -> Result<(), PublisherError>;
}
