use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{
    OmsProductOfferReservation, OmsStateCollection, ProductOfferReference, ReservationCriteria,
    SalesOrderItemStateAggregation, StoreId,
};
use crate::domain::port::{OmsProductOfferReservationRepository, RepositoryError};
use async_trait::async_trait;
use rust_decimal::Decimal;

// MySQL関連のインポート
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, QueryBuilder, Row};

/// MySQL商品オファー予約リポジトリ
/// 予約テーブルと販売注文テーブルを読み取る
#[derive(Clone)]
pub struct MySqlOmsProductOfferReservationRepository {
    pool: Pool<MySql>,
}

impl MySqlOmsProductOfferReservationRepository {
    /// 新しいMySQL予約リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// 予約テーブルの行からレコードを再構築する
    fn build_reservation_from_row(row: &MySqlRow) -> Result<OmsProductOfferReservation, RepositoryError> {
        let reference: String = row.try_get("product_offer_reference").map_err(|e| {
            RepositoryError::FetchFailed(format!("商品オファー参照の取得に失敗しました: {}", e))
        })?;
        let product_offer_reference = ProductOfferReference::new(reference).map_err(|e| {
            RepositoryError::FetchFailed(format!("商品オファー参照の解析に失敗しました: {}", e))
        })?;

        let id_store = row
            .try_get::<i64, _>("fk_store")
            .map_err(|e| RepositoryError::FetchFailed(format!("ストアIDの取得に失敗しました: {}", e)))
            .and_then(|value| {
                StoreId::new(value).map_err(|e| {
                    RepositoryError::FetchFailed(format!("ストアIDの解析に失敗しました: {}", e))
                })
            })?;

        let id: i64 = row.try_get("id_oms_product_offer_reservation").map_err(|e| {
            RepositoryError::FetchFailed(format!("予約IDの取得に失敗しました: {}", e))
        })?;
        let reservation_quantity: Decimal = row.try_get("reservation_quantity").map_err(|e| {
            RepositoryError::FetchFailed(format!("予約数量の取得に失敗しました: {}", e))
        })?;

        Ok(OmsProductOfferReservation::reconstruct(
            id,
            product_offer_reference,
            id_store,
            reservation_quantity,
        ))
    }
}

#[async_trait]
impl OmsProductOfferReservationRepository for MySqlOmsProductOfferReservationRepository {
    async fn find_reservation(
        &self,
        criteria: &ReservationCriteria,
    ) -> Result<Option<OmsProductOfferReservation>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id_oms_product_offer_reservation, product_offer_reference, fk_store, reservation_quantity
            FROM spy_oms_product_offer_reservation
            WHERE product_offer_reference = ? AND fk_store = ?
            "#,
        )
        .bind(criteria.product_offer_reference().as_str())
        .bind(criteria.id_store().value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("予約の取得に失敗しました", e))
        .map_err(RepositoryError::from)?;

        row.as_ref().map(Self::build_reservation_from_row).transpose()
    }

    async fn get_aggregated_reservations(
        &self,
        product_offer_reference: &ProductOfferReference,
        store_name: &str,
        reserved_states: &OmsStateCollection,
    ) -> Result<Vec<SalesOrderItemStateAggregation>, RepositoryError> {
        if reserved_states.is_empty() {
            return Ok(Vec::new());
        }

        // 状態名とプロセス名ごとに数量を合計する
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
            r#"
            SELECT state.name AS state_name, process.name AS process_name, SUM(item.quantity) AS sum_amount
            FROM spy_sales_order_item item
            INNER JOIN spy_sales_order sales_order ON sales_order.id_sales_order = item.fk_sales_order
            INNER JOIN spy_oms_order_item_state state ON state.id_oms_order_item_state = item.fk_oms_order_item_state
            LEFT JOIN spy_oms_order_process process ON process.id_oms_order_process = item.fk_oms_order_process
            WHERE item.product_offer_reference = "#,
        );
        builder.push_bind(product_offer_reference.as_str());
        builder.push(" AND sales_order.store = ");
        builder.push_bind(store_name);
        builder.push(" AND state.name IN (");
        let mut separated = builder.separated(", ");
        for state_name in reserved_states.iter() {
            separated.push_bind(state_name);
        }
        separated.push_unseparated(")");
        builder.push(" GROUP BY state.name, process.name ORDER BY state.name ASC, process.name ASC");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx("予約集計の取得に失敗しました", e))
            .map_err(RepositoryError::from)?;

        let mut aggregations = Vec::new();
        for row in rows {
            let state_name: String = row.try_get("state_name").map_err(|e| {
                RepositoryError::FetchFailed(format!("状態名の取得に失敗しました: {}", e))
            })?;
            let process_name: Option<String> = row.try_get("process_name").map_err(|e| {
                RepositoryError::FetchFailed(format!("プロセス名の取得に失敗しました: {}", e))
            })?;
            let sum_amount: Option<Decimal> = row.try_get("sum_amount").map_err(|e| {
                RepositoryError::FetchFailed(format!("合計数量の取得に失敗しました: {}", e))
            })?;

            aggregations.push(SalesOrderItemStateAggregation::new(
                product_offer_reference.clone(),
                process_name,
                state_name,
                sum_amount.unwrap_or(Decimal::ZERO),
            ));
        }

        Ok(aggregations)
    }
}
