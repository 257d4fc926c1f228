use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{OmsProductOfferReservation, ReservationCriteria};
use crate::domain::port::{OmsProductOfferReservationEntityManager, RepositoryError};
use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};

/// MySQL商品オファー予約エンティティマネージャー
/// 予約テーブルへの書き込みを担当する
/// 同時書き込みの整合性はテーブルの一意キーとトランザクションに委ねる
#[derive(Clone)]
pub struct MySqlOmsProductOfferReservationEntityManager {
    pool: Pool<MySql>,
}

impl MySqlOmsProductOfferReservationEntityManager {
    /// 新しいMySQLエンティティマネージャーを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OmsProductOfferReservationEntityManager for MySqlOmsProductOfferReservationEntityManager {
    async fn create(
        &self,
        reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError> {
        // 一意キー (product_offer_reference, fk_store) の重複は制約違反として返る
        let result = sqlx::query(
            r#"
            INSERT INTO spy_oms_product_offer_reservation (product_offer_reference, fk_store, reservation_quantity)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(reservation.product_offer_reference().as_str())
        .bind(reservation.id_store().value())
        .bind(reservation.reservation_quantity())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("予約の作成に失敗しました", e))
        .map_err(RepositoryError::from)?;

        let id = i64::try_from(result.last_insert_id()).map_err(|e| {
            RepositoryError::OperationFailed(format!("予約IDの変換に失敗しました: {}", e))
        })?;

        Ok(reservation.clone().with_id(Some(id)))
    }

    async fn update(
        &self,
        reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::from_sqlx("トランザクション開始に失敗しました", e))
            .map_err(RepositoryError::from)?;

        // 影響行数は値が変わらない行を数えないので、行の存在はロック付きSELECTで確認する
        let row = sqlx::query(
            r#"
            SELECT id_oms_product_offer_reservation
            FROM spy_oms_product_offer_reservation
            WHERE product_offer_reference = ? AND fk_store = ?
            FOR UPDATE
            "#,
        )
        .bind(reservation.product_offer_reference().as_str())
        .bind(reservation.id_store().value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_sqlx("予約の取得に失敗しました", e))
        .map_err(RepositoryError::from)?;

        let id = match row {
            Some(row) => Some(
                row.try_get::<i64, _>("id_oms_product_offer_reservation")
                    .map_err(|e| DatabaseError::from_sqlx("予約IDの取得に失敗しました", e))
                    .map_err(RepositoryError::from)?,
            ),
            None => None,
        };
        let id = require_existing(id, reservation)?;

        sqlx::query(
            r#"
            UPDATE spy_oms_product_offer_reservation
            SET reservation_quantity = ?
            WHERE id_oms_product_offer_reservation = ?
            "#,
        )
        .bind(reservation.reservation_quantity())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_sqlx("予約の更新に失敗しました", e))
        .map_err(RepositoryError::from)?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::from_sqlx("トランザクションのコミットに失敗しました", e))
            .map_err(RepositoryError::from)?;

        Ok(reservation.clone().with_id(Some(id)))
    }

    async fn delete(&self, criteria: &ReservationCriteria) -> Result<(), RepositoryError> {
        sqlx::query(
            "DELETE FROM spy_oms_product_offer_reservation WHERE product_offer_reference = ? AND fk_store = ?",
        )
        .bind(criteria.product_offer_reference().as_str())
        .bind(criteria.id_store().value())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx("予約の削除に失敗しました", e))
        .map_err(RepositoryError::from)?;

        Ok(())
    }
}

/// 更新対象の行が見つからなければ`OperationFailed`
fn require_existing(
    id: Option<i64>,
    reservation: &OmsProductOfferReservation,
) -> Result<i64, RepositoryError> {
    id.ok_or_else(|| {
        RepositoryError::OperationFailed(format!(
            "更新対象の予約が見つかりません: {} / {}",
            reservation.product_offer_reference(),
            reservation.id_store()
        ))
    })
}
