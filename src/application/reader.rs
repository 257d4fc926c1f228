use crate::application::error::ApplicationError;
use crate::application::mapper::OmsProductOfferReservationMapper;
use crate::domain::model::{ReservationCriteria, ReservationRequest, ReservationResponse, SalesOrderItemStateAggregation};
use crate::domain::port::{Logger, OmsProductOfferReservationRepository};
use std::collections::HashMap;
use std::sync::Arc;

const COMPONENT: &str = "OmsProductOfferReservationReader";

/// 商品オファー予約リーダー
pub struct OmsProductOfferReservationReader {
    repository: Arc<dyn OmsProductOfferReservationRepository>,
    mapper: OmsProductOfferReservationMapper,
    logger: Arc<dyn Logger>,
}

impl OmsProductOfferReservationReader {
    /// 新しいリーダーを作成
    ///
    /// # Arguments
    /// * `repository` - 予約リポジトリ
    /// * `mapper` - 予約マッパー
    /// * `logger` - ロガー
    pub fn new(
        repository: Arc<dyn OmsProductOfferReservationRepository>,
        mapper: OmsProductOfferReservationMapper,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            repository,
            mapper,
            logger,
        }
    }

    /// 商品オファーとストアの予約数量を取得
    /// レコードがなければゼロを返す（エラーにはしない）
    ///
    /// # Arguments
    /// * `criteria` - 商品オファー参照とストアIDの組
    ///
    /// # Returns
    /// * `Ok(ReservationResponse)` - 予約数量
    /// * `Err(ApplicationError)` - リポジトリの失敗
    pub async fn get_quantity(
        &self,
        criteria: &ReservationCriteria,
    ) -> Result<ReservationResponse, ApplicationError> {
        let record = self.repository.find_reservation(criteria).await?;
        let response = self.mapper.map_record_to_response(record.as_ref());

        let mut context = HashMap::new();
        context.insert(
            "product_offer_reference".to_string(),
            criteria.product_offer_reference().to_string(),
        );
        context.insert("id_store".to_string(), criteria.id_store().to_string());
        context.insert("found".to_string(), record.is_some().to_string());
        self.logger.debug(
            COMPONENT,
            &format!("Reservation quantity resolved: {}", response.reservation_quantity()),
            None,
            Some(context),
        );

        Ok(response)
    }

    /// 予約状態の販売注文アイテムを状態ごとに集計
    /// 状態名の昇順、次にプロセス名の昇順で返す
    pub async fn get_aggregated_reservations(
        &self,
        request: &ReservationRequest,
    ) -> Result<Vec<SalesOrderItemStateAggregation>, ApplicationError> {
        // IN () は成立しないので空の状態集合では問い合わせない
        if request.reserved_states.is_empty() {
            return Ok(Vec::new());
        }

        let mut aggregations = self
            .repository
            .get_aggregated_reservations(
                request.product_offer_reference(),
                request.store.name(),
                &request.reserved_states,
            )
            .await?;
        aggregations.sort_by(|a, b| a.display_order(b));

        Ok(aggregations)
    }
}
