use crate::application::error::ApplicationError;
use crate::application::mapper::OmsProductOfferReservationMapper;
use crate::domain::error::DomainError;
use crate::domain::event::{ReservationEvent, ReservationIdentity};
use crate::domain::model::ReservationRequest;
use crate::domain::port::{
    EventPublisher, Logger, OmsProductOfferReservationEntityManager,
    OmsProductOfferReservationRepository,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

const COMPONENT: &str = "OmsProductOfferReservationWriter";

/// 商品オファー予約ライター
/// 予約数量を絶対値として書き込み、変更内容に応じたイベントを発行する
///
/// | 数量 | 既存レコード | 操作 | イベント |
/// |------|--------------|------|----------|
/// | > 0  | なし         | 作成 | Created  |
/// | > 0  | あり         | 更新 | Updated  |
/// | = 0  | あり         | 削除 | Deleted  |
/// | = 0  | なし         | なし | なし     |
pub struct OmsProductOfferReservationWriter {
    entity_manager: Arc<dyn OmsProductOfferReservationEntityManager>,
    repository: Arc<dyn OmsProductOfferReservationRepository>,
    mapper: OmsProductOfferReservationMapper,
    event_publisher: Arc<dyn EventPublisher>,
    logger: Arc<dyn Logger>,
}

impl OmsProductOfferReservationWriter {
    /// 新しいライターを作成
    pub fn new(
        entity_manager: Arc<dyn OmsProductOfferReservationEntityManager>,
        repository: Arc<dyn OmsProductOfferReservationRepository>,
        mapper: OmsProductOfferReservationMapper,
        event_publisher: Arc<dyn EventPublisher>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            entity_manager,
            repository,
            mapper,
            event_publisher,
            logger,
        }
    }

    /// 予約数量を書き込む
    ///
    /// # Arguments
    /// * `request` - 予約数量を含む予約リクエスト
    ///
    /// # Returns
    /// * `Ok(())` - 書き込み成功（変更なしを含む）
    /// * `Err(ApplicationError::DomainError)` - 数量が未設定または負
    /// * `Err(ApplicationError::RepositoryError)` - 永続化の失敗（そのまま伝播）
    /// * `Err(ApplicationError::EventPublishingFailed)` - 書き込み後のイベント発行失敗
    pub async fn write_reservation(&self, request: &ReservationRequest) -> Result<(), ApplicationError> {
        let record = self.mapper.map_request_to_record(request)?;
        if record.reservation_quantity() < Decimal::ZERO {
            return Err(DomainError::InvalidQuantity.into());
        }

        let criteria = self.mapper.map_request_to_criteria(request);
        let correlation_id = Uuid::new_v4();
        let identity = ReservationIdentity::from(&record);

        let existing = self.repository.find_reservation(&criteria).await?;

        let event = match (existing, record.reservation_quantity().is_zero()) {
            (None, true) => {
                self.logger.debug(
                    COMPONENT,
                    "Zero quantity for absent reservation, nothing to write",
                    Some(correlation_id),
                    Some(self.context(&identity, &record.reservation_quantity().to_string())),
                );
                return Ok(());
            }
            (None, false) => {
                self.entity_manager
                    .create(&record)
                    .await
                    .inspect_err(|e| self.log_failure("create", &identity, correlation_id, e))?;
                ReservationEvent::created(identity.clone())
            }
            (Some(existing), false) => {
                self.entity_manager
                    .update(&record.with_id(existing.id()))
                    .await
                    .inspect_err(|e| self.log_failure("update", &identity, correlation_id, e))?;
                ReservationEvent::updated(identity.clone())
            }
            (Some(_), true) => {
                self.entity_manager
                    .delete(&criteria)
                    .await
                    .inspect_err(|e| self.log_failure("delete", &identity, correlation_id, e))?;
                ReservationEvent::deleted(identity.clone())
            }
        };

        // 書き込みは取り消さずに発行失敗を返す
        self.event_publisher
            .publish(&event)
            .inspect_err(|e| self.log_failure("publish", &identity, correlation_id, e))?;

        self.logger.info(
            COMPONENT,
            &format!("Reservation written: {}", event.event_name()),
            Some(correlation_id),
            Some(self.context(&identity, &request_quantity(request))),
        );

        Ok(())
    }

    fn context(&self, identity: &ReservationIdentity, quantity: &str) -> HashMap<String, String> {
        let mut context = HashMap::new();
        context.insert(
            "product_offer_reference".to_string(),
            identity.product_offer_reference.to_string(),
        );
        context.insert("id_store".to_string(), identity.id_store.to_string());
        context.insert("reservation_quantity".to_string(), quantity.to_string());
        context
    }

    fn log_failure(
        &self,
        operation: &str,
        identity: &ReservationIdentity,
        correlation_id: Uuid,
        error: &impl std::fmt::Display,
    ) {
        let mut context = self.context(identity, "-");
        context.insert("operation".to_string(), operation.to_string());
        self.logger.error(
            COMPONENT,
            &format!("Reservation {} failed: {}", operation, error),
            Some(correlation_id),
            Some(context),
        );
    }
}

fn request_quantity(request: &ReservationRequest) -> String {
    request
        .reservation_quantity
        .map(|quantity| quantity.to_string())
        .unwrap_or_default()
}
