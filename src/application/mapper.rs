use crate::domain::error::DomainError;
use crate::domain::model::{
    OmsProductOfferReservation, ReservationCriteria, ReservationRequest, ReservationResponse,
};

/// 商品オファー予約マッパー
/// 外部のリクエスト形状と永続化レコードの相互変換のみを行う
#[derive(Debug, Clone, Copy, Default)]
pub struct OmsProductOfferReservationMapper;

impl OmsProductOfferReservationMapper {
    pub fn new() -> Self {
        Self
    }

    /// 予約リクエストから一意キーの検索条件を作成
    pub fn map_request_to_criteria(&self, request: &ReservationRequest) -> ReservationCriteria {
        ReservationCriteria::new(
            request.product_offer_reference().clone(),
            request.store.id_store(),
        )
    }

    /// 予約リクエストを永続化レコードに変換
    ///
    /// # Returns
    /// * `Ok(OmsProductOfferReservation)` - 変換成功
    /// * `Err(DomainError::MissingField)` - 予約数量が未設定
    pub fn map_request_to_record(
        &self,
        request: &ReservationRequest,
    ) -> Result<OmsProductOfferReservation, DomainError> {
        let reservation_quantity = request
            .reservation_quantity
            .ok_or_else(|| DomainError::MissingField("reservation_quantity".to_string()))?;

        Ok(OmsProductOfferReservation::new(
            request.product_offer_reference().clone(),
            request.store.id_store(),
            reservation_quantity,
        ))
    }

    /// 検索結果のレコードをレスポンスに変換
    /// レコードがなければゼロ数量
    pub fn map_record_to_response(
        &self,
        record: Option<&OmsProductOfferReservation>,
    ) -> ReservationResponse {
        record
            .map(|record| ReservationResponse::new(record.reservation_quantity()))
            .unwrap_or_else(ReservationResponse::zero)
    }
}
