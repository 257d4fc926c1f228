use crate::application::error::ApplicationError;
use crate::application::factory::OmsProductOfferReservationBusinessFactory;
use crate::domain::model::{
    ReservationCriteria, ReservationRequest, ReservationResponse, SalesOrderItemStateAggregation,
};

/// 商品オファー予約ファサード
/// 公開APIの入口。呼び出しごとにリーダー/ライターを生成して委譲する
#[derive(Clone)]
pub struct OmsProductOfferReservationFacade {
    factory: OmsProductOfferReservationBusinessFactory,
}

impl OmsProductOfferReservationFacade {
    /// 新しいファサードを作成
    ///
    /// # Arguments
    /// * `factory` - 協調オブジェクトを保持するファクトリー
    pub fn new(factory: OmsProductOfferReservationBusinessFactory) -> Self {
        Self { factory }
    }

    /// 商品オファーとストアの予約数量を取得
    ///
    /// # Returns
    /// * `Ok(ReservationResponse)` - 予約数量（レコードがなければゼロ）
    /// * `Err(ApplicationError)` - 取得失敗
    pub async fn get_quantity(
        &self,
        criteria: &ReservationCriteria,
    ) -> Result<ReservationResponse, ApplicationError> {
        self.factory.create_reader().get_quantity(criteria).await
    }

    /// 予約状態の販売注文アイテムの状態別集計を取得
    ///
    /// # Returns
    /// * `Ok(Vec<SalesOrderItemStateAggregation>)` - 状態別の集計
    /// * `Err(ApplicationError)` - 取得失敗
    pub async fn get_aggregated_reservations(
        &self,
        request: &ReservationRequest,
    ) -> Result<Vec<SalesOrderItemStateAggregation>, ApplicationError> {
        self.factory
            .create_reader()
            .get_aggregated_reservations(request)
            .await
    }

    /// 予約数量を書き込む
    ///
    /// # Returns
    /// * `Ok(())` - 書き込み成功
    /// * `Err(ApplicationError)` - 書き込み失敗
    pub async fn write_reservation(&self, request: &ReservationRequest) -> Result<(), ApplicationError> {
        self.factory.create_writer().write_reservation(request).await
    }
}
