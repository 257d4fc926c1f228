use crate::application::mapper::OmsProductOfferReservationMapper;
use crate::application::reader::OmsProductOfferReservationReader;
use crate::application::writer::OmsProductOfferReservationWriter;
use crate::domain::port::{
    EventPublisher, Logger, OmsProductOfferReservationEntityManager,
    OmsProductOfferReservationRepository,
};
use std::sync::Arc;

/// 商品オファー予約ビジネスファクトリー
/// 協調オブジェクトをコンストラクタで受け取り、リーダーとライターを組み立てる
#[derive(Clone)]
pub struct OmsProductOfferReservationBusinessFactory {
    repository: Arc<dyn OmsProductOfferReservationRepository>,
    entity_manager: Arc<dyn OmsProductOfferReservationEntityManager>,
    event_publisher: Arc<dyn EventPublisher>,
    logger: Arc<dyn Logger>,
}

impl OmsProductOfferReservationBusinessFactory {
    /// 新しいファクトリーを作成
    ///
    /// # Arguments
    /// * `repository` - 読み取り用リポジトリ
    /// * `entity_manager` - 書き込み用エンティティマネージャー
    /// * `event_publisher` - 変更イベントの発行者
    /// * `logger` - ロガー
    pub fn new(
        repository: Arc<dyn OmsProductOfferReservationRepository>,
        entity_manager: Arc<dyn OmsProductOfferReservationEntityManager>,
        event_publisher: Arc<dyn EventPublisher>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            repository,
            entity_manager,
            event_publisher,
            logger,
        }
    }

    pub fn create_reader(&self) -> OmsProductOfferReservationReader {
        OmsProductOfferReservationReader::new(
            self.repository.clone(),
            self.create_mapper(),
            self.logger.clone(),
        )
    }

    pub fn create_writer(&self) -> OmsProductOfferReservationWriter {
        OmsProductOfferReservationWriter::new(
            self.entity_manager.clone(),
            self.repository.clone(),
            self.create_mapper(),
            self.event_publisher.clone(),
            self.logger.clone(),
        )
    }

    pub fn create_mapper(&self) -> OmsProductOfferReservationMapper {
        OmsProductOfferReservationMapper::new()
    }
}
