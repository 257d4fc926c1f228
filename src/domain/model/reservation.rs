use crate::domain::model::{OmsStateCollection, ProductOfferReference, Store, StoreId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 予約数量の検索条件
/// (商品オファー参照, ストアID) の組で一件を特定する
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationCriteria {
    product_offer_reference: ProductOfferReference,
    id_store: StoreId,
}

impl ReservationCriteria {
    /// 新しい検索条件を作成
    pub fn new(product_offer_reference: ProductOfferReference, id_store: StoreId) -> Self {
        Self {
            product_offer_reference,
            id_store,
        }
    }

    pub fn product_offer_reference(&self) -> &ProductOfferReference {
        &self.product_offer_reference
    }

    pub fn id_store(&self) -> StoreId {
        self.id_store
    }
}

/// 予約リクエストの対象アイテム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub product_offer_reference: ProductOfferReference,
}

impl ItemReference {
    pub fn new(product_offer_reference: ProductOfferReference) -> Self {
        Self {
            product_offer_reference,
        }
    }
}

/// 予約リクエスト
/// 集計の読み取りと予約数量の書き込みの両方に使う
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub item: ItemReference,
    pub reserved_states: OmsStateCollection,
    pub store: Store,
    /// 書き込み時のみ必須
    pub reservation_quantity: Option<Decimal>,
}

impl ReservationRequest {
    /// 新しい予約リクエストを作成（数量なし）
    ///
    /// # Arguments
    /// * `product_offer_reference` - 対象の商品オファー参照
    /// * `store` - 対象ストア
    /// * `reserved_states` - 予約扱いとなる状態名の集合
    pub fn new(
        product_offer_reference: ProductOfferReference,
        store: Store,
        reserved_states: OmsStateCollection,
    ) -> Self {
        Self {
            item: ItemReference::new(product_offer_reference),
            reserved_states,
            store,
            reservation_quantity: None,
        }
    }

    /// 予約数量を設定
    pub fn with_reservation_quantity(mut self, reservation_quantity: Decimal) -> Self {
        self.reservation_quantity = Some(reservation_quantity);
        self
    }

    pub fn product_offer_reference(&self) -> &ProductOfferReference {
        &self.item.product_offer_reference
    }
}

/// 予約数量のレスポンス
/// レコードが存在しない場合も必ずゼロを持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationResponse {
    reservation_quantity: Decimal,
}

impl ReservationResponse {
    pub fn new(reservation_quantity: Decimal) -> Self {
        Self {
            reservation_quantity,
        }
    }

    /// 予約なしを表すゼロ数量のレスポンス
    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }

    pub fn reservation_quantity(&self) -> Decimal {
        self.reservation_quantity
    }
}

impl Default for ReservationResponse {
    fn default() -> Self {
        Self::zero()
    }
}

/// 商品オファー予約レコード
/// (商品オファー参照, ストアID) ごとに高々1件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmsProductOfferReservation {
    id: Option<i64>,
    product_offer_reference: ProductOfferReference,
    id_store: StoreId,
    reservation_quantity: Decimal,
}

impl OmsProductOfferReservation {
    /// 未永続化のレコードを作成
    pub fn new(
        product_offer_reference: ProductOfferReference,
        id_store: StoreId,
        reservation_quantity: Decimal,
    ) -> Self {
        Self {
            id: None,
            product_offer_reference,
            id_store,
            reservation_quantity,
        }
    }

    /// 永続化済みのレコードを再構築
    pub fn reconstruct(
        id: i64,
        product_offer_reference: ProductOfferReference,
        id_store: StoreId,
        reservation_quantity: Decimal,
    ) -> Self {
        Self {
            id: Some(id),
            product_offer_reference,
            id_store,
            reservation_quantity,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn product_offer_reference(&self) -> &ProductOfferReference {
        &self.product_offer_reference
    }

    pub fn id_store(&self) -> StoreId {
        self.id_store
    }

    pub fn reservation_quantity(&self) -> Decimal {
        self.reservation_quantity
    }

    /// 一意キーに対応する検索条件
    pub fn criteria(&self) -> ReservationCriteria {
        ReservationCriteria::new(self.product_offer_reference.clone(), self.id_store)
    }

    /// 既存レコードのIDを引き継いだレコードを返す
    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }
}
