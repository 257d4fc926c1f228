use chrono::{DateTime, Utc};
use crate::domain::model::{OmsProductOfferReservation, ProductOfferReference, StoreId};
use serde::{Deserialize, Serialize};

/// 予約レコード作成イベント名
pub const RESERVATION_CREATED_EVENT: &str = "Entity.spy_oms_product_offer_reservation.create";
/// 予約レコード更新イベント名
pub const RESERVATION_UPDATED_EVENT: &str = "Entity.spy_oms_product_offer_reservation.update";
/// 予約レコード削除イベント名
pub const RESERVATION_DELETED_EVENT: &str = "Entity.spy_oms_product_offer_reservation.delete";

/// 予約レコードの識別情報
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationIdentity {
    pub product_offer_reference: ProductOfferReference,
    pub id_store: StoreId,
}

impl ReservationIdentity {
    pub fn new(product_offer_reference: ProductOfferReference, id_store: StoreId) -> Self {
        Self {
            product_offer_reference,
            id_store,
        }
    }
}

impl From<&OmsProductOfferReservation> for ReservationIdentity {
    fn from(record: &OmsProductOfferReservation) -> Self {
        Self::new(record.product_offer_reference().clone(), record.id_store())
    }
}

/// 予約エンティティの変更イベント
/// 書き込み成功後に発行される
#[derive(Debug, Clone, PartialEq)]
pub enum ReservationEvent {
    /// 予約レコードが作成された
    Created(ReservationChanged),
    /// 予約レコードが更新された
    Updated(ReservationChanged),
    /// 予約レコードが削除された
    Deleted(ReservationChanged),
}

/// 変更イベントの本体
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationChanged {
    /// 対象レコードの識別情報
    pub identity: ReservationIdentity,
    /// イベント発生日時
    pub occurred_at: DateTime<Utc>,
}

impl ReservationChanged {
    /// 新しい変更イベント本体を作成
    pub fn new(identity: ReservationIdentity) -> Self {
        Self {
            identity,
            occurred_at: Utc::now(),
        }
    }
}

impl ReservationEvent {
    pub fn created(identity: ReservationIdentity) -> Self {
        ReservationEvent::Created(ReservationChanged::new(identity))
    }

    pub fn updated(identity: ReservationIdentity) -> Self {
        ReservationEvent::Updated(ReservationChanged::new(identity))
    }

    pub fn deleted(identity: ReservationIdentity) -> Self {
        ReservationEvent::Deleted(ReservationChanged::new(identity))
    }

    /// イベント名を文字列から解決
    pub fn from_name(
        event_name: &str,
        identity: ReservationIdentity,
        occurred_at: DateTime<Utc>,
    ) -> Option<Self> {
        let changed = ReservationChanged {
            identity,
            occurred_at,
        };
        match event_name {
            RESERVATION_CREATED_EVENT => Some(ReservationEvent::Created(changed)),
            RESERVATION_UPDATED_EVENT => Some(ReservationEvent::Updated(changed)),
            RESERVATION_DELETED_EVENT => Some(ReservationEvent::Deleted(changed)),
            _ => None,
        }
    }

    /// 外部に公開するイベント名
    pub fn event_name(&self) -> &'static str {
        match self {
            ReservationEvent::Created(_) => RESERVATION_CREATED_EVENT,
            ReservationEvent::Updated(_) => RESERVATION_UPDATED_EVENT,
            ReservationEvent::Deleted(_) => RESERVATION_DELETED_EVENT,
        }
    }

    pub fn changed(&self) -> &ReservationChanged {
        match self {
            ReservationEvent::Created(e)
            | ReservationEvent::Updated(e)
            | ReservationEvent::Deleted(e) => e,
        }
    }

    pub fn identity(&self) -> &ReservationIdentity {
        &self.changed().identity
    }
}
