use crate::domain::model::{
    OmsProductOfferReservation, OmsStateCollection, ProductOfferReference, ReservationCriteria,
    SalesOrderItemStateAggregation,
};
use crate::domain::port::{
    OmsProductOfferReservationEntityManager, OmsProductOfferReservationRepository,
    RepositoryError,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

/// 集計対象となる販売注文アイテム
#[derive(Debug, Clone, PartialEq)]
pub struct SalesOrderItem {
    pub product_offer_reference: ProductOfferReference,
    pub store_name: String,
    pub state_name: String,
    pub process_name: Option<String>,
    pub quantity: Decimal,
}

impl SalesOrderItem {
    pub fn new(
        product_offer_reference: ProductOfferReference,
        store_name: &str,
        state_name: &str,
        process_name: Option<&str>,
        quantity: Decimal,
    ) -> Self {
        Self {
            product_offer_reference,
            store_name: store_name.to_string(),
            state_name: state_name.to_string(),
            process_name: process_name.map(str::to_string),
            quantity,
        }
    }
}

#[derive(Default)]
struct StoreState {
    reservations: HashMap<ReservationCriteria, OmsProductOfferReservation>,
    sales_order_items: Vec<SalesOrderItem>,
    next_id: i64,
}

/// インメモリ予約ストア
/// リポジトリとエンティティマネージャーの両方を実装する
/// 一意キー (商品オファー参照, ストアID) ごとに高々1件を保証する
#[derive(Default)]
pub struct InMemoryReservationStore {
    state: Mutex<StoreState>,
}

impl InMemoryReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 予約レコードを直接登録（既存の同一キーは上書き）
    pub async fn add_reservation(&self, reservation: OmsProductOfferReservation) {
        let mut state = self.state.lock().await;
        let id = match reservation.id() {
            // 指定IDより後ろから採番を続ける
            Some(id) => {
                state.next_id = state.next_id.max(id);
                id
            }
            None => {
                state.next_id += 1;
                state.next_id
            }
        };
        state
            .reservations
            .insert(reservation.criteria(), reservation.with_id(Some(id)));
    }

    /// 販売注文アイテムを登録
    pub async fn add_sales_order_item(&self, item: SalesOrderItem) {
        self.state.lock().await.sales_order_items.push(item);
    }

    /// 一意キーで予約レコードを取得
    pub async fn reservation(&self, criteria: &ReservationCriteria) -> Option<OmsProductOfferReservation> {
        self.state.lock().await.reservations.get(criteria).cloned()
    }

    pub async fn reservation_count(&self) -> usize {
        self.state.lock().await.reservations.len()
    }
}

#[async_trait]
impl OmsProductOfferReservationRepository for InMemoryReservationStore {
    async fn find_reservation(
        &self,
        criteria: &ReservationCriteria,
    ) -> Result<Option<OmsProductOfferReservation>, RepositoryError> {
        Ok(self.reservation(criteria).await)
    }

    async fn get_aggregated_reservations(
        &self,
        product_offer_reference: &ProductOfferReference,
        store_name: &str,
        reserved_states: &OmsStateCollection,
    ) -> Result<Vec<SalesOrderItemStateAggregation>, RepositoryError> {
        let state = self.state.lock().await;

        // (状態名, プロセス名) の順序付きマップで集計するので結果の並びは決定的
        let mut sums: BTreeMap<(String, Option<String>), Decimal> = BTreeMap::new();
        for item in state.sales_order_items.iter().filter(|item| {
            &item.product_offer_reference == product_offer_reference
                && item.store_name == store_name
                && reserved_states.contains(&item.state_name)
        }) {
            *sums
                .entry((item.state_name.clone(), item.process_name.clone()))
                .or_insert(Decimal::ZERO) += item.quantity;
        }

        Ok(sums
            .into_iter()
            .map(|((state_name, process_name), sum_amount)| {
                SalesOrderItemStateAggregation::new(
                    product_offer_reference.clone(),
                    process_name,
                    state_name,
                    sum_amount,
                )
            })
            .collect())
    }
}

#[async_trait]
impl OmsProductOfferReservationEntityManager for InMemoryReservationStore {
    async fn create(
        &self,
        reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError> {
        let mut state = self.state.lock().await;
        let criteria = reservation.criteria();
        if state.reservations.contains_key(&criteria) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "予約が既に存在します: {} / {}",
                criteria.product_offer_reference(),
                criteria.id_store()
            )));
        }

        state.next_id += 1;
        let created = reservation.clone().with_id(Some(state.next_id));
        state.reservations.insert(criteria, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError> {
        let mut state = self.state.lock().await;
        let criteria = reservation.criteria();
        let existing = state.reservations.get_mut(&criteria).ok_or_else(|| {
            RepositoryError::OperationFailed(format!(
                "更新対象の予約が見つかりません: {} / {}",
                criteria.product_offer_reference(),
                criteria.id_store()
            ))
        })?;

        let id = existing.id();
        *existing = reservation.clone().with_id(id);
        Ok(existing.clone())
    }

    async fn delete(&self, criteria: &ReservationCriteria) -> Result<(), RepositoryError> {
        self.state.lock().await.reservations.remove(criteria);
        Ok(())
    }
}
