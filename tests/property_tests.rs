use proptest::prelude::*;
use oms_product_offer_reservation::adapter::driven::{
    InMemoryEventPublisher, InMemoryReservationStore, NoopLogger, SalesOrderItem,
};
use oms_product_offer_reservation::application::{
    OmsProductOfferReservationBusinessFactory, OmsProductOfferReservationFacade,
};
use oms_product_offer_reservation::domain::model::{
    OmsProductOfferReservation, OmsStateCollection, ProductOfferReference, ReservationCriteria,
    ReservationRequest, SalesOrderItemStateAggregation, Store, StoreId,
};
use rust_decimal::Decimal;
use std::sync::Arc;

fn facade_over(store: Arc<InMemoryReservationStore>) -> OmsProductOfferReservationFacade {
    OmsProductOfferReservationFacade::new(OmsProductOfferReservationBusinessFactory::new(
        store.clone(),
        store,
        Arc::new(InMemoryEventPublisher::new()),
        Arc::new(NoopLogger::new()),
    ))
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

// 予約数量の読み取りに関するプロパティベーステスト
proptest! {
    /// 保存した数量は丸めなしでそのまま読み取れる
    #[test]
    fn test_quantity_is_returned_exactly(
        mantissa in 0i64..1_000_000_000_000,
        scale in 0u32..10,
        id_store in 1i64..1_000,
    ) {
        let quantity = Decimal::new(mantissa, scale);
        let store = Arc::new(InMemoryReservationStore::new());
        let facade = facade_over(store.clone());
        let reference = ProductOfferReference::new("offer-1").unwrap();
        let id_store = StoreId::new(id_store).unwrap();

        let actual = runtime().block_on(async {
            store
                .add_reservation(OmsProductOfferReservation::new(reference.clone(), id_store, quantity))
                .await;
            facade
                .get_quantity(&ReservationCriteria::new(reference.clone(), id_store))
                .await
                .unwrap()
                .reservation_quantity()
        });

        prop_assert_eq!(actual, quantity);
    }

    /// 予約のないストアでは常にゼロ
    #[test]
    fn test_other_store_reads_zero(
        mantissa in 1i64..1_000_000,
        reserved_store in 1i64..100,
        queried_store in 1i64..100,
    ) {
        prop_assume!(reserved_store != queried_store);

        let store = Arc::new(InMemoryReservationStore::new());
        let facade = facade_over(store.clone());
        let reference = ProductOfferReference::new("offer-1").unwrap();

        let actual = runtime().block_on(async {
            store
                .add_reservation(OmsProductOfferReservation::new(
                    reference.clone(),
                    StoreId::new(reserved_store).unwrap(),
                    Decimal::new(mantissa, 2),
                ))
                .await;
            facade
                .get_quantity(&ReservationCriteria::new(
                    reference.clone(),
                    StoreId::new(queried_store).unwrap(),
                ))
                .await
                .unwrap()
                .reservation_quantity()
        });

        prop_assert!(actual.is_zero());
    }
}

// 集計に関するプロパティベーステスト
proptest! {
    /// N件の数量qのアイテムの集計合計は N×q
    #[test]
    fn test_aggregation_sum_is_count_times_quantity(
        items_count in 1usize..30,
        quantity in 1i64..1_000,
        state_count in 1usize..4,
    ) {
        let states = ["new", "payment pending", "reserved", "waiting"];
        let reserved_states: OmsStateCollection = states.iter().take(state_count).copied().collect();
        let store = Arc::new(InMemoryReservationStore::new());
        let facade = facade_over(store.clone());
        let reference = ProductOfferReference::new("offer-1").unwrap();
        let shop = Store::new(StoreId::new(1).unwrap(), "DE").unwrap();

        let aggregations = runtime().block_on(async {
            for index in 0..items_count {
                store
                    .add_sales_order_item(SalesOrderItem::new(
                        reference.clone(),
                        "DE",
                        states[index % state_count],
                        Some("DummyPayment01"),
                        Decimal::from(quantity),
                    ))
                    .await;
            }
            facade
                .get_aggregated_reservations(&ReservationRequest::new(
                    reference.clone(),
                    shop.clone(),
                    reserved_states.clone(),
                ))
                .await
                .unwrap()
        });

        prop_assert_eq!(
            SalesOrderItemStateAggregation::total(&aggregations),
            Decimal::from(quantity) * Decimal::from(items_count as i64)
        );
        prop_assert_eq!(aggregations.len(), state_count.min(items_count));

        // 状態名ごとに1行、昇順
        let names: Vec<_> = aggregations.iter().map(|a| a.state_name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(names, sorted);
    }
}
