use oms_product_offer_reservation::adapter::driven::{
    InMemoryEventPublisher, InMemoryReservationStore, NoopLogger, SalesOrderItem,
};
use oms_product_offer_reservation::application::{
    ApplicationError, OmsProductOfferReservationBusinessFactory, OmsProductOfferReservationFacade,
};
use oms_product_offer_reservation::domain::event::ReservationEvent;
use oms_product_offer_reservation::domain::model::{
    OmsProductOfferReservation, OmsStateCollection, ProductOfferReference, ReservationCriteria,
    ReservationRequest, SalesOrderItemStateAggregation, Store, StoreId,
};
use oms_product_offer_reservation::domain::port::{
    EventPublisher, OmsProductOfferReservationEntityManager, OmsProductOfferReservationRepository,
    PublisherError, RepositoryError,
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

const STORE_NAME_DE: &str = "DE";
const PROCESS_NAME: &str = "DummyPayment01";

// テスト用ヘルパー関数
fn reference(value: &str) -> ProductOfferReference {
    ProductOfferReference::new(value).unwrap()
}

fn store_id(value: i64) -> StoreId {
    StoreId::new(value).unwrap()
}

fn store_de() -> Store {
    Store::new(store_id(1), STORE_NAME_DE).unwrap()
}

struct TestContext {
    store: Arc<InMemoryReservationStore>,
    publisher: Arc<InMemoryEventPublisher>,
    facade: OmsProductOfferReservationFacade,
}

fn setup() -> TestContext {
    let store = Arc::new(InMemoryReservationStore::new());
    let publisher = Arc::new(InMemoryEventPublisher::new());
    let factory = OmsProductOfferReservationBusinessFactory::new(
        store.clone(),
        store.clone(),
        publisher.clone(),
        Arc::new(NoopLogger::new()),
    );

    TestContext {
        store,
        publisher,
        facade: OmsProductOfferReservationFacade::new(factory),
    }
}

async fn have_reservation(context: &TestContext, offer: &str, id_store: i64, quantity: Decimal) {
    context
        .store
        .add_reservation(OmsProductOfferReservation::new(
            reference(offer),
            store_id(id_store),
            quantity,
        ))
        .await;
}

async fn have_sales_order_items(
    context: &TestContext,
    offer: &str,
    state_names: &[&str],
    quantity: Decimal,
    items_count: usize,
) {
    for index in 0..items_count {
        let state_name = state_names[index % state_names.len()];
        context
            .store
            .add_sales_order_item(SalesOrderItem::new(
                reference(offer),
                STORE_NAME_DE,
                state_name,
                Some(PROCESS_NAME),
                quantity,
            ))
            .await;
    }
}

#[tokio::test]
async fn test_get_quantity_success() {
    let context = setup();
    have_reservation(&context, "123", 1, dec!(5)).await;

    let response = context
        .facade
        .get_quantity(&ReservationCriteria::new(reference("123"), store_id(1)))
        .await
        .unwrap();

    assert_eq!(response.reservation_quantity(), dec!(5));
}

#[tokio::test]
async fn test_get_quantity_for_not_reserved_product_offer() {
    let context = setup();
    have_reservation(&context, "123", 1, dec!(5)).await;

    let response = context
        .facade
        .get_quantity(&ReservationCriteria::new(reference("456"), store_id(1)))
        .await
        .unwrap();

    assert!(response.reservation_quantity().is_zero());
}

#[tokio::test]
async fn test_get_quantity_with_wrong_store() {
    let context = setup();
    have_reservation(&context, "123", 1, dec!(5)).await;

    let response = context
        .facade
        .get_quantity(&ReservationCriteria::new(reference("123"), store_id(2)))
        .await
        .unwrap();

    assert!(response.reservation_quantity().is_zero());
}

#[tokio::test]
async fn test_get_quantity_keeps_fractional_quantity() {
    let context = setup();
    have_reservation(&context, "123", 1, dec!(1.0000000001)).await;

    let response = context
        .facade
        .get_quantity(&ReservationCriteria::new(reference("123"), store_id(1)))
        .await
        .unwrap();

    assert_eq!(response.reservation_quantity(), dec!(1.0000000001));
}

#[tokio::test]
async fn test_get_aggregated_reservations() {
    let context = setup();
    let quantity = dec!(2);
    let items_count = 5;
    have_sales_order_items(
        &context,
        "offer-1",
        &["new", "payment pending"],
        quantity,
        items_count,
    )
    .await;
    let reserved_states: OmsStateCollection = vec!["new", "payment pending"].into_iter().collect();

    let aggregations = context
        .facade
        .get_aggregated_reservations(&ReservationRequest::new(
            reference("offer-1"),
            store_de(),
            reserved_states,
        ))
        .await
        .unwrap();

    assert!(aggregations.len() > 1);
    assert_eq!(
        SalesOrderItemStateAggregation::total(&aggregations),
        quantity * Decimal::from(items_count)
    );
}

#[tokio::test]
async fn test_get_aggregated_reservations_ignores_other_states_and_stores() {
    let context = setup();
    have_sales_order_items(&context, "offer-1", &["new"], dec!(2), 5).await;
    have_sales_order_items(&context, "offer-1", &["shipped"], dec!(7), 3).await;
    context
        .store
        .add_sales_order_item(SalesOrderItem::new(
            reference("offer-1"),
            "AT",
            "new",
            Some(PROCESS_NAME),
            dec!(50),
        ))
        .await;

    let aggregations = context
        .facade
        .get_aggregated_reservations(&ReservationRequest::new(
            reference("offer-1"),
            store_de(),
            OmsStateCollection::new().with_state("new"),
        ))
        .await
        .unwrap();

    assert_eq!(aggregations.len(), 1);
    assert_eq!(aggregations[0].state_name, "new");
    assert_eq!(aggregations[0].process_name.as_deref(), Some(PROCESS_NAME));
    assert_eq!(aggregations[0].sum_amount, dec!(10));
}

#[tokio::test]
async fn test_write_then_read_reservation() {
    let context = setup();
    let request = ReservationRequest::new(reference("123"), store_de(), OmsStateCollection::new())
        .with_reservation_quantity(dec!(5));

    context.facade.write_reservation(&request).await.unwrap();

    let response = context
        .facade
        .get_quantity(&ReservationCriteria::new(reference("123"), store_id(1)))
        .await
        .unwrap();
    assert_eq!(response.reservation_quantity(), dec!(5));

    let events = context.publisher.published_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ReservationEvent::Created(_)));
    assert_eq!(events[0].identity().product_offer_reference, reference("123"));
    assert_eq!(events[0].identity().id_store, store_id(1));
}

#[tokio::test]
async fn test_write_zero_removes_reservation() {
    let context = setup();
    have_reservation(&context, "123", 1, dec!(5)).await;
    let request = ReservationRequest::new(reference("123"), store_de(), OmsStateCollection::new())
        .with_reservation_quantity(Decimal::ZERO);

    context.facade.write_reservation(&request).await.unwrap();

    assert_eq!(context.store.reservation_count().await, 0);
    let events = context.publisher.published_events();
    assert!(matches!(events.as_slice(), [ReservationEvent::Deleted(_)]));
}

// 永続化の失敗を再現するモック
struct FailingRepository {
    error: RepositoryError,
}

#[async_trait]
impl OmsProductOfferReservationRepository for FailingRepository {
    async fn find_reservation(
        &self,
        _criteria: &ReservationCriteria,
    ) -> Result<Option<OmsProductOfferReservation>, RepositoryError> {
        Err(self.error.clone())
    }

    async fn get_aggregated_reservations(
        &self,
        _product_offer_reference: &ProductOfferReference,
        _store_name: &str,
        _reserved_states: &OmsStateCollection,
    ) -> Result<Vec<SalesOrderItemStateAggregation>, RepositoryError> {
        Err(self.error.clone())
    }
}

struct RejectingEntityManager;

#[async_trait]
impl OmsProductOfferReservationEntityManager for RejectingEntityManager {
    async fn create(
        &self,
        _reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError> {
        Err(RepositoryError::ConstraintViolation(
            "duplicate entry".to_string(),
        ))
    }

    async fn update(
        &self,
        _reservation: &OmsProductOfferReservation,
    ) -> Result<OmsProductOfferReservation, RepositoryError> {
        Err(RepositoryError::ConnectionFailed("gone away".to_string()))
    }

    async fn delete(&self, _criteria: &ReservationCriteria) -> Result<(), RepositoryError> {
        Err(RepositoryError::ConnectionFailed("gone away".to_string()))
    }
}

struct FailingPublisher;

impl EventPublisher for FailingPublisher {
    fn publish(&self, _event: &ReservationEvent) -> Result<(), PublisherError> {
        Err(PublisherError::PublishingFailed("broker unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_repository_failure_propagates_unchanged() {
    let error = RepositoryError::ConnectionFailed("connection refused".to_string());
    let repository = Arc::new(FailingRepository {
        error: error.clone(),
    });
    let facade = OmsProductOfferReservationFacade::new(OmsProductOfferReservationBusinessFactory::new(
        repository,
        Arc::new(InMemoryReservationStore::new()),
        Arc::new(InMemoryEventPublisher::new()),
        Arc::new(NoopLogger::new()),
    ));

    let result = facade
        .get_quantity(&ReservationCriteria::new(reference("123"), store_id(1)))
        .await;

    match result {
        Err(ApplicationError::RepositoryError(actual)) => assert_eq!(actual, error),
        other => panic!("Expected RepositoryError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_entity_manager_failure_propagates_without_event() {
    let publisher = Arc::new(InMemoryEventPublisher::new());
    let facade = OmsProductOfferReservationFacade::new(OmsProductOfferReservationBusinessFactory::new(
        Arc::new(InMemoryReservationStore::new()),
        Arc::new(RejectingEntityManager),
        publisher.clone(),
        Arc::new(NoopLogger::new()),
    ));
    let request = ReservationRequest::new(reference("123"), store_de(), OmsStateCollection::new())
        .with_reservation_quantity(dec!(5));

    let result = facade.write_reservation(&request).await;

    match result {
        Err(ApplicationError::RepositoryError(RepositoryError::ConstraintViolation(msg))) => {
            assert_eq!(msg, "duplicate entry");
        }
        other => panic!("Expected ConstraintViolation, got {:?}", other),
    }
    assert!(publisher.published_events().is_empty());
}

#[tokio::test]
async fn test_publisher_failure_after_successful_write() {
    let store = Arc::new(InMemoryReservationStore::new());
    let facade = OmsProductOfferReservationFacade::new(OmsProductOfferReservationBusinessFactory::new(
        store.clone(),
        store.clone(),
        Arc::new(FailingPublisher),
        Arc::new(NoopLogger::new()),
    ));
    let request = ReservationRequest::new(reference("123"), store_de(), OmsStateCollection::new())
        .with_reservation_quantity(dec!(5));

    let result = facade.write_reservation(&request).await;

    assert!(matches!(result, Err(ApplicationError::EventPublishingFailed(_))));
    // 書き込み自体は取り消されない
    assert_eq!(store.reservation_count().await, 1);
}
