// ドメインモデル（値オブジェクトと永続化レコード）

mod value_objects;
mod reservation;
mod aggregation;

pub use value_objects::{
    ProductOfferReference, StoreId,
    Store,
    OmsStateCollection,
};

pub use reservation::{
    ItemReference, OmsProductOfferReservation, ReservationCriteria, ReservationRequest,
    ReservationResponse,
};
pub use aggregation::SalesOrderItemStateAggregation;
