// アプリケーション層（リーダー、ライター、マッパー、ファクトリー、ファサード）

pub mod error;
pub mod facade;
pub mod factory;
pub mod mapper;
pub mod reader;
pub mod writer;

pub use error::ApplicationError;
pub use facade::OmsProductOfferReservationFacade;
pub use factory::OmsProductOfferReservationBusinessFactory;
