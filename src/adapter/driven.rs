// 駆動される側アダプター（リポジトリ実装など）

mod reservation_repository;
mod reservation_entity_manager;
mod in_memory_store;
mod event_publisher;
mod console_logger;

pub use reservation_repository::MySqlOmsProductOfferReservationRepository;
pub use reservation_entity_manager::MySqlOmsProductOfferReservationEntityManager;
pub use in_memory_store::{InMemoryReservationStore, SalesOrderItem};
pub use event_publisher::{ConsoleEventPublisher, InMemoryEventPublisher};
pub use console_logger::{ConsoleLogger, LogEntry, NoopLogger};
