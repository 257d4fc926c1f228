use crate::domain::event::ReservationEvent;
use crate::domain::port::{EventPublisher, PublisherError};
use crate::domain::serialization::EventSerializer;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// コンソールイベント発行者
/// 予約イベントをJSONエンベロープとしてコンソールに出力する
pub struct ConsoleEventPublisher {
    serializer: EventSerializer,
}

impl ConsoleEventPublisher {
    /// 新しいコンソールイベント発行者を作成
    pub fn new() -> Self {
        Self {
            serializer: EventSerializer::new(),
        }
    }
}

impl Default for ConsoleEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for ConsoleEventPublisher {
    fn publish(&self, event: &ReservationEvent) -> Result<(), PublisherError> {
        let json = self
            .serializer
            .serialize_event(event)
            .map_err(|e| PublisherError::PublishingFailed(e.to_string()))?;

        let marker = match event {
            ReservationEvent::Created(_) => "➕",
            ReservationEvent::Updated(_) => "✏️",
            ReservationEvent::Deleted(_) => "🗑️",
        };
        println!("{} [イベント] {}", marker, event.event_name());
        println!("  {}", json);
        Ok(())
    }
}

/// インメモリイベント発行者
/// 発行されたイベントを順番に保持する
#[derive(Clone, Default)]
pub struct InMemoryEventPublisher {
    events: Arc<Mutex<Vec<ReservationEvent>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに発行されたイベントのコピーを取得
    pub fn published_events(&self) -> Vec<ReservationEvent> {
        self.lock_events().clone()
    }

    /// 保持しているイベントを取り出して空にする
    pub fn drain(&self) -> Vec<ReservationEvent> {
        std::mem::take(&mut *self.lock_events())
    }

    // 記録済みのイベントはパニック後も有効なので、ポイズンされたロックからも読み出す
    fn lock_events(&self) -> MutexGuard<'_, Vec<ReservationEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventPublisher for InMemoryEventPublisher {
    fn publish(&self, event: &ReservationEvent) -> Result<(), PublisherError> {
        self.lock_events().push(event.clone());
        Ok(())
    }
}
