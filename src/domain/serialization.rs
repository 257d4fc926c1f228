use crate::domain::event::{ReservationEvent, ReservationIdentity};
use crate::domain::model::{ProductOfferReference, StoreId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// シリアライゼーションエラー
#[derive(Debug, Error, Clone)]
pub enum SerializationError {
    #[error("JSON serialization failed: {message}. Event name: {event_name}")]
    JsonSerializationFailed { message: String, event_name: String },

    #[error("JSON deserialization failed: {message}. Input: {input_preview}")]
    JsonDeserializationFailed {
        message: String,
        input_preview: String,
    },

    #[error("Unknown event name: {event_name}")]
    UnknownEventName { event_name: String },

    #[error("Invalid field value: {field_name} = {field_value}. Reason: {reason}")]
    InvalidFieldValue {
        field_name: String,
        field_value: String,
        reason: String,
    },
}

impl SerializationError {
    /// 入力データのプレビューを生成（デバッグ用、最大100文字）
    fn create_input_preview(input: &str) -> String {
        if input.chars().count() <= 100 {
            input.to_string()
        } else {
            format!("{}...", input.chars().take(97).collect::<String>())
        }
    }

    /// JSONデシリアライゼーションエラーを作成
    pub fn json_deserialization_failed(message: String, input: &str) -> Self {
        Self::JsonDeserializationFailed {
            message,
            input_preview: Self::create_input_preview(input),
        }
    }
}

/// 外部に送出するイベントのJSON表現
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationEventEnvelope {
    pub event_name: String,
    pub product_offer_reference: String,
    pub id_store: i64,
    pub occurred_at: DateTime<Utc>,
}

impl From<&ReservationEvent> for ReservationEventEnvelope {
    fn from(event: &ReservationEvent) -> Self {
        let changed = event.changed();
        Self {
            event_name: event.event_name().to_string(),
            product_offer_reference: changed.identity.product_offer_reference.to_string(),
            id_store: changed.identity.id_store.value(),
            occurred_at: changed.occurred_at,
        }
    }
}

/// イベントシリアライザー
/// 予約イベントとJSONエンベロープの相互変換を提供
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSerializer;

impl EventSerializer {
    /// 新しいイベントシリアライザーを作成
    pub fn new() -> Self {
        Self
    }

    /// 予約イベントをJSONにシリアライズ
    pub fn serialize_event(&self, event: &ReservationEvent) -> Result<String, SerializationError> {
        let envelope = ReservationEventEnvelope::from(event);
        serde_json::to_string(&envelope).map_err(|e| SerializationError::JsonSerializationFailed {
            message: e.to_string(),
            event_name: envelope.event_name.clone(),
        })
    }

    /// JSONから予約イベントにデシリアライズ
    pub fn deserialize_event(&self, json: &str) -> Result<ReservationEvent, SerializationError> {
        // 入力の基本検証
        if json.trim().is_empty() {
            return Err(SerializationError::json_deserialization_failed(
                "Empty JSON input".to_string(),
                json,
            ));
        }

        let envelope: ReservationEventEnvelope = serde_json::from_str(json).map_err(|e| {
            SerializationError::json_deserialization_failed(format!("Invalid JSON: {}", e), json)
        })?;

        let product_offer_reference = ProductOfferReference::new(
            envelope.product_offer_reference.clone(),
        )
        .map_err(|e| SerializationError::InvalidFieldValue {
            field_name: "product_offer_reference".to_string(),
            field_value: envelope.product_offer_reference.clone(),
            reason: e.to_string(),
        })?;

        let id_store =
            StoreId::new(envelope.id_store).map_err(|e| SerializationError::InvalidFieldValue {
                field_name: "id_store".to_string(),
                field_value: envelope.id_store.to_string(),
                reason: e.to_string(),
            })?;

        ReservationEvent::from_name(
            &envelope.event_name,
            ReservationIdentity::new(product_offer_reference, id_store),
            envelope.occurred_at,
        )
        .ok_or(SerializationError::UnknownEventName {
            event_name: envelope.event_name,
        })
    }
}
