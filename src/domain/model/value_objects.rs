use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use std::fmt;

/// 商品オファー参照
/// 商品オファーを一意に識別する空でない文字列
/// デシリアライズ時も`new`の検証を通す
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductOfferReference(String);

impl ProductOfferReference {
    /// 文字列から商品オファー参照を作成
    ///
    /// # Arguments
    /// * `value` - 参照文字列
    ///
    /// # Returns
    /// * `Ok(ProductOfferReference)` - 作成成功
    /// * `Err(DomainError::InvalidValue)` - 空文字列または空白のみ
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "商品オファー参照は空にできません".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductOfferReference {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductOfferReference> for String {
    fn from(reference: ProductOfferReference) -> Self {
        reference.0
    }
}

impl fmt::Display for ProductOfferReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ストアID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct StoreId(i64);

impl StoreId {
    /// 整数からストアIDを作成
    /// 0以下の値は受け付けない
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidValue(format!(
                "ストアIDは正の整数である必要があります: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// 内部の整数値を取得
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for StoreId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StoreId> for i64 {
    fn from(id_store: StoreId) -> Self {
        id_store.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ストア（販売チャネル）
/// 予約数量はIDで、販売注文はストア名で紐づく
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoreFields", into = "StoreFields")]
pub struct Store {
    id_store: StoreId,
    name: String,
}

impl Store {
    /// 新しいストアを作成
    ///
    /// # Arguments
    /// * `id_store` - ストアID
    /// * `name` - ストア名（例: "DE"）
    pub fn new(id_store: StoreId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "ストア名は空にできません".to_string(),
            ));
        }
        Ok(Self { id_store, name })
    }

    pub fn id_store(&self) -> StoreId {
        self.id_store
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// `Store`のシリアライズ形式
#[derive(Serialize, Deserialize)]
struct StoreFields {
    id_store: StoreId,
    name: String,
}

impl TryFrom<StoreFields> for Store {
    type Error = DomainError;

    fn try_from(fields: StoreFields) -> Result<Self, Self::Error> {
        Self::new(fields.id_store, fields.name)
    }
}

impl From<Store> for StoreFields {
    fn from(store: Store) -> Self {
        Self {
            id_store: store.id_store,
            name: store.name,
        }
    }
}

/// 予約扱いとなるOMS状態名の集合
/// 順序付き集合なので反復順は常に決定的
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmsStateCollection {
    states: BTreeSet<String>,
}

impl OmsStateCollection {
    /// 空の状態集合を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 状態名を追加した集合を返す
    pub fn with_state(mut self, state_name: impl Into<String>) -> Self {
        self.states.insert(state_name.into());
        self
    }

    /// 状態名を追加
    pub fn add(&mut self, state_name: impl Into<String>) {
        self.states.insert(state_name.into());
    }

    pub fn contains(&self, state_name: &str) -> bool {
        self.states.contains(state_name)
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// 状態名を昇順で反復
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for OmsStateCollection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_offer_reference_creation() {
        let reference = ProductOfferReference::new("offer-123").unwrap();
        assert_eq!(reference.as_str(), "offer-123");
        assert_eq!(reference.to_string(), "offer-123");
    }

    #[test]
    fn test_product_offer_reference_rejects_blank() {
        assert!(matches!(
            ProductOfferReference::new(""),
            Err(DomainError::InvalidValue(_))
        ));
        assert!(matches!(
            ProductOfferReference::new("   "),
            Err(DomainError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_store_id_must_be_positive() {
        assert_eq!(StoreId::new(1).unwrap().value(), 1);
        assert!(StoreId::new(0).is_err());
        assert!(StoreId::new(-5).is_err());
    }

    #[test]
    fn test_store_rejects_blank_name() {
        let id_store = StoreId::new(1).unwrap();
        assert!(Store::new(id_store, "").is_err());

        let store = Store::new(id_store, "DE").unwrap();
        assert_eq!(store.id_store(), id_store);
        assert_eq!(store.name(), "DE");
    }

    #[test]
    fn test_deserialization_validates_like_new() {
        assert!(serde_json::from_str::<StoreId>("0").is_err());
        assert!(serde_json::from_str::<StoreId>("-7").is_err());
        assert!(serde_json::from_str::<ProductOfferReference>(r#""""#).is_err());
        assert!(serde_json::from_str::<ProductOfferReference>(r#""   ""#).is_err());
        assert!(serde_json::from_str::<Store>(r#"{"id_store":1,"name":" "}"#).is_err());
        assert!(serde_json::from_str::<Store>(r#"{"id_store":0,"name":"DE"}"#).is_err());

        let store: Store = serde_json::from_str(r#"{"id_store":1,"name":"DE"}"#).unwrap();
        assert_eq!(store, Store::new(StoreId::new(1).unwrap(), "DE").unwrap());
        assert_eq!(serde_json::to_string(&StoreId::new(3).unwrap()).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ProductOfferReference::new("offer-1").unwrap()).unwrap(),
            r#""offer-1""#
        );
    }

    #[test]
    fn test_state_collection_is_ordered_and_deduplicated() {
        let states: OmsStateCollection = vec!["payment pending", "new", "new", "confirmed"]
            .into_iter()
            .collect();

        assert_eq!(states.len(), 3);
        assert_eq!(
            states.iter().collect::<Vec<_>>(),
            vec!["confirmed", "new", "payment pending"]
        );
        assert!(states.contains("new"));
        assert!(!states.contains("shipped"));
    }

    #[test]
    fn test_empty_state_collection() {
        let states = OmsStateCollection::new();
        assert!(states.is_empty());

        let states = states.with_state("new");
        assert!(!states.is_empty());
    }
}
