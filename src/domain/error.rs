/// ドメイン層のエラー型
/// ビジネスルール違反や呼び出し側の前提条件違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 無効な数量（例: 負の予約数量）
    InvalidQuantity,
    /// 無効な値（例: 空の商品オファー参照）
    InvalidValue(String),
    /// 必須フィールドが欠落している
    MissingField(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidQuantity => write!(f, "Invalid quantity"),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            DomainError::MissingField(field) => write!(f, "Missing required field: {}", field),
        }
    }
}

impl std::error::Error for DomainError {}
