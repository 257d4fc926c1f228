use crate::domain::error::DomainError;
use crate::domain::port::{PublisherError, RepositoryError};

/// アプリケーション層のエラー型
/// ドメインエラー、リポジトリエラー、イベント発行エラーをラップする
#[derive(Debug)]
pub enum ApplicationError {
    /// ドメインエラー（前提条件違反）
    DomainError(DomainError),
    /// リポジトリエラー（永続化の失敗、変換せずに保持）
    RepositoryError(RepositoryError),
    /// イベント発行エラー
    EventPublishingFailed(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::DomainError(err) => write!(f, "Domain error: {}", err),
            ApplicationError::RepositoryError(err) => write!(f, "Repository error: {}", err),
            ApplicationError::EventPublishingFailed(msg) => {
                write!(f, "Event publishing failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplicationError::DomainError(err) => Some(err),
            ApplicationError::RepositoryError(err) => Some(err),
            ApplicationError::EventPublishingFailed(_) => None,
        }
    }
}

// From実装でエラー変換を簡潔に
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::DomainError(err)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        ApplicationError::RepositoryError(err)
    }
}

impl From<PublisherError> for ApplicationError {
    fn from(err: PublisherError) -> Self {
        ApplicationError::EventPublishingFailed(err.to_string())
    }
}
