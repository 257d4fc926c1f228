// ドメイン層（値オブジェクト、レコード、イベント、ポート）

pub mod error;
pub mod event;
pub mod model;
pub mod port;
pub mod serialization;
