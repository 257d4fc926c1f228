use crate::domain::model::ProductOfferReference;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 販売注文アイテムの状態別集計
/// (状態名, プロセス名) ごとに1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrderItemStateAggregation {
    pub product_offer_reference: ProductOfferReference,
    pub process_name: Option<String>,
    pub state_name: String,
    pub sum_amount: Decimal,
}

impl SalesOrderItemStateAggregation {
    pub fn new(
        product_offer_reference: ProductOfferReference,
        process_name: Option<String>,
        state_name: String,
        sum_amount: Decimal,
    ) -> Self {
        Self {
            product_offer_reference,
            process_name,
            state_name,
            sum_amount,
        }
    }

    /// 集計結果の並び順（状態名の昇順、次にプロセス名の昇順）
    pub fn display_order(&self, other: &Self) -> Ordering {
        self.state_name
            .cmp(&other.state_name)
            .then_with(|| self.process_name.cmp(&other.process_name))
    }

    /// 集計結果の合計数量
    pub fn total(aggregations: &[Self]) -> Decimal {
        aggregations
            .iter()
            .fold(Decimal::ZERO, |sum, aggregation| sum + aggregation.sum_amount)
    }
}
