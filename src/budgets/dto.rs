use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::repo::Budget;

#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    pub month: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    pub month: String,
    pub amount: Decimal,
}

impl From<Budget> for BudgetResponse {
    fn from(b: Budget) -> Self {
        Self {
            month: b.month,
            amount: b.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn response_serializes_amount_as_number() {
        let res = BudgetResponse {
            month: "2024-05".into(),
            amount: dec!(300),
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["month"], "2024-05");
        assert_eq!(json["amount"], 300.0);
    }
}
