use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers for the current calendar month.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_spent: Decimal,
    pub expense_count: usize,
    pub category_count: i64,
    pub month: String,
    pub month_total: Decimal,
    pub budget: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub total: Decimal,
}
