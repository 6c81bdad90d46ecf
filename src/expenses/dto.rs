use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use super::repo::Expense;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Body for both create and update; `category` is a name, resolved (and
/// created when missing) server-side.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub amount: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub amount: Decimal,
    pub note: String,
    pub category: Option<String>,
}

impl From<Expense> for ExpenseResponse {
    fn from(e: Expense) -> Self {
        Self {
            id: e.id,
            date: e.date,
            amount: e.amount,
            note: e.note,
            category: e.category,
        }
    }
}

/// Optional query filters on the expense listing.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub month: Option<String>,
    pub q: Option<String>,
}

impl ExpenseFilter {
    /// A present-but-blank query param (`?category=`) means "no filter", not
    /// "match the empty string".
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        }
        Self {
            category: clean(self.category),
            month: clean(self.month),
            q: clean(self.q),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::date;

    #[test]
    fn request_parses_json_body() {
        let body = r#"{"date":"2024-05-01","amount":12.5,"note":"lunch","category":"Dining"}"#;
        let req: ExpenseRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.date, date!(2024 - 05 - 01));
        assert_eq!(req.amount, dec!(12.5));
        assert_eq!(req.note, "lunch");
        assert_eq!(req.category.as_deref(), Some("Dining"));
    }

    #[test]
    fn request_defaults_note_and_category() {
        let body = r#"{"date":"2024-05-01","amount":3}"#;
        let req: ExpenseRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.note, "");
        assert!(req.category.is_none());
    }

    #[test]
    fn request_rejects_malformed_date() {
        let body = r#"{"date":"01.05.2024","amount":3}"#;
        assert!(serde_json::from_str::<ExpenseRequest>(body).is_err());
    }

    #[test]
    fn filter_drops_blank_params() {
        let filter = ExpenseFilter {
            category: Some("".into()),
            month: Some("  ".into()),
            q: Some("".into()),
        };
        let filter = filter.normalized();
        assert!(filter.category.is_none());
        assert!(filter.month.is_none());
        assert!(filter.q.is_none());
    }

    #[test]
    fn filter_trims_and_keeps_real_values() {
        let filter = ExpenseFilter {
            category: Some(" Dining ".into()),
            month: Some("2024-05".into()),
            q: Some("lunch".into()),
        };
        let filter = filter.normalized();
        assert_eq!(filter.category.as_deref(), Some("Dining"));
        assert_eq!(filter.month.as_deref(), Some("2024-05"));
        assert_eq!(filter.q.as_deref(), Some("lunch"));
    }

    #[test]
    fn response_serializes_iso_date_and_numeric_amount() {
        let res = ExpenseResponse {
            id: Uuid::nil(),
            date: date!(2024 - 05 - 01),
            amount: dec!(12.5),
            note: "lunch".into(),
            category: None,
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["amount"], 12.5);
        assert!(json["category"].is_null());
    }
}
