use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use super::dto::{CategoryTotal, MonthTotal};
use crate::expenses::repo::Expense;
use crate::month::month_key;

pub fn total(expenses: &[Expense]) -> Decimal {
    expenses.iter().map(|e| e.amount).sum()
}

pub fn total_for_month(expenses: &[Expense], month: &str) -> Decimal {
    expenses
        .iter()
        .filter(|e| month_key(e.date) == month)
        .map(|e| e.amount)
        .sum()
}

/// Per-category totals, largest first; uncategorized rows bucket under
/// "Other". Ties break on category name so the order is stable.
pub fn by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut agg: HashMap<String, Decimal> = HashMap::new();
    for e in expenses {
        let key = e.category.clone().unwrap_or_else(|| "Other".to_string());
        *agg.entry(key).or_insert(Decimal::ZERO) += e.amount;
    }
    let mut rows: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    rows
}

/// Per-month totals in ascending month order.
pub fn by_month(expenses: &[Expense]) -> Vec<MonthTotal> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for e in expenses {
        *agg.entry(month_key(e.date)).or_insert(Decimal::ZERO) += e.amount;
    }
    agg.into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::date;
    use uuid::Uuid;

    fn expense(date: time::Date, amount: Decimal, category: Option<&str>) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            date,
            amount,
            note: String::new(),
            category: category.map(String::from),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(date!(2024 - 05 - 01), dec!(10), Some("Groceries")),
            expense(date!(2024 - 05 - 15), dec!(25.50), Some("Dining")),
            expense(date!(2024 - 04 - 20), dec!(4.50), Some("Groceries")),
            expense(date!(2024 - 04 - 02), dec!(7), None),
        ]
    }

    #[test]
    fn totals_sum_all_expenses() {
        assert_eq!(total(&sample()), dec!(47));
        assert_eq!(total(&[]), Decimal::ZERO);
    }

    #[test]
    fn month_total_only_counts_matching_month() {
        let expenses = sample();
        assert_eq!(total_for_month(&expenses, "2024-05"), dec!(35.50));
        assert_eq!(total_for_month(&expenses, "2024-04"), dec!(11.50));
        assert_eq!(total_for_month(&expenses, "2023-12"), Decimal::ZERO);
    }

    #[test]
    fn by_category_sorts_largest_first_and_buckets_other() {
        let rows = by_category(&sample());
        assert_eq!(
            rows,
            vec![
                CategoryTotal {
                    category: "Dining".into(),
                    total: dec!(25.50)
                },
                CategoryTotal {
                    category: "Groceries".into(),
                    total: dec!(14.50)
                },
                CategoryTotal {
                    category: "Other".into(),
                    total: dec!(7)
                },
            ]
        );
    }

    #[test]
    fn by_category_breaks_ties_on_name() {
        let expenses = vec![
            expense(date!(2024 - 05 - 01), dec!(5), Some("Transport")),
            expense(date!(2024 - 05 - 02), dec!(5), Some("Dining")),
        ];
        let rows = by_category(&expenses);
        assert_eq!(rows[0].category, "Dining");
        assert_eq!(rows[1].category, "Transport");
    }

    #[test]
    fn by_month_is_ascending() {
        let rows = by_month(&sample());
        assert_eq!(
            rows,
            vec![
                MonthTotal {
                    month: "2024-04".into(),
                    total: dec!(11.50)
                },
                MonthTotal {
                    month: "2024-05".into(),
                    total: dec!(35.50)
                },
            ]
        );
    }
}
