use super::repo::Expense;

/// Renders the user's expenses as `Date,Category,Amount,Note` CSV, amounts at
/// two decimals, uncategorized rows as "Other".
pub fn render_csv(expenses: &[Expense]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Category", "Amount", "Note"])?;
    for e in expenses {
        writer.write_record([
            e.date.to_string(),
            e.category.clone().unwrap_or_else(|| "Other".to_string()),
            format!("{:.2}", e.amount),
            e.note.clone(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
