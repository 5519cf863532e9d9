//! CSV export of merged line-items, for spreadsheet review.

use std::path::Path;

use pricelens_merge::model::ExtractedPriceRecord;

/// Write surviving records as CSV: one row per line-item, receipt order.
pub fn write_prices_csv(path: &Path, prices: &[ExtractedPriceRecord]) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;

    writer
        .write_record(["item_name", "price", "confidence", "position", "category", "unit"])
        .map_err(|e| e.to_string())?;

    for record in prices {
        writer
            .write_record([
                record.item_name.clone(),
                format!("{:.2}", record.price),
                format!("{:.4}", record.confidence),
                record.position.to_string(),
                record.category.clone().unwrap_or_default(),
                record.unit.clone().unwrap_or_default(),
            ])
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())
}
