use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::ledger::Review;

/// Write the accumulated reviews to `Amazon-Reviews-{unix-timestamp}.xlsx`
/// in the current directory. Each run produces a new file.
pub fn write_workbook(records: &[Review]) -> Result<PathBuf> {
    let path = PathBuf::from(format!("Amazon-Reviews-{}.xlsx", Utc::now().timestamp()));
    write_workbook_to(records, &path)?;
    Ok(path)
}

/// One worksheet: a bold `id` / `rating` / `text` header row, then one row
/// per review in insertion order.
pub fn write_workbook_to(records: &[Review], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let bold = Format::new().set_bold();
    sheet.write_string_with_format(0, 0, "id", &bold)?;
    sheet.write_string_with_format(0, 1, "rating", &bold)?;
    sheet.write_string_with_format(0, 2, "text", &bold)?;

    for (i, review) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, review.id.as_str())?;
        sheet.write_number(row, 1, f64::from(review.rating))?;
        sheet.write_string(row, 2, review.text.as_str())?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {} reviews to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_workbook_file() {
        let records = vec![
            Review { id: "R1".into(), rating: 4.0, text: "fine".into() },
            Review { id: "R2".into(), rating: 1.0, text: "broke fast".into() },
        ];
        let path = std::env::temp_dir().join(format!("amz-reviews-test-{}.xlsx", std::process::id()));

        write_workbook_to(&records, &path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_record_set_still_writes_header() {
        let path =
            std::env::temp_dir().join(format!("amz-reviews-empty-{}.xlsx", std::process::id()));
        write_workbook_to(&[], &path).unwrap();
        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }
}
