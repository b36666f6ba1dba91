//! Sorted label listing.
//!
//! One label per line, lexicographic (byte) order, no trailing newline. The
//! output depends only on the loaded collection, so identical input always
//! produces an identical file.

use std::fs;
use std::path::Path;

use log::info;

use crate::domain::SeriesCollection;
use crate::error::AppError;

pub fn format_label_listing(collection: &SeriesCollection) -> String {
    let mut labels: Vec<&str> = collection.labels().collect();
    // Collection keys are already ordered; sorting keeps the contract explicit.
    labels.sort_unstable();
    labels.join("\n")
}

/// Write the listing of every label in `collection` to `path`.
pub fn write_label_listing(path: &Path, collection: &SeriesCollection) -> Result<(), AppError> {
    fs::write(path, format_label_listing(collection))
        .map_err(|e| AppError::input(format!("Failed to write label listing '{}': {e}", path.display())))?;
    info!("Wrote {} labels to {}", collection.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::parse_series;

    const CSV: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20
Quebec,Canada,0,0,1,2
Ontario,Canada,0,0,3,4
,Albania,0,0,0,1
,Zimbabwe,0,0,0,0";

    #[test]
    fn listing_is_sorted_newline_joined() {
        let collection = parse_series(CSV).unwrap();
        assert_eq!(
            format_label_listing(&collection),
            "Albania\nCanada\nCanada:Ontario\nCanada:Quebec\nZimbabwe"
        );
    }

    #[test]
    fn rewriting_gives_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.txt");

        write_label_listing(&path, &parse_series(CSV).unwrap()).unwrap();
        let first = fs::read(&path).unwrap();
        write_label_listing(&path, &parse_series(CSV).unwrap()).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }
}
