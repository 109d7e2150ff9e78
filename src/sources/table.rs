// CSV table ingestion and snapshot export

use std::io;

use crate::cache::CaptionRecord;
use crate::error::{CaptionError, Result};
use crate::sources::{ImageEntry, ImageSet};

/// Required ingestion columns, matched exactly after trimming whitespace.
pub const NAME_COLUMN: &str = "Image Name";
pub const PATH_COLUMN: &str = "Image Path";

/// Export columns for cache snapshots.
pub const EXPORT_HEADERS: [&str; 3] = ["Image Filename", "Alt Tag", "Backend"];

/// A batch of image references parsed from an uploaded CSV table.
///
/// Parsing is all-or-nothing: a missing required column or a malformed row
/// rejects the whole table before any row reaches the engine.
#[derive(Debug, Clone)]
pub struct TableSource {
    rows: Vec<ImageEntry>,
}

impl TableSource {
    /// Parse a CSV document with `Image Name` and `Image Path` columns.
    /// Extra columns are ignored; column order does not matter.
    pub fn from_csv<R: io::Read>(input: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(input);
        let headers = reader.headers()?.clone();

        let name_idx = headers.iter().position(|h| h.trim() == NAME_COLUMN);
        let path_idx = headers.iter().position(|h| h.trim() == PATH_COLUMN);

        let missing: Vec<&str> = [(NAME_COLUMN, name_idx), (PATH_COLUMN, path_idx)]
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(col, _)| *col)
            .collect();
        if !missing.is_empty() {
            return Err(CaptionError::MissingRequiredColumns(missing.join(", ")));
        }
        let (name_idx, path_idx) = (name_idx.unwrap_or_default(), path_idx.unwrap_or_default());

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let name = record.get(name_idx).unwrap_or_default().trim();
            let path = record.get(path_idx).unwrap_or_default().trim();
            rows.push(ImageEntry::new(name, path));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<ImageEntry> {
        self.rows
    }
}

impl ImageSet for TableSource {
    fn enumerate(&self) -> Result<Vec<ImageEntry>> {
        Ok(self.rows.clone())
    }
}

/// Serialize a cache snapshot as CSV, one row per cached record.
pub fn write_snapshot<W: io::Write>(
    writer: W,
    records: &[CaptionRecord],
    backend: &str,
) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(EXPORT_HEADERS)?;
    for record in records {
        out.write_record([record.filename.as_str(), record.caption.as_str(), backend])?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_parses_rows() {
        let data = "Image Name,Image Path\ncat.jpg,/data/cat.jpg\ndog.png,https://example.com/dog.png\n";
        let table = TableSource::from_csv(data.as_bytes()).unwrap();
        let rows = table.enumerate().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ImageEntry::new("cat.jpg", "/data/cat.jpg"));
        assert_eq!(rows[1], ImageEntry::new("dog.png", "https://example.com/dog.png"));
    }

    #[test]
    fn test_from_csv_trims_headers_and_values() {
        let data = " Image Name , Image Path \n  cat.jpg  ,  /data/cat.jpg  \n";
        let table = TableSource::from_csv(data.as_bytes()).unwrap();
        let rows = table.enumerate().unwrap();
        assert_eq!(rows[0], ImageEntry::new("cat.jpg", "/data/cat.jpg"));
    }

    #[test]
    fn test_from_csv_ignores_extra_columns() {
        let data = "Notes,Image Path,Image Name\nfluffy,/data/cat.jpg,cat.jpg\n";
        let table = TableSource::from_csv(data.as_bytes()).unwrap();
        let rows = table.enumerate().unwrap();
        assert_eq!(rows[0], ImageEntry::new("cat.jpg", "/data/cat.jpg"));
    }

    #[test]
    fn test_from_csv_missing_column_lists_it() {
        let data = "Image Name,Location\ncat.jpg,/data/cat.jpg\n";
        let err = TableSource::from_csv(data.as_bytes()).unwrap_err();
        match err {
            CaptionError::MissingRequiredColumns(cols) => assert_eq!(cols, "Image Path"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_csv_missing_both_columns_lists_both() {
        let data = "A,B\n1,2\n";
        let err = TableSource::from_csv(data.as_bytes()).unwrap_err();
        match err {
            CaptionError::MissingRequiredColumns(cols) => {
                assert_eq!(cols, "Image Name, Image Path")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_csv_malformed_row_aborts() {
        let data = "Image Name,Image Path\ncat.jpg,/data/cat.jpg\nshort-row\n";
        let err = TableSource::from_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CaptionError::Csv(_)));
    }

    #[test]
    fn test_from_csv_headers_only_is_empty() {
        let data = "Image Name,Image Path\n";
        let table = TableSource::from_csv(data.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_write_snapshot_roundtrip() {
        let records = vec![
            CaptionRecord::new("cat.jpg", "A cat sleeping."),
            CaptionRecord::new("dog.png", "Error: backend transport failure"),
        ];
        let mut buf = Vec::new();
        write_snapshot(&mut buf, &records, "remote").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Image Filename,Alt Tag,Backend\n"));
        assert!(text.contains("cat.jpg,A cat sleeping.,remote"));
        assert!(text.contains("dog.png,Error: backend transport failure,remote"));
    }
}
