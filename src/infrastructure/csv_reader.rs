// CSV reader - Header-keyed records from inbox exports
use crate::application::source_repository::Record;
use crate::domain::error::DashboardError;
use std::path::Path;

/// Read and parse a CSV file. See [`parse_records`].
pub async fn read_csv(path: &Path) -> Result<Vec<Record>, DashboardError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DashboardError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    parse_records(&text, path)
}

/// Parse CSV text whose first row is the header.
///
/// Blank lines are skipped and every field is trimmed. A data row with a different
/// field count than the header fails the whole file; no rows are skipped.
pub fn parse_records(text: &str, path: &Path) -> Result<Vec<Record>, DashboardError> {
    let parse_error = |err: csv::Error| DashboardError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(parse_error)?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(parse_error)?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(column, value)| (column.to_string(), value.to_string()))
                .collect(),
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<Record>, DashboardError> {
        parse_records(text, Path::new("test.csv"))
    }

    #[test]
    fn test_header_keyed_records_in_order() {
        let records = parse("metric,value\ntotal_loans,1500\nactive_patrons,320\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["metric"], "total_loans");
        assert_eq!(records[1]["value"], "320");
    }

    #[test]
    fn test_trims_fields_and_skips_blank_lines() {
        let records = parse(" metric , value \r\n\r\n total_loans ,  12 \r\n\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["metric"], "total_loans");
        assert_eq!(records[0]["value"], "12");
    }

    #[test]
    fn test_quoted_fields() {
        let records = parse("branch,loans\n\"Main, Downtown\",7\n").unwrap();
        assert_eq!(records[0]["branch"], "Main, Downtown");
    }

    #[test]
    fn test_row_length_mismatch_fails() {
        let err = parse("metric,value\ntotal_loans,1500,extra\n").unwrap_err();
        assert!(matches!(err, DashboardError::Parse { .. }));
    }

    #[test]
    fn test_header_only_has_no_records() {
        assert!(parse("metric,value\n").unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_csv(&dir.path().join("absent.csv")).await.unwrap_err();
        assert!(matches!(err, DashboardError::Read { .. }));
    }
}
