use crate::error::{RecommenderError, Result};
use crate::models::TransactionRecord;
use crate::utils::validation::{is_missing, validate_transaction};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const REQUIRED_COLUMNS: [&str; 14] = [
    "Customer_ID",
    "Product_ID",
    "City",
    "Age_Group",
    "Loyalty_Tier",
    "Payment_Method",
    "Gender",
    "Product_Category",
    "Price",
    "Competitor_Price",
    "Ad_Click_Through_Rate",
    "Browsing_Time_mins",
    "Voice_Search_Count",
    "Visual_Search_Count",
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(rename = "Customer_ID")]
    pub customer_id: Option<String>,
    #[serde(rename = "Product_ID")]
    pub product_id: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Age_Group")]
    pub age_group: Option<String>,
    #[serde(rename = "Loyalty_Tier")]
    pub loyalty_tier: Option<String>,
    #[serde(rename = "Payment_Method")]
    pub payment_method: Option<String>,
    #[serde(rename = "Gender")]
    pub gender: Option<String>,
    #[serde(rename = "Product_Category")]
    pub product_category: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
    #[serde(rename = "Competitor_Price")]
    pub competitor_price: Option<String>,
    #[serde(rename = "Ad_Click_Through_Rate")]
    pub ad_click_through_rate: Option<String>,
    #[serde(rename = "Browsing_Time_mins")]
    pub browsing_time_mins: Option<String>,
    #[serde(rename = "Voice_Search_Count")]
    pub voice_search_count: Option<String>,
    #[serde(rename = "Visual_Search_Count")]
    pub visual_search_count: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub records: Vec<TransactionRecord>,
    pub stats: LoadStats,
}

pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<LoadedDataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| RecommenderError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = read_transactions(file)?;
    info!(
        "Loaded {} transactions from {} ({} incomplete rows dropped)",
        dataset.records.len(),
        path.display(),
        dataset.stats.rows_dropped
    );
    Ok(dataset)
}

pub fn read_transactions<R: Read>(reader: R) -> Result<LoadedDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(RecommenderError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for (index, row) in reader.records().enumerate() {
        stats.rows_read += 1;
        // Header is line 1.
        let line = index + 2;

        let row = match row {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                debug!("Dropping unreadable row at line {}: {}", line, e);
                stats.rows_dropped += 1;
                continue;
            }
        };

        // Any missing cell drops the row, including columns we never read.
        if let Some(position) = row.iter().position(is_missing) {
            debug!(
                "Dropping row at line {}: {} is missing",
                line,
                headers.get(position).unwrap_or("?")
            );
            stats.rows_dropped += 1;
            continue;
        }

        let raw: RawTransaction = match row.deserialize(Some(&headers)) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Dropping unreadable row at line {}: {}", line, e);
                stats.rows_dropped += 1;
                continue;
            }
        };

        match validate_transaction(&raw) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Dropping row at line {}: {}", line, e);
                stats.rows_dropped += 1;
            }
        }
    }

    Ok(LoadedDataset { records, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Customer_ID,Product_ID,City,Age_Group,Loyalty_Tier,Payment_Method,Gender,Product_Category,Price,Competitor_Price,Ad_Click_Through_Rate,Browsing_Time_mins,Voice_Search_Count,Visual_Search_Count";

    #[test]
    fn test_reads_complete_rows() {
        let csv = format!(
            "{}\nC1,P1,Pune,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1\n",
            HEADER
        );
        let dataset = read_transactions(csv.as_bytes()).unwrap();

        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.stats, LoadStats { rows_read: 1, rows_dropped: 0 });

        let record = &dataset.records[0];
        assert_eq!(record.customer_id, "C1");
        assert_eq!(record.product_category, "Books");
        assert_eq!(record.browsing_time_mins, 12.5);
    }

    #[test]
    fn test_drops_incomplete_and_malformed_rows() {
        let csv = format!(
            "{}\n\
             C1,P1,Pune,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1\n\
             C2,P2,,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1\n\
             C3,P3,Pune,25-34,Gold,UPI,Female,Books,abc,110,0.05,12.5,3,1\n\
             C4,P4,Pune,25-34\n",
            HEADER
        );
        let dataset = read_transactions(csv.as_bytes()).unwrap();

        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.stats.rows_read, 4);
        assert_eq!(dataset.stats.rows_dropped, 3);
    }

    #[test]
    fn test_extra_columns_count_towards_completeness() {
        let csv = format!(
            "{},Discount\n\
             C1,P1,Pune,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1,0.1\n\
             C2,P2,Pune,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1,\n",
            HEADER
        );
        let dataset = read_transactions(csv.as_bytes()).unwrap();

        assert_eq!(dataset.records.len(), 1);
        assert_eq!(dataset.records[0].customer_id, "C1");
        assert_eq!(dataset.stats.rows_dropped, 1);
    }

    #[test]
    fn test_na_tokens_drop_rows() {
        let csv = format!(
            "{},Discount\n\
             C1,P1,NA,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1,0.1\n\
             C2,P2,Pune,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1,null\n\
             C3,P3,Pune,25-34,Gold,N/A,Female,Books,100,110,0.05,12.5,3,1,0.2\n\
             C4,P4,Pune,25-34,Gold,UPI,Female,Books,100,110,0.05,12.5,3,1,0.3\n",
            HEADER
        );
        let dataset = read_transactions(csv.as_bytes()).unwrap();

        let customers: Vec<_> = dataset.records.iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(customers, vec!["C4"]);
        assert_eq!(dataset.stats, LoadStats { rows_read: 4, rows_dropped: 3 });
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "Customer_ID,Product_ID\nC1,P1\n";
        let err = read_transactions(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RecommenderError::MissingColumn(ref c) if c == "City"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_transactions("no/such/file.csv").unwrap_err();
        assert!(matches!(err, RecommenderError::Io { .. }));
    }
}
