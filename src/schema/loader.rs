//! Dataset loader
//!
//! Reads the static stock dataset from disk. Accepts either
//! `{"stocks": [...]}` or a bare array of records. The whole dataset is
//! rejected on the first invalid record; there is no partial load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{DatasetError, DatasetResult};
use super::types::StockRecord;

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Wrapped { stocks: Vec<Value> },
    Bare(Vec<Value>),
}

/// A loaded, read-only record collection
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Records in file order
    pub records: Vec<StockRecord>,
    /// CRC32 of the raw file contents
    pub checksum: u32,
    /// When the dataset was loaded
    pub loaded_at: DateTime<Utc>,
    /// Source path, if loaded from disk
    pub source: Option<PathBuf>,
}

impl Dataset {
    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checksum formatted as eight hex digits
    pub fn checksum_hex(&self) -> String {
        format!("{:08x}", self.checksum)
    }
}

/// Loads datasets from files or byte slices
pub struct DatasetLoader;

impl DatasetLoader {
    /// Loads and validates a dataset file
    pub fn load_file(path: &Path) -> DatasetResult<Dataset> {
        let bytes = fs::read(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut dataset = Self::load_slice(&bytes)?;
        dataset.source = Some(path.to_path_buf());
        Ok(dataset)
    }

    /// Parses and validates a dataset held in memory
    pub fn load_slice(bytes: &[u8]) -> DatasetResult<Dataset> {
        let file: DatasetFile = serde_json::from_slice(bytes)?;
        let rows = match file {
            DatasetFile::Wrapped { stocks } => stocks,
            DatasetFile::Bare(rows) => rows,
        };

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            records.push(Self::parse_record(index, row)?);
        }

        Ok(Dataset {
            records,
            checksum: crc32fast::hash(bytes),
            loaded_at: Utc::now(),
            source: None,
        })
    }

    fn parse_record(index: usize, row: Value) -> DatasetResult<StockRecord> {
        let record: StockRecord = serde_json::from_value(row)
            .map_err(|e| DatasetError::invalid_record(index, e.to_string()))?;

        if record.ticker.trim().is_empty() {
            return Err(DatasetError::invalid_record(index, "ticker is empty"));
        }

        if let Some(metric) = record.first_non_finite() {
            return Err(DatasetError::invalid_record(
                index,
                format!("'{}' must be finite", metric.column()),
            ));
        }

        Ok(record)
    }
}
