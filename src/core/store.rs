use crate::domain::model::{LaunchRecord, PayloadRange, REQUIRED_COLUMNS};
use crate::domain::ports::{RecordSource, Storage};
use crate::utils::error::{DashError, Result};
use async_trait::async_trait;

/// Read-only table of launch records, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<LaunchRecord>,
}

impl RecordStore {
    /// Builds a store from already parsed records, rejecting any that break the
    /// record invariants.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        for (index, record) in records.iter().enumerate() {
            record.check().map_err(|reason| DashError::InvalidRecord {
                row: index + 1,
                reason,
            })?;
        }
        Ok(Self { records })
    }

    /// Parses delimited text with a header row. Columns beyond the required ones
    /// are ignored.
    pub fn from_csv_bytes(data: &[u8], delimiter: u8) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DashError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<LaunchRecord>().enumerate() {
            let row_number = index + 1;
            let record = row.map_err(|e| match e.kind() {
                csv::ErrorKind::Deserialize { err, .. } => DashError::InvalidRecord {
                    row: row_number,
                    reason: err.to_string(),
                },
                _ => DashError::CsvError(e),
            })?;
            record.check().map_err(|reason| DashError::InvalidRecord {
                row: row_number,
                reason,
            })?;
            records.push(record);
        }

        tracing::debug!("Parsed {} launch records", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest payload mass seen, `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        let mut masses = self.records.iter().map(|r| r.payload_mass_kg);
        let first = masses.next()?;
        let (min, max) = masses.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        PayloadRange::new(min, max).ok()
    }
}

/// Loads the launch table from a delimited file through a [`Storage`] backend.
pub struct CsvSource<S: Storage> {
    storage: S,
    path: String,
    delimiter: u8,
}

impl<S: Storage> CsvSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[async_trait]
impl<S: Storage> RecordSource for CsvSource<S> {
    async fn load(&self) -> Result<RecordStore> {
        tracing::info!("Loading launch records from {}", self.path);
        let data = self.storage.read_file(&self.path).await?;
        let store = RecordStore::from_csv_bytes(&data, self.delimiter)?;
        match store.payload_bounds() {
            Some(bounds) => tracing::info!(
                "Loaded {} launch records, payload {} - {} kg",
                store.len(),
                bounds.min(),
                bounds.max()
            ),
            None => tracing::warn!("Launch data file {} has no rows", self.path),
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OutcomeClass;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const SAMPLE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0005,v1.0
2,6,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
3,17,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DashError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_parse_ignores_extra_columns() {
        let store = RecordStore::from_csv_bytes(SAMPLE.as_bytes(), b',').unwrap();

        assert_eq!(store.len(), 4);
        let first = &store.records()[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.payload_mass_kg, 0.0);
        assert_eq!(first.booster_version_category, "v1.0");
        assert_eq!(first.outcome, OutcomeClass::Failure);
        assert_eq!(store.records()[3].outcome, OutcomeClass::Success);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "Launch Site,Payload Mass (kg),class\nA,10,1\n";
        let err = RecordStore::from_csv_bytes(data.as_bytes(), b',').unwrap_err();
        match err {
            DashError::MissingColumn { column } => assert_eq!(column, "Booster Version Category"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_reports_first_missing_column() {
        let err = RecordStore::from_csv_bytes(b"", b',').unwrap_err();
        assert!(matches!(err, DashError::MissingColumn { ref column } if column == "Launch Site"));
    }

    #[test]
    fn test_invalid_class_reports_row() {
        let data = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,10,FT,1\nA,20,FT,3\n";
        let err = RecordStore::from_csv_bytes(data.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, DashError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn test_negative_payload_is_rejected() {
        let data = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,-10,FT,1\n";
        let err = RecordStore::from_csv_bytes(data.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, DashError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn test_tab_delimited_input() {
        let data = "Launch Site\tPayload Mass (kg)\tBooster Version Category\tclass\nA\t10\tFT\t1\n";
        let store = RecordStore::from_csv_bytes(data.as_bytes(), b'\t').unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_payload_bounds() {
        let store = RecordStore::from_csv_bytes(SAMPLE.as_bytes(), b',').unwrap();
        let bounds = store.payload_bounds().unwrap();
        assert_eq!(bounds.min(), 0.0);
        assert_eq!(bounds.max(), 2490.0);

        assert!(RecordStore::default().payload_bounds().is_none());
    }

    #[tokio::test]
    async fn test_csv_source_loads_through_storage() {
        let storage = MockStorage::with_file("launches.csv", SAMPLE);
        let source = CsvSource::new(storage, "launches.csv");

        let store = source.load().await.unwrap();
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_csv_source_missing_file() {
        let storage = MockStorage::with_file("other.csv", SAMPLE);
        let source = CsvSource::new(storage, "launches.csv");

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, DashError::IoError(_)));
    }
}
