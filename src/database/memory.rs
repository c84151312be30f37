//! In-memory record store for local development and tests

use std::collections::HashMap;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use super::store::{Record, RecordStore, Sheet};
use crate::utils::errors::{StoreError, StoreResult};

/// Which calls an [`InMemoryStore`] should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    #[default]
    None,
    All,
    Writes,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    sheets: RwLock<HashMap<Sheet, Vec<Record>>>,
    failure: RwLock<FailureMode>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-populated rows
    pub fn with_records(records: impl IntoIterator<Item = (Sheet, Vec<Record>)>) -> Self {
        Self {
            sheets: RwLock::new(records.into_iter().collect()),
            failure: RwLock::new(FailureMode::None),
        }
    }

    pub async fn set_failure_mode(&self, mode: FailureMode) {
        *self.failure.write().await = mode;
    }

    /// Snapshot of all rows of a sheet
    pub async fn records(&self, sheet: Sheet) -> Vec<Record> {
        self.sheets.read().await.get(&sheet).cloned().unwrap_or_default()
    }

    async fn check(&self, write: bool) -> StoreResult<()> {
        match *self.failure.read().await {
            FailureMode::All => Err(StoreError::Unavailable("in-memory store set to fail".to_string())),
            FailureMode::Writes if write => {
                Err(StoreError::Unavailable("in-memory store set to fail writes".to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn read_all(&self, sheet: Sheet) -> StoreResult<Vec<Record>> {
        self.check(false).await?;
        Ok(self.records(sheet).await)
    }

    async fn append(&self, sheet: Sheet, record: Record) -> StoreResult<()> {
        self.check(true).await?;
        let mut sheets = self.sheets.write().await;
        let rows = sheets.entry(sheet).or_default();
        rows.push(record);
        debug!(sheet = %sheet, rows = rows.len(), "Appended in-memory record");
        Ok(())
    }

    async fn update_cell(&self, sheet: Sheet, row: usize, column: &str, value: &str) -> StoreResult<()> {
        self.check(true).await?;
        if !sheet.columns().contains(&column) {
            return Err(StoreError::ColumnNotFound {
                sheet: sheet.name().to_string(),
                column: column.to_string(),
            });
        }

        let mut sheets = self.sheets.write().await;
        let record = sheets
            .get_mut(&sheet)
            .and_then(|rows| rows.get_mut(row))
            .ok_or_else(|| StoreError::RowOutOfRange {
                sheet: sheet.name().to_string(),
                row,
            })?;

        record.insert(column.to_string(), value.to_string());
        Ok(())
    }
}
