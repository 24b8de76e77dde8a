use crate::domain::ports::DobHistory;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_FILE: &str = "dob_history.csv";

#[derive(Debug, Serialize, Deserialize)]
struct HistoryRow {
    dob: String,
}

/// DOB history kept in a one-column CSV file with a `dob` header.
#[derive(Debug, Clone)]
pub struct CsvHistory {
    path: PathBuf,
}

impl CsvHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(data: &[u8]) -> Result<Vec<String>> {
        let mut reader = csv::Reader::from_reader(data);
        let mut entries = Vec::new();
        for row in reader.deserialize::<HistoryRow>() {
            entries.push(row?.dob);
        }
        Ok(entries)
    }

    fn encode(entries: &[String]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        // 空清單也要寫出標題列
        writer.write_record(["dob"])?;
        for dob in entries {
            writer.write_record([dob.as_str()])?;
        }
        writer.into_inner().map_err(|e| e.into_error().into())
    }
}

impl DobHistory for CsvHistory {
    async fn load(&self) -> Result<Vec<String>> {
        if !tokio::fs::try_exists(&self.path).await? {
            tracing::debug!("History file {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let data = tokio::fs::read(&self.path).await?;
        let entries = Self::parse(&data)?;
        tracing::debug!("Loaded {} DOBs from {}", entries.len(), self.path.display());
        Ok(entries)
    }

    async fn save(&self, dob: &str) -> Result<bool> {
        let mut entries = self.load().await?;
        if entries.iter().any(|existing| existing == dob) {
            return Ok(false);
        }
        entries.push(dob.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(&self.path, Self::encode(&entries)?).await?;
        Ok(true)
    }
}
