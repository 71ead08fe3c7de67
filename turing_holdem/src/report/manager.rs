use chrono::Utc;
use log::info;
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use uuid::Uuid;

use super::{
    errors::{ReportError, ReportResult},
    models::SessionReport,
};

/// Length of the id used in report file names.
const REPORT_ID_LEN: usize = 10;

/// Collects hand winners for a run and writes them out once at the end.
#[derive(Debug, Clone)]
pub struct Reporter {
    dir: PathBuf,
    winners: Vec<String>,
}

impl Reporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            winners: Vec::new(),
        }
    }

    pub fn record(&mut self, winner: impl Into<String>) {
        self.winners.push(winner.into());
    }

    #[must_use]
    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.winners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data_<id>.json` into the report directory, creating it if
    /// needed. Every call writes a new file.
    pub fn flush(&self) -> ReportResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(ReportError::io(&self.dir))?;

        let id: String = Uuid::new_v4().to_string().chars().take(REPORT_ID_LEN).collect();
        let path = self.dir.join(format!("data_{id}.json"));
        let report = SessionReport {
            id,
            created_at: Some(Utc::now()),
            winners: self.winners.clone(),
        };

        let file = fs::File::create(&path).map_err(ReportError::io(&path))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &report).map_err(ReportError::json(&path))?;
        writer.flush().map_err(ReportError::io(&path))?;
        info!("Wrote {} winners to {}", self.winners.len(), path.display());
        Ok(path)
    }
}
