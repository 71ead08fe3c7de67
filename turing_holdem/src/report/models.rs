//! Report artifacts and aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt, fs,
    io::BufReader,
    path::{Path, PathBuf},
};

use super::errors::{ReportError, ReportResult};

/// The artifact written at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Winning personality name, one per completed hand, in play order
    pub winners: Vec<String>,
}

impl SessionReport {
    pub fn load(path: &Path) -> ReportResult<Self> {
        let file = fs::File::open(path).map_err(ReportError::io(path))?;
        serde_json::from_reader(BufReader::new(file)).map_err(ReportError::json(path))
    }
}

/// How often each personality won across a set of reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// Hands counted
    pub total: usize,

    /// Wins per personality, most wins first, ties by name
    pub counts: Vec<(String, usize)>,
}

impl Tally {
    #[must_use]
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a SessionReport>,
    {
        Self::from_winners(reports.into_iter().flat_map(|report| &report.winners))
    }

    #[must_use]
    pub fn from_winners<'a, I>(winners: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut total = 0;
        for winner in winners {
            *counts.entry(winner.as_str()).or_default() += 1;
            total += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { total, counts }
    }

    /// Load every `*.json` report under `dir`.
    pub fn from_dir(dir: &Path) -> ReportResult<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(ReportError::io(dir))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();
        let reports = paths
            .iter()
            .map(|path| SessionReport::load(path))
            .collect::<ReportResult<Vec<_>>>()?;
        Ok(Self::from_reports(&reports))
    }

    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.counts
            .iter()
            .find(|(winner, _)| winner == name)
            .map_or(0, |(_, count)| *count)
    }

    /// Fraction of counted hands won by `name`.
    #[must_use]
    pub fn share(&self, name: &str) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(name) as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        for (name, count) in &self.counts {
            writeln!(f, "{name:<width$}  {count:>6}  {:.4}", self.share(name))?;
        }
        write!(f, "{:<width$}  {:>6}", "total", self.total)
    }
}
