//! CSV-file persistence with a JSON state snapshot

use anyhow::Context;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use super::types::{DecisionRecord, EquityPoint, Snapshot};
use super::Store;

const DECISIONS_FILE: &str = "decisions.csv";
const EQUITY_FILE: &str = "equity.csv";
const STATE_FILE: &str = "state.json";

/// Append-only CSV logs plus `state.json` in one data directory
pub struct CsvStore {
    dir: PathBuf,
    decisions: csv::Writer<File>,
    equity: csv::Writer<File>,
}

impl CsvStore {
    /// Open (creating if needed) the store at `dir`
    pub fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating data dir {}", dir.display()))?;

        let decisions = Self::open_log(&dir.join(DECISIONS_FILE))?;
        let equity = Self::open_log(&dir.join(EQUITY_FILE))?;

        Ok(Self {
            dir,
            decisions,
            equity,
        })
    }

    /// Open a CSV log in append mode, writing headers only on a fresh file
    fn open_log(path: &Path) -> anyhow::Result<csv::Writer<File>> {
        let fresh = !path.exists() || std::fs::metadata(path)?.len() == 0;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening {}", path.display()))?;

        Ok(csv::WriterBuilder::new()
            .has_headers(fresh)
            .from_writer(file))
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join(STATE_FILE)
    }
}

impl Store for CsvStore {
    fn append_decision(&mut self, record: &DecisionRecord) -> anyhow::Result<()> {
        self.decisions
            .serialize(record)
            .context("writing decision record")?;
        self.decisions.flush()?;
        Ok(())
    }

    fn append_equity(
        &mut self,
        timestamp: DateTime<Utc>,
        asset: &str,
        equity_usdt: Decimal,
    ) -> anyhow::Result<()> {
        self.equity
            .serialize(EquityPoint {
                timestamp,
                asset: asset.to_string(),
                equity_usdt,
            })
            .context("writing equity point")?;
        self.equity.flush()?;
        Ok(())
    }

    fn load_state(&self) -> anyhow::Result<Option<Snapshot>> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let snapshot = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(snapshot))
    }

    fn save_state(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(self.state_path(), json).context("writing state snapshot")?;
        Ok(())
    }
}
