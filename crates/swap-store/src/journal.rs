//! JSON Lines settlement journal.
//!
//! Append-only audit trail of committed settlements, one JSON object
//! per line. Append mode keeps existing data safe across restarts and
//! partial corruption only affects individual lines. Files rotate per
//! UTC date.
//!
//! The journal is written after the in-store commit; a journal failure
//! is reported to the caller but cannot undo a commit. There is no
//! reconciliation job for that gap; it is an accepted risk, logged at
//! warn by the caller.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::error::StoreResult;
use swap_core::Settlement;

struct ActiveFile {
    writer: BufWriter<File>,
    date: String,
}

/// Append-only JSON Lines writer for settlements.
pub struct SettlementJournal {
    base_dir: PathBuf,
    active: Option<ActiveFile>,
}

impl SettlementJournal {
    /// Create a journal rooted at `base_dir`, creating the directory
    /// if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            active: None,
        })
    }

    /// Append one settlement and flush it to disk.
    pub fn append(&mut self, settlement: &Settlement) -> StoreResult<()> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let rotate = match &self.active {
            Some(active) => active.date != date,
            None => true,
        };
        if rotate {
            self.open_for_date(&date)?;
        }

        let active = self.active.as_mut().expect("journal file just opened");
        serde_json::to_writer(&mut active.writer, settlement)?;
        active.writer.write_all(b"\n")?;
        // Settlements are rare and each line matters; flush every write.
        active.writer.flush()?;
        Ok(())
    }

    fn open_for_date(&mut self, date: &str) -> StoreResult<()> {
        let path = self.base_dir.join(format!("settlements_{date}.jsonl"));
        info!(path = %path.display(), "Opening settlement journal (append mode)");

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        self.active = Some(ActiveFile {
            writer: BufWriter::new(file),
            date: date.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use swap_core::{EstimateId, SettlementId, UserId};

    fn sample() -> Settlement {
        Settlement {
            id: SettlementId::generate(),
            estimate_id: EstimateId::generate(),
            user_id: UserId::from("u1"),
            order_ref: "42".to_string(),
            executed_subtotal: dec!(201),
            fee: dec!(0.201),
            spread: dec!(2.01),
            total: dec!(203.211),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_appends_one_line_per_settlement() {
        let dir = std::env::temp_dir().join(format!("swap-journal-{}", uuid::Uuid::new_v4()));
        let mut journal = SettlementJournal::new(&dir).unwrap();

        let first = sample();
        let second = sample();
        journal.append(&first).unwrap();
        journal.append(&second).unwrap();

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let content =
            std::fs::read_to_string(dir.join(format!("settlements_{date}.jsonl"))).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let decoded: Settlement = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(decoded.id, first.id);
        assert_eq!(decoded.total, first.total);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reopen_appends_instead_of_truncating() {
        let dir = std::env::temp_dir().join(format!("swap-journal-{}", uuid::Uuid::new_v4()));
        {
            let mut journal = SettlementJournal::new(&dir).unwrap();
            journal.append(&sample()).unwrap();
        }
        {
            let mut journal = SettlementJournal::new(&dir).unwrap();
            journal.append(&sample()).unwrap();
        }

        let date = Utc::now().format("%Y-%m-%d").to_string();
        let content =
            std::fs::read_to_string(dir.join(format!("settlements_{date}.jsonl"))).unwrap();
        assert_eq!(content.lines().count(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }
}
