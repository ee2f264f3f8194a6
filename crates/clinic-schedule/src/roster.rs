//! Worker roster and CSV loading.
//!
//! # CSV format
//!
//! One row per worker.  `breaks` and `certifications` are `;`-separated
//! lists; an empty field means none.
//!
//! ```csv
//! worker_id,start_hour,end_hour,breaks,certifications
//! 0,8,17,12,0;2
//! 1,9,16,,1
//! 2,8,17,12;13,0
//! ```
//!
//! Rows may appear in any order; the returned roster is sorted by
//! `WorkerId`.  Duplicate IDs are a parse error.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use clinic_core::{CertId, WorkerId};

use crate::workweek::WorkSchedule;
use crate::ScheduleError;

// ── Worker ────────────────────────────────────────────────────────────────────

/// One roster entry: a worker, their daily schedule, and their certifications.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    pub id: WorkerId,
    pub workweek: WorkSchedule,
    pub certifications: Vec<CertId>,
}

impl Worker {
    /// `true` if the worker holds `cert`.
    #[inline]
    pub fn holds(&self, cert: CertId) -> bool {
        self.certifications.contains(&cert)
    }
}

/// Find a worker by ID in a roster slice.
pub fn worker_by_id(roster: &[Worker], id: WorkerId) -> Option<&Worker> {
    roster.iter().find(|w| w.id == id)
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    worker_id:      u16,
    start_hour:     u8,
    end_hour:       u8,
    breaks:         String,
    certifications: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a worker roster from a CSV file.
pub fn load_roster_csv(path: &Path) -> Result<Vec<Worker>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn load_roster_reader<R: Read>(reader: R) -> Result<Vec<Worker>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut roster: Vec<Worker> = Vec::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let id = WorkerId(row.worker_id);
        if roster.iter().any(|w| w.id == id) {
            return Err(ScheduleError::Parse(format!("duplicate worker id {id}")));
        }

        let breaks = parse_list(&row.breaks)?;
        let certifications = parse_list(&row.certifications)?
            .into_iter()
            .map(CertId)
            .collect();

        roster.push(Worker {
            id,
            workweek: WorkSchedule::new(row.start_hour, row.end_hour, breaks)?,
            certifications,
        });
    }

    roster.sort_unstable_by_key(|w| w.id);
    Ok(roster)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse a `;`-separated list of integers; empty input is an empty list.
fn parse_list<T: std::str::FromStr>(s: &str) -> Result<Vec<T>, ScheduleError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .map(|part| {
            part.trim()
                .parse::<T>()
                .map_err(|_| ScheduleError::Parse(format!("invalid list entry {part:?}")))
        })
        .collect()
}
