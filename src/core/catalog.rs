use crate::core::features::hours_between;
use crate::domain::model::Eruption;
use crate::loaders::load_eruptions;
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::fs::File;
use std::path::Path;

/// Hours granted past the recorded eruption length when testing membership:
/// onsets are dated to the day, so the clock time of the outbreak is unknown.
pub const ONSET_GRACE_HOURS: f64 = 24.0;

/// An eruption catalogue in source order, with temporal lookups over the
/// onset dates.
#[derive(Debug, Clone)]
pub struct EruptionCatalog {
    entries: Vec<Eruption>,
}

impl EruptionCatalog {
    pub fn from_entries(entries: Vec<Eruption>) -> Self {
        Self { entries }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_entries(load_eruptions(file)?))
    }

    pub fn entries(&self) -> &[Eruption] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest onset in the record.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.entries.iter().map(|e| e.onset).min()
    }

    /// Latest onset in the record.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.entries.iter().map(|e| e.onset).max()
    }

    /// The eruption with the greatest onset strictly earlier than `time`,
    /// or `None` when `time` precedes the whole record.
    pub fn latest_onset_before(&self, time: NaiveDateTime) -> Option<&Eruption> {
        self.entries
            .iter()
            .filter(|e| e.onset < time)
            .max_by_key(|e| e.onset)
    }

    /// The eruption with the smallest onset at or after `time`, or `None`
    /// when `time` is past the final onset.
    pub fn first_onset_at_or_after(&self, time: NaiveDateTime) -> Option<&Eruption> {
        self.entries
            .iter()
            .filter(|e| e.onset >= time)
            .min_by_key(|e| e.onset)
    }

    /// Whether an eruption was in progress at `time`. `None` when `time`
    /// precedes the catalogue, which downstream code treats as "unknown"
    /// rather than an error.
    pub fn was_erupting(&self, time: NaiveDateTime) -> Option<bool> {
        let event = self.latest_onset_before(time)?;
        let elapsed = hours_between(event.onset, time);
        Some(elapsed < event.length_hours + ONSET_GRACE_HOURS)
    }
}
