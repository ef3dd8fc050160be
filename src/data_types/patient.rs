use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

/// One recorded visit with a blood pressure reading.
///
/// Percentiles are expected in `[0, 100]`; the filter stage upstream clamps them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub timestamp: DateTime<Utc>,
    /// Age in fractional years.
    pub age: f64,
    /// Height in cm.
    pub height: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub systolic_percentile: f64,
    pub diastolic_percentile: f64,
    pub site: String,
    pub position: String,
    pub method: String,
    /// Human readable date, shown verbatim in labels and tooltips.
    pub date: String,
    pub encounter_type: String,
}

/// Values the host needs to seed its centile calculator.
#[derive(Clone, Debug, PartialEq)]
pub struct LatestReading {
    pub age: f64,
    pub sex: Sex,
    pub height: f64,
    pub systolic: f64,
    pub diastolic: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub sex: Sex,
    encounters: Vec<Encounter>,
}

impl Patient {
    /// Encounters must already be in chronological order.
    pub fn new(sex: Sex, encounters: Vec<Encounter>) -> Self {
        Self { sex, encounters }
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        use eyre::WrapErr;
        serde_json::from_str(json).wrap_err("failed to parse patient data")
    }

    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.encounters.first().map(|e| e.timestamp)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.encounters.last().map(|e| e.timestamp)
    }

    /// The last `n` encounters in chronological order. Recomputed on every call.
    pub fn recent_encounters(&self, n: usize) -> std::slice::Iter<'_, Encounter> {
        let start = self.encounters.len().saturating_sub(n);
        self.encounters[start..].iter()
    }

    /// Copy of this patient restricted to the encounters accepted by `keep`.
    pub fn filtered(&self, keep: impl Fn(&Encounter) -> bool) -> Self {
        Self {
            sex: self.sex,
            encounters: self.encounters.iter().filter(|e| keep(e)).cloned().collect(),
        }
    }

    pub fn latest_reading(&self) -> Option<LatestReading> {
        self.encounters.last().map(|e| LatestReading {
            age: e.age,
            sex: self.sex,
            height: e.height,
            systolic: e.systolic,
            diastolic: e.diastolic,
        })
    }
}
