use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Running => "🏃",
            Self::Cycling => "🚴",
        }
    }

    pub const fn metric_unit(self) -> &'static str {
        match self {
            Self::Running => "min/km",
            Self::Cycling => "km/h",
        }
    }
}

/// Kind-specific part of a workout. The enum tag doubles as the kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindDetails {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

impl KindDetails {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One logged activity. Every field is fixed at creation; the interaction
/// counter lives store-side, keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    pub details: KindDetails,
    /// Pace (min/km) for running, speed (km/h) for cycling, one decimal.
    pub metric: f64,
    pub description: String,
}

impl WorkoutRecord {
    pub fn create(
        details: KindDetails,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
    ) -> Self {
        Self::create_at(details, coordinates, distance_km, duration_min, Utc::now())
    }

    /// Build a record with an explicit creation time.
    ///
    /// The id, derived metric and description are fixed here and never
    /// recomputed. Callers validate distance and duration beforehand.
    pub fn create_at(
        details: KindDetails,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let kind = details.kind();
        Self {
            id: new_id(created_at),
            created_at,
            coordinates,
            distance_km,
            duration_min,
            details,
            metric: metrics::formula(kind)(distance_km, duration_min),
            description: describe(kind, created_at),
        }
    }

    /// Rebuild a live record from its persisted form.
    ///
    /// The metric and description are re-derived from the immutable fields
    /// rather than taken from the stored values, so a reloaded record is
    /// indistinguishable from a freshly created one.
    pub fn reconstruct(stored: StoredWorkout) -> (Self, u32) {
        let kind = stored.details.kind();
        let record = Self {
            id: stored.id,
            created_at: stored.created_at,
            coordinates: stored.coordinates,
            distance_km: stored.distance_km,
            duration_min: stored.duration_min,
            details: stored.details,
            metric: metrics::formula(kind)(stored.distance_km, stored.duration_min),
            description: describe(kind, stored.created_at),
        };
        (record, stored.interaction_count)
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Label shown on the workout's map marker.
    pub fn marker_label(&self) -> String {
        format!("{} {}", self.kind().emoji(), self.description)
    }
}

/// Persisted shape of one workout: the plain-data form of [`WorkoutRecord`]
/// plus its interaction counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredWorkout {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    #[serde(flatten)]
    pub details: KindDetails,
    pub metric: f64,
    pub description: String,
    #[serde(default)]
    pub interaction_count: u32,
}

impl StoredWorkout {
    pub fn from_record(record: &WorkoutRecord, interaction_count: u32) -> Self {
        Self {
            id: record.id.clone(),
            created_at: record.created_at,
            coordinates: record.coordinates,
            distance_km: record.distance_km,
            duration_min: record.duration_min,
            details: record.details,
            metric: record.metric,
            description: record.description.clone(),
            interaction_count,
        }
    }
}

/// Timestamp millis plus a random suffix. Uniqueness is the store's contract,
/// not this function's.
fn new_id(created_at: DateTime<Utc>) -> String {
    format!(
        "{:x}-{:04x}",
        created_at.timestamp_millis(),
        rand::random::<u16>()
    )
}

fn describe(kind: WorkoutKind, at: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), at.format("%B %-d"))
}
