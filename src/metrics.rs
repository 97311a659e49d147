use crate::types::WorkoutKind;

/// Pace in minutes per kilometre, rounded to one decimal.
///
/// Inputs must already be validated as positive; a zero distance yields a
/// non-finite value rather than an error.
pub fn pace_min_per_km(distance_km: f64, duration_min: f64) -> f64 {
    round1(duration_min / distance_km)
}

/// Speed in kilometres per hour, rounded to one decimal. Same non-error
/// contract as [`pace_min_per_km`].
pub fn speed_km_per_h(distance_km: f64, duration_min: f64) -> f64 {
    round1(distance_km / (duration_min / 60.0))
}

/// The metric formula for a workout kind: pace for running, speed for cycling.
pub const fn formula(kind: WorkoutKind) -> fn(f64, f64) -> f64 {
    match kind {
        WorkoutKind::Running => pace_min_per_km,
        WorkoutKind::Cycling => speed_km_per_h,
    }
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
