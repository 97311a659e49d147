use crate::error::{Error, Result};
use crate::ports::{Geolocation, MapView, WorkoutList};
use crate::types::{Coordinates, WorkoutRecord};

/// Position source fed from `--lat`/`--lon`. Without both arguments there is
/// no fix, which exercises the disabled-map path.
pub struct CliPosition(pub Option<Coordinates>);

impl Geolocation for CliPosition {
    fn current_position(&self) -> Result<Coordinates> {
        self.0
            .ok_or_else(|| Error::Geolocation("no --lat/--lon given".to_string()))
    }
}

/// Stdout stand-in for the map widget.
#[derive(Debug, Default)]
pub struct TermMap;

impl MapView for TermMap {
    fn center_on(&mut self, at: Coordinates, zoom: u8) {
        println!("map centered on {:.4},{:.4} (zoom {zoom})", at.lat, at.lon);
    }

    fn place_marker(&mut self, at: Coordinates, label: &str) {
        println!("{label}\t[{:.4},{:.4}]", at.lat, at.lon);
    }
}

/// Stdout stand-in for the workout list panel.
#[derive(Debug, Default)]
pub struct TermList {
    details: bool,
    rows: usize,
}

impl TermList {
    pub const fn new(details: bool) -> Self {
        Self { details, rows: 0 }
    }
}

impl WorkoutList for TermList {
    fn render_entry(&mut self, record: &WorkoutRecord) {
        self.rows += 1;
        let unit = record.kind().metric_unit();
        if self.details {
            println!(
                "{}\t{}\t{}\t{:.1} km\t{:.0} min\t{:.1} {unit}",
                self.rows,
                record.id,
                record.description,
                record.distance_km,
                record.duration_min,
                record.metric
            );
        } else {
            println!("{}\t{:.1} {unit}", record.description, record.metric);
        }
    }
}
