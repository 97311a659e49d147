//! Seams to the systems the tracker talks to but does not implement: the
//! position source, the map widget, the list panel and key-value storage.

use crate::error::Result;
use crate::types::{Coordinates, WorkoutRecord};

pub trait Geolocation {
    /// Current position of the user, or [`crate::error::Error::Geolocation`]
    /// when no fix is available.
    fn current_position(&self) -> Result<Coordinates>;
}

pub trait MapView {
    fn center_on(&mut self, at: Coordinates, zoom: u8);

    fn place_marker(&mut self, at: Coordinates, label: &str);
}

pub trait WorkoutList {
    fn render_entry(&mut self, record: &WorkoutRecord);
}

/// String-keyed storage with synchronous get/set semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
