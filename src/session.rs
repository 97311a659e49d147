use crate::dlog;
use crate::error::{Error, Result};
use crate::ports::{Geolocation, KeyValueStore, MapView, WorkoutList};
use crate::store::WorkoutStore;
use crate::types::{Coordinates, KindDetails, WorkoutKind, WorkoutRecord};

/// Zoom level used when centering the map on the user's position.
pub const MAP_ZOOM: u8 = 13;

const INVALID_INPUT: &str = "Inputs have to be positive numbers!";

/// Raw form input as submitted by the user, before validation.
#[derive(Debug, Clone, Copy)]
pub struct WorkoutForm {
    pub kind: WorkoutKind,
    /// The map point the workout is pinned to.
    pub coordinates: Coordinates,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Steps per minute; required for running.
    pub cadence_spm: Option<f64>,
    /// Metres climbed; required for cycling, may be negative.
    pub elevation_gain_m: Option<f64>,
}

impl WorkoutForm {
    /// Check the numeric inputs and produce the kind-specific payload.
    ///
    /// Distance, duration and cadence must be finite and positive; elevation
    /// gain only has to be finite.
    fn validated_details(&self) -> Result<KindDetails> {
        if !positive(self.distance_km) || !positive(self.duration_min) {
            return Err(Error::Validation(INVALID_INPUT.to_string()));
        }

        match self.kind {
            WorkoutKind::Running => {
                let cadence = self.cadence_spm.ok_or_else(|| {
                    Error::Validation("A running workout needs a cadence".to_string())
                })?;
                if !positive(cadence) {
                    return Err(Error::Validation(INVALID_INPUT.to_string()));
                }
                Ok(KindDetails::Running {
                    cadence_spm: cadence,
                })
            }
            WorkoutKind::Cycling => {
                let elevation = self.elevation_gain_m.ok_or_else(|| {
                    Error::Validation("A cycling workout needs an elevation gain".to_string())
                })?;
                if !elevation.is_finite() {
                    return Err(Error::Validation(INVALID_INPUT.to_string()));
                }
                Ok(KindDetails::Cycling {
                    elevation_gain_m: elevation,
                })
            }
        }
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Orchestrates one tracker session: position lookup, replay of persisted
/// workouts, form submissions and marker/list rendering.
pub struct SessionController<G, M, L, K> {
    geolocation: G,
    map: M,
    list: L,
    kv: K,
    store: WorkoutStore,
    map_ready: bool,
}

impl<G, M, L, K> SessionController<G, M, L, K>
where
    G: Geolocation,
    M: MapView,
    L: WorkoutList,
    K: KeyValueStore,
{
    pub fn new(geolocation: G, map: M, list: L, kv: K) -> Self {
        Self {
            geolocation,
            map,
            list,
            kv,
            store: WorkoutStore::new(),
            map_ready: false,
        }
    }

    /// Start the session: center the map on the user and replay stored
    /// workouts onto the list and the map.
    ///
    /// A missing position fix is not fatal; the session continues with map
    /// features disabled.
    pub fn start(&mut self) -> Result<()> {
        match self.geolocation.current_position() {
            Ok(at) => {
                self.map.center_on(at, MAP_ZOOM);
                self.map_ready = true;
            }
            Err(e) => {
                tracing::warn!(err = %e, "could not get your position; map features disabled");
            }
        }

        let restored = self.store.restore(&self.kv)?;
        dlog!("session start restored={restored} workouts={}", self.store.len());

        for record in self.store.all() {
            self.list.render_entry(record);
            if self.map_ready {
                self.map.place_marker(record.coordinates, &record.marker_label());
            }
        }

        Ok(())
    }

    /// Handle a submitted form: validate, create the record, append it to the
    /// store, render it, persist. Returns the created record.
    pub fn submit(&mut self, form: &WorkoutForm) -> Result<WorkoutRecord> {
        let details = form.validated_details()?;
        let record = WorkoutRecord::create(
            details,
            form.coordinates,
            form.distance_km,
            form.duration_min,
        );

        self.store.add(record.clone())?;

        self.list.render_entry(&record);
        if self.map_ready {
            self.map.place_marker(record.coordinates, &record.marker_label());
        }

        self.store.persist(&mut self.kv)?;
        dlog!("workout recorded id={}", record.id);
        Ok(record)
    }

    /// Bump the interaction counter behind a selected marker or list entry.
    /// An unknown id is ignored.
    pub fn activate(&mut self, id: &str) -> Result<()> {
        match self.store.activate(id) {
            Ok(count) => {
                dlog!("workout activated id={id} count={count}");
                self.store.persist(&mut self.kv)
            }
            Err(Error::NotFound(_)) => {
                tracing::debug!(id, "activate on unknown workout id, ignoring");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub const fn store(&self) -> &WorkoutStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::STORAGE_KEY;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    struct Fix(Coordinates);

    impl Geolocation for Fix {
        fn current_position(&self) -> Result<Coordinates> {
            Ok(self.0)
        }
    }

    struct NoFix;

    impl Geolocation for NoFix {
        fn current_position(&self) -> Result<Coordinates> {
            Err(Error::Geolocation("denied".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct FakeMap {
        centered: Rc<RefCell<Vec<(Coordinates, u8)>>>,
        markers: Rc<RefCell<Vec<String>>>,
    }

    impl MapView for FakeMap {
        fn center_on(&mut self, at: Coordinates, zoom: u8) {
            self.centered.borrow_mut().push((at, zoom));
        }

        fn place_marker(&mut self, _at: Coordinates, label: &str) {
            self.markers.borrow_mut().push(label.to_string());
        }
    }

    #[derive(Clone, Default)]
    struct FakeList {
        entries: Rc<RefCell<Vec<String>>>,
    }

    impl WorkoutList for FakeList {
        fn render_entry(&mut self, record: &WorkoutRecord) {
            self.entries.borrow_mut().push(record.id.clone());
        }
    }

    #[derive(Clone, Default)]
    struct SharedKv(Rc<RefCell<HashMap<String, String>>>);

    impl KeyValueStore for SharedKv {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.borrow().get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn lisbon() -> Coordinates {
        Coordinates { lat: 38.7, lon: -9.1 }
    }

    fn running_form() -> WorkoutForm {
        WorkoutForm {
            kind: WorkoutKind::Running,
            coordinates: lisbon(),
            distance_km: 5.2,
            duration_min: 24.0,
            cadence_spm: Some(178.0),
            elevation_gain_m: None,
        }
    }

    #[test]
    fn start_centers_map_on_position_fix() {
        let map = FakeMap::default();
        let mut session =
            SessionController::new(Fix(lisbon()), map.clone(), FakeList::default(), SharedKv::default());
        session.start().unwrap();

        assert_eq!(map.centered.borrow().as_slice(), [(lisbon(), MAP_ZOOM)]);
    }

    #[test]
    fn start_without_fix_disables_map_but_succeeds() {
        let map = FakeMap::default();
        let list = FakeList::default();
        let kv = SharedKv::default();
        let mut session = SessionController::new(NoFix, map.clone(), list.clone(), kv);
        session.start().unwrap();
        session.submit(&running_form()).unwrap();

        assert!(map.centered.borrow().is_empty());
        assert!(map.markers.borrow().is_empty());
        assert_eq!(list.entries.borrow().len(), 1);
    }

    #[test]
    fn submit_stores_renders_and_persists() {
        let map = FakeMap::default();
        let list = FakeList::default();
        let kv = SharedKv::default();
        let mut session =
            SessionController::new(Fix(lisbon()), map.clone(), list.clone(), kv.clone());
        session.start().unwrap();

        let record = session.submit(&running_form()).unwrap();

        assert_eq!(session.store().len(), 1);
        assert_eq!(list.entries.borrow().as_slice(), [record.id.clone()]);
        assert_eq!(map.markers.borrow().len(), 1);
        assert!(kv.0.borrow().contains_key(STORAGE_KEY));
    }

    #[test]
    fn submit_rejects_non_positive_input() {
        let kv = SharedKv::default();
        let mut session = SessionController::new(
            Fix(lisbon()),
            FakeMap::default(),
            FakeList::default(),
            kv.clone(),
        );
        session.start().unwrap();

        let mut form = running_form();
        form.distance_km = -5.2;
        let err = session.submit(&form).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(session.store().is_empty());
        assert!(kv.0.borrow().is_empty());
    }

    #[test]
    fn submit_rejects_missing_cadence() {
        let mut session = SessionController::new(
            Fix(lisbon()),
            FakeMap::default(),
            FakeList::default(),
            SharedKv::default(),
        );
        let mut form = running_form();
        form.cadence_spm = None;

        assert!(matches!(session.submit(&form), Err(Error::Validation(_))));
    }

    #[test]
    fn submit_allows_negative_elevation_gain() {
        let mut session = SessionController::new(
            Fix(lisbon()),
            FakeMap::default(),
            FakeList::default(),
            SharedKv::default(),
        );
        let form = WorkoutForm {
            kind: WorkoutKind::Cycling,
            coordinates: lisbon(),
            distance_km: 12.0,
            duration_min: 30.0,
            cadence_spm: None,
            elevation_gain_m: Some(-40.0),
        };

        let record = session.submit(&form).unwrap();
        assert_eq!(
            record.details,
            KindDetails::Cycling {
                elevation_gain_m: -40.0
            }
        );
    }

    #[test]
    fn start_replays_persisted_workouts() {
        let kv = SharedKv::default();
        {
            let mut session = SessionController::new(
                Fix(lisbon()),
                FakeMap::default(),
                FakeList::default(),
                kv.clone(),
            );
            session.start().unwrap();
            session.submit(&running_form()).unwrap();
        }

        let map = FakeMap::default();
        let list = FakeList::default();
        let mut session =
            SessionController::new(Fix(lisbon()), map.clone(), list.clone(), kv);
        session.start().unwrap();

        assert_eq!(list.entries.borrow().len(), 1);
        assert_eq!(map.markers.borrow().len(), 1);
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn activate_unknown_id_is_a_no_op() {
        let mut session = SessionController::new(
            Fix(lisbon()),
            FakeMap::default(),
            FakeList::default(),
            SharedKv::default(),
        );
        session.start().unwrap();
        session.activate("missing").unwrap();
    }

    #[test]
    fn activate_persists_the_counter() {
        let kv = SharedKv::default();
        let mut session = SessionController::new(
            Fix(lisbon()),
            FakeMap::default(),
            FakeList::default(),
            kv.clone(),
        );
        session.start().unwrap();
        let record = session.submit(&running_form()).unwrap();
        session.activate(&record.id).unwrap();

        let raw = kv.0.borrow().get(STORAGE_KEY).cloned().unwrap();
        let mut reloaded = WorkoutStore::new();
        reloaded.load(&raw).unwrap();
        assert_eq!(reloaded.interaction_count(&record.id), 1);
    }
}
