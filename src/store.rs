use std::collections::HashMap;

use crate::dlog;
use crate::error::{Error, Result};
use crate::ports::KeyValueStore;
use crate::types::{StoredWorkout, WorkoutRecord};

/// Key under which the whole workout sequence is persisted.
pub const STORAGE_KEY: &str = "workouts";

/// Ordered collection of workouts, insertion order preserved (newest last),
/// plus the per-record interaction counters.
#[derive(Debug, Default)]
pub struct WorkoutStore {
    records: Vec<WorkoutRecord>,
    interactions: HashMap<String, u32>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Ids must stay unique within the store; a collision is
    /// a logic fault, not user error.
    pub fn add(&mut self, record: WorkoutRecord) -> Result<()> {
        if self.find_by_id(&record.id).is_some() {
            return Err(Error::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn all(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&WorkoutRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Bump the interaction counter of a record that was selected again.
    /// Returns the new count.
    pub fn activate(&mut self, id: &str) -> Result<u32> {
        if self.find_by_id(id).is_none() {
            return Err(Error::NotFound(id.to_string()));
        }
        let count = self.interactions.entry(id.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    pub fn interaction_count(&self, id: &str) -> u32 {
        self.interactions.get(id).copied().unwrap_or(0)
    }

    /// The JSON blob handed to the persistence collaborator: an array of
    /// stored records in insertion order.
    pub fn serialize(&self) -> Result<String> {
        let stored: Vec<StoredWorkout> = self
            .records
            .iter()
            .map(|r| StoredWorkout::from_record(r, self.interaction_count(&r.id)))
            .collect();
        Ok(serde_json::to_string(&stored)?)
    }

    /// Replace the contents with records rebuilt from a serialized blob.
    /// Derived fields are re-computed, see [`WorkoutRecord::reconstruct`].
    pub fn load(&mut self, raw: &str) -> Result<()> {
        let stored: Vec<StoredWorkout> = serde_json::from_str(raw)?;

        let mut records: Vec<WorkoutRecord> = Vec::with_capacity(stored.len());
        let mut interactions = HashMap::new();
        for s in stored {
            let (record, count) = WorkoutRecord::reconstruct(s);
            if records.iter().any(|r| r.id == record.id) {
                return Err(Error::DuplicateId(record.id));
            }
            if count > 0 {
                interactions.insert(record.id.clone(), count);
            }
            records.push(record);
        }

        self.records = records;
        self.interactions = interactions;
        Ok(())
    }

    /// Load from the persistence collaborator. Returns false when nothing was
    /// stored yet.
    pub fn restore(&mut self, kv: &impl KeyValueStore) -> Result<bool> {
        let Some(raw) = kv.get(STORAGE_KEY)? else {
            return Ok(false);
        };
        self.load(&raw)?;
        dlog!("restored workouts={}", self.records.len());
        Ok(true)
    }

    /// Serialize the whole store to the persistence collaborator. Called
    /// after every mutation.
    pub fn persist(&self, kv: &mut impl KeyValueStore) -> Result<()> {
        let raw = self.serialize()?;
        kv.set(STORAGE_KEY, &raw)?;
        dlog!("persisted workouts={}", self.records.len());
        Ok(())
    }
}
