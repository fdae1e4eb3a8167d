//! Storage for the best genome seen across training runs.
//!
//! The evolution controller only talks to a [`PersistencePort`]. Two stores
//! are provided: [`MemoryStore`], a key-value map holding one JSON value per
//! field, and [`JsonFileStore`], a single JSON document on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{GenomeError, PersistenceError};
use super::genome::Genome;

/// Decision threshold assumed for records written before it was stored.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

const W1_KEY: &str = "w1";
const W2_KEY: &str = "w2";
const SCORE_KEY: &str = "score";
const THRESHOLD_KEY: &str = "threshold";

fn default_threshold() -> f32 {
    DEFAULT_THRESHOLD
}

/// The persisted best genome with its score and decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestRecord {
    /// Input→hidden weights.
    pub w1: Vec<f32>,
    /// Hidden→output weights.
    pub w2: Vec<f32>,
    /// Score the genome reached.
    #[serde(default)]
    pub score: u32,
    /// Threshold the genome flew with.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl BestRecord {
    /// Builds a record from a genome.
    pub fn new(genome: &Genome, score: u32, threshold: f32) -> Self {
        Self {
            w1: genome.w1().to_vec(),
            w2: genome.w2().to_vec(),
            score,
            threshold,
        }
    }

    /// The stored weights as a validated genome.
    pub fn genome(&self) -> Result<Genome, GenomeError> {
        Genome::new(self.w1.clone(), self.w2.clone())
    }
}

/// Loads and saves the best-genome record.
pub trait PersistencePort {
    /// Reads the stored record. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<BestRecord>, PersistenceError>;

    /// Replaces the stored record.
    fn save(&mut self, record: &BestRecord) -> Result<(), PersistenceError>;
}

/// In-memory key-value store with one JSON-encoded value per field.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value of `key`.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores a raw value under `key`, bypassing encoding.
    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Removes `key`.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn field<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        self.entries
            .get(key)
            .map(|raw| serde_json::from_str(raw))
            .transpose()
            .map_err(PersistenceError::from)
    }
}

impl PersistencePort for MemoryStore {
    fn load(&self) -> Result<Option<BestRecord>, PersistenceError> {
        let (Some(w1), Some(w2)) = (self.field(W1_KEY)?, self.field(W2_KEY)?) else {
            return Ok(None);
        };

        Ok(Some(BestRecord {
            w1,
            w2,
            score: self.field(SCORE_KEY)?.unwrap_or(0),
            threshold: self.field(THRESHOLD_KEY)?.unwrap_or(DEFAULT_THRESHOLD),
        }))
    }

    fn save(&mut self, record: &BestRecord) -> Result<(), PersistenceError> {
        self.set_raw(W1_KEY, serde_json::to_string(&record.w1)?);
        self.set_raw(W2_KEY, serde_json::to_string(&record.w2)?);
        self.set_raw(SCORE_KEY, serde_json::to_string(&record.score)?);
        self.set_raw(THRESHOLD_KEY, serde_json::to_string(&record.threshold)?);
        Ok(())
    }
}

/// Stores the record as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// A store backed by `path`. The file is created on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistencePort for JsonFileStore {
    fn load(&self) -> Result<Option<BestRecord>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&json)?;
        Ok(Some(record))
    }

    fn save(&mut self, record: &BestRecord) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_no_record() {
        assert!(MemoryStore::new().load().unwrap().is_none());
    }

    #[test]
    fn fields_are_stored_separately() {
        let mut store = MemoryStore::new();
        store
            .save(&BestRecord::new(&Genome::zeros(), 12, 0.7))
            .unwrap();

        assert_eq!(store.get_raw("score"), Some("12"));
        assert_eq!(store.get_raw("threshold"), Some("0.7"));
        assert!(store.get_raw("w1").unwrap().starts_with('['));
    }

    #[test]
    fn missing_score_reads_as_zero() {
        let mut store = MemoryStore::new();
        store
            .save(&BestRecord::new(&Genome::zeros(), 3, 0.5))
            .unwrap();
        store.remove("score");
        assert_eq!(store.load().unwrap().unwrap().score, 0);
    }
}
