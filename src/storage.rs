//! Persistence of drill state as small JSON blobs under fixed keys.
//!
//! Every loader tolerates missing or malformed data and falls back to a
//! default, so a corrupted file never stops a session from starting.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::error::{DrillError, DrillResult};
use crate::question::{Mode, Question};
use crate::stats::Stats;
use crate::timer::DEFAULT_MINUTES;

pub const PREF_KEY: &str = "fst.prefs.v1";
pub const STATS_KEY: &str = "fst.stats.v1";
pub const MISTAKES_KEY: &str = "fst.mistakes.v1";
pub const SCORE_KEY: &str = "fst.score.v1";
pub const BESTSTREAK_KEY: &str = "fst.beststreak.v1";

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> DrillResult<()>;
    fn remove(&self, key: &str) -> DrillResult<()>;
}

/// One `<key>.json` file per key inside a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> DrillResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| DrillError::Storage {
            key: key.to_string(),
            source,
        })?;
        fs::write(self.path_for(key), value).map_err(|source| DrillError::Storage {
            key: key.to_string(),
            source,
        })?;
        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> DrillResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(DrillError::Storage {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DrillResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DrillResult<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DrillResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> DrillResult<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefs {
    pub mode: Mode,
    #[serde(deserialize_with = "de_count")]
    pub minutes: u32,
    #[serde(default)]
    pub review_only: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            mode: Mode::Mixed,
            minutes: DEFAULT_MINUTES,
            review_only: false,
        }
    }
}

/// Reads any non-negative JSON number as a whole count, dropping the
/// fraction.
pub(crate) fn de_count<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let v = f64::deserialize(deserializer)?;
    if !v.is_finite() || v < 0.0 {
        return Err(de::Error::custom(format!("expected a non-negative number, got {}", v)));
    }
    T::try_from(v as u64).map_err(|_| de::Error::custom(format!("{} is out of range", v)))
}

fn load_json<T: for<'de> Deserialize<'de>>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

fn save_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> DrillResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// `None` unless the mode is known and minutes is a number.
pub fn load_prefs(store: &dyn KvStore) -> Option<Prefs> {
    load_json(store, PREF_KEY)
}

pub fn save_prefs(store: &dyn KvStore, prefs: &Prefs) -> DrillResult<()> {
    save_json(store, PREF_KEY, prefs)
}

pub fn load_stats(store: &dyn KvStore) -> Option<Stats> {
    load_json(store, STATS_KEY)
}

pub fn save_stats(store: &dyn KvStore, stats: &Stats) -> DrillResult<()> {
    save_json(store, STATS_KEY, stats)
}

/// Saved mistakes; entries that do not parse as questions are skipped and a
/// blob that is not an array yields an empty list.
pub fn load_mistakes(store: &dyn KvStore) -> Vec<Question> {
    let Some(items) = load_json::<Vec<serde_json::Value>>(store, MISTAKES_KEY) else {
        return Vec::new();
    };
    let total = items.len();
    let mistakes: Vec<Question> = items
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if mistakes.len() < total {
        tracing::warn!(dropped = total - mistakes.len(), "skipped unreadable mistakes");
    }
    mistakes
}

pub fn save_mistakes(store: &dyn KvStore, mistakes: &[Question]) -> DrillResult<()> {
    save_json(store, MISTAKES_KEY, &mistakes)
}

fn load_counter(store: &dyn KvStore, key: &str) -> u64 {
    store
        .get(key)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
        .unwrap_or(0)
}

pub fn load_score(store: &dyn KvStore) -> u64 {
    load_counter(store, SCORE_KEY)
}

pub fn save_score(store: &dyn KvStore, score: u64) -> DrillResult<()> {
    store.set(SCORE_KEY, &score.to_string())
}

pub fn load_best_streak(store: &dyn KvStore) -> u64 {
    load_counter(store, BESTSTREAK_KEY)
}

pub fn save_best_streak(store: &dyn KvStore, best: u64) -> DrillResult<()> {
    store.set(BESTSTREAK_KEY, &best.to_string())
}
