// src/db.rs

//! Typed accessor over a [`KeyValueStore`].
//!
//! Every logical collection is one JSON document under a fixed key. Plain
//! reads never fail on missing or malformed documents: both come back as the
//! typed default. Read-modify-write paths use [`Db::read_for_update`], which
//! refuses a malformed document instead. Writes always serialize through
//! [`Db::write`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    error::{AppError, Result},
    models::notification::NotificationBook,
    services::catalog,
    store::{KeyValueStore, MemoryStore, keys},
    utils::{
        clock::{Clock, SystemClock},
        ids::IdGenerator,
    },
};

/// Storage service handed to every domain function.
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
}

impl Db {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ids: Arc::new(IdGenerator::new()),
        }
    }

    /// Fresh, empty in-memory database.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Next record id (millisecond timestamp, strictly increasing).
    pub fn next_id(&self) -> u64 {
        let millis = u64::try_from(self.now().timestamp_millis()).unwrap_or(0);
        self.ids.next(millis)
    }

    /// Reads the document under `key`, or `T::default()` when it is absent or
    /// does not parse as `T`.
    pub fn read<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.read_optional(key)?.unwrap_or_default())
    }

    /// Like [`Db::read`] but distinguishes "nothing usable stored" as `None`.
    pub fn read_optional<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring unparsable document under '{}': {}", key, e);
                Ok(None)
            }
        }
    }

    /// Reads a document that is about to be modified and written back.
    ///
    /// Absent reads as `T::default()`. A present document that does not parse
    /// is an error, so the caller never overwrites it with a default.
    pub fn read_for_update<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.store.get(key)? else {
            return Ok(T::default());
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Refusing to rewrite unparsable document under '{}': {}", key, e);
            AppError::InternalServerError(format!("Stored '{}' could not be read", key))
        })
    }

    /// Reads a plain string value. Accepts both a JSON string and a bare
    /// legacy value written without serialization.
    pub fn read_string(&self, key: &str) -> Result<Option<String>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        let value = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    /// Serializes `value` and overwrites the document under `key`.
    pub fn write<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.store.remove(key)
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.store.get(key)?.is_some())
    }

    /// Seeds every collection on first run and sets the `initialized` flag.
    ///
    /// Returns `true` when seeding happened, `false` when the flag was already
    /// present (in which case nothing is written). Either way the id
    /// generator resumes above the largest id already stored.
    pub fn initialize(&self) -> Result<bool> {
        if self.contains(keys::INITIALIZED)? {
            self.resume_ids()?;
            return Ok(false);
        }

        let now = self.now();
        let empty: [serde_json::Value; 0] = [];

        self.write(keys::USERS, &empty)?;
        self.write(keys::SCHOOL_QUIZZES, &catalog::default_school_quizzes(now))?;
        self.write(keys::COLLEGE_QUIZZES, &catalog::default_college_quizzes(now))?;
        self.write(keys::USER_SCORES, &empty)?;
        self.write(keys::NOTIFICATIONS, &NotificationBook::default())?;
        self.write(keys::AUDIT_LOG, &empty)?;
        self.write(keys::CHAT_HISTORY, &empty)?;
        self.write(keys::INITIALIZED, &json!("true"))?;

        tracing::info!("Storage initialized with default collections");
        Ok(true)
    }

    /// Feeds the largest stored record id to the id generator.
    fn resume_ids(&self) -> Result<()> {
        let scores: Vec<Value> = self.read(keys::USER_SCORES)?;
        let audit: Vec<Value> = self.read(keys::AUDIT_LOG)?;
        let book: Value = self.read(keys::NOTIFICATIONS)?;

        let notifications = ["school", "college"]
            .into_iter()
            .filter_map(|list| book.get(list).and_then(Value::as_array))
            .flatten();

        let max = scores
            .iter()
            .chain(audit.iter())
            .chain(notifications)
            .filter_map(|record| record.get("id").and_then(Value::as_u64))
            .max();

        if let Some(max) = max {
            self.ids.observe(max);
            tracing::debug!("Record ids resume after {}", max);
        }
        Ok(())
    }
}
