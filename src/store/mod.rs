// src/store/mod.rs

//! Key-value persistence backends.
//!
//! A store maps string keys to string values, the same contract as a browser's
//! per-origin storage. Each logical collection lives under one fixed key as a
//! whole JSON document; see [`keys`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Synchronous string key-value store.
///
/// Implementations serialize individual calls internally. A `set` replaces the
/// whole value for one key; there is no cross-key transaction.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Fixed storage keys, one per logical collection.
pub mod keys {
    pub const USERS: &str = "users";
    pub const SCHOOL_QUIZZES: &str = "schoolQuizzes";
    pub const COLLEGE_QUIZZES: &str = "collegeQuizzes";
    pub const USER_SCORES: &str = "userScores";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const AUDIT_LOG: &str = "auditLog";
    pub const CHAT_HISTORY: &str = "chatHistory";
    pub const CURRENT_USER: &str = "currentUser";
    pub const ADMIN_SESSION: &str = "adminSession";
    pub const INITIALIZED: &str = "initialized";
}
