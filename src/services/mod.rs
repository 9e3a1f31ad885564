// src/services/mod.rs

//! Domain operations. Each one is a read-modify-write over [`crate::db::Db`]
//! and takes the database explicitly.

pub mod admin;
pub mod catalog;
pub mod export;
pub mod notification;
pub mod quiz;
pub mod score;
pub mod session;

/// Drops the oldest entries so that at most `limit` remain.
pub(crate) fn keep_last<T>(list: &mut Vec<T>, limit: usize) {
    if list.len() > limit {
        let excess = list.len() - limit;
        list.drain(..excess);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::{DateTime, Utc};

    use crate::{
        db::Db,
        models::{score::Points, user::User},
        store::{MemoryStore, keys},
        utils::clock::ManualClock,
    };

    pub fn start_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-05-04T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    /// In-memory database with a controllable clock.
    pub fn db_with_clock() -> (Db, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start_time()));
        let db = Db::with_clock(Arc::new(MemoryStore::new()), clock.clone());
        (db, clock)
    }

    pub fn student(email: &str, level: &str, total_score: i64) -> User {
        User {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            role: "student".to_string(),
            level: Some(level.to_string()),
            total_score: Points::from(total_score),
            password_hash: None,
            created_at: None,
            extra: Default::default(),
        }
    }

    pub fn seed_users(db: &Db, users: &[User]) {
        db.write(keys::USERS, users).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_last_drops_oldest() {
        let mut v: Vec<u32> = (1..=7).collect();
        keep_last(&mut v, 3);
        assert_eq!(v, vec![5, 6, 7]);

        let mut short = vec![1, 2];
        keep_last(&mut short, 3);
        assert_eq!(short, vec![1, 2]);
    }
}
