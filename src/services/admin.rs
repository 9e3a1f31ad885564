// src/services/admin.rs

use crate::{
    db::Db,
    error::Result,
    models::{Audience, analytics::Analytics, audit::AuditLogEntry, score::UserScore, user::User},
    services::keep_last,
    store::keys,
};

/// The audit log keeps only this many most recent entries.
pub const AUDIT_LOG_LIMIT: usize = 500;

pub fn add_audit_log(db: &Db, admin: &str, action: &str, details: &str) -> Result<AuditLogEntry> {
    let mut log: Vec<AuditLogEntry> = db.read_for_update(keys::AUDIT_LOG)?;

    let entry = AuditLogEntry {
        id: db.next_id(),
        admin: admin.to_string(),
        action: action.to_string(),
        details: details.to_string(),
        timestamp: db.now(),
    };
    log.push(entry.clone());
    keep_last(&mut log, AUDIT_LOG_LIMIT);

    db.write(keys::AUDIT_LOG, &log)?;
    Ok(entry)
}

/// Oldest first.
pub fn get_audit_log(db: &Db) -> Result<Vec<AuditLogEntry>> {
    db.read(keys::AUDIT_LOG)
}

/// Every student account.
pub fn get_all_users(db: &Db) -> Result<Vec<User>> {
    let users: Vec<User> = db.read(keys::USERS)?;
    Ok(users.into_iter().filter(User::is_student).collect())
}

/// Mean total with two decimals, halves rounded away from zero.
fn average_score(users: &[&User]) -> String {
    if users.is_empty() {
        return format!("{:.2}", 0.0);
    }
    let sum: f64 = users.iter().map(|u| u.total_score.as_f64()).sum();
    let average = sum / users.len() as f64;
    format!("{:.2}", (average * 100.0).round() / 100.0)
}

/// Headcounts per level, average totals and number of recorded attempts.
///
/// Level groups include every account with that level, whatever the role.
pub fn get_analytics(db: &Db) -> Result<Analytics> {
    let users: Vec<User> = db.read(keys::USERS)?;
    let scores: Vec<UserScore> = db.read(keys::USER_SCORES)?;

    let school: Vec<&User> = users.iter().filter(|u| u.has_level(Audience::School)).collect();
    let college: Vec<&User> = users.iter().filter(|u| u.has_level(Audience::College)).collect();

    Ok(Analytics {
        total_users: users.len(),
        school_students: school.len(),
        college_students: college.len(),
        average_school_score: average_score(&school),
        average_college_score: average_score(&college),
        total_scores_recorded: scores.len(),
    })
}
