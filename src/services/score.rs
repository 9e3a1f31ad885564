// src/services/score.rs

use crate::{
    db::Db,
    error::Result,
    models::{
        Audience,
        score::{Points, UserScore},
        user::User,
    },
    store::keys,
};

/// Maximum number of students on a leaderboard.
pub const LEADERBOARD_LIMIT: usize = 100;

/// Records a quiz attempt and adds `score` to the player's total.
///
/// The attempt is recorded even when `user_id` matches no account; the total
/// is then simply not updated.
pub fn add_user_score(
    db: &Db,
    user_id: &str,
    quiz_id: i64,
    score: i64,
    category: &str,
    total_questions: u32,
) -> Result<UserScore> {
    let mut scores: Vec<UserScore> = db.read_for_update(keys::USER_SCORES)?;

    let record = UserScore {
        id: db.next_id(),
        user_id: user_id.to_string(),
        quiz_id,
        score: Points::from(score),
        category: category.to_string(),
        total_questions,
        timestamp: db.now(),
    };
    scores.push(record.clone());

    let mut users: Vec<User> = db.read_for_update(keys::USERS)?;
    match users.iter_mut().find(|u| u.email == user_id) {
        Some(user) => {
            user.total_score = user.total_score.plus(score);
            db.write(keys::USERS, &users)?;
        }
        None => {
            tracing::warn!("Score recorded for unknown user '{}'; total not updated", user_id);
        }
    }

    db.write(keys::USER_SCORES, &scores)?;
    Ok(record)
}

/// All attempts by `user_id`, in the order they were recorded.
pub fn get_user_performance(db: &Db, user_id: &str) -> Result<Vec<UserScore>> {
    let scores: Vec<UserScore> = db.read(keys::USER_SCORES)?;
    Ok(scores.into_iter().filter(|s| s.user_id == user_id).collect())
}

/// Students of `level`, highest total first. Ties keep registration order.
pub fn get_leaderboard(db: &Db, level: Audience) -> Result<Vec<User>> {
    let users: Vec<User> = db.read(keys::USERS)?;

    let mut board: Vec<User> = users
        .into_iter()
        .filter(|u| u.is_student() && u.has_level(level))
        .collect();
    // sort_by is stable
    board.sort_by(|a, b| b.total_score.as_f64().total_cmp(&a.total_score.as_f64()));
    board.truncate(LEADERBOARD_LIMIT);

    Ok(board)
}

pub fn get_school_leaderboard(db: &Db) -> Result<Vec<User>> {
    get_leaderboard(db, Audience::School)
}

pub fn get_college_leaderboard(db: &Db) -> Result<Vec<User>> {
    get_leaderboard(db, Audience::College)
}
