// src/services/session.rs

//! Current-user pointer, admin session and credential checks.

use chrono::Duration;
use validator::Validate;

use crate::{
    db::Db,
    error::{AppError, Result},
    models::{
        Audience,
        score::Points,
        session::AdminSession,
        user::{RegisterRequest, Role, User},
    },
    services::admin,
    store::keys,
    utils::hash::{hash_password, verify_password},
};

/// Default absolute lifetime of an admin session.
pub const ADMIN_SESSION_MINUTES: i64 = 30;

pub fn default_admin_session_ttl() -> Duration {
    Duration::minutes(ADMIN_SESSION_MINUTES)
}

fn find_user(db: &Db, email: &str) -> Result<Option<User>> {
    let users: Vec<User> = db.read(keys::USERS)?;
    Ok(users.into_iter().find(|u| u.email == email))
}

/// The logged-in user, or `None` when logged out or when the stored email no
/// longer matches any user.
pub fn get_current_user(db: &Db) -> Result<Option<User>> {
    let Some(email) = db.read_string(keys::CURRENT_USER)? else {
        return Ok(None);
    };

    let user = find_user(db, &email)?;
    if user.is_none() {
        tracing::debug!("Current user '{}' has no matching account", email);
    }
    Ok(user)
}

pub fn set_current_user(db: &Db, email: &str) -> Result<()> {
    db.write(keys::CURRENT_USER, email)
}

/// Returns the admin session while it is valid.
///
/// An expired session is removed from storage here; there is no background
/// expiry.
pub fn check_admin_session(db: &Db) -> Result<Option<AdminSession>> {
    let Some(session) = db.read_optional::<AdminSession>(keys::ADMIN_SESSION)? else {
        return Ok(None);
    };

    if !session.is_valid_at(db.now()) {
        tracing::info!("Admin session for {} expired", session.email);
        db.remove(keys::ADMIN_SESSION)?;
        return Ok(None);
    }

    Ok(Some(session))
}

/// Starts a new admin session, replacing any previous one.
pub fn set_admin_session(db: &Db, email: &str, ttl: Duration) -> Result<AdminSession> {
    let now = db.now();
    let session = AdminSession {
        email: email.to_string(),
        login_time: now,
        expires_at: now + ttl,
    };
    db.write(keys::ADMIN_SESSION, &session)?;
    tracing::info!("Admin session started for {}", email);
    Ok(session)
}

/// Forgets the current user and the admin session.
pub fn logout(db: &Db) -> Result<()> {
    db.remove(keys::CURRENT_USER)?;
    db.remove(keys::ADMIN_SESSION)?;
    tracing::info!("Logged out");
    Ok(())
}

/// A validated registration whose password is already hashed.
///
/// Building one is the slow half of registration and touches no storage, so
/// callers can do it before taking the store lock.
#[derive(Debug, Clone)]
pub struct NewAccount {
    email: String,
    name: String,
    role: Role,
    level: Option<Audience>,
    password_hash: String,
}

impl NewAccount {
    pub fn prepare(req: RegisterRequest) -> Result<Self> {
        req.validate()?;

        if req.role == Role::Student && req.level.is_none() {
            return Err(AppError::BadRequest(
                "Students must choose a level (school or college).".to_string(),
            ));
        }

        Ok(Self {
            password_hash: hash_password(&req.password)?,
            email: req.email,
            name: req.name,
            role: req.role,
            level: req.level,
        })
    }
}

/// Stores a prepared account. Emails are unique.
pub fn create_account(db: &Db, account: NewAccount) -> Result<User> {
    let mut users: Vec<User> = db.read_for_update(keys::USERS)?;
    if users.iter().any(|u| u.email == account.email) {
        return Err(AppError::Conflict(format!(
            "Email '{}' is already registered",
            account.email
        )));
    }

    let user = User {
        email: account.email,
        name: account.name,
        role: account.role.as_str().to_string(),
        level: account.level.map(|l| l.as_str().to_string()),
        total_score: Points::default(),
        password_hash: Some(account.password_hash),
        created_at: Some(db.now()),
        extra: Default::default(),
    };

    users.push(user.clone());
    db.write(keys::USERS, &users)?;

    tracing::info!("Registered {} ({})", user.email, user.role);
    Ok(user)
}

/// Creates an account in one go.
pub fn register_user(db: &Db, req: RegisterRequest) -> Result<User> {
    create_account(db, NewAccount::prepare(req)?)
}

/// The account `email` can sign in to: it must exist and carry a password.
pub fn find_account(db: &Db, email: &str) -> Result<User> {
    let user = find_user(db, email)?.ok_or(AppError::AuthError("User not found".to_string()))?;
    if user.password_hash.is_none() {
        return Err(AppError::AuthError("Account has no password set".to_string()));
    }
    Ok(user)
}

/// Compares `password` against the account's hash. No storage access.
pub fn check_password(user: &User, password: &str) -> Result<()> {
    let Some(hash) = user.password_hash.as_deref() else {
        return Err(AppError::AuthError("Account has no password set".to_string()));
    };

    if !verify_password(password, hash)? {
        return Err(AppError::AuthError("Invalid password".to_string()));
    }
    Ok(())
}

/// Records an authenticated user as logged in.
pub fn complete_login(db: &Db, user: &User) -> Result<()> {
    set_current_user(db, &user.email)?;
    tracing::info!("{} logged in", user.email);
    Ok(())
}

/// Opens an admin session for an authenticated user and audits it.
pub fn open_admin_session(db: &Db, user: &User, ttl: Duration) -> Result<AdminSession> {
    if !user.is_admin() {
        return Err(AppError::AuthError("Admin access required".to_string()));
    }

    let session = set_admin_session(db, &user.email, ttl)?;
    admin::add_audit_log(db, &user.email, "login", "Admin signed in")?;
    Ok(session)
}

/// Verifies credentials and records the user as logged in.
pub fn login(db: &Db, email: &str, password: &str) -> Result<User> {
    let user = find_account(db, email)?;
    check_password(&user, password)?;
    complete_login(db, &user)?;
    Ok(user)
}

/// Verifies admin credentials and opens an admin session.
pub fn admin_login(db: &Db, email: &str, password: &str, ttl: Duration) -> Result<AdminSession> {
    let user = find_account(db, email)?;
    check_password(&user, password)?;
    open_admin_session(db, &user, ttl)
}
