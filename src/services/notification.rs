// src/services/notification.rs

use crate::{
    db::Db,
    error::Result,
    models::{
        Audience,
        notification::{DEFAULT_NOTIFICATION_TYPE, Notification, NotificationBook, NotificationTarget},
    },
    services::keep_last,
    store::keys,
    utils::html::clean_html,
};

/// Per-audience cap; older entries are dropped first.
pub const NOTIFICATION_LIMIT: usize = 100;

/// Appends a notification for `target` and returns it.
///
/// For `Both` the same record (same id) goes into each list.
pub fn add_notification(
    db: &Db,
    target: NotificationTarget,
    message: &str,
    kind: Option<&str>,
) -> Result<Notification> {
    let mut book: NotificationBook = db.read_for_update(keys::NOTIFICATIONS)?;

    let notification = Notification {
        id: db.next_id(),
        message: clean_html(message),
        timestamp: db.now(),
        read: false,
        kind: kind.unwrap_or(DEFAULT_NOTIFICATION_TYPE).to_string(),
    };

    for audience in target.audiences() {
        book.list_mut(*audience).push(notification.clone());
    }

    keep_last(&mut book.school, NOTIFICATION_LIMIT);
    keep_last(&mut book.college, NOTIFICATION_LIMIT);

    db.write(keys::NOTIFICATIONS, &book)?;

    tracing::debug!("Notification {} queued for {:?}", notification.id, target);
    Ok(notification)
}

/// Oldest first.
pub fn get_notifications(db: &Db, audience: Audience) -> Result<Vec<Notification>> {
    let book: NotificationBook = db.read(keys::NOTIFICATIONS)?;
    Ok(book.list(audience).to_vec())
}

/// Marks the first notification with `id` as read. Returns whether one was
/// found; a missing id changes nothing.
pub fn mark_notification_as_read(db: &Db, audience: Audience, id: u64) -> Result<bool> {
    let mut book: NotificationBook = db.read_for_update(keys::NOTIFICATIONS)?;

    let Some(notification) = book.list_mut(audience).iter_mut().find(|n| n.id == id) else {
        return Ok(false);
    };
    notification.read = true;

    db.write(keys::NOTIFICATIONS, &book)?;
    Ok(true)
}

pub fn get_unread_count(db: &Db, audience: Audience) -> Result<usize> {
    let book: NotificationBook = db.read(keys::NOTIFICATIONS)?;
    Ok(book.list(audience).iter().filter(|n| !n.read).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::db_with_clock;

    #[test]
    fn new_notification_is_last_and_unread() {
        let (db, _) = db_with_clock();

        for (target, audience) in [
            (NotificationTarget::School, Audience::School),
            (NotificationTarget::College, Audience::College),
        ] {
            add_notification(&db, target, "earlier", None).unwrap();
            let n = add_notification(&db, target, "Quiz night", Some("event")).unwrap();

            let list = get_notifications(&db, audience).unwrap();
            let last = list.last().unwrap();
            assert_eq!(last, &n);
            assert!(!last.read);
            assert_eq!(last.kind, "event");
        }

        // Single-audience notifications stay in their own list
        assert_eq!(get_notifications(&db, Audience::School).unwrap().len(), 2);
        assert_eq!(get_notifications(&db, Audience::College).unwrap().len(), 2);
    }

    #[test]
    fn both_duplicates_with_same_id() {
        let (db, _) = db_with_clock();
        let n = add_notification(&db, NotificationTarget::Both, "Holiday", None).unwrap();
        assert_eq!(n.kind, "general");

        let school = get_notifications(&db, Audience::School).unwrap();
        let college = get_notifications(&db, Audience::College).unwrap();
        assert_eq!(school, vec![n.clone()]);
        assert_eq!(college, vec![n]);
    }

    #[test]
    fn list_is_capped_at_most_recent_hundred() {
        let (db, _) = db_with_clock();
        for i in 0..150 {
            add_notification(&db, NotificationTarget::School, &format!("msg {}", i), None).unwrap();
        }

        let list = get_notifications(&db, Audience::School).unwrap();
        assert_eq!(list.len(), NOTIFICATION_LIMIT);
        assert_eq!(list.first().unwrap().message, "msg 50");
        assert_eq!(list.last().unwrap().message, "msg 149");
        assert!(list.windows(2).all(|w| w[0].id < w[1].id));
        assert!(get_notifications(&db, Audience::College).unwrap().is_empty());
    }

    #[test]
    fn mark_read_and_unread_count() {
        let (db, _) = db_with_clock();
        let a = add_notification(&db, NotificationTarget::Both, "a", None).unwrap();
        add_notification(&db, NotificationTarget::School, "b", None).unwrap();
        assert_eq!(get_unread_count(&db, Audience::School).unwrap(), 2);

        assert!(mark_notification_as_read(&db, Audience::School, a.id).unwrap());
        assert_eq!(get_unread_count(&db, Audience::School).unwrap(), 1);
        // The college copy is a separate record
        assert_eq!(get_unread_count(&db, Audience::College).unwrap(), 1);

        assert!(!mark_notification_as_read(&db, Audience::School, 42).unwrap());
        assert_eq!(get_unread_count(&db, Audience::School).unwrap(), 1);
    }

    #[test]
    fn message_markup_is_sanitized() {
        let (db, _) = db_with_clock();
        let n = add_notification(
            &db,
            NotificationTarget::College,
            "<b>New quiz</b><script>alert(1)</script>",
            None,
        )
        .unwrap();
        assert_eq!(n.message, "<b>New quiz</b>");
    }

    #[test]
    fn unreadable_book_is_not_overwritten() {
        let (db, _) = db_with_clock();
        db.write(keys::NOTIFICATIONS, &serde_json::json!({ "school": "oops" }))
            .unwrap();

        let result = add_notification(&db, NotificationTarget::School, "hi", None);
        assert!(matches!(result, Err(crate::error::AppError::InternalServerError(_))));
        assert!(mark_notification_as_read(&db, Audience::School, 1).is_err());

        let raw: serde_json::Value = db.read(keys::NOTIFICATIONS).unwrap();
        assert_eq!(raw, serde_json::json!({ "school": "oops" }));
    }
}
