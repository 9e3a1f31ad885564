// src/models/notification.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Audience;

pub const DEFAULT_NOTIFICATION_TYPE: &str = "general";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub read: bool,
    /// Free-form category, "general" unless the sender says otherwise.
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    DEFAULT_NOTIFICATION_TYPE.to_string()
}

/// The `notifications` document: one bounded list per audience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationBook {
    #[serde(default)]
    pub school: Vec<Notification>,
    #[serde(default)]
    pub college: Vec<Notification>,
}

impl NotificationBook {
    pub fn list(&self, audience: Audience) -> &[Notification] {
        match audience {
            Audience::School => &self.school,
            Audience::College => &self.college,
        }
    }

    pub fn list_mut(&mut self, audience: Audience) -> &mut Vec<Notification> {
        match audience {
            Audience::School => &mut self.school,
            Audience::College => &mut self.college,
        }
    }
}

/// Who receives a new notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTarget {
    School,
    College,
    Both,
}

impl NotificationTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationTarget::School => "school",
            NotificationTarget::College => "college",
            NotificationTarget::Both => "both",
        }
    }

    pub fn audiences(&self) -> &'static [Audience] {
        match self {
            NotificationTarget::School => &[Audience::School],
            NotificationTarget::College => &[Audience::College],
            NotificationTarget::Both => &[Audience::School, Audience::College],
        }
    }
}

/// DTO for broadcasting a notification (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    pub audience: NotificationTarget,
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Message length must be between 1 and 1000 characters."
    ))]
    pub message: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub kind: Option<String>,
}

/// Notifications of one audience plus the unread counter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_reads_as_empty_lists() {
        let book: NotificationBook = serde_json::from_str(r#"{"school": []}"#).unwrap();
        assert!(book.college.is_empty());

        let n: Notification = serde_json::from_value(serde_json::json!({
            "id": 1,
            "message": "hi",
            "timestamp": "2026-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert!(!n.read);
        assert_eq!(n.kind, "general");
    }

    #[test]
    fn both_targets_school_then_college() {
        assert_eq!(
            NotificationTarget::Both.audiences(),
            &[Audience::School, Audience::College]
        );
        let t: NotificationTarget = serde_json::from_str("\"both\"").unwrap();
        assert_eq!(t, NotificationTarget::Both);

        // Names match the wire format
        for target in [
            NotificationTarget::School,
            NotificationTarget::College,
            NotificationTarget::Both,
        ] {
            assert_eq!(
                serde_json::to_value(target).unwrap(),
                serde_json::Value::from(target.as_str())
            );
        }
    }
}
