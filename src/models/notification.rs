use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user notification as returned by `GET /api/accounts/notifications/unread/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<i64>,
    pub message: String,
    pub is_read: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Count of notifications still unread (the header badge value).
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_deserializes_wire_shape() {
        let json = r#"{"id": 4, "user": 1, "message": "You received 100.00 EGP", "is_read": false, "timestamp": "2024-03-01T10:00:00Z"}"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.message, "You received 100.00 EGP");
        assert!(!notification.is_read);
        assert!(notification.timestamp.is_some());
    }

    #[test]
    fn test_unread_count_skips_read() {
        let make = |read| Notification {
            id: None,
            message: "m".to_string(),
            is_read: read,
            timestamp: None,
        };
        let notifications = vec![make(false), make(true), make(false)];
        assert_eq!(unread_count(&notifications), 2);
        assert_eq!(unread_count(&[]), 0);
    }
}
