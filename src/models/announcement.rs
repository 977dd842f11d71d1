//! System announcement model, published by admins and shown to patients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "announcement_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    Info,
    Warning,
    Alert,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub kind: AnnouncementKind,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Trimmed view served to patients.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnnouncementNotice {
    pub title: String,
    pub content: String,
    pub kind: AnnouncementKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncement {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub kind: AnnouncementKind,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AnnouncementKind::Warning).unwrap(),
            "\"warning\""
        );
    }
}
