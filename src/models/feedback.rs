//! User feedback model, including reactivation requests from deactivated
//! accounts, with admin responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "feedback_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Pending,
    Responded,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub message: String,
    pub category: String,
    pub status: FeedbackStatus,
    pub admin_response: Option<String>,
    pub responded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

/// Feedback row joined with submitter and responder names for the admin view.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedbackWithNames {
    pub id: Uuid,
    pub subject: String,
    pub message: String,
    pub category: String,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub full_name: String,
    pub admin_response: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFeedback {
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondFeedback {
    #[validate(length(min = 1))]
    pub response: String,
}

/// Reactivation request filed by a deactivated account, before login succeeds.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactivationRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
