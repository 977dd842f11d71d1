//! Assessment template model: named JSON prefills for the assessment form,
//! maintained by admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssessmentTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Arbitrary JSON object of assessment-form field defaults.
    pub template_data: serde_json::Value,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTemplate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    pub template_data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTemplate {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub description: Option<String>,
    pub template_data: serde_json::Value,
}
