use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored candidate. `email` is unique across the table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub years_experience: Option<i32>,
    pub skills: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub status: String,
    pub source: Option<String>,
    pub desired_salary: Option<String>,
    pub desired_role: Option<String>,
    pub availability: Option<String>,
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a candidate. Built by the CSV importer; optional columns
/// map to NULL, status/source carry the import defaults.
#[derive(Debug, Clone, Default)]
pub struct NewCandidate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_title: Option<String>,
    pub current_company: Option<String>,
    pub years_experience: Option<i32>,
    pub skills: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub status: String,
    pub source: Option<String>,
    pub desired_salary: Option<String>,
    pub desired_role: Option<String>,
    pub availability: Option<String>,
}
