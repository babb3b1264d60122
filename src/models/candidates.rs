use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Referral pipeline state. Parsed once at the API boundary; the database
/// only ever stores one of these four strings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
    sqlx::Type,
)]
#[sqlx(type_name = "text")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Reviewed,
    Hired,
    Rejected,
}

/// Referring user resolved for API responses: name and email only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferredBy {
    pub name: String,
    pub email: String,
}

/// Candidate row joined with its referring user, as read from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub status: CandidateStatus,
    pub resume_url: Option<String>,
    pub referred_by: Option<Uuid>,
    pub referrer_name: Option<String>,
    pub referrer_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API representation of a candidate. Field names match the wire format the
/// client consumes (`jobTitle`, `resumeUrl`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub status: CandidateStatus,
    pub resume_url: Option<String>,
    pub referred_by: Option<ReferredBy>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CandidateRow> for Candidate {
    fn from(row: CandidateRow) -> Self {
        let referred_by = match (row.referrer_name, row.referrer_email) {
            (Some(name), Some(email)) => Some(ReferredBy { name, email }),
            _ => None,
        };
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            job_title: row.job_title,
            status: row.status,
            resume_url: row.resume_url,
            referred_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validated fields for a new candidate, ready to persist.
#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub job_title: String,
    pub status: CandidateStatus,
    pub resume_url: Option<String>,
    pub referred_by: Option<Uuid>,
}

/// What to do with the stored resume reference during an update.
///
/// The update contract is explicit: callers either keep the existing URL or
/// replace it with a freshly minted one. Absence of a field never means
/// "drop the resume".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeAction {
    Keep,
    Replace(String),
}

/// Sparse update: only supplied fields are written, everything else is left
/// untouched by the UPDATE statement.
#[derive(Debug, Clone)]
pub struct CandidatePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub status: Option<CandidateStatus>,
    pub referred_by: Option<Uuid>,
    pub resume: ResumeAction,
}

/// Public status-check payload: deliberately excludes contact details and
/// the resume link.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheck {
    pub status: CandidateStatus,
    pub name: String,
    pub job_title: String,
}
