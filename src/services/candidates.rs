//! Candidate lifecycle: create, read, update, delete, public status check,
//! and the resume proxy.
//!
//! Resume handling is a sequence of non-transactional steps inside one
//! request: upload the file, mint a signed URL, persist the record. A
//! failure after the upload leaves an orphaned object in storage; nothing
//! retries or garbage-collects it.

use std::str::FromStr;

use bytes::Bytes;
use uuid::Uuid;

use crate::{
    database::DbPool,
    error::{Error, Result},
    models::candidates::{
        Candidate, CandidatePatch, CandidateStatus, NewCandidate, ResumeAction, StatusCheck,
    },
    queries::candidates as queries,
    services::{storage::ObjectStorage, uploads::{CandidateMultipart, ResumeUpload}},
    validation,
};

/// Creates a candidate from a parsed multipart body.
///
/// All field validation happens before the optional file is uploaded, so a
/// bad request never leaves anything behind in storage.
pub async fn create_candidate(
    pool: &DbPool,
    storage: &ObjectStorage,
    mut body: CandidateMultipart,
) -> Result<Candidate> {
    let name = validation::validate_required_string(&body.take("name").unwrap_or_default(), "name")?;
    let email = validation::validate_email(&body.take("email").unwrap_or_default(), "email")?;
    let phone = validation::validate_phone(&body.take("phone").unwrap_or_default())?;
    let job_title =
        validation::validate_required_string(&body.take("jobTitle").unwrap_or_default(), "jobTitle")?;
    let status = parse_status(body.take("status"))?;
    let referred_by = parse_referred_by(body.take("referredBy"))?;

    let resume_url = match body.resume.take() {
        Some(upload) => Some(store_resume(storage, upload).await?),
        None => None,
    };

    let row = queries::insert_candidate(
        pool,
        NewCandidate {
            name,
            email,
            phone,
            job_title,
            status,
            resume_url,
            referred_by,
        },
    )
    .await?;

    tracing::info!(
        operation = "create_candidate",
        candidate_id = %row.id,
        has_resume = row.resume_url.is_some(),
        "Candidate created",
    );

    Ok(row.into())
}

/// Lists all candidates with referrers resolved.
pub async fn list_candidates(pool: &DbPool) -> Result<Vec<Candidate>> {
    let rows = queries::list_candidates(pool).await?;
    Ok(rows.into_iter().map(Candidate::from).collect())
}

/// Gets one candidate by ID.
pub async fn get_candidate(pool: &DbPool, id: Uuid) -> Result<Candidate> {
    let row = queries::find_candidate_by_id(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

    Ok(row.into())
}

/// Applies a sparse update built from a multipart body.
///
/// Only supplied fields change. The resume reference is replaced only when
/// a new file arrived with the request; otherwise the stored URL stays as
/// it is. The update never re-reads and re-writes it.
pub async fn update_candidate(
    pool: &DbPool,
    storage: &ObjectStorage,
    id: Uuid,
    mut body: CandidateMultipart,
) -> Result<Candidate> {
    let name = body
        .take("name")
        .map(|v| validation::validate_required_string(&v, "name"))
        .transpose()?;
    let email = body
        .take("email")
        .map(|v| validation::validate_email(&v, "email"))
        .transpose()?;
    let phone = body
        .take("phone")
        .map(|v| validation::validate_phone(&v))
        .transpose()?;
    let job_title = body
        .take("jobTitle")
        .map(|v| validation::validate_required_string(&v, "jobTitle"))
        .transpose()?;
    let status = body
        .take("status")
        .map(|v| parse_status(Some(v)))
        .transpose()?;
    let referred_by = parse_referred_by(body.take("referredBy"))?;

    let resume = match body.resume.take() {
        Some(upload) => ResumeAction::Replace(store_resume(storage, upload).await?),
        None => ResumeAction::Keep,
    };

    let patch = CandidatePatch {
        name,
        email,
        phone,
        job_title,
        status,
        referred_by,
        resume,
    };

    let row = queries::update_candidate(pool, id, patch)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

    tracing::info!(operation = "update_candidate", candidate_id = %id, "Candidate updated");

    Ok(row.into())
}

/// Deletes a candidate record. The stored resume object is intentionally
/// left in place.
pub async fn delete_candidate(pool: &DbPool, id: Uuid) -> Result<()> {
    let rows_affected = queries::delete_candidate(pool, id).await?;

    if rows_affected == 0 {
        return Err(Error::NotFound("Candidate not found".to_string()));
    }

    tracing::info!(operation = "delete_candidate", candidate_id = %id, "Candidate deleted");

    Ok(())
}

/// Public referral status lookup by email.
pub async fn status_by_email(pool: &DbPool, email: &str) -> Result<StatusCheck> {
    let email = validation::validate_email(email, "email")?;

    queries::find_status_by_email(pool, &email)
        .await?
        .ok_or_else(|| Error::NotFound("No referral found for this email".to_string()))
}

/// Resolves a candidate's resume and fetches the bytes server-side.
///
/// Returns the candidate's name (for the download filename) together with
/// the file content. Missing candidate and missing resume are both plain
/// not-found outcomes.
pub async fn fetch_resume(
    pool: &DbPool,
    storage: &ObjectStorage,
    id: Uuid,
) -> Result<(String, Bytes)> {
    let row = queries::find_candidate_by_id(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

    let resume_url = row
        .resume_url
        .ok_or_else(|| Error::NotFound("No resume on file for this candidate".to_string()))?;

    // The stored URL's signature may have expired; re-sign from the key
    // when it can be recovered.
    let url = match ObjectStorage::key_from_url(&resume_url) {
        Some(key) => storage.signed_url(&key).await?,
        None => resume_url,
    };

    let bytes = storage.download(&url).await?;

    Ok((row.name, bytes))
}

/// Uploads a resume and mints its signed URL.
async fn store_resume(storage: &ObjectStorage, upload: ResumeUpload) -> Result<String> {
    let key = ObjectStorage::object_key(&upload.filename);
    let content_type = upload
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    storage.put_object(&key, upload.bytes, &content_type).await?;
    storage.signed_url(&key).await
}

fn parse_status(raw: Option<String>) -> Result<CandidateStatus> {
    match raw {
        None => Ok(CandidateStatus::default()),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(CandidateStatus::default());
            }
            CandidateStatus::from_str(trimmed).map_err(|_| {
                Error::validation(
                    "status",
                    "Status must be one of Pending, Reviewed, Hired, Rejected",
                )
            })
        }
    }
}

fn parse_referred_by(raw: Option<String>) -> Result<Option<Uuid>> {
    match raw {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            Uuid::parse_str(trimmed)
                .map(Some)
                .map_err(|_| Error::validation("referredBy", "referredBy must be a valid user id"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_defaults_to_pending() {
        assert_eq!(parse_status(None).unwrap(), CandidateStatus::Pending);
        assert_eq!(
            parse_status(Some("".to_string())).unwrap(),
            CandidateStatus::Pending
        );
    }

    #[test]
    fn test_parse_status_accepts_enumerated_values() {
        assert_eq!(
            parse_status(Some("Hired".to_string())).unwrap(),
            CandidateStatus::Hired
        );
        assert!(parse_status(Some("Interview".to_string())).is_err());
    }

    #[test]
    fn test_parse_referred_by() {
        let id = Uuid::now_v7();
        assert_eq!(parse_referred_by(Some(id.to_string())).unwrap(), Some(id));
        assert_eq!(parse_referred_by(None).unwrap(), None);
        assert_eq!(parse_referred_by(Some("  ".to_string())).unwrap(), None);
        assert!(parse_referred_by(Some("not-a-uuid".to_string())).is_err());
    }
}
