use uuid::Uuid;

use crate::{
    database::DbPool,
    error::{Error, Result},
    models::candidates::{CandidatePatch, CandidateRow, NewCandidate, ResumeAction, StatusCheck},
};

/// Columns selected for every candidate read, with the referring user
/// resolved to name and email via LEFT JOIN.
const CANDIDATE_COLUMNS: &str = r#"
    c.id, c.name, c.email, c.phone, c.job_title, c.status, c.resume_url,
    c.referred_by, u.name AS referrer_name, u.email AS referrer_email,
    c.created_at, c.updated_at
"#;

fn map_unique_email(e: sqlx::Error) -> Error {
    let error_msg = e.to_string().to_lowercase();

    if error_msg.contains("unique")
        || error_msg.contains("duplicate key")
        || error_msg.contains("candidates_email_key")
    {
        Error::validation("email", "A candidate with this email already exists")
    } else {
        Error::Sqlx(e)
    }
}

/// Inserts a new candidate and returns it with the referrer resolved.
pub async fn insert_candidate(pool: &DbPool, new: NewCandidate) -> Result<CandidateRow> {
    let sql = format!(
        r#"
        WITH inserted AS (
            INSERT INTO candidates (id, name, email, phone, job_title, status, resume_url, referred_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        )
        SELECT {CANDIDATE_COLUMNS}
        FROM inserted c
        LEFT JOIN users u ON u.id = c.referred_by
        "#
    );

    let row = sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(Uuid::now_v7())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.job_title)
        .bind(new.status)
        .bind(&new.resume_url)
        .bind(new.referred_by)
        .fetch_one(pool)
        .await
        .map_err(map_unique_email)?;

    Ok(row)
}

/// Lists all candidates with their referrers resolved.
pub async fn list_candidates(pool: &DbPool) -> Result<Vec<CandidateRow>> {
    let sql = format!(
        r#"
        SELECT {CANDIDATE_COLUMNS}
        FROM candidates c
        LEFT JOIN users u ON u.id = c.referred_by
        ORDER BY c.created_at DESC
        "#
    );

    let rows = sqlx::query_as::<_, CandidateRow>(&sql)
        .fetch_all(pool)
        .await
        .map_err(Error::Sqlx)?;

    Ok(rows)
}

/// Gets a single candidate by ID. The candidate may not exist.
pub async fn find_candidate_by_id(pool: &DbPool, id: Uuid) -> Result<Option<CandidateRow>> {
    let sql = format!(
        r#"
        SELECT {CANDIDATE_COLUMNS}
        FROM candidates c
        LEFT JOIN users u ON u.id = c.referred_by
        WHERE c.id = $1
        "#
    );

    let row = sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Error::Sqlx)?;

    Ok(row)
}

/// Applies a sparse patch to a candidate and refreshes `updated_at`.
///
/// Absent fields are coalesced to their current values inside the UPDATE;
/// `resume_url` is only written when the patch carries a replacement, so an
/// update without a new file never drops the stored link. Returns `None`
/// when the candidate does not exist.
pub async fn update_candidate(
    pool: &DbPool,
    id: Uuid,
    patch: CandidatePatch,
) -> Result<Option<CandidateRow>> {
    let (replace_resume, new_resume_url) = match &patch.resume {
        ResumeAction::Keep => (false, None),
        ResumeAction::Replace(url) => (true, Some(url.clone())),
    };

    let sql = format!(
        r#"
        WITH updated AS (
            UPDATE candidates SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                job_title = COALESCE($5, job_title),
                status = COALESCE($6, status),
                referred_by = COALESCE($7, referred_by),
                resume_url = CASE WHEN $8 THEN $9 ELSE resume_url END,
                updated_at = now()
            WHERE id = $1
            RETURNING *
        )
        SELECT {CANDIDATE_COLUMNS}
        FROM updated c
        LEFT JOIN users u ON u.id = c.referred_by
        "#
    );

    let row = sqlx::query_as::<_, CandidateRow>(&sql)
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.phone)
        .bind(&patch.job_title)
        .bind(patch.status)
        .bind(patch.referred_by)
        .bind(replace_resume)
        .bind(&new_resume_url)
        .fetch_optional(pool)
        .await
        .map_err(map_unique_email)?;

    Ok(row)
}

/// Deletes a candidate by ID. Returns the number of rows removed.
pub async fn delete_candidate(pool: &DbPool, id: Uuid) -> Result<u64> {
    let rows_affected = sqlx::query(
        r#"
        DELETE FROM candidates
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map_err(Error::Sqlx)?
    .rows_affected();

    Ok(rows_affected)
}

/// Public status lookup by (lowercased) email: status, name, and job title
/// only.
pub async fn find_status_by_email(pool: &DbPool, email: &str) -> Result<Option<StatusCheck>> {
    let status = sqlx::query_as::<_, StatusCheck>(
        r#"
        SELECT status, name, job_title
        FROM candidates
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(Error::Sqlx)?;

    Ok(status)
}
