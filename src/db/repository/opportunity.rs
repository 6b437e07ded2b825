//! Opportunity Repository
//!
//! Opportunities carry a kind-specific 1:1 detail record and an ordered
//! requirement list. The detail table is chosen by the kind tag; the
//! non-matching table never holds a row for the opportunity.

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::db::models::{
    InternshipDetails, JobDetails, Opportunity, OpportunityCreate, OpportunityDetails,
    OpportunityKind, OpportunityResponse, OpportunityUpdate,
};
use crate::utils::{now_millis, snowflake_id};

const OPPORTUNITY_SELECT: &str =
    "SELECT id, title, description, location, kind, created_at, updated_at FROM opportunity";

/// Optional list filters (all combinable)
#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub kind: Option<OpportunityKind>,
    pub location: Option<String>,
    pub search: Option<String>,
}

pub async fn find_filtered(
    conn: &mut SqliteConnection,
    filter: &OpportunityFilter,
) -> RepoResult<Vec<Opportunity>> {
    let mut clauses: Vec<&str> = Vec::new();
    if filter.kind.is_some() {
        clauses.push("kind = ?");
    }
    if filter.location.is_some() {
        clauses.push("location LIKE ?");
    }
    if filter.search.is_some() {
        clauses.push("title LIKE ?");
    }

    let sql = if clauses.is_empty() {
        format!("{OPPORTUNITY_SELECT} ORDER BY created_at DESC")
    } else {
        format!(
            "{OPPORTUNITY_SELECT} WHERE {} ORDER BY created_at DESC",
            clauses.join(" AND ")
        )
    };

    let mut query = sqlx::query_as::<_, Opportunity>(&sql);
    if let Some(kind) = filter.kind {
        query = query.bind(kind);
    }
    if let Some(location) = &filter.location {
        query = query.bind(format!("%{location}%"));
    }
    if let Some(search) = &filter.search {
        query = query.bind(format!("%{search}%"));
    }

    let rows = query.fetch_all(conn).await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Opportunity>> {
    let sql = format!("{OPPORTUNITY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Opportunity>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn load_details(
    conn: &mut SqliteConnection,
    id: i64,
    kind: OpportunityKind,
) -> RepoResult<OpportunityDetails> {
    match kind {
        OpportunityKind::Job => {
            let details = sqlx::query_as::<_, JobDetails>(
                "SELECT employment_type, salary_range FROM job_detail WHERE opportunity_id = ?",
            )
            .bind(id)
            .fetch_optional(conn)
            .await?
            .unwrap_or_default();
            Ok(OpportunityDetails::Job(details))
        }
        OpportunityKind::Internship => {
            let details = sqlx::query_as::<_, InternshipDetails>(
                "SELECT duration_months, stipend FROM internship_detail WHERE opportunity_id = ?",
            )
            .bind(id)
            .fetch_optional(conn)
            .await?
            .unwrap_or_default();
            Ok(OpportunityDetails::Internship(details))
        }
    }
}

pub async fn load_requirements(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<String>> {
    let rows: Vec<String> = sqlx::query_scalar(
        "SELECT text FROM opportunity_requirement WHERE opportunity_id = ? ORDER BY position",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// Replace the requirement list, re-assigning positions 0..n
pub async fn replace_requirements(
    conn: &mut SqliteConnection,
    opportunity_id: i64,
    requirements: &[String],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM opportunity_requirement WHERE opportunity_id = ?")
        .bind(opportunity_id)
        .execute(&mut *conn)
        .await?;

    for (position, text) in requirements.iter().enumerate() {
        sqlx::query(
            "INSERT INTO opportunity_requirement (id, opportunity_id, text, position) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(snowflake_id())
        .bind(opportunity_id)
        .bind(text)
        .bind(position as i64)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Create an opportunity. `details` carries the already-validated variant,
/// so exactly the matching detail row is inserted.
pub async fn create(
    conn: &mut SqliteConnection,
    data: &OpportunityCreate,
    details: &OpportunityDetails,
) -> RepoResult<i64> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO opportunity (id, title, description, location, kind, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.location)
    .bind(details.kind())
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    match details {
        OpportunityDetails::Job(job) => {
            sqlx::query(
                "INSERT INTO job_detail (opportunity_id, employment_type, salary_range) \
                 VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(&job.employment_type)
            .bind(&job.salary_range)
            .execute(&mut *conn)
            .await?;
        }
        OpportunityDetails::Internship(internship) => {
            sqlx::query(
                "INSERT INTO internship_detail (opportunity_id, duration_months, stipend) \
                 VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(internship.duration_months)
            .bind(&internship.stipend)
            .execute(&mut *conn)
            .await?;
        }
    }

    replace_requirements(&mut *conn, id, &data.requirements).await?;

    Ok(id)
}

/// Update an opportunity. The kind is immutable; a detail payload for the
/// non-matching kind is a no-op.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &OpportunityUpdate,
) -> RepoResult<()> {
    let opportunity = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Opportunity {id} not found")))?;

    let mut sets: Vec<&str> = Vec::new();
    if data.title.is_some() {
        sets.push("title = ?");
    }
    if data.description.is_some() {
        sets.push("description = ?");
    }
    if data.location.is_some() {
        sets.push("location = ?");
    }

    if !sets.is_empty() {
        let sql = format!(
            "UPDATE opportunity SET {}, updated_at = ? WHERE id = ?",
            sets.join(", ")
        );

        let mut query = sqlx::query(&sql);
        if let Some(v) = &data.title {
            query = query.bind(v);
        }
        if let Some(v) = &data.description {
            query = query.bind(v);
        }
        if let Some(v) = &data.location {
            query = query.bind(v);
        }
        query = query.bind(now_millis()).bind(id);
        query.execute(&mut *conn).await?;
    } else {
        sqlx::query("UPDATE opportunity SET updated_at = ? WHERE id = ?")
            .bind(now_millis())
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    match opportunity.kind {
        OpportunityKind::Job => {
            if let Some(job) = &data.job_details {
                sqlx::query(
                    "UPDATE job_detail SET employment_type = ?, salary_range = ? \
                     WHERE opportunity_id = ?",
                )
                .bind(&job.employment_type)
                .bind(&job.salary_range)
                .bind(id)
                .execute(&mut *conn)
                .await?;
            }
        }
        OpportunityKind::Internship => {
            if let Some(internship) = &data.internship_details {
                sqlx::query(
                    "UPDATE internship_detail SET duration_months = ?, stipend = ? \
                     WHERE opportunity_id = ?",
                )
                .bind(internship.duration_months)
                .bind(&internship.stipend)
                .bind(id)
                .execute(&mut *conn)
                .await?;
            }
        }
    }

    if let Some(requirements) = &data.requirements {
        replace_requirements(&mut *conn, id, requirements).await?;
    }

    Ok(())
}

/// Delete an opportunity; detail and requirement rows cascade
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM opportunity WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Opportunity {id} not found")));
    }
    Ok(())
}

/// Assemble the response DTO from freshly persisted state
pub async fn response(conn: &mut SqliteConnection, id: i64) -> RepoResult<OpportunityResponse> {
    let opportunity = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Opportunity {id} not found")))?;
    response_for(conn, opportunity).await
}

pub async fn response_for(
    conn: &mut SqliteConnection,
    opportunity: Opportunity,
) -> RepoResult<OpportunityResponse> {
    let details = load_details(&mut *conn, opportunity.id, opportunity.kind).await?;
    let requirements = load_requirements(&mut *conn, opportunity.id).await?;
    Ok(OpportunityResponse::from_parts(
        opportunity,
        details,
        requirements,
    ))
}
