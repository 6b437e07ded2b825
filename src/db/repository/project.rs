//! Project Repository
//!
//! Projects own feedback rows (cascade on delete) and map to the
//! technology catalog through `project_tech_map`.

use sqlx::SqliteConnection;

use super::{RepoError, RepoResult};
use crate::db::models::{
    Project, ProjectCreate, ProjectFeedback, ProjectFeedbackCreate, ProjectResponse, ProjectUpdate,
};
use crate::utils::{now_millis, snowflake_id};

const PROJECT_SELECT: &str = "SELECT id, title, description, photo_url, project_link, \
     created_at, updated_at FROM project";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Project>> {
    let sql = format!("{PROJECT_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Project>(&sql).fetch_all(conn).await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Project>> {
    let sql = format!("{PROJECT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Project>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

pub async fn load_tech_names(conn: &mut SqliteConnection, id: i64) -> RepoResult<Vec<String>> {
    let rows: Vec<String> = sqlx::query_scalar(
        "SELECT st.name FROM project_tech_map m JOIN service_tech st ON st.id = m.tech_id \
         WHERE m.project_id = ? ORDER BY st.name",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn load_feedbacks(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Vec<ProjectFeedback>> {
    let rows = sqlx::query_as::<_, ProjectFeedback>(
        "SELECT id, client_name, client_photo, feedback_description, rating \
         FROM project_feedback WHERE project_id = ? ORDER BY created_at",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

/// Replace the technology associations, validating every referenced id
pub async fn replace_techs(
    conn: &mut SqliteConnection,
    project_id: i64,
    tech_ids: &[i64],
) -> RepoResult<()> {
    sqlx::query("DELETE FROM project_tech_map WHERE project_id = ?")
        .bind(project_id)
        .execute(&mut *conn)
        .await?;

    for tech_id in tech_ids {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM service_tech WHERE id = ?")
            .bind(tech_id)
            .fetch_optional(&mut *conn)
            .await?;
        if exists.is_none() {
            return Err(RepoError::Validation(
                "One or more tech IDs are invalid".into(),
            ));
        }

        sqlx::query("INSERT INTO project_tech_map (id, project_id, tech_id) VALUES (?, ?, ?)")
            .bind(snowflake_id())
            .bind(project_id)
            .bind(tech_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub async fn create(conn: &mut SqliteConnection, data: &ProjectCreate) -> RepoResult<i64> {
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO project (id, title, description, photo_url, project_link, created_at, \
         updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.photo_url)
    .bind(&data.project_link)
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    replace_techs(&mut *conn, id, &data.tech_ids).await?;

    Ok(id)
}

pub async fn update(conn: &mut SqliteConnection, id: i64, data: &ProjectUpdate) -> RepoResult<()> {
    if find_by_id(&mut *conn, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Project {id} not found")));
    }

    let mut sets: Vec<&str> = Vec::new();
    if data.title.is_some() {
        sets.push("title = ?");
    }
    if data.description.is_some() {
        sets.push("description = ?");
    }
    if data.photo_url.is_some() {
        sets.push("photo_url = ?");
    }
    if data.project_link.is_some() {
        sets.push("project_link = ?");
    }

    if !sets.is_empty() {
        let sql = format!(
            "UPDATE project SET {}, updated_at = ? WHERE id = ?",
            sets.join(", ")
        );

        let mut query = sqlx::query(&sql);
        if let Some(v) = &data.title {
            query = query.bind(v);
        }
        if let Some(v) = &data.description {
            query = query.bind(v);
        }
        if let Some(v) = &data.photo_url {
            query = query.bind(v);
        }
        if let Some(v) = &data.project_link {
            query = query.bind(v);
        }
        query = query.bind(now_millis()).bind(id);
        query.execute(&mut *conn).await?;
    } else {
        sqlx::query("UPDATE project SET updated_at = ? WHERE id = ?")
            .bind(now_millis())
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }

    if let Some(tech_ids) = &data.tech_ids {
        replace_techs(&mut *conn, id, tech_ids).await?;
    }

    Ok(())
}

/// Delete a project; feedback and tech-map rows cascade
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM project WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Project {id} not found")));
    }
    Ok(())
}

pub async fn add_feedback(
    conn: &mut SqliteConnection,
    project_id: i64,
    data: &ProjectFeedbackCreate,
) -> RepoResult<i64> {
    if find_by_id(&mut *conn, project_id).await?.is_none() {
        return Err(RepoError::NotFound(format!(
            "Project {project_id} not found"
        )));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO project_feedback (id, project_id, client_name, client_photo, \
         feedback_description, rating, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(project_id)
    .bind(&data.client_name)
    .bind(&data.client_photo)
    .bind(&data.feedback_description)
    .bind(data.rating)
    .bind(now_millis())
    .execute(&mut *conn)
    .await?;

    Ok(id)
}

pub async fn delete_feedback(
    conn: &mut SqliteConnection,
    project_id: i64,
    feedback_id: i64,
) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM project_feedback WHERE id = ? AND project_id = ?")
        .bind(feedback_id)
        .bind(project_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Feedback {feedback_id} not found"
        )));
    }
    Ok(())
}

/// Assemble the response DTO from freshly persisted state
pub async fn response(conn: &mut SqliteConnection, id: i64) -> RepoResult<ProjectResponse> {
    let project = find_by_id(&mut *conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Project {id} not found")))?;
    response_for(conn, project).await
}

pub async fn response_for(
    conn: &mut SqliteConnection,
    project: Project,
) -> RepoResult<ProjectResponse> {
    let techs = load_tech_names(&mut *conn, project.id).await?;
    let feedbacks = load_feedbacks(&mut *conn, project.id).await?;

    Ok(ProjectResponse {
        id: project.id,
        title: project.title,
        description: project.description,
        photo_url: project.photo_url,
        techs,
        project_link: project.project_link,
        feedbacks,
        created_at: project.created_at,
        updated_at: project.updated_at,
    })
}
