//! Referential delete guard
//!
//! Entities that other rows point at (mentors, technologies, offerings)
//! must not be deleted while a reference exists. The guard runs the
//! caller-supplied label query for the target, and refuses the delete with
//! a user-facing message listing the referencing parents.

use sqlx::SqliteConnection;

use super::repository::{RepoError, RepoResult};

/// Check whether `target_id` can be deleted.
///
/// `label_sql` selects one human-readable label (training title, service
/// name, ...) per referencing row; the target id is bound as `?1` and may
/// appear multiple times (e.g. a UNION over two join tables).
///
/// Returns `RepoError::Conflict` with the count and comma-joined labels
/// when references exist. The message is part of the API contract, not
/// just a diagnostic.
pub async fn check_deletable(
    conn: &mut SqliteConnection,
    target_id: i64,
    label_sql: &str,
    entity: &str,
    verb: &str,
    dependent_noun: &str,
) -> RepoResult<()> {
    let labels: Vec<String> = sqlx::query_scalar(label_sql)
        .bind(target_id)
        .fetch_all(conn)
        .await?;

    if labels.is_empty() {
        return Ok(());
    }

    Err(RepoError::Conflict(format!(
        "Cannot delete {entity}. Currently {verb} {} {dependent_noun}(s): {}",
        labels.len(),
        labels.join(", ")
    )))
}
