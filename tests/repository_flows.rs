//! Repository flows against an in-memory database.
//!
//! Exercises the delete guards, collection-replace semantics and the
//! partial-update null handling end to end on real SQL.

use leafclutch_server::db::DbService;
use leafclutch_server::db::models::{
    CatalogCreate, MemberCreate, MemberRole, MemberUpdate, MentorCreate, MentorUpdate,
    OpportunityCreate, ProjectCreate, ServiceCreate, TrainingCreate, TrainingUpdate,
};
use leafclutch_server::db::repository::{
    RepoError, catalog, member, mentor, opportunity, project, service, training,
};

async fn pool() -> sqlx::SqlitePool {
    DbService::new_in_memory()
        .await
        .expect("in-memory database")
        .pool
}

fn mentor_payload(name: &str) -> MentorCreate {
    MentorCreate {
        name: name.to_string(),
        photo_url: None,
        specialization: Some("Backend".to_string()),
    }
}

fn training_payload(title: &str, mentor_ids: Vec<i64>) -> TrainingCreate {
    TrainingCreate {
        title: title.to_string(),
        description: "A training".to_string(),
        photo_url: String::new(),
        base_price: 100.0,
        discount_value: Some(10.0),
        discount_kind: Some(leafclutch_server::pricing::DiscountKind::Percentage),
        benefits: vec!["Certificate".to_string()],
        mentor_ids,
    }
}

#[tokio::test]
async fn file_backed_database_boots_and_migrates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().unwrap()).await.unwrap();

    let mut conn = db.pool.acquire().await.unwrap();
    let created = mentor::create(&mut conn, mentor_payload("file")).await.unwrap();
    assert!(
        mentor::find_by_id(&mut conn, created.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn mentor_names_are_normalized_and_deduplicated() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let created = mentor::create(&mut conn, mentor_payload("  Ada LOVELACE "))
        .await
        .unwrap();
    assert_eq!(created.name, "ada lovelace");

    // Same name with different case/whitespace is a duplicate
    let err = mentor::create(&mut conn, mentor_payload("ADA lovelace"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn referenced_mentor_cannot_be_deleted() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let mentor_row = mentor::create(&mut conn, mentor_payload("grace")).await.unwrap();
    training::create(&mut conn, &training_payload("Rust Bootcamp", vec![mentor_row.id]))
        .await
        .unwrap();
    training::create(&mut conn, &training_payload("SQL Deep Dive", vec![mentor_row.id]))
        .await
        .unwrap();

    let err = mentor::delete(&mut conn, mentor_row.id).await.unwrap_err();
    let RepoError::Conflict(message) = err else {
        panic!("expected conflict, got {err:?}");
    };

    // The message enumerates the count and the exact training titles
    assert!(message.contains("2 training(s)"), "message: {message}");
    assert!(message.contains("Rust Bootcamp"));
    assert!(message.contains("SQL Deep Dive"));

    // Still present after the refused delete
    assert!(mentor::find_by_id(&mut conn, mentor_row.id).await.unwrap().is_some());
}

#[tokio::test]
async fn unreferenced_mentor_delete_removes_the_row() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let mentor_row = mentor::create(&mut conn, mentor_payload("alan")).await.unwrap();
    mentor::delete(&mut conn, mentor_row.id).await.unwrap();

    assert!(mentor::find_by_id(&mut conn, mentor_row.id).await.unwrap().is_none());
}

#[tokio::test]
async fn benefit_replace_preserves_order() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let id = training::create(&mut conn, &training_payload("Course", vec![]))
        .await
        .unwrap();

    let update = TrainingUpdate {
        benefits: Some(vec!["A".to_string(), "B".to_string()]),
        ..Default::default()
    };
    training::update(&mut conn, id, &update).await.unwrap();
    assert_eq!(training::load_benefits(&mut conn, id).await.unwrap(), ["A", "B"]);

    // Replacing again discards the previous list entirely
    let update = TrainingUpdate {
        benefits: Some(vec!["Z".to_string(), "A".to_string(), "Q".to_string()]),
        ..Default::default()
    };
    training::update(&mut conn, id, &update).await.unwrap();
    assert_eq!(
        training::load_benefits(&mut conn, id).await.unwrap(),
        ["Z", "A", "Q"]
    );
}

#[tokio::test]
async fn training_create_rejects_unknown_mentor() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let err = training::create(&mut conn, &training_payload("Course", vec![999]))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn training_response_carries_effective_price() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let id = training::create(&mut conn, &training_payload("Course", vec![]))
        .await
        .unwrap();

    // 10% off 100
    let response = training::response(&mut conn, id).await.unwrap();
    assert_eq!(response.effective_price, 90.0);

    // Clearing the discount via explicit nulls restores the base price
    let update = TrainingUpdate {
        discount_value: Some(None),
        discount_kind: Some(None),
        ..Default::default()
    };
    training::update(&mut conn, id, &update).await.unwrap();
    let response = training::response(&mut conn, id).await.unwrap();
    assert_eq!(response.discount_value, None);
    assert_eq!(response.effective_price, 100.0);
}

#[tokio::test]
async fn training_pagination_is_one_based_and_newest_first() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    for i in 0..5 {
        training::create(&mut conn, &training_payload(&format!("Course {i}"), vec![]))
            .await
            .unwrap();
    }

    assert_eq!(training::count(&mut conn).await.unwrap(), 5);
    let first_page = training::find_page(&mut conn, 2, 0).await.unwrap();
    assert_eq!(first_page.len(), 2);
    let second_page = training::find_page(&mut conn, 2, 2).await.unwrap();
    assert_eq!(second_page.len(), 2);
    let third_page = training::find_page(&mut conn, 2, 4).await.unwrap();
    assert_eq!(third_page.len(), 1);
}

#[tokio::test]
async fn technology_guard_spans_projects_and_services() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let tech = catalog::tech_create(
        &mut conn,
        CatalogCreate {
            name: "Rust".to_string(),
        },
    )
    .await
    .unwrap();

    project::create(
        &mut conn,
        &ProjectCreate {
            title: "Site Revamp".to_string(),
            description: "d".to_string(),
            photo_url: String::new(),
            project_link: String::new(),
            tech_ids: vec![tech.id],
        },
    )
    .await
    .unwrap();

    service::create(
        &mut conn,
        &ServiceCreate {
            title: "API Development".to_string(),
            description: "d".to_string(),
            photo_url: String::new(),
            base_price: 50.0,
            discount_value: None,
            discount_kind: None,
            tech_ids: vec![tech.id],
            offering_ids: vec![],
        },
    )
    .await
    .unwrap();

    let err = catalog::tech_delete(&mut conn, tech.id).await.unwrap_err();
    let RepoError::Conflict(message) = err else {
        panic!("expected conflict, got {err:?}");
    };
    assert!(message.contains("Site Revamp"));
    assert!(message.contains("API Development"));
}

#[tokio::test]
async fn project_delete_cascades_feedbacks_and_tech_links() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let tech = catalog::tech_create(
        &mut conn,
        CatalogCreate {
            name: "Svelte".to_string(),
        },
    )
    .await
    .unwrap();

    let project_id = project::create(
        &mut conn,
        &ProjectCreate {
            title: "Dashboard".to_string(),
            description: "d".to_string(),
            photo_url: String::new(),
            project_link: String::new(),
            tech_ids: vec![tech.id],
        },
    )
    .await
    .unwrap();

    project::add_feedback(
        &mut conn,
        project_id,
        &leafclutch_server::db::models::ProjectFeedbackCreate {
            client_name: "ACME".to_string(),
            client_photo: None,
            feedback_description: "great".to_string(),
            rating: 5.0,
        },
    )
    .await
    .unwrap();

    project::delete(&mut conn, project_id).await.unwrap();

    let feedbacks: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM project_feedback WHERE project_id = ?")
            .bind(project_id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(feedbacks, 0);

    let links: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM project_tech_map WHERE project_id = ?")
            .bind(project_id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(links, 0);

    // The catalog entry itself survives and is deletable again
    catalog::tech_delete(&mut conn, tech.id).await.unwrap();
}

#[tokio::test]
async fn opportunity_round_trip_keeps_requirement_order() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let payload: OpportunityCreate = serde_json::from_value(serde_json::json!({
        "title": "Backend Engineer",
        "location": "Remote",
        "type": "JOB",
        "job_details": { "employment_type": "Full-time", "salary_range": "60k-80k" },
        "requirements": ["Rust", "SQL", "HTTP"]
    }))
    .unwrap();
    let details = payload.details().unwrap();

    let id = opportunity::create(&mut conn, &payload, &details).await.unwrap();
    let response = opportunity::response(&mut conn, id).await.unwrap();

    assert_eq!(response.requirements, ["Rust", "SQL", "HTTP"]);
    assert!(response.job_details.is_some());
    assert!(response.internship_details.is_none());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["type"], "JOB");
    assert_eq!(json["job_details"]["salary_range"], "60k-80k");
}

#[tokio::test]
async fn member_update_distinguishes_absent_from_null() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    let created = member::create(
        &mut conn,
        MemberCreate {
            name: "Jo".to_string(),
            photo_url: Some("jo.jpg".to_string()),
            position: "Engineer".to_string(),
            start_date: "2025-01-01".to_string(),
            end_date: None,
            social_media: None,
            contact_email: "jo@example.com".to_string(),
            personal_email: None,
            contact_number: None,
            is_visible: true,
            role: MemberRole::Team,
        },
    )
    .await
    .unwrap();
    assert_eq!(created.photo_url.as_deref(), Some("jo.jpg"));

    // Absent photo_url leaves the stored value alone
    let update: MemberUpdate = serde_json::from_str(r#"{"position": "Lead"}"#).unwrap();
    let updated = member::update(&mut conn, created.id, update).await.unwrap();
    assert_eq!(updated.position, "Lead");
    assert_eq!(updated.photo_url.as_deref(), Some("jo.jpg"));

    // Explicit null clears it
    let update: MemberUpdate = serde_json::from_str(r#"{"photo_url": null}"#).unwrap();
    let updated = member::update(&mut conn, created.id, update).await.unwrap();
    assert_eq!(updated.photo_url, None);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn mentor_update_rejects_stealing_an_existing_name() {
    let pool = pool().await;
    let mut conn = pool.acquire().await.unwrap();

    mentor::create(&mut conn, mentor_payload("ada")).await.unwrap();
    let other = mentor::create(&mut conn, mentor_payload("grace")).await.unwrap();

    let err = mentor::update(
        &mut conn,
        other.id,
        MentorUpdate {
            name: Some(" ADA ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
