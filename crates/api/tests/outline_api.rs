//! HTTP-level integration tests for outline items, the tree view and reorder.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Create / list / tree
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_item_returns_201(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/items"),
        json!({"title": "Mechanics", "level": "chapter"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Mechanics");
    assert_eq!(json["data"]["level"], "chapter");
    assert_eq!(json["data"]["sort_order"], 0);
    assert_eq!(json["data"]["content_generated"], false);
    assert!(json["data"]["parent_id"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_item_with_invalid_level_is_rejected(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/items"),
        json!({"title": "Part I", "level": "part"}),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_item_under_foreign_parent_returns_400(pool: SqlitePool) {
    let other = common::create_project(&pool, "Other").await;
    let foreign = common::create_item(&pool, &other, None, "Elsewhere", "chapter", 0).await;
    let project = common::create_project(&pool, "Book").await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/items"),
        json!({"parentId": foreign, "title": "Stray", "level": "section"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_sorted_by_sort_order(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    common::create_item(&pool, &project, None, "Third", "chapter", 2).await;
    common::create_item(&pool, &project, None, "First", "chapter", 0).await;
    common::create_item(&pool, &project, None, "Second", "chapter", 1).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tree_nests_children_under_parents(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let chapter = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;
    common::create_item(&pool, &project, Some(chapter.as_str()), "Forces", "section", 1).await;
    let kinematics =
        common::create_item(&pool, &project, Some(chapter.as_str()), "Kinematics", "section", 0).await;
    common::create_item(&pool, &project, Some(kinematics.as_str()), "Velocity", "subsection", 0).await;
    common::create_item(&pool, &project, None, "Heat", "chapter", 1).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/tree"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let roots = json["data"].as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["title"], "Mechanics");
    assert_eq!(roots[1]["title"], "Heat");
    assert_eq!(roots[0]["children"][0]["title"], "Kinematics");
    assert_eq!(roots[0]["children"][1]["title"], "Forces");
    assert_eq!(roots[0]["children"][0]["children"][0]["title"], "Velocity");
    assert_eq!(roots[1]["children"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn outline_of_unknown_project_returns_404(pool: SqlitePool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects/missing/outline/tree",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_item_title_and_move_to_top_level(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let chapter = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;
    let section =
        common::create_item(&pool, &project, Some(chapter.as_str()), "Kinematics", "section", 0).await;
    let uri = format!("/api/v1/projects/{project}/outline/items/{section}");

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"title": "Motion"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Motion");
    assert_eq!(json["data"]["parent_id"], chapter.as_str());

    let response = put_json(
        common::build_test_app(pool),
        &uri,
        json!({"parent_id": null, "level": "chapter"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["parent_id"].is_null());
    assert_eq!(json["data"]["level"], "chapter");
    assert_eq!(json["data"]["title"], "Motion");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_item_as_own_parent_returns_400(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let chapter = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/items/{chapter}"),
        json!({"parentId": chapter}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_item_under_own_descendant_returns_400(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let chapter = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;
    let section =
        common::create_item(&pool, &project, Some(chapter.as_str()), "Kinematics", "section", 0).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/items/{chapter}"),
        json!({"parent_id": section}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("cycle"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_item_in_other_project_returns_404(pool: SqlitePool) {
    let other = common::create_project(&pool, "Other").await;
    let item = common::create_item(&pool, &other, None, "Elsewhere", "chapter", 0).await;
    let project = common::create_project(&pool, "Book").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/items/{item}"),
        json!({"title": "Hijacked"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_item_removes_descendants(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let chapter = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;
    common::create_item(&pool, &project, Some(chapter.as_str()), "Kinematics", "section", 0).await;
    common::create_item(&pool, &project, None, "Heat", "chapter", 1).await;

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project}/outline/items/{chapter}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline"),
    )
    .await;
    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Heat");
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_moves_and_resorts_items(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let mechanics = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;
    let heat = common::create_item(&pool, &project, None, "Heat", "chapter", 1).await;
    let section =
        common::create_item(&pool, &project, Some(mechanics.as_str()), "Entropy", "section", 0).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project}/outline/reorder"),
        json!({"updates": [
            {"itemId": heat, "parentId": null, "sortOrder": 0},
            {"itemId": mechanics, "parentId": null, "sortOrder": 1},
            {"itemId": section, "parentId": heat, "sortOrder": 0}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["updated"], 3);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/tree"),
    )
    .await;
    let json = body_json(response).await;
    let roots = json["data"].as_array().unwrap();
    assert_eq!(roots[0]["title"], "Heat");
    assert_eq!(roots[0]["children"][0]["title"], "Entropy");
    assert_eq!(roots[1]["title"], "Mechanics");
    assert_eq!(roots[1]["children"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_creating_cycle_is_rejected_without_writes(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;
    let chapter = common::create_item(&pool, &project, None, "Mechanics", "chapter", 0).await;
    let section =
        common::create_item(&pool, &project, Some(chapter.as_str()), "Kinematics", "section", 0).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project}/outline/reorder"),
        json!({"updates": [
            {"itemId": chapter, "parentId": section, "sortOrder": 5}
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (parent, sort_order): (Option<String>, i64) =
        sqlx::query_as("SELECT parent_id, sort_order FROM outlines WHERE id = ?1")
            .bind(&chapter)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(parent, None);
    assert_eq!(sort_order, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reorder_with_unknown_item_returns_404(pool: SqlitePool) {
    let project = common::create_project(&pool, "Book").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project}/outline/reorder"),
        json!({"updates": [{"itemId": "ghost", "sortOrder": 0}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
