//! HTTP handler tests over the full router.
//!
//! Each test drives the real router with an in-memory database behind it
//! and asserts on status codes, redirects, and rendered markup.

use http::StatusCode;

use shoestore_core::ShoeId;
use shoestore_integration_tests::{TestContext, body_string, datetime, get, location, post_form};
use shoestore_web::db::ShoeRepository;

// =============================================================================
// Listing and Detail
// =============================================================================

#[tokio::test]
async fn index_lists_created_shoes() {
    let ctx = TestContext::new().await;
    ctx.seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;
    ctx.seed_shoe(Some("Boot"), None, datetime("2024-02-01T00:00:00Z"))
        .await;

    let response = get(&ctx, "/shoes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Runner"));
    assert!(body.contains("Boot"));
}

#[tokio::test]
async fn root_redirects_to_listing() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shoes");
}

#[tokio::test]
async fn show_renders_the_record() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    let response = get(&ctx, &format!("/shoes/{}", shoe.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Runner"));
    assert!(body.contains("50"));
}

#[tokio::test]
async fn show_unknown_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/shoes/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn show_non_numeric_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/shoes/sneaker").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_form_renders_empty() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/shoes/new").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"action="/shoes""#));
}

#[tokio::test]
async fn create_valid_redirects_to_listing() {
    let ctx = TestContext::new().await;

    let response = post_form(
        &ctx,
        "/shoes",
        "name=Runner&price=50&created_date=2024-01-01T00%3A00",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shoes");

    let listed = ShoeRepository::new(&ctx.pool).list().await.expect("list");
    assert_eq!(listed.len(), 1);
    let created = listed.first().expect("one shoe");
    assert_eq!(created.name.as_deref(), Some("Runner"));
    assert_eq!(created.price, Some(50));
    assert_eq!(created.created_date, datetime("2024-01-01T00:00:00Z"));
}

#[tokio::test]
async fn create_invalid_price_rerenders_with_submitted_values() {
    let ctx = TestContext::new().await;

    let response = post_form(
        &ctx,
        "/shoes",
        "name=Runner&price=lots&created_date=2024-01-01",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_string(response).await;
    assert!(body.contains("Price must be a whole number."));
    // The rejected submission is preserved verbatim.
    assert!(body.contains(r#"value="lots""#));
    assert!(body.contains(r#"value="Runner""#));

    // Nothing was stored.
    let listed = ShoeRepository::new(&ctx.pool).list().await.expect("list");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn create_missing_created_date_rerenders() {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, "/shoes", "name=Runner&price=50").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_string(response).await;
    assert!(body.contains("Created date is required."));
}

#[tokio::test]
async fn create_blank_optionals_are_stored_absent() {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, "/shoes", "name=&price=&created_date=2024-01-01").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let listed = ShoeRepository::new(&ctx.pool).list().await.expect("list");
    let created = listed.first().expect("one shoe");
    assert_eq!(created.name, None);
    assert_eq!(created.price, None);
}

// =============================================================================
// Edit
// =============================================================================

#[tokio::test]
async fn edit_form_is_prefilled_with_the_record() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T09:30:00Z"))
        .await;

    let response = get(&ctx, &format!("/shoes/{}/edit", shoe.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"value="Runner""#));
    assert!(body.contains(r#"value="50""#));
    assert!(body.contains(r#"value="2024-01-01T09:30""#));
    assert!(body.contains(r#"name="row_version" value="0""#));
}

#[tokio::test]
async fn edit_form_unknown_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/shoes/999/edit").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_valid_redirects_and_persists() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    let body = format!(
        "id={id}&name=Runner+Pro&price=60&created_date=2024-01-01T00%3A00&row_version=0",
        id = shoe.id
    );
    let response = post_form(&ctx, &format!("/shoes/{}", shoe.id), &body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shoes");

    let current = ShoeRepository::new(&ctx.pool)
        .get(shoe.id)
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(current.name.as_deref(), Some("Runner Pro"));
    assert_eq!(current.price, Some(60));
    assert_eq!(current.row_version, shoe.row_version.next());
}

#[tokio::test]
async fn update_with_mismatched_body_id_is_not_found() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    let body = "id=999&name=Imposter&price=1&created_date=2024-01-01&row_version=0";
    let response = post_form(&ctx, &format!("/shoes/{}", shoe.id), body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // No mutation happened.
    let current = ShoeRepository::new(&ctx.pool)
        .get(shoe.id)
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(current.name.as_deref(), Some("Runner"));
    assert_eq!(current.row_version, shoe.row_version);
}

#[tokio::test]
async fn update_validation_failure_rerenders_with_submitted_values() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    let body = format!(
        "id={id}&name=Runner&price=lots&created_date=2024-01-01&row_version=0",
        id = shoe.id
    );
    let response = post_form(&ctx, &format!("/shoes/{}", shoe.id), &body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let rendered = body_string(response).await;
    assert!(rendered.contains("Price must be a whole number."));
    assert!(rendered.contains(r#"value="lots""#));
}

#[tokio::test]
async fn update_with_stale_version_is_a_conflict() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    // First writer succeeds and bumps the version.
    let first = format!(
        "id={id}&name=Runner+Pro&price=60&created_date=2024-01-01&row_version=0",
        id = shoe.id
    );
    let response = post_form(&ctx, &format!("/shoes/{}", shoe.id), &first).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Second writer still carries version 0 and loses.
    let second = format!(
        "id={id}&name=Runner+Max&price=70&created_date=2024-01-01&row_version=0",
        id = shoe.id
    );
    let response = post_form(&ctx, &format!("/shoes/{}", shoe.id), &second).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Only the winning update is visible.
    let current = ShoeRepository::new(&ctx.pool)
        .get(shoe.id)
        .await
        .expect("get")
        .expect("record exists");
    assert_eq!(current.name.as_deref(), Some("Runner Pro"));
}

#[tokio::test]
async fn update_after_delete_is_not_found() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    assert!(
        ShoeRepository::new(&ctx.pool)
            .delete(shoe.id)
            .await
            .expect("delete")
    );

    let body = format!(
        "id={id}&name=Runner+Pro&price=60&created_date=2024-01-01&row_version=0",
        id = shoe.id
    );
    let response = post_form(&ctx, &format!("/shoes/{}", shoe.id), &body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_confirmation_shows_the_record() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    let response = get(&ctx, &format!("/shoes/{}/delete", shoe.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Runner"));
    assert!(body.contains("Are you sure"));
}

#[tokio::test]
async fn delete_confirmation_unknown_id_is_not_found() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/shoes/999/delete").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn destroy_redirects_and_removes_the_record() {
    let ctx = TestContext::new().await;
    let shoe = ctx
        .seed_shoe(Some("Runner"), Some(50), datetime("2024-01-01T00:00:00Z"))
        .await;

    let response = post_form(&ctx, &format!("/shoes/{}/delete", shoe.id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shoes");

    let current = ShoeRepository::new(&ctx.pool)
        .get(shoe.id)
        .await
        .expect("get");
    assert_eq!(current, None);

    // Destroying again is idempotent at the request layer.
    let response = post_form(&ctx, &format!("/shoes/{}/delete", shoe.id), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn destroy_unknown_id_still_redirects() {
    let ctx = TestContext::new().await;

    let response = post_form(&ctx, &format!("/shoes/{}/delete", ShoeId::new(404)), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/shoes");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_endpoints_respond() {
    let ctx = TestContext::new().await;

    let response = get(&ctx, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");

    let response = get(&ctx, "/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}
