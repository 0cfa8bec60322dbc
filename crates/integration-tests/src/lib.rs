//! Integration test support for Shoestore.
//!
//! Tests run against an in-memory `SQLite` database with the real
//! migrations applied, and drive the real router directly via
//! `tower::ServiceExt::oneshot` - no network, no external services.
//!
//! # Test Categories
//!
//! - `shoe_store` - Repository (Resource Store) contract tests
//! - `shoe_routes` - HTTP handler tests over the full router

use axum::Router;
use axum::body::Body;
use axum::response::Response;
use chrono::{DateTime, Utc};
use http::{Request, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use shoestore_web::config::ShoestoreConfig;
use shoestore_web::db::{MIGRATOR, ShoeRepository};
use shoestore_web::models::{CreateShoeInput, Shoe};
use shoestore_web::routes;
use shoestore_web::state::AppState;

/// A fresh, fully migrated in-memory database plus everything needed to
/// build the application router around it.
pub struct TestContext {
    pub pool: SqlitePool,
}

impl TestContext {
    /// Open an in-memory database and apply all migrations.
    ///
    /// A single pooled connection keeps the in-memory database alive for
    /// the whole test.
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database opens");

        MIGRATOR.run(&pool).await.expect("migrations apply cleanly");

        Self { pool }
    }

    /// Build the full application router over this context's database.
    pub fn app(&self) -> Router {
        let config = ShoestoreConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().expect("valid bind address"),
            port: 0,
        };
        routes::app(AppState::new(config, self.pool.clone()))
    }

    /// Insert a shoe directly through the repository.
    pub async fn seed_shoe(
        &self,
        name: Option<&str>,
        price: Option<i64>,
        created_date: DateTime<Utc>,
    ) -> Shoe {
        let input = CreateShoeInput {
            name: name.map(ToString::to_string),
            price,
            created_date,
        };
        ShoeRepository::new(&self.pool)
            .create(&input)
            .await
            .expect("seed shoe")
    }
}

/// Parse an RFC 3339 timestamp for test fixtures.
#[must_use]
pub fn datetime(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

/// Perform a GET request against a fresh router instance.
pub async fn get(ctx: &TestContext, uri: &str) -> Response {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("valid request");

    ctx.app().oneshot(request).await.expect("request handled")
}

/// Perform a form POST against a fresh router instance.
pub async fn post_form(ctx: &TestContext, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(Body::from(body.to_string()))
        .expect("valid request");

    ctx.app().oneshot(request).await.expect("request handled")
}

/// Read a response body to a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a Location header")
        .to_str()
        .expect("Location header is ASCII")
}
