//! Shoe route handlers.
//!
//! Five screens over the shoe table: listing, detail, creation form, edit
//! form, and a deletion confirmation. Submissions redirect back to the
//! listing on success; forms that fail validation are re-rendered with the
//! submitted values preserved.

use askama::Template;
use axum::{
    Router,
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::instrument;

use shoestore_core::{RowVersion, ShoeId};

use crate::db::{RepositoryError, ShoeRepository};
use crate::error::AppError;
use crate::filters;
use crate::models::{CreateShoeInput, Shoe, UpdateShoeInput};
use crate::state::AppState;

/// Format used when prefilling `<input type="datetime-local">` fields.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format used when displaying timestamps in read-only views.
const DISPLAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Templates
// =============================================================================

/// Shoe listing template.
#[derive(Template)]
#[template(path = "shoes/index.html")]
pub struct IndexTemplate {
    pub shoes: Vec<ShoeView>,
}

/// Shoe detail template.
#[derive(Template)]
#[template(path = "shoes/show.html")]
pub struct ShowTemplate {
    pub shoe: ShoeView,
}

/// Creation form template.
#[derive(Template)]
#[template(path = "shoes/new.html")]
pub struct NewTemplate {
    pub form: ShoeFormView,
    pub errors: ShoeFormErrors,
}

/// Edit form template.
#[derive(Template)]
#[template(path = "shoes/edit.html")]
pub struct EditTemplate {
    pub form: ShoeFormView,
    pub errors: ShoeFormErrors,
}

/// Deletion confirmation template.
#[derive(Template)]
#[template(path = "shoes/delete.html")]
pub struct DeleteTemplate {
    pub shoe: ShoeView,
}

// =============================================================================
// View Models
// =============================================================================

/// Read-only shoe view for listings and detail pages.
#[derive(Debug, Clone)]
pub struct ShoeView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub created_date: String,
}

impl From<&Shoe> for ShoeView {
    fn from(shoe: &Shoe) -> Self {
        Self {
            id: shoe.id.as_i64(),
            name: shoe.name.clone().unwrap_or_default(),
            price: shoe.price.map(|p| p.to_string()).unwrap_or_default(),
            created_date: shoe
                .created_date
                .format(DISPLAY_DATETIME_FORMAT)
                .to_string(),
        }
    }
}

/// Form field values as rendered back into the creation/edit forms.
///
/// Everything is kept as the raw submitted text so a rejected form shows
/// exactly what the user typed.
#[derive(Debug, Clone, Default)]
pub struct ShoeFormView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub created_date: String,
    pub row_version: String,
}

impl ShoeFormView {
    fn from_submitted(form: &ShoeForm) -> Self {
        Self {
            id: form.id.clone().unwrap_or_default(),
            name: form.name.clone().unwrap_or_default(),
            price: form.price.clone().unwrap_or_default(),
            created_date: form.created_date.clone().unwrap_or_default(),
            row_version: form.row_version.clone().unwrap_or_default(),
        }
    }
}

impl From<&Shoe> for ShoeFormView {
    fn from(shoe: &Shoe) -> Self {
        Self {
            id: shoe.id.to_string(),
            name: shoe.name.clone().unwrap_or_default(),
            price: shoe.price.map(|p| p.to_string()).unwrap_or_default(),
            created_date: shoe
                .created_date
                .format(DATETIME_LOCAL_FORMAT)
                .to_string(),
            row_version: shoe.row_version.to_string(),
        }
    }
}

/// Per-field validation messages for the shoe form.
#[derive(Debug, Clone, Default)]
pub struct ShoeFormErrors {
    pub price: Option<String>,
    pub created_date: Option<String>,
}

impl ShoeFormErrors {
    const fn is_empty(&self) -> bool {
        self.price.is_none() && self.created_date.is_none()
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Raw shoe form submission.
///
/// Every field arrives as text; validation turns it into typed input for
/// the repository.
#[derive(Debug, Deserialize)]
pub struct ShoeForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub created_date: Option<String>,
    pub row_version: Option<String>,
}

/// Typed field values produced by a successful validation pass.
#[derive(Debug)]
struct ParsedShoeFields {
    name: Option<String>,
    price: Option<i64>,
    created_date: DateTime<Utc>,
}

/// Validate a submitted form, field by field.
///
/// Name and price are optional; a blank field becomes `None`. The created
/// date is required. Returns the typed values, or the per-field messages
/// for re-rendering.
fn validate(form: &ShoeForm) -> Result<ParsedShoeFields, ShoeFormErrors> {
    let mut errors = ShoeFormErrors::default();

    let name = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string);

    let price = match form.price.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => match raw.parse::<i64>() {
            Ok(price) => Some(price),
            Err(_) => {
                errors.price = Some("Price must be a whole number.".to_string());
                None
            }
        },
    };

    let created_date = match form
        .created_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        None => {
            errors.created_date = Some("Created date is required.".to_string());
            None
        }
        Some(raw) => {
            let parsed = parse_created_date(raw);
            if parsed.is_none() {
                errors.created_date = Some("Created date is not a valid date.".to_string());
            }
            parsed
        }
    };

    match (created_date, errors.is_empty()) {
        (Some(created_date), true) => Ok(ParsedShoeFields {
            name,
            price,
            created_date,
        }),
        _ => Err(errors),
    }
}

/// Parse the created-date field.
///
/// Accepts RFC 3339, the `datetime-local` input format (with or without
/// seconds), and a bare date, which lands on midnight UTC.
fn parse_created_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
}

// =============================================================================
// Router
// =============================================================================

/// Build the shoe router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shoes", get(index).post(create))
        .route("/shoes/new", get(new))
        .route("/shoes/{id}", get(show).post(update))
        .route("/shoes/{id}/edit", get(edit))
        .route("/shoes/{id}/delete", get(confirm_delete).post(destroy))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Render a template into an HTML response.
fn render<T: Template>(template: &T) -> Response {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {e}");
        "Internal Server Error".to_string()
    }))
    .into_response()
}

/// Parse a path segment into a shoe id.
///
/// Anything that is not a whole number cannot name a record, so it reads
/// as not-found rather than as a malformed request.
fn parse_id(raw: &str) -> Result<ShoeId, AppError> {
    raw.parse::<i64>()
        .map(ShoeId::new)
        .map_err(|_| AppError::NotFound(format!("shoe {raw}")))
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /shoes - List all shoes.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    let shoes = ShoeRepository::new(state.pool()).list().await?;

    let template = IndexTemplate {
        shoes: shoes.iter().map(ShoeView::from).collect(),
    };
    Ok(render(&template))
}

/// GET /shoes/{id} - Show one shoe.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let shoe = ShoeRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shoe {id}")))?;

    let template = ShowTemplate {
        shoe: ShoeView::from(&shoe),
    };
    Ok(render(&template))
}

/// GET /shoes/new - Show the empty creation form.
#[instrument]
pub async fn new() -> Response {
    let template = NewTemplate {
        form: ShoeFormView::default(),
        errors: ShoeFormErrors::default(),
    };
    render(&template)
}

/// POST /shoes - Create a shoe.
///
/// Redirects to the listing on success; re-renders the form with the
/// submitted values on validation failure.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<ShoeForm>,
) -> Result<Response, AppError> {
    let fields = match validate(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            let template = NewTemplate {
                form: ShoeFormView::from_submitted(&form),
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    let input = CreateShoeInput {
        name: fields.name,
        price: fields.price,
        created_date: fields.created_date,
    };
    ShoeRepository::new(state.pool()).create(&input).await?;

    Ok(Redirect::to("/shoes").into_response())
}

/// GET /shoes/{id}/edit - Show the populated edit form.
#[instrument(skip(state))]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let shoe = ShoeRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shoe {id}")))?;

    let template = EditTemplate {
        form: ShoeFormView::from(&shoe),
        errors: ShoeFormErrors::default(),
    };
    Ok(render(&template))
}

/// POST /shoes/{id} - Update a shoe.
///
/// The id posted with the form must match the path id. An update that
/// loses the optimistic concurrency race is re-checked against the store:
/// a record that disappeared reads as not-found, one that still exists is
/// a fatal edit conflict for this request.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ShoeForm>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let body_id = form.id.as_deref().and_then(|raw| raw.parse::<i64>().ok());
    if body_id != Some(id.as_i64()) {
        return Err(AppError::NotFound(format!("shoe {id}")));
    }

    let fields = match validate(&form) {
        Ok(fields) => fields,
        Err(errors) => {
            let template = EditTemplate {
                form: ShoeFormView::from_submitted(&form),
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&template)).into_response());
        }
    };

    // A missing or mangled token can never match the stored version, so it
    // takes the same path as any other lost race.
    let expected_version = form
        .row_version
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .map_or(RowVersion::new(-1), RowVersion::new);

    let input = UpdateShoeInput {
        name: fields.name,
        price: fields.price,
        created_date: fields.created_date,
        expected_version,
    };

    let repository = ShoeRepository::new(state.pool());
    match repository.update(id, &input).await {
        Ok(_) => Ok(Redirect::to("/shoes").into_response()),
        Err(RepositoryError::Conflict) => {
            if repository.exists(id).await? {
                Err(AppError::Conflict(
                    "the shoe was modified by someone else".to_string(),
                ))
            } else {
                Err(AppError::NotFound(format!("shoe {id}")))
            }
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /shoes/{id}/delete - Show the deletion confirmation page.
#[instrument(skip(state))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    let shoe = ShoeRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("shoe {id}")))?;

    let template = DeleteTemplate {
        shoe: ShoeView::from(&shoe),
    };
    Ok(render(&template))
}

/// POST /shoes/{id}/delete - Delete a shoe.
///
/// Removing an already-removed record is a no-op; either way the client
/// lands back on the listing.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;

    ShoeRepository::new(state.pool()).delete(id).await?;

    Ok(Redirect::to("/shoes").into_response())
}
