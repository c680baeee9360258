//! JSON HTTP server.
//!
//! Serves the project catalog (with category and text filtering), the rest
//! of the site content, and the contact-form intake.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/categories` | Filter tabs with project counts |
//! | `GET`  | `/projects?category=&q=` | Filtered projects with display messages |
//! | `GET`  | `/projects/featured` | Featured projects |
//! | `GET`  | `/projects/{slug}` | A single project |
//! | `GET`  | `/services`, `/team`, `/testimonials`, `/stats` | Site content |
//! | `POST` | `/contact` | Contact-form submission |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Invalid email address" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! A `/contact` body that is not a JSON contact form is `bad_request`.
//! An unrecognized `category` is not an error: it is treated as `all`.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use project_catalog_core::category::{CategoryFilter, ALL_VALUE};
use project_catalog_core::display::{count_message, empty_message};
use project_catalog_core::models::{Project, Service, Stat, TeamMember, Testimonial};
use project_catalog_core::state::FilterState;

use crate::config::Config;
use crate::contact::{ContactError, ContactForm, ContactIntake, SubmissionSink};
use crate::content::Catalog;

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    contact: ContactIntake,
}

/// Start the server with the configured catalog, logging contact
/// submissions.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::from_config(config)?;
    let contact = ContactIntake::logging(config.contact.recipient.clone());
    serve(config, catalog, contact).await
}

/// Start the server with a custom contact submission sink.
pub async fn run_server_with_sink(
    config: &Config,
    catalog: Catalog,
    sink: Arc<dyn SubmissionSink>,
) -> anyhow::Result<()> {
    let contact = ContactIntake::new(config.contact.recipient.clone(), sink);
    serve(config, catalog, contact).await
}

async fn serve(config: &Config, catalog: Catalog, contact: ContactIntake) -> anyhow::Result<()> {
    let project_count = catalog.projects().len();
    let app = router(catalog, contact);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        bind = %config.server.bind,
        projects = project_count,
        "catalog server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(catalog: Catalog, contact: ContactIntake) -> Router {
    let state = AppState {
        catalog: Arc::new(catalog),
        contact,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/categories", get(handle_categories))
        .route("/projects", get(handle_projects))
        .route("/projects/featured", get(handle_featured))
        .route("/projects/{slug}", get(handle_project))
        .route("/services", get(handle_services))
        .route("/team", get(handle_team))
        .route("/testimonials", get(handle_testimonials))
        .route("/stats", get(handle_stats))
        .route("/contact", post(handle_contact))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found",
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal",
        message: message.into(),
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::MissingFields | ContactError::InvalidEmail => bad_request(err.to_string()),
            ContactError::Delivery(ref cause) => {
                tracing::error!(error = %cause, "contact form delivery failed");
                internal(err.to_string())
            }
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /categories ============

#[derive(Serialize)]
struct CategoryInfo {
    value: CategoryFilter,
    label: &'static str,
    count: usize,
}

async fn handle_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    let tabs = state
        .catalog
        .category_counts()
        .into_iter()
        .map(|(value, count)| CategoryInfo {
            value,
            label: value.label(),
            count,
        })
        .collect();
    Json(tabs)
}

// ============ GET /projects ============

#[derive(Deserialize)]
struct ProjectsQuery {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    q: Option<String>,
}

#[derive(Serialize)]
struct ProjectsResponse<'a> {
    category: CategoryFilter,
    query: String,
    count: usize,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    empty_message: Option<String>,
    can_clear: bool,
    projects: Vec<&'a Project>,
}

/// Filtered project list. Both parameters are optional; an unknown
/// `category` falls back to `all`.
async fn handle_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectsQuery>,
) -> Response {
    let raw_category = params.category.unwrap_or_else(|| ALL_VALUE.to_string());
    let category = CategoryFilter::normalize(&raw_category);
    if category.is_all() && !raw_category.trim().eq_ignore_ascii_case(ALL_VALUE) {
        tracing::warn!(category = %raw_category, "unknown category, showing all projects");
    }

    let mut filter = FilterState::new();
    filter.set_category(category);
    filter.set_query(params.q.unwrap_or_default());

    let projects = filter.criteria().apply(state.catalog.projects());
    let count = projects.len();
    let query = filter.search_query();

    Json(ProjectsResponse {
        category,
        query: query.to_string(),
        count,
        message: count_message(count, query),
        empty_message: (count == 0).then(|| empty_message(query)),
        can_clear: filter.can_clear(),
        projects,
    })
    .into_response()
}

async fn handle_featured(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.catalog.featured().into_iter().cloned().collect())
}

async fn handle_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, AppError> {
    state
        .catalog
        .find_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(format!("project not found: {}", slug)))
}

// ============ Site content ============

async fn handle_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog.services().to_vec())
}

async fn handle_team(State(state): State<AppState>) -> Json<Vec<TeamMember>> {
    Json(state.catalog.team().to_vec())
}

async fn handle_testimonials(State(state): State<AppState>) -> Json<Vec<Testimonial>> {
    Json(state.catalog.testimonials().to_vec())
}

async fn handle_stats(State(state): State<AppState>) -> Json<Vec<Stat>> {
    Json(state.catalog.stats().to_vec())
}

// ============ POST /contact ============

#[derive(Serialize)]
struct ContactResponse {
    success: bool,
    message: &'static str,
    id: Uuid,
    recipient: String,
}

async fn handle_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(form) = payload?;
    let receipt = state.contact.submit(form).await?;
    Ok(Json(ContactResponse {
        success: true,
        message: "Form submitted successfully",
        id: receipt.id,
        recipient: receipt.recipient,
    }))
}
