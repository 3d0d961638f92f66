//! Event routes: create, fetch, delete, filtered listing, and CSV export.
//!
//! The listing and export endpoints build one [`EventFilter`] from the
//! request and hand it to the query engine; neither carries its own
//! filtering logic.

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::export::events_to_csv;
use crate::models::{CreateEvent, Event};
use crate::query::{EventFilter, Page};
use crate::routes::helpers::parse_timestamp;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body for POST /events. The timestamp arrives as a string so the
/// flexible request forms can be parsed and normalized in one place.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub ts: String,
    pub label: String,
    pub description: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub source: Option<String>,
}

/// Query parameters for the listing and export endpoints. Export ignores
/// the pagination fields; every filter field is independently optional.
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub label: Option<String>,
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl EventListQuery {
    /// Build the typed filter, rejecting malformed timestamp bounds
    /// before the store is touched.
    fn filter(&self) -> AppResult<EventFilter> {
        Ok(EventFilter {
            start: parse_bound("start", self.start.as_deref())?,
            end: parse_bound("end", self.end.as_deref())?,
            label: self.label.clone(),
            min_x: self.min_x,
            max_x: self.max_x,
            min_y: self.min_y,
            max_y: self.max_y,
        })
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(raw) => parse_timestamp(raw).map(Some).ok_or_else(|| {
            AppError::BadRequest(format!("invalid '{name}' timestamp: {raw}"))
        }),
    }
}

/// Listing response: one page of items plus the total match count.
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<Event>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new event.
///
/// POST /events
async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let ts = parse_timestamp(&request.ts)
        .ok_or_else(|| AppError::BadRequest(format!("invalid 'ts' timestamp: {}", request.ts)))?;

    let input = CreateEvent {
        ts,
        label: request.label,
        description: request.description,
        x: request.x,
        y: request.y,
        source: request.source,
    };
    input.validate().map_err(AppError::BadRequest)?;

    let event = Event::create(state.db(), input).await?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Get an event by id.
///
/// GET /events/{id}
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Event>> {
    let event = Event::find_by_id(state.db(), id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(event))
}

/// Delete an event by id.
///
/// DELETE /events/{id}
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let deleted = Event::delete(state.db(), id).await?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List events with optional filtering and pagination, newest first.
///
/// GET /events
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> AppResult<Json<EventListResponse>> {
    let page = Page::new(query.limit, query.offset)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let filter = query.filter()?;

    // Two independent queries; under concurrent writes total and items
    // may observe different snapshots.
    let total = Event::count(state.db(), &filter).await?;
    let items = Event::list(state.db(), &filter, &page).await?;

    Ok(Json(EventListResponse {
        total,
        limit: page.limit,
        offset: page.offset,
        items,
    }))
}

/// Export all matching events as a CSV download. Same filter semantics
/// and ordering as the listing, with no pagination ceiling.
///
/// GET /events/export
async fn export_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> AppResult<Response> {
    let filter = query.filter()?;

    let events = Event::export(state.db(), &filter).await?;
    let csv = events_to_csv(&events);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"events.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

// =============================================================================
// Router
// =============================================================================

/// Create the event router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events", get(list_events))
        .route("/events/export", get(export_events))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}", delete(delete_event))
}
