// 🌐 HTTP API - JSON and CSV endpoints a browser front end binds to
//
// Every handler does one store call under the mutex, then re-derives what it
// returns from a fresh `list_all()`.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::book::{parse_date, Book, Genre};
use crate::db::BookStore;
use crate::error::CatalogError;
use crate::export::{to_csv_bytes, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use crate::filter::{filter_books, genre_options, GenreFilter};
use crate::stats::{count_by_genre, summary, GenreCount};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<BookStore>>,
}

impl AppState {
    pub fn new(store: BookStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, BookStore>, ApiError> {
        self.store
            .lock()
            .map_err(|_| ApiError::internal("book store lock poisoned"))
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// API Response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BooksQuery {
    pub genre: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddBookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// `YYYY-MM-DD`; today when omitted
    pub added_on: Option<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub total: usize,
    pub unique_genres: usize,
    pub by_genre: Vec<GenreCount>,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: &str) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let status = match &err {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            e if e.is_user_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "request failed");
            // Storage details stay in the log
            return ApiError::internal("internal error");
        }

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/books?genre=G - List books, optionally filtered by genre
async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> Result<Json<ApiResponse<Vec<Book>>>, ApiError> {
    // A blank selector means "All"
    let filter = match query.genre.as_deref().map(str::trim) {
        Some(genre) if !genre.is_empty() => genre.parse::<GenreFilter>()?,
        _ => GenreFilter::All,
    };

    let books = state.store()?.list_all()?;
    Ok(Json(ApiResponse::ok(filter_books(&books, filter))))
}

/// POST /api/books - Add a book
async fn add_book(
    State(state): State<AppState>,
    Json(request): Json<AddBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), ApiError> {
    let genre: Genre = request.genre.parse()?;
    let store = state.store()?;

    let book = match request.added_on.as_deref() {
        Some(date) => store.add_on(&request.title, &request.author, genre, parse_date(date)?)?,
        None => store.add(&request.title, &request.author, genre)?,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(book))))
}

/// DELETE /api/books/:id - Delete a book
async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store()?.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/genres - Filter selector options
async fn list_genres(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let books = state.store()?.list_all()?;
    Ok(Json(ApiResponse::ok(genre_options(&books))))
}

/// GET /api/stats - Dashboard numbers and bar chart data
async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatsResponse>>, ApiError> {
    let books = state.store()?.list_all()?;
    let totals = summary(&books);

    Ok(Json(ApiResponse::ok(StatsResponse {
        total: totals.total,
        unique_genres: totals.unique_genres,
        by_genre: count_by_genre(&books).ranked(),
    })))
}

/// GET /api/export - CSV download of the whole catalog
async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let books = state.store()?.list_all()?;
    let body = to_csv_bytes(&books)?;

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(add_book))
        .route("/books/:id", delete(delete_book))
        .route("/genres", get(list_genres))
        .route("/stats", get(get_stats))
        .route("/export", get(export_csv))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn post_book(title: &str, author: &str, genre: &str) -> Request<Body> {
        Request::post("/api/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"title": title, "author": author, "genre": genre}).to_string(),
            ))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn app() -> Router {
        router(AppState::new(BookStore::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_add_list_delete_flow() {
        let app = app();

        let (status, body) = send(&app, post_book("Dune", "Herbert", "Sci-Fi")).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Value = serde_json::from_slice(&body).unwrap();
        let id = created["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(created["data"]["genre"], "Sci-Fi");

        send(&app, post_book("Sapiens", "Harari", "History")).await;

        let (_, body) = send(&app, get("/api/books?genre=History")).await;
        let listed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
        assert_eq!(listed["data"][0]["title"], "Sapiens");

        let request = Request::delete(format!("/api/books/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, get("/api/books")).await;
        let listed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_genre_query_lists_all() {
        let app = app();
        send(&app, post_book("Dune", "Herbert", "Sci-Fi")).await;
        send(&app, post_book("Sapiens", "Harari", "History")).await;

        for uri in ["/api/books?genre=", "/api/books?genre=%20%20"] {
            let (status, body) = send(&app, get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            let listed: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(listed["data"].as_array().unwrap().len(), 2);
        }
    }

    #[tokio::test]
    async fn test_validation_and_not_found_statuses() {
        let app = app();

        let (status, body) = send(&app, post_book("", "Herbert", "Sci-Fi")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let payload: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["success"], false);

        let (status, _) = send(&app, post_book("Dune", "Herbert", "Poetry")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::delete("/api/books/missing")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, get("/api/books?genre=Poetry")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_and_genres() {
        let app = app();
        send(&app, post_book("Dune", "Herbert", "Sci-Fi")).await;
        send(&app, post_book("1984", "Orwell", "Sci-Fi")).await;
        send(&app, post_book("Sapiens", "Harari", "History")).await;

        let (_, body) = send(&app, get("/api/stats")).await;
        let stats: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats["data"]["total"], 3);
        assert_eq!(stats["data"]["unique_genres"], 2);
        assert_eq!(
            stats["data"]["by_genre"],
            json!([{"genre": "Sci-Fi", "count": 2}, {"genre": "History", "count": 1}])
        );

        let (_, body) = send(&app, get("/api/genres")).await;
        let genres: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(genres["data"], json!(["All", "Sci-Fi", "History"]));
    }

    #[tokio::test]
    async fn test_export_download_headers() {
        let app = app();
        let request = Request::post("/api/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "title": "Dune",
                    "author": "Herbert",
                    "genre": "Sci-Fi",
                    "added_on": "2024-01-05"
                })
                .to_string(),
            ))
            .unwrap();
        send(&app, request).await;

        let response = app.clone().oneshot(get("/api/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"library_collection.csv\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(
            String::from_utf8(bytes.to_vec()).unwrap(),
            "Title,Author,Genre,Added On\nDune,Herbert,Sci-Fi,2024-01-05\n"
        );
    }
}
