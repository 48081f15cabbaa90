use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::document::{Document, DocumentStatus};
use crate::envelope::ApiResponse;
use crate::question::Question;
use crate::store::memory::{MemoryDocumentStore, MemoryQuestionStore, MemoryUserStore};
use crate::store::{DocumentStore, QuestionStore, UserStore};
use crate::Error;

pub mod routes;

/// Server state: the injected stores plus the processor delay
pub struct AppState {
    pub documents: Arc<dyn DocumentStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub users: Arc<dyn UserStore>,
    pub processing_delay: Duration,
}

impl AppState {
    /// Fresh in-memory stores with the default user accounts
    pub fn in_memory(processing_delay: Duration) -> Self {
        Self {
            documents: Arc::new(MemoryDocumentStore::new()),
            questions: Arc::new(MemoryQuestionStore::new()),
            users: Arc::new(MemoryUserStore::with_default_users()),
            processing_delay,
        }
    }

    /// In-memory stores pre-seeded with the demo document and question
    pub async fn demo(processing_delay: Duration) -> Self {
        let documents = MemoryDocumentStore::new();
        documents
            .insert(
                Document::new(
                    "1",
                    "Getting Started Guide",
                    "Welcome to our document management system...",
                    "1",
                )
                .with_status(DocumentStatus::Completed)
                .with_created_at(crate::now_millis().saturating_sub(86_400_000)),
            )
            .await;

        let questions = MemoryQuestionStore::new();
        questions
            .insert(
                Question::new(
                    "1",
                    "How do I upload a document?",
                    "You can upload a document by clicking the \"Upload\" button and selecting your file.",
                    vec!["1".to_string()],
                    "2",
                )
                .with_created_at(crate::now_millis().saturating_sub(43_200_000)),
            )
            .await;

        Self {
            documents: Arc::new(documents),
            questions: Arc::new(questions),
            users: Arc::new(MemoryUserStore::with_default_users()),
            processing_delay,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::DocumentNotFound | Error::QuestionNotFound | Error::UserNotFound => {
                StatusCode::NOT_FOUND
            }
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Forbidden => StatusCode::FORBIDDEN,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

/// Capability check for the admin surface, performed once at the boundary.
///
/// Resolves the `x-user-id` header against the user store; the routes
/// behind this layer never look at roles again.
async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let user_id = request
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or(Error::Unauthorized)?;

    let user = state.users.get(user_id).await.ok_or(Error::Unauthorized)?;
    if !user.is_admin() {
        return Err(Error::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Assemble the full router over the given state
pub fn build_router(state: Arc<AppState>) -> Router {
    let admin = Router::new()
        .route("/users", get(routes::list_users))
        .route("/users/{id}/role", put(routes::update_user_role))
        .route("/users/{id}", delete(routes::delete_user))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route(
            "/documents",
            post(routes::upload_document).get(routes::list_documents),
        )
        .route("/documents/search", get(routes::search_documents))
        .route(
            "/documents/{id}",
            get(routes::get_document).delete(routes::delete_document),
        )
        .route(
            "/questions",
            post(routes::ask_question).get(routes::list_questions),
        )
        .route(
            "/questions/{id}",
            get(routes::get_question).delete(routes::delete_question),
        )
        .merge(admin)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("🌍 Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest};
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-DOCQA-BOUNDARY";

    fn test_app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::in_memory(Duration::from_millis(1)));
        let app = build_router(state.clone());
        (state, app)
    }

    fn multipart_upload(title: Option<&str>, file: Option<&str>) -> HttpRequest<Body> {
        let mut body = String::new();
        if let Some(title) = title {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
            ));
        }
        if let Some(file) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"doc.txt\"\r\nContent-Type: text/plain\r\n\r\n{file}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        HttpRequest::builder()
            .method("POST")
            .uri("/documents")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("x-user-id", "2")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_then_list() {
        let (_state, app) = test_app();

        let response = app
            .clone()
            .oneshot(multipart_upload(Some("Guide"), Some("Welcome.")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["title"], "Guide");
        assert_eq!(json["data"]["status"], "processing");
        assert_eq!(json["data"]["uploaded_by"], "2");

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/documents")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_missing_file_rejected() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(multipart_upload(Some("Guide"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_upload_missing_title_rejected() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(multipart_upload(None, Some("Welcome.")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_document_not_found() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/documents/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Document not found");
    }

    #[tokio::test]
    async fn test_search_documents() {
        let (state, app) = test_app();
        state
            .documents
            .append("Guide", "Uploading is covered here.", "1")
            .await;
        state.documents.append("Other", "Nothing else.", "1").await;

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/documents/search?q=uploading")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "Guide");
    }

    #[tokio::test]
    async fn test_ask_question_round_trip() {
        let (state, app) = test_app();
        state
            .documents
            .append(
                "Getting Started Guide",
                "Welcome to our document management system.",
                "1",
            )
            .await;

        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/questions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"question":"How do I manage documents?","asked_by":"u2"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["document_references"][0], "1");
        assert!(json["data"]["answer"]
            .as_str()
            .unwrap()
            .contains("document management system"));

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/questions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_question() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("DELETE")
                    .uri("/questions/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Question not found");
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let (_state, app) = test_app();

        // no credentials
        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // regular user
        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/users")
                    .header("x-user-id", "2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // seeded admin
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/users")
                    .header("x-user-id", "1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_user_role() {
        let (_state, app) = test_app();

        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("PUT")
                    .uri("/users/2/role")
                    .header("x-user-id", "1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"role":"admin"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["role"], "admin");

        // unknown role string
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("PUT")
                    .uri("/users/2/role")
                    .header("x-user-id", "1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"role":"overlord"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_demo_state_seeded() {
        let state = Arc::new(AppState::demo(Duration::from_millis(1)).await);
        let app = build_router(state);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/documents/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["title"], "Getting Started Guide");
        assert_eq!(json["data"]["status"], "completed");
    }
}
