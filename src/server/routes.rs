use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::document::Document;
use crate::envelope::ApiResponse;
use crate::processor;
use crate::qa::{matcher, QaEngine};
use crate::question::Question;
use crate::server::AppState;
use crate::user::{Role, User};
use crate::Error;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub asked_by: String,
}

#[derive(Deserialize)]
pub struct RoleUpdate {
    pub role: String,
}

// ========== Documents ==========

pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), Error> {
    let mut title: Option<String> = None;
    let mut content: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| Error::Validation(format!("Unreadable title field: {}", e)))?;
                title = Some(text);
            }
            Some("file") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| Error::Validation("File must be UTF-8 text".to_string()))?;
                content = Some(text);
            }
            _ => {}
        }
    }

    let title = title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Validation("Missing required field: title".to_string()))?;
    let content = content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::Validation("Missing required field: file".to_string()))?;

    let uploaded_by = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("anonymous");

    let document = state.documents.append(&title, &content, uploaded_by).await;
    tracing::info!("Document {} uploaded by {}", document.id, uploaded_by);

    // Detached on purpose: the upload response never waits for ingestion
    processor::spawn(
        state.documents.clone(),
        document.id.clone(),
        state.processing_delay,
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<Document>>> {
    Json(ApiResponse::ok(state.documents.list().await))
}

pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Document>>, Error> {
    let document = state
        .documents
        .get(&id)
        .await
        .ok_or(Error::DocumentNotFound)?;
    Ok(Json(ApiResponse::ok(document)))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, Error> {
    state.documents.delete(&id).await?;
    Ok(Json(ApiResponse::ok_empty()))
}

pub async fn search_documents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<Vec<Document>>> {
    let snapshot = state.documents.snapshot().await;
    let ids = matcher::find_relevant(&params.q, &snapshot);
    let matched: Vec<Document> = ids
        .iter()
        .filter_map(|id| snapshot.iter().find(|d| &d.id == id).cloned())
        .collect();
    Json(ApiResponse::ok(matched))
}

// ========== Questions ==========

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> (StatusCode, Json<ApiResponse<Question>>) {
    let engine = QaEngine::new(state.documents.as_ref(), state.questions.as_ref());
    let record = engine.ask_question(&request.question, &request.asked_by).await;
    (StatusCode::CREATED, Json(ApiResponse::ok(record)))
}

pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<Question>>> {
    let engine = QaEngine::new(state.documents.as_ref(), state.questions.as_ref());
    Json(ApiResponse::ok(engine.get_questions().await))
}

pub async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Question>>, Error> {
    let engine = QaEngine::new(state.documents.as_ref(), state.questions.as_ref());
    let record = engine.get_question(&id).await?;
    Ok(Json(ApiResponse::ok(record)))
}

pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, Error> {
    let engine = QaEngine::new(state.documents.as_ref(), state.questions.as_ref());
    engine.delete_question(&id).await?;
    Ok(Json(ApiResponse::ok_empty()))
}

// ========== Users (admin) ==========

pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<ApiResponse<Vec<User>>> {
    Json(ApiResponse::ok(state.users.list().await))
}

pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<RoleUpdate>,
) -> Result<Json<ApiResponse<User>>, Error> {
    let role = Role::from_str(&request.role)?;
    let user = state.users.set_role(&id, role).await?;
    tracing::info!("User {} role set to {}", user.id, user.role);
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, Error> {
    state.users.delete(&id).await?;
    Ok(Json(ApiResponse::ok_empty()))
}
