//! Chat proxy endpoint.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{ChatReply, ChatRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/chat
///
/// Forwards the message to the configured language-model upstream and returns
/// its reply. No retries: a single upstream failure is surfaced immediately.
pub async fn chat(state: web::Data<AppState>, body: web::Json<ChatRequest>) -> AppResult<HttpResponse> {
    let message = body.into_inner().message;
    if message.trim().is_empty() {
        return Err(AppError::BadRequest("No message provided".to_string()));
    }

    let client = state
        .chat
        .as_ref()
        .ok_or_else(|| AppError::Upstream("chat upstream is not configured".to_string()))?;

    let reply = client
        .send(&message)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ChatReply { reply }))
}
