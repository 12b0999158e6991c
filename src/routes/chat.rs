use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        // An unreadable body has no message in it either.
        let message = match payload {
            Ok(Json(ChatRequest { message: Some(m) })) if !m.is_empty() => m,
            Ok(_) => return Err(AppError::InvalidRequest("Message is required".to_string())),
            Err(rejection) => {
                tracing::debug!(%rejection, "rejected chat body");
                return Err(AppError::InvalidRequest("Message is required".to_string()));
            }
        };

        let reply = state
            .relay
            .relay(&state.config, &message)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "chat relay failed"))?;

        Ok(Json(ChatResponse {
            response: reply.text,
            using_fallback: reply.degraded.then_some(true),
        }))
    }
    .instrument(span)
    .await
}
