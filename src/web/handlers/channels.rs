//! Channel catalog handler

use axum::{Json, extract::State};
use tracing::debug;

use crate::errors::AppError;
use crate::ingestor::parse_playlist;
use crate::web::{AppState, responses::ChannelsResponse};

/// `GET /api/channels`: acquire the playlist and return it as grouped channels
pub async fn list_channels(
    State(state): State<AppState>,
) -> Result<Json<ChannelsResponse>, AppError> {
    let content = state.source.acquire().await?;
    let channels = parse_playlist(&content);
    debug!("Returning {} channels", channels.len());
    Ok(Json(ChannelsResponse::new(channels)))
}
