//! Raw playlist passthrough

use axum::{
    extract::State,
    http::{HeaderName, header},
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::web::AppState;

pub const PLAYLIST_CONTENT_TYPE: &str = "application/x-mpegURL";

/// Names the tier that served the playlist
pub const PLAYLIST_SOURCE_HEADER: &str = "x-playlist-source";

/// `GET /api/playlist.m3u`: the playlist text exactly as acquired
pub async fn serve_playlist(State(state): State<AppState>) -> Result<Response, AppError> {
    let acquired = state.source.acquire_with_origin().await?;

    Ok((
        [
            (header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE),
            (HeaderName::from_static(PLAYLIST_SOURCE_HEADER), acquired.origin.as_str()),
        ],
        acquired.content,
    )
        .into_response())
}
