use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::overlay::CaptionError;
use crate::store::{StoreError, StoreRoot};

use super::models::MemeResponse;
use super::state::ServerState;

pub(crate) const MEME_FILE_PREFIX: &str = "meme_";

#[derive(Debug)]
pub(crate) struct ServerError {
    pub(crate) status: axum::http::StatusCode,
    pub(crate) message: String,
}

impl ServerError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: axum::http::StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: axum::http::StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self {
            status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } | StoreError::InvalidReference { .. } => {
                tracing::debug!("source lookup failed: {}", err);
                ServerError::not_found("Source image not found")
            }
            StoreError::Storage(err) => {
                tracing::warn!("storage failure: {}", err);
                ServerError::internal("Failed to generate meme. Please try again later.")
            }
        }
    }
}

impl From<CaptionError> for ServerError {
    fn from(err: CaptionError) -> Self {
        tracing::warn!("compositing failure: {}", err);
        ServerError::internal("Failed to process image. The image may be corrupted or unsupported.")
    }
}

#[derive(Debug)]
pub(crate) enum CaptionSource {
    ByReference(String),
    Inline(String),
}

pub(crate) async fn caption_request(
    state: &ServerState,
    source: CaptionSource,
    top_text: Option<String>,
    bottom_text: Option<String>,
) -> Result<MemeResponse, ServerError> {
    let source_bytes = match source {
        CaptionSource::ByReference(reference) => state.store.resolve(&reference)?,
        CaptionSource::Inline(payload) => decode_inline_image(&payload)?,
    };

    let compositor = state.compositor.clone();
    let store = state.store.clone();
    let top = top_text.unwrap_or_default();
    let bottom = bottom_text.unwrap_or_default();
    let deadline = Duration::from_secs(state.settings.request_timeout_secs);

    let task = tokio::task::spawn_blocking(move || -> Result<String, ServerError> {
        let output = compositor.caption(&source_bytes, &top, &bottom)?;
        Ok(store.persist(StoreRoot::Memes, MEME_FILE_PREFIX, &output, "png")?)
    });

    let meme_url = match tokio::time::timeout(deadline, task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(err)) => {
            tracing::warn!("caption task failed: {}", err);
            return Err(ServerError::internal(
                "Failed to generate meme. Please try again later.",
            ));
        }
        Err(_) => {
            tracing::warn!("caption task exceeded {}s deadline", deadline.as_secs());
            return Err(ServerError::internal(
                "Timed out while generating the meme.",
            ));
        }
    };

    tracing::info!("generated meme: {}", meme_url);
    Ok(MemeResponse {
        success: true,
        meme_url,
    })
}

pub(crate) fn decode_inline_image(payload: &str) -> Result<Vec<u8>, ServerError> {
    let encoded = match payload.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => payload,
    };
    BASE64
        .decode(encoded.trim())
        .map_err(|_| ServerError::bad_request("Invalid image payload"))
}
