use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::overlay::Compositor;
use crate::settings;
use crate::store::{AssetStore, StoreRoot};

use super::caption::{CaptionSource, ServerError, caption_request};
use super::models::{
    ErrorResponse, GenerateMemeRequest, InlineMemeRequest, MemeListResponse, MemeResponse,
    UploadResponse,
};
use super::state::ServerState;
use super::upload::{UploadFile, process_upload_batch};

const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;
const UPLOAD_FIELD_NAME: &str = "images";

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn build_app(settings: settings::Settings) -> Result<Router> {
    let compositor = Compositor::new(
        settings.overlay_font_family.as_deref(),
        settings.overlay_font_path.as_deref().map(Path::new),
    )?;
    let store = AssetStore::new(settings.public_dir.clone());
    store
        .ensure_root(StoreRoot::Uploads)
        .with_context(|| "failed to create the uploads directory")?;
    store
        .ensure_root(StoreRoot::Memes)
        .with_context(|| "failed to create the memes directory")?;
    let uploads_dir = store.root_dir(StoreRoot::Uploads);
    let memes_dir = store.root_dir(StoreRoot::Memes);

    let state = Arc::new(ServerState {
        settings,
        store,
        compositor,
    });
    Ok(Router::new()
        .route("/health", get(health))
        .route("/api/upload", post(upload))
        .route("/api/generate-meme", post(generate_meme))
        .route("/api/meme", post(inline_meme))
        .route("/api/memes", get(list_memes))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .nest_service("/memes", ServeDir::new(memes_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(static_cache_middleware))
        .layer(axum::middleware::from_fn(cors_middleware)))
}

pub async fn run_server(settings: settings::Settings, addr: String) -> Result<()> {
    let app = build_app(settings)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| "failed to bind server address")?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn cors_middleware(req: Request<Body>, next: Next) -> Result<Response<Body>, StatusCode> {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return Ok(response);
    }
    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut());
    Ok(response)
}

async fn static_cache_middleware(
    req: Request<Body>,
    next: Next,
) -> Result<Response<Body>, StatusCode> {
    let path = req.uri().path();
    let cacheable = path.starts_with("/uploads/") || path.starts_with("/memes/");
    let mut response = next.run(req).await;
    if cacheable {
        response.headers_mut().insert(
            "cache-control",
            HeaderValue::from_static("public, max-age=86400"),
        );
    }
    Ok(response)
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type,authorization"),
    );
}

async fn upload(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let Ok(mut multipart) = multipart else {
        return Err(error_response(ServerError::bad_request(
            "Failed to parse form data. Please try again.",
        )));
    };

    let mut files = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!("malformed multipart body: {}", err);
                return Err(error_response(ServerError::bad_request(
                    "Failed to parse form data. Please try again.",
                )));
            }
        };
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("failed to read multipart field: {}", err);
                return Err(error_response(ServerError::bad_request(
                    "Failed to parse form data. Please try again.",
                )));
            }
        };
        files.push(UploadFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    process_upload_batch(state.as_ref(), files)
        .map(Json)
        .map_err(error_response)
}

async fn generate_meme(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<GenerateMemeRequest>, JsonRejection>,
) -> Result<Json<MemeResponse>, ApiError> {
    let Ok(Json(request)) = payload else {
        return Err(error_response(ServerError::bad_request("Invalid JSON data")));
    };
    let Some(image_url) = request.image_url.filter(|value| !value.is_empty()) else {
        return Err(error_response(ServerError::bad_request(
            "No image URL provided",
        )));
    };
    caption_request(
        state.as_ref(),
        CaptionSource::ByReference(image_url),
        request.top_text,
        request.bottom_text,
    )
    .await
    .map(Json)
    .map_err(error_response)
}

async fn inline_meme(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<InlineMemeRequest>, JsonRejection>,
) -> Result<Json<MemeResponse>, ApiError> {
    let Ok(Json(request)) = payload else {
        return Err(error_response(ServerError::bad_request("Invalid JSON data")));
    };
    let Some(image) = request.image.filter(|value| !value.is_empty()) else {
        return Err(error_response(ServerError::bad_request("No image provided")));
    };
    caption_request(
        state.as_ref(),
        CaptionSource::Inline(image),
        request.top_text,
        request.bottom_text,
    )
    .await
    .map(Json)
    .map_err(error_response)
}

async fn list_memes(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<MemeListResponse>, ApiError> {
    let memes = state.store.list(StoreRoot::Memes).map_err(|err| {
        tracing::warn!("failed to list memes: {}", err);
        error_response(ServerError::internal("Failed to read memes directory"))
    })?;
    Ok(Json(MemeListResponse {
        success: true,
        memes,
    }))
}

fn error_response(err: ServerError) -> ApiError {
    (
        err.status,
        Json(ErrorResponse {
            success: false,
            error: err.message,
        }),
    )
}
