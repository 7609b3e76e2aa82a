use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct GenerateMemeRequest {
    pub(crate) image_url: Option<String>,
    pub(crate) top_text: Option<String>,
    pub(crate) bottom_text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct InlineMemeRequest {
    pub(crate) image: Option<String>,
    pub(crate) top_text: Option<String>,
    pub(crate) bottom_text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemeResponse {
    pub(crate) success: bool,
    pub(crate) meme_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadResponse {
    pub(crate) success: bool,
    pub(crate) image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) warnings: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MemeListResponse {
    pub(crate) success: bool,
    pub(crate) memes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    pub(crate) success: bool,
    pub(crate) error: String,
}
