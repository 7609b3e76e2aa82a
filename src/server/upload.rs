use crate::mime;
use crate::store::StoreRoot;

use super::caption::ServerError;
use super::models::UploadResponse;
use super::state::ServerState;

pub(crate) const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug)]
pub(crate) struct UploadFile {
    pub(crate) name: String,
    pub(crate) bytes: Vec<u8>,
}

pub(crate) fn process_upload_batch(
    state: &ServerState,
    files: Vec<UploadFile>,
) -> Result<UploadResponse, ServerError> {
    if files.is_empty() {
        return Err(ServerError::bad_request("No files uploaded"));
    }

    let total = files.len();
    let mut image_urls = Vec::new();
    let mut warnings = Vec::new();

    for file in files {
        if file.bytes.len() > MAX_FILE_BYTES {
            warnings.push(format!("File {} exceeds the size limit of 5MB", file.name));
            continue;
        }
        let Some(extension) = mime::sniff_image_mime(&file.bytes)
            .and_then(mime::extension_from_mime)
        else {
            warnings.push(format!(
                "File {} has an invalid type. Only JPG, PNG, GIF, and WebP are allowed",
                file.name
            ));
            continue;
        };
        match state
            .store
            .persist(StoreRoot::Uploads, "", &file.bytes, extension)
        {
            Ok(reference) => image_urls.push(reference),
            Err(err) => {
                tracing::warn!("failed to persist upload {}: {}", file.name, err);
                warnings.push(format!("Failed to save file {}", file.name));
            }
        }
    }

    if image_urls.is_empty() {
        let reason = if warnings.is_empty() {
            "Failed to upload any files".to_string()
        } else {
            warnings.join(", ")
        };
        return Err(ServerError::bad_request(reason));
    }

    tracing::info!(
        "stored {} of {} uploaded files ({} rejected)",
        image_urls.len(),
        total,
        warnings.len()
    );
    Ok(UploadResponse {
        success: true,
        image_urls,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
    })
}
