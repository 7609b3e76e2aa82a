use std::path::Path;

pub const JPEG_MIME: &str = "image/jpeg";
pub const PNG_MIME: &str = "image/png";
pub const GIF_MIME: &str = "image/gif";
pub const WEBP_MIME: &str = "image/webp";

pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    let kind = infer::get(bytes)?;
    match kind.mime_type() {
        "image/jpeg" | "image/jpg" => Some(JPEG_MIME),
        "image/png" => Some(PNG_MIME),
        "image/gif" => Some(GIF_MIME),
        "image/webp" => Some(WEBP_MIME),
        _ => None,
    }
}

pub fn extension_from_mime(mime: &str) -> Option<&'static str> {
    match mime {
        JPEG_MIME | "image/jpg" => Some("jpg"),
        PNG_MIME => Some("png"),
        GIF_MIME => Some("gif"),
        WEBP_MIME => Some("webp"),
        _ => None,
    }
}

pub fn has_image_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| {
            matches!(
                value.to_lowercase().as_str(),
                "jpg" | "jpeg" | "png" | "gif" | "webp"
            )
        })
        .unwrap_or(false)
}
