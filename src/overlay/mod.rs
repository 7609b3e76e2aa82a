mod compositor;
mod layout;
mod svg;

pub use compositor::{Compositor, DEFAULT_FONT_FAMILY};
pub use layout::OverlayGeometry;
pub use svg::{build_overlay_svg, escape_xml};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("failed to render caption overlay: {0}")]
    Render(String),
    #[error("failed to encode captioned image: {0}")]
    Encode(#[source] image::ImageError),
}
