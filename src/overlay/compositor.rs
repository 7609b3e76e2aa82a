use anyhow::{Context, Result};
use image::GenericImageView;
use resvg::render;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;
use usvg::{Options, Tree, fontdb};

use super::svg::build_overlay_svg;
use super::{CaptionError, OverlayGeometry};

pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

#[derive(Clone)]
pub struct Compositor {
    fontdb: Arc<fontdb::Database>,
    font_family: String,
}

impl Compositor {
    pub fn new(font_family: Option<&str>, font_path: Option<&Path>) -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        if let Some(path) = font_path {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read overlay font: {}", path.display()))?;
            db.load_font_data(data);
        }
        Ok(Self {
            fontdb: Arc::new(db),
            font_family: font_family.unwrap_or(DEFAULT_FONT_FAMILY).to_string(),
        })
    }

    pub fn caption(
        &self,
        source: &[u8],
        top_text: &str,
        bottom_text: &str,
    ) -> Result<Vec<u8>, CaptionError> {
        let source_image = image::load_from_memory(source).map_err(CaptionError::Decode)?;
        let (width, height) = source_image.dimensions();
        let geometry = OverlayGeometry::compute(width, height)?;
        let svg = build_overlay_svg(
            &geometry,
            width,
            height,
            top_text,
            bottom_text,
            &self.font_family,
        );
        let overlay = self.rasterize(&svg, width, height)?;
        let mut canvas = source_image.to_rgba8();
        image::imageops::overlay(&mut canvas, &overlay, 0, 0);
        let mut bytes = Vec::new();
        let mut cursor = Cursor::new(&mut bytes);
        image::DynamicImage::ImageRgba8(canvas)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .map_err(CaptionError::Encode)?;
        Ok(bytes)
    }

    fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<image::RgbaImage, CaptionError> {
        let options = Options {
            fontdb: self.fontdb.clone(),
            ..Options::default()
        };
        let tree = Tree::from_str(svg, &options)
            .map_err(|err| CaptionError::Render(format!("failed to parse overlay SVG: {}", err)))?;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(CaptionError::InvalidDimensions { width, height })?;
        let mut pixmap_mut = pixmap.as_mut();
        render(&tree, tiny_skia::Transform::identity(), &mut pixmap_mut);
        // pixmap data is premultiplied, the blend below expects straight alpha
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        image::RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| CaptionError::Render("overlay buffer size mismatch".to_string()))
    }
}
