#[cfg(test)]
pub(crate) fn server_state(public_dir: &std::path::Path) -> crate::server::ServerState {
    let mut settings = crate::settings::Settings::default();
    settings.public_dir = public_dir.to_path_buf();
    crate::server::ServerState {
        settings,
        store: crate::store::AssetStore::new(public_dir),
        compositor: crate::overlay::Compositor::new(None, None).expect("compositor"),
    }
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([180, 40, 40, 255]));
    encode(image::DynamicImage::ImageRgba8(image), image::ImageFormat::Png)
}

#[cfg(test)]
pub(crate) fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbImage::from_pixel(width, height, image::Rgb([40, 120, 180]));
    encode(image::DynamicImage::ImageRgb8(image), image::ImageFormat::Jpeg)
}

#[cfg(test)]
fn encode(image: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image.write_to(&mut cursor, format).expect("encode sample image");
    bytes
}
