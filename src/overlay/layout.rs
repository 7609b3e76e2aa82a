use super::CaptionError;

pub const MIN_FONT_SIZE_PX: u32 = 40;
pub const MIN_STROKE_WIDTH_PX: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub font_size_px: u32,
    pub stroke_width_px: u32,
    pub center_x: f64,
    pub top_baseline_y: f64,
    pub bottom_baseline_y: f64,
}

impl OverlayGeometry {
    pub fn compute(width: u32, height: u32) -> Result<Self, CaptionError> {
        if width == 0 || height == 0 {
            return Err(CaptionError::InvalidDimensions { width, height });
        }
        let font_size_px = (width / 10).max(MIN_FONT_SIZE_PX);
        let stroke_width_px = (font_size_px / 8).max(MIN_STROKE_WIDTH_PX);
        Ok(Self {
            font_size_px,
            stroke_width_px,
            center_x: width as f64 / 2.0,
            top_baseline_y: font_size_px as f64 * 1.2,
            bottom_baseline_y: height as f64 - font_size_px as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_scales_with_image_width() {
        let geometry = OverlayGeometry::compute(800, 600).expect("geometry");
        assert_eq!(geometry.font_size_px, 80);
        assert_eq!(geometry.stroke_width_px, 10);
        assert_eq!(geometry.center_x, 400.0);
        assert_eq!(geometry.top_baseline_y, 96.0);
        assert_eq!(geometry.bottom_baseline_y, 520.0);
    }

    #[test]
    fn small_images_clamp_to_readable_minimums() {
        let geometry = OverlayGeometry::compute(300, 300).expect("geometry");
        assert_eq!(geometry.font_size_px, 40);
        assert_eq!(geometry.stroke_width_px, 5);
        assert_eq!(geometry.top_baseline_y, 48.0);
        assert_eq!(geometry.bottom_baseline_y, 260.0);
    }

    #[test]
    fn wide_images_scale_past_the_minimums() {
        let geometry = OverlayGeometry::compute(4000, 2000).expect("geometry");
        assert_eq!(geometry.font_size_px, 400);
        assert_eq!(geometry.stroke_width_px, 50);
        assert_eq!(geometry.top_baseline_y, 480.0);
        assert_eq!(geometry.bottom_baseline_y, 1600.0);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            OverlayGeometry::compute(0, 300),
            Err(CaptionError::InvalidDimensions { width: 0, height: 300 })
        ));
        assert!(matches!(
            OverlayGeometry::compute(300, 0),
            Err(CaptionError::InvalidDimensions { width: 300, height: 0 })
        ));
    }

    #[test]
    fn same_dimensions_always_produce_the_same_geometry() {
        let first = OverlayGeometry::compute(1280, 720).expect("geometry");
        let second = OverlayGeometry::compute(1280, 720).expect("geometry");
        assert_eq!(first, second);
    }

    #[test]
    fn bottom_baseline_can_fall_outside_short_images() {
        let geometry = OverlayGeometry::compute(800, 50).expect("geometry");
        assert_eq!(geometry.bottom_baseline_y, -30.0);
    }
}
