use meme_captioner_rust::overlay::{OverlayGeometry, build_overlay_svg};

#[test]
fn overlay_svg_snapshot() {
    let geometry = OverlayGeometry::compute(800, 600).unwrap();
    let svg = build_overlay_svg(
        &geometry,
        800,
        600,
        "when the build passes",
        "on the first try",
        "sans-serif",
    );
    insta::assert_snapshot!(svg);
}

#[test]
fn escaped_caption_snapshot() {
    let geometry = OverlayGeometry::compute(500, 400).unwrap();
    let svg = build_overlay_svg(&geometry, 500, 400, "cats & \"dogs\" <3", "", "sans-serif");
    insta::assert_snapshot!(svg);
}
