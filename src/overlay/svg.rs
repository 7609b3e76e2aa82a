use super::OverlayGeometry;

pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn build_overlay_svg(
    geometry: &OverlayGeometry,
    width: u32,
    height: u32,
    top_text: &str,
    bottom_text: &str,
    font_family: &str,
) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    ));
    if !top_text.is_empty() {
        svg.push_str(&caption_element(
            geometry,
            font_family,
            geometry.top_baseline_y,
            top_text,
        ));
    }
    if !bottom_text.is_empty() {
        svg.push_str(&caption_element(
            geometry,
            font_family,
            geometry.bottom_baseline_y,
            bottom_text,
        ));
    }
    svg.push_str("</svg>");
    svg
}

fn caption_element(
    geometry: &OverlayGeometry,
    font_family: &str,
    baseline_y: f64,
    text: &str,
) -> String {
    // uppercase before escaping so entity names stay intact
    let escaped = escape_xml(&text.to_uppercase());
    format!(
        r#"<text x="{x}" y="{y}" font-family="{family}" font-size="{size}" font-weight="bold" fill="white" stroke="black" stroke-width="{stroke}" text-anchor="middle">{text}</text>"#,
        x = geometry.center_x,
        y = baseline_y,
        family = escape_xml(font_family),
        size = geometry.font_size_px,
        stroke = geometry.stroke_width_px,
        text = escaped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> OverlayGeometry {
        OverlayGeometry::compute(800, 600).expect("geometry")
    }

    #[test]
    fn escapes_markup_characters_in_declaration_order() {
        assert_eq!(escape_xml(r#"<b>&"'"#), "&lt;b&gt;&amp;&quot;&apos;");
    }

    #[test]
    fn escaping_ampersand_first_avoids_double_escapes() {
        assert_eq!(escape_xml("<"), "&lt;");
        assert_eq!(escape_xml("&"), "&amp;");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
    }

    #[test]
    fn plain_text_passes_through_unchanged() {
        assert_eq!(escape_xml("SUCH WOW 123"), "SUCH WOW 123");
        assert_eq!(escape_xml(""), "");
    }

    #[test]
    fn captions_are_uppercased_and_centered() {
        let svg = build_overlay_svg(&geometry(), 800, 600, "top text", "bottom text", "Impact");
        assert!(svg.contains(">TOP TEXT</text>"));
        assert!(svg.contains(">BOTTOM TEXT</text>"));
        assert!(svg.contains(r#"x="400""#));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-family="Impact""#));
    }

    #[test]
    fn empty_captions_emit_no_text_elements() {
        let svg = build_overlay_svg(&geometry(), 800, 600, "", "", "Impact");
        assert!(!svg.contains("<text"));
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn whitespace_captions_still_render_an_element() {
        let svg = build_overlay_svg(&geometry(), 800, 600, " ", "", "Impact");
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn only_the_given_side_is_rendered() {
        let svg = build_overlay_svg(&geometry(), 800, 600, "top", "", "Impact");
        assert_eq!(svg.matches("<text").count(), 1);
        assert!(svg.contains(r#"y="96""#));
        assert!(!svg.contains(r#"y="520""#));

        let svg = build_overlay_svg(&geometry(), 800, 600, "", "bottom", "Impact");
        assert_eq!(svg.matches("<text").count(), 1);
        assert!(svg.contains(r#"y="520""#));
    }

    #[test]
    fn markup_in_captions_is_neutralized() {
        let svg = build_overlay_svg(
            &geometry(),
            800,
            600,
            r#"<script>alert("x")</script>"#,
            "",
            "Impact",
        );
        assert!(!svg.contains("<script"));
        assert!(svg.contains("&lt;SCRIPT&gt;"));
    }

    #[test]
    fn viewbox_matches_the_source_dimensions() {
        let geometry = OverlayGeometry::compute(1024, 512).expect("geometry");
        let svg = build_overlay_svg(&geometry, 1024, 512, "a", "b", "Impact");
        assert!(svg.contains(r#"width="1024" height="512" viewBox="0 0 1024 512""#));
    }
}
