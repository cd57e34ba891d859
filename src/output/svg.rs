//! SVG output encoder.
//!
//! Serializes a canvas as an SVG document: the raster layer is embedded
//! as a base64 PNG `<image>`, the text overlay becomes `<text>`
//! elements. This keeps chart text selectable and crisp while the marks
//! stay pixel-exact.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::canvas::{Canvas, TextAlign};
use crate::error::Result;
use crate::output::PngEncoder;

/// SVG encoder for canvas output.
pub struct SvgEncoder;

impl SvgEncoder {
    /// Encode a canvas as an SVG document string.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded PNG cannot be encoded.
    pub fn encode(canvas: &Canvas) -> Result<String> {
        let width = canvas.width();
        let height = canvas.height();

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        svg.push('\n');

        let png = PngEncoder::to_bytes(canvas.framebuffer())?;
        let encoded = BASE64.encode(png);
        svg.push_str(&format!(
            r#"  <image x="0" y="0" width="{width}" height="{height}" href="data:image/png;base64,{encoded}"/>"#
        ));
        svg.push('\n');

        for op in canvas.texts() {
            let anchor = match op.align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
            };
            svg.push_str(&format!(
                r#"  <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}" font-family="sans-serif">{}</text>"#,
                op.x,
                op.y,
                op.size,
                op.color.to_hex(),
                escape_xml(&op.text),
            ));
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

/// Escape XML entities in text content.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::TextOp;
    use crate::color::Rgba;

    fn canvas_with_text(text: &str) -> Canvas {
        let mut canvas = Canvas::new(50, 40).unwrap();
        canvas.clear(Rgba::WHITE);
        canvas.draw_text(TextOp {
            text: text.to_string(),
            x: 25.0,
            y: 10.0,
            size: 12.0,
            color: Rgba::BLACK,
            align: TextAlign::Center,
        });
        canvas
    }

    #[test]
    fn test_svg_structure() {
        let svg = SvgEncoder::encode(&canvas_with_text("title")).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="50""#));
        assert!(svg.contains("data:image/png;base64,"));
        assert!(svg.contains(">title</text>"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_svg_escapes_text() {
        let svg = SvgEncoder::encode(&canvas_with_text("a < b & \"c\"")).unwrap();
        assert!(svg.contains("a &lt; b &amp; &quot;c&quot;"));
        assert!(!svg.contains("a < b"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("x<y>'z'"), "x&lt;y&gt;&apos;z&apos;");
    }
}
