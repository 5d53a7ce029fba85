//! Page composition
//!
//! Turns one artwork plus the shared settings into a single PDF page:
//! logo at its anchor, artwork centered and scaled to fit, extracted text
//! wrapped and centered underneath. All geometry is computed in top-down
//! millimeters and converted to the PDF's bottom-up points only when ops
//! are emitted.

use crate::constants::*;
use crate::logo::Logo;
use crate::metrics::{text_width_mm, wrap_text};
use crate::settings::{CatalogSettings, FontSettings, LogoSettings};
use crate::types::{ArtworkItem, BuildWarning, Frame, LogoPosition, RgbColor};
use printpdf::*;

/// A logo already registered with the output document
#[derive(Debug, Clone)]
pub struct PlacedLogo {
    pub xobject: XObjectId,
    pub width_px: u32,
    pub height_px: u32,
}

/// Register the logo image with the document once; pages reuse the xobject.
pub fn place_logo(
    doc: &mut PdfDocument,
    logo: &Logo,
    warnings: &mut Vec<BuildWarning>,
) -> Option<PlacedLogo> {
    let mut decode_warnings = Vec::new();
    match RawImage::decode_from_bytes(&logo.bytes, &mut decode_warnings) {
        Ok(raw) => Some(PlacedLogo {
            xobject: doc.add_image(&raw),
            width_px: logo.width_px,
            height_px: logo.height_px,
        }),
        Err(err) => {
            log::warn!("could not embed logo: {}", err);
            warnings.push(BuildWarning::LogoUnavailable { detail: err });
            None
        }
    }
}

/// Logo frame for one of the six anchors.
///
/// The logo is scaled to the configured width preserving aspect ratio and
/// offset from the anchored edges by the fixed page margin.
pub fn logo_frame(
    settings: &LogoSettings,
    width_px: u32,
    height_px: u32,
    page_w_mm: f32,
    page_h_mm: f32,
) -> Frame {
    let w = settings.width_mm;
    let h = if width_px == 0 {
        w
    } else {
        w * height_px as f32 / width_px as f32
    };

    let x = match settings.position {
        LogoPosition::TopLeft | LogoPosition::BottomLeft => PAGE_MARGIN_MM,
        LogoPosition::TopRight | LogoPosition::BottomRight => page_w_mm - w - PAGE_MARGIN_MM,
        LogoPosition::TopCenter | LogoPosition::BottomCenter => (page_w_mm - w) / 2.0,
    };

    let y = if settings.position.is_top() {
        PAGE_MARGIN_MM
    } else {
        page_h_mm - h - PAGE_MARGIN_MM
    };

    Frame::new(x, y, w, h)
}

/// Top of the content area: below a top-anchored logo, otherwise a fixed
/// top margin.
pub fn content_top_mm(logo: Option<(LogoPosition, &Frame)>) -> f32 {
    match logo {
        Some((position, frame)) if position.is_top() => frame.bottom() + LOGO_CONTENT_GAP_MM,
        _ => TOP_MARGIN_NO_LOGO_MM,
    }
}

/// Artwork frame: centered horizontally within the printable width, scaled
/// to fit both the width cap and the maximum height fraction of the page.
pub fn artwork_frame(
    width_px: u32,
    height_px: u32,
    page_w_mm: f32,
    page_h_mm: f32,
    top_mm: f32,
) -> Frame {
    let printable = page_w_mm - 2.0 * PAGE_MARGIN_MM;
    let mut w = ARTWORK_MAX_WIDTH_MM.min(printable * ARTWORK_WIDTH_FRACTION);

    let (px_w, px_h) = if width_px == 0 || height_px == 0 {
        (1, 1)
    } else {
        (width_px, height_px)
    };
    let mut h = w * px_h as f32 / px_w as f32;

    let max_h = page_h_mm * ARTWORK_MAX_HEIGHT_FRACTION;
    if h > max_h {
        w *= max_h / h;
        h = max_h;
    }

    Frame::new((page_w_mm - w) / 2.0, top_mm, w, h)
}

/// One laid-out line of the text block
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    /// Baseline position measured from the page top
    pub baseline_mm: f32,
    /// Rendered with the title font instead of the body font
    pub title: bool,
}

/// Lay out the extracted text below `top_mm`.
///
/// The first non-empty line is the title, the remainder the body. Lines
/// are word-wrapped to the printable width and centered; lines that would
/// cross `bottom_limit_mm` are dropped so a page never overflows.
pub fn layout_text(
    text: &str,
    settings: &CatalogSettings,
    page_w_mm: f32,
    top_mm: f32,
    bottom_limit_mm: f32,
) -> Vec<TextLine> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let printable = page_w_mm - 2.0 * PAGE_MARGIN_MM;

    let mut source_lines = trimmed.lines();
    let title_raw = source_lines.next().unwrap_or("").trim().to_string();
    let body_raw = source_lines.collect::<Vec<_>>().join("\n");
    let body_raw = body_raw.trim().to_string();

    let segments: [(&str, &FontSettings, bool); 2] = [
        (title_raw.as_str(), &settings.title_font, true),
        (body_raw.as_str(), &settings.body_font, false),
    ];

    let mut out = Vec::new();
    let mut cursor = top_mm;

    'segments: for (raw, font, title) in segments {
        if raw.is_empty() {
            continue;
        }
        let line_height = pt_to_mm(font.size_pt) * LINE_HEIGHT_FACTOR;

        for line in wrap_text(raw, font.family, font.size_pt, printable) {
            if cursor + line_height > bottom_limit_mm {
                // Page is full; drop the remaining lines
                break 'segments;
            }
            if !line.is_empty() {
                let width = text_width_mm(&line, font.family, font.size_pt);
                out.push(TextLine {
                    x_mm: ((page_w_mm - width) / 2.0).max(PAGE_MARGIN_MM),
                    baseline_mm: cursor + pt_to_mm(font.size_pt) * BASELINE_FACTOR,
                    text: line,
                    title,
                });
            }
            cursor += line_height;
        }
    }

    out
}

/// Compose one catalog page for `item`.
///
/// No error return: the settings were validated at edit time. A failure to
/// re-encode the artwork for embedding degrades to a page without the
/// image, reported through `warnings`.
pub fn compose_page(
    doc: &mut PdfDocument,
    item: &ArtworkItem,
    logo: Option<&PlacedLogo>,
    settings: &CatalogSettings,
    warnings: &mut Vec<BuildWarning>,
) -> PdfPage {
    let (page_w, page_h) = settings
        .page_size
        .dimensions_with_orientation(settings.orientation);

    let mut ops = Vec::new();

    let mut logo_box = None;
    if let Some(placed) = logo {
        let frame = logo_frame(&settings.logo, placed.width_px, placed.height_px, page_w, page_h);
        ops.push(image_op(
            &placed.xobject,
            &frame,
            placed.width_px,
            placed.height_px,
            page_h,
        ));
        logo_box = Some(frame);
    }

    let content_top = content_top_mm(
        logo_box
            .as_ref()
            .map(|frame| (settings.logo.position, frame)),
    );

    let mut text_top = content_top;
    let mut decode_warnings = Vec::new();
    match RawImage::decode_from_bytes(&item.bytes, &mut decode_warnings) {
        Ok(raw) => {
            let frame =
                artwork_frame(item.width_px, item.height_px, page_w, page_h, content_top);
            let id = doc.add_image(&raw);
            ops.push(image_op(&id, &frame, item.width_px, item.height_px, page_h));
            text_top = frame.bottom() + ARTWORK_TEXT_GAP_MM;
        }
        Err(err) => {
            // The text block moves up to where the image would have been
            log::warn!("could not embed artwork '{}': {}", item.name, err);
            warnings.push(BuildWarning::ImageEmbedFailed {
                name: item.name.clone(),
                detail: err,
            });
        }
    }

    let bottom_limit = match &logo_box {
        Some(frame) if !settings.logo.position.is_top() => {
            (frame.y_mm - LOGO_CONTENT_GAP_MM).min(page_h - BOTTOM_MARGIN_MM)
        }
        _ => page_h - BOTTOM_MARGIN_MM,
    };

    for line in layout_text(&item.text, settings, page_w, text_top, bottom_limit) {
        let font = if line.title {
            &settings.title_font
        } else {
            &settings.body_font
        };
        ops.push(Op::StartTextSection);
        ops.push(Op::SetFillColor {
            col: pdf_color(font.color),
        });
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Mm(line.x_mm).into_pt(),
                y: Mm(page_h - line.baseline_mm).into_pt(),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            font: font.family.builtin(),
            size: Pt(font.size_pt),
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(line.text.clone())],
            font: font.family.builtin(),
        });
        ops.push(Op::EndTextSection);
    }

    PdfPage::new(Mm(page_w), Mm(page_h), ops)
}

/// Place an xobject so it fills `frame` exactly.
///
/// At 72 dpi one source pixel renders as one point, so the scale factors
/// map the pixel grid onto the frame.
fn image_op(id: &XObjectId, frame: &Frame, width_px: u32, height_px: u32, page_h_mm: f32) -> Op {
    Op::UseXobject {
        id: id.clone(),
        transform: XObjectTransform {
            translate_x: Some(Mm(frame.x_mm).into_pt()),
            translate_y: Some(Mm(page_h_mm - frame.bottom()).into_pt()),
            scale_x: Some(mm_to_pt(frame.width_mm) / width_px.max(1) as f32),
            scale_y: Some(mm_to_pt(frame.height_mm) / height_px.max(1) as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    }
}

fn pdf_color(color: RgbColor) -> Color {
    Color::Rgb(Rgb {
        r: color.r as f32 / 255.0,
        g: color.g as f32 / 255.0,
        b: color.b as f32 / 255.0,
        icc_profile: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LogoSource;

    fn logo_settings(position: LogoPosition) -> LogoSettings {
        LogoSettings {
            source: LogoSource::BuiltIn,
            width_mm: 25.0,
            position,
        }
    }

    #[test]
    fn test_logo_frame_top_left() {
        let frame = logo_frame(&logo_settings(LogoPosition::TopLeft), 120, 48, 210.0, 297.0);
        assert!((frame.x_mm - PAGE_MARGIN_MM).abs() < 0.001);
        assert!((frame.y_mm - PAGE_MARGIN_MM).abs() < 0.001);
        assert!((frame.width_mm - 25.0).abs() < 0.001);
        // Aspect preserved: 48/120 of the width
        assert!((frame.height_mm - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_logo_frame_bottom_right_uses_scaled_height() {
        let frame = logo_frame(
            &logo_settings(LogoPosition::BottomRight),
            120,
            48,
            210.0,
            297.0,
        );
        assert!((frame.right() - (210.0 - PAGE_MARGIN_MM)).abs() < 0.001);
        assert!((frame.bottom() - (297.0 - PAGE_MARGIN_MM)).abs() < 0.001);
    }

    #[test]
    fn test_logo_frame_centered() {
        let frame = logo_frame(
            &logo_settings(LogoPosition::TopCenter),
            100,
            100,
            210.0,
            297.0,
        );
        assert!((frame.x_mm - (210.0 - 25.0) / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_artwork_frame_width_capped() {
        // Printable width on A4 is 190mm; 80% = 152mm, capped at 120mm
        let frame = artwork_frame(800, 600, 210.0, 297.0, 30.0);
        assert!((frame.width_mm - 120.0).abs() < 0.001);
        assert!((frame.height_mm - 90.0).abs() < 0.001);
        assert!((frame.center_x() - 105.0).abs() < 0.001);
        assert!((frame.y_mm - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_artwork_frame_height_capped() {
        // A very tall image must not exceed half the page height
        let frame = artwork_frame(100, 1000, 210.0, 297.0, 30.0);
        let max_h = 297.0 * ARTWORK_MAX_HEIGHT_FRACTION;
        assert!(frame.height_mm <= max_h + 0.001);
        // Aspect still preserved
        let aspect = frame.height_mm / frame.width_mm;
        assert!((aspect - 10.0).abs() < 0.01);
        // Still centered
        assert!((frame.center_x() - 105.0).abs() < 0.001);
    }

    #[test]
    fn test_content_top_below_top_logo() {
        let frame = Frame::new(10.0, 10.0, 25.0, 12.0);
        let top = content_top_mm(Some((LogoPosition::TopLeft, &frame)));
        assert!((top - (22.0 + LOGO_CONTENT_GAP_MM)).abs() < 0.001);
    }

    #[test]
    fn test_content_top_with_bottom_logo() {
        let frame = Frame::new(10.0, 270.0, 25.0, 12.0);
        let top = content_top_mm(Some((LogoPosition::BottomCenter, &frame)));
        assert!((top - TOP_MARGIN_NO_LOGO_MM).abs() < 0.001);
    }

    #[test]
    fn test_layout_text_title_and_body() {
        let settings = CatalogSettings::default();
        let lines = layout_text("Sunset\nOil on canvas, 1998", &settings, 210.0, 100.0, 282.0);
        assert!(lines.len() >= 2);
        assert!(lines[0].title);
        assert_eq!(lines[0].text, "Sunset");
        assert!(lines[1..].iter().all(|l| !l.title));
    }

    #[test]
    fn test_layout_text_single_line_is_title_only() {
        let settings = CatalogSettings::default();
        let lines = layout_text("Sunset", &settings, 210.0, 100.0, 282.0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].title);
    }

    #[test]
    fn test_layout_text_empty_is_empty() {
        let settings = CatalogSettings::default();
        assert!(layout_text("", &settings, 210.0, 100.0, 282.0).is_empty());
        assert!(layout_text("  \n ", &settings, 210.0, 100.0, 282.0).is_empty());
    }

    #[test]
    fn test_layout_text_centered() {
        let settings = CatalogSettings::default();
        let lines = layout_text("Sunset", &settings, 210.0, 100.0, 282.0);
        let width = text_width_mm("Sunset", settings.title_font.family, settings.title_font.size_pt);
        assert!((lines[0].x_mm - (210.0 - width) / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_layout_text_clips_at_bottom() {
        let settings = CatalogSettings::default();
        let long_body: String = (0..200).map(|i| format!("word{} ", i)).collect();
        let text = format!("Title\n{}", long_body);
        // Only ~20mm of room: most of the body must be dropped
        let lines = layout_text(&text, &settings, 210.0, 262.0, 282.0);
        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.baseline_mm < 282.0);
        }
    }
}
