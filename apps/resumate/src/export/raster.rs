//! Greeked rasterization of the measured flow.
//!
//! The exporter's contract is geometric: the PDF pages must slice the flow at
//! exactly the offsets the preview clips at. Blocks are painted as placed
//! bars and boxes using the same measurement pass the paginator consumes, so
//! a block that starts on page two of the preview starts on page two of the
//! PDF.

use image::{Rgb, RgbImage};

use crate::layout::measure::{lay_out, Layout};
use crate::layout::A4_HEIGHT_PX;
use crate::render::{Block, Document};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const IMAGE_PLACEHOLDER: Rgb<u8> = Rgb([210, 210, 210]);
/// Fraction of a line box the painted text bar occupies.
const BAR_FILL: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.5;
const BULLET_INDENT: f32 = 18.0;

/// Parses `#RRGGBB`, falling back to the given default on anything else.
fn parse_hex(color: &str, fallback: Rgb<u8>) -> Rgb<u8> {
    let hex = match color.strip_prefix('#') {
        Some(h) if h.len() == 6 => h,
        _ => return fallback,
    };
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Rgb([r, g, b]),
        _ => fallback,
    }
}

/// Blends a color toward white. Body text greeks lighter than headings.
fn lighten(color: Rgb<u8>, amount: f32) -> Rgb<u8> {
    let mix = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
    Rgb([mix(color.0[0]), mix(color.0[1]), mix(color.0[2])])
}

fn fill_rect(img: &mut RgbImage, x: f32, y: f32, w: f32, h: f32, color: Rgb<u8>) {
    if w <= 0.0 || h <= 0.0 {
        return;
    }
    let x0 = x.max(0.0) as u32;
    let y0 = y.max(0.0) as u32;
    let x1 = ((x + w).ceil() as u32).min(img.width());
    let y1 = ((y + h).ceil() as u32).min(img.height());
    for py in y0..y1 {
        for px in x0..x1 {
            img.put_pixel(px, py, color);
        }
    }
}

/// Paints stacked line bars for a text block of the given measured height.
fn paint_lines(
    img: &mut RgbImage,
    x: f32,
    y: f32,
    width: f32,
    block_height: f32,
    size_px: f32,
    scale: f32,
    color: Rgb<u8>,
) {
    let line_h = size_px * LINE_HEIGHT;
    if line_h <= 0.0 {
        return;
    }
    let lines = (block_height / line_h).round().max(0.0) as usize;
    for i in 0..lines {
        // The final wrapped line is usually partial.
        let bar_w = if i + 1 == lines && lines > 1 { width * 0.6 } else { width };
        fill_rect(
            img,
            x * scale,
            (y + i as f32 * line_h + line_h * (1.0 - BAR_FILL) / 2.0) * scale,
            bar_w * scale,
            line_h * BAR_FILL * scale,
            color,
        );
    }
}

/// Rasterizes the document at `scale` device pixels per CSS pixel.
///
/// The canvas is always at least one page tall so a near-empty resume still
/// exports a full blank page.
pub fn rasterize(doc: &Document, scale: f32) -> RgbImage {
    let layout: Layout = lay_out(doc);
    let flow_height = layout.total_height_px.max(A4_HEIGHT_PX);
    let page_width = layout.content_width_px + 2.0 * doc.padding_px;

    let img_w = (page_width * scale).round().max(1.0) as u32;
    let img_h = (flow_height * scale).round().max(1.0) as u32;
    let mut img = RgbImage::from_pixel(img_w, img_h, WHITE);

    let primary = parse_hex(&doc.primary_color, Rgb([75, 0, 130]));
    let text = parse_hex(&doc.text_color, Rgb([51, 51, 51]));
    let body = lighten(text, 0.55);
    let x = doc.padding_px;
    let width = layout.content_width_px;

    for placed in &layout.placed {
        let y = placed.y_px;
        let h = placed.height_px;
        match &doc.blocks[placed.index] {
            Block::Heading { size_px, .. } | Block::Subheading { size_px, .. } => {
                paint_lines(&mut img, x, y, width, h, *size_px, scale, primary);
            }
            Block::Paragraph { size_px, .. } | Block::ContactRow { size_px, .. } => {
                paint_lines(&mut img, x, y, width, h, *size_px, scale, body);
            }
            Block::Bullets { size_px, .. } => {
                paint_lines(
                    &mut img,
                    x + BULLET_INDENT,
                    y,
                    width - BULLET_INDENT,
                    h,
                    *size_px,
                    scale,
                    body,
                );
            }
            Block::Chips { .. } => {
                fill_rect(
                    &mut img,
                    x * scale,
                    y * scale,
                    width * scale,
                    h * scale,
                    lighten(primary, 0.85),
                );
            }
            Block::Rule => {
                fill_rect(
                    &mut img,
                    x * scale,
                    (y + h / 2.0) * scale,
                    width * scale,
                    1.0 * scale.max(1.0),
                    lighten(text, 0.7),
                );
            }
            Block::Spacer { .. } => {}
            Block::ProfileImage { height_px } => {
                fill_rect(
                    &mut img,
                    x * scale,
                    y * scale,
                    height_px * scale,
                    height_px * scale,
                    IMAGE_PLACEHOLDER,
                );
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::A4_WIDTH_PX;
    use crate::models::{FontClass, StylePreferences};

    fn doc_with(blocks: Vec<Block>) -> Document {
        let mut doc = Document::new(&StylePreferences::default(), FontClass::Sans, FontClass::Sans);
        for block in blocks {
            doc.push(block);
        }
        doc
    }

    #[test]
    fn test_parse_hex_with_fallback() {
        assert_eq!(parse_hex("#4B0082", WHITE), Rgb([0x4B, 0x00, 0x82]));
        assert_eq!(parse_hex("rebeccapurple", Rgb([1, 2, 3])), Rgb([1, 2, 3]));
        assert_eq!(parse_hex("#GGGGGG", Rgb([1, 2, 3])), Rgb([1, 2, 3]));
        assert_eq!(parse_hex("#333", Rgb([1, 2, 3])), Rgb([1, 2, 3]));
    }

    #[test]
    fn test_empty_document_rasters_one_blank_page() {
        let img = rasterize(&doc_with(vec![]), 1.0);
        assert_eq!(img.width(), A4_WIDTH_PX.round() as u32);
        assert_eq!(img.height(), A4_HEIGHT_PX.round() as u32);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn test_scale_doubles_dimensions() {
        let doc = doc_with(vec![Block::Heading {
            text: "Ada Lovelace".to_string(),
            size_px: 36.0,
        }]);
        let one = rasterize(&doc, 1.0);
        let two = rasterize(&doc, 2.0);
        assert_eq!(two.width(), one.width() * 2);
    }

    #[test]
    fn test_heading_paints_primary_color() {
        let doc = doc_with(vec![Block::Heading {
            text: "Ada Lovelace".to_string(),
            size_px: 36.0,
        }]);
        let img = rasterize(&doc, 1.0);
        // Sample inside the first line bar.
        let x = (doc.padding_px + 5.0) as u32;
        let y = (doc.padding_px + 36.0 * LINE_HEIGHT / 2.0) as u32;
        assert_eq!(*img.get_pixel(x, y), Rgb([0x4B, 0x00, 0x82]));
    }

    #[test]
    fn test_long_flow_rasters_taller_than_one_page() {
        let doc = doc_with(
            (0..120)
                .map(|_| Block::Paragraph {
                    text: "A reasonably long line of resume text for height.".to_string(),
                    size_px: 11.0,
                })
                .collect(),
        );
        let img = rasterize(&doc, 1.0);
        assert!(img.height() > A4_HEIGHT_PX as u32);
    }
}
