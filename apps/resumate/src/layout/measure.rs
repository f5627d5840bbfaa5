//! Deterministic measurement of a rendered document.
//!
//! Produces the single source of truth the paginator and the exporter share:
//! each block's vertical placement and the total flow height. The preview
//! clips this flow into page frames; the rasterizer paints the same geometry.

use crate::layout::metrics::{measure_px, wrapped_lines};
use crate::layout::A4_WIDTH_PX;
use crate::models::FontClass;
use crate::render::{Block, Document};

/// Multiplier from font size to line box height.
const LINE_HEIGHT: f32 = 1.5;
/// Vertical gap inserted after every block.
const BLOCK_GAP: f32 = 6.0;
/// Horizontal inset of bullet text relative to the flow.
const BULLET_INDENT: f32 = 18.0;
/// Chip horizontal padding (both sides combined) and inter-chip gap.
const CHIP_PAD: f32 = 16.0;
const CHIP_GAP: f32 = 8.0;
/// Vertical extent of a rule including its margins.
const RULE_HEIGHT: f32 = 13.0;
/// Separator drawn between contact row items.
const CONTACT_SEPARATOR: &str = "  |  ";

/// One measured block: where it sits in the flow and how tall it is.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    /// Index into `Document::blocks`.
    pub index: usize,
    /// Offset from the top of the flow, in px.
    pub y_px: f32,
    pub height_px: f32,
}

/// The measured flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub placed: Vec<PlacedBlock>,
    /// Full flow height including top and bottom padding, in px.
    pub total_height_px: f32,
    /// Usable text column width, in px.
    pub content_width_px: f32,
}

fn text_height(text: &str, size_px: f32, class: FontClass, width: f32) -> f32 {
    wrapped_lines(text, size_px, class, width) as f32 * size_px * LINE_HEIGHT
}

/// Height of a horizontally-flowing chip row set, wrapped greedily.
fn chips_height(items: &[String], size_px: f32, class: FontClass, width: f32) -> f32 {
    if items.is_empty() {
        return 0.0;
    }
    let chip_h = size_px * LINE_HEIGHT + 8.0;
    let mut rows = 1usize;
    let mut current = 0.0_f32;
    for item in items {
        let chip_w = measure_px(item, size_px, class) + CHIP_PAD;
        let gap = if current > 0.0 { CHIP_GAP } else { 0.0 };
        if current > 0.0 && current + gap + chip_w > width {
            rows += 1;
            current = chip_w;
        } else {
            current += gap + chip_w;
        }
    }
    rows as f32 * (chip_h + CHIP_GAP) - CHIP_GAP
}

fn block_height(block: &Block, doc: &Document, width: f32) -> f32 {
    match block {
        Block::Heading { text, size_px } | Block::Subheading { text, size_px } => {
            text_height(text, *size_px, doc.heading_font, width)
        }
        Block::Paragraph { text, size_px } => text_height(text, *size_px, doc.body_font, width),
        Block::Bullets { items, size_px } => items
            .iter()
            .map(|item| text_height(item, *size_px, doc.body_font, width - BULLET_INDENT))
            .sum(),
        Block::Chips { items, size_px } => chips_height(items, *size_px, doc.body_font, width),
        Block::ContactRow { items, size_px } => {
            let joined = items.join(CONTACT_SEPARATOR);
            text_height(&joined, *size_px, doc.body_font, width)
        }
        Block::Rule => RULE_HEIGHT,
        Block::Spacer { height_px } => *height_px,
        Block::ProfileImage { height_px } => *height_px,
    }
}

/// Measures every block of the document at the A4 column width.
pub fn lay_out(doc: &Document) -> Layout {
    let content_width_px = A4_WIDTH_PX - 2.0 * doc.padding_px;
    let mut placed = Vec::with_capacity(doc.blocks.len());
    let mut y = doc.padding_px;

    for (index, block) in doc.blocks.iter().enumerate() {
        let height_px = block_height(block, doc, content_width_px);
        placed.push(PlacedBlock {
            index,
            y_px: y,
            height_px,
        });
        y += height_px + BLOCK_GAP;
    }

    // The last block's trailing gap is replaced by the bottom padding.
    if !doc.blocks.is_empty() {
        y -= BLOCK_GAP;
    }

    Layout {
        placed,
        total_height_px: y + doc.padding_px,
        content_width_px,
    }
}

/// Total flow height, the quantity pagination derives its page count from.
pub fn document_height(doc: &Document) -> f32 {
    lay_out(doc).total_height_px
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StylePreferences;

    fn doc_with(blocks: Vec<Block>) -> Document {
        let mut doc = Document::new(&StylePreferences::default(), FontClass::Sans, FontClass::Sans);
        for block in blocks {
            doc.push(block);
        }
        doc
    }

    #[test]
    fn test_empty_document_is_padding_only() {
        let doc = doc_with(vec![]);
        let layout = lay_out(&doc);
        assert!(layout.placed.is_empty());
        assert_eq!(layout.total_height_px, doc.padding_px * 2.0);
    }

    #[test]
    fn test_measurement_is_deterministic() {
        let doc = doc_with(vec![
            Block::Heading { text: "Ada Lovelace".to_string(), size_px: 36.0 },
            Block::Paragraph { text: "Analyst and programmer.".to_string(), size_px: 11.0 },
        ]);
        assert_eq!(lay_out(&doc), lay_out(&doc));
    }

    #[test]
    fn test_blocks_stack_top_to_bottom() {
        let doc = doc_with(vec![
            Block::Heading { text: "Ada".to_string(), size_px: 36.0 },
            Block::Rule,
            Block::Paragraph { text: "About".to_string(), size_px: 11.0 },
        ]);
        let layout = lay_out(&doc);
        assert_eq!(layout.placed.len(), 3);
        assert!(layout.placed[0].y_px < layout.placed[1].y_px);
        assert!(layout.placed[1].y_px < layout.placed[2].y_px);
        assert_eq!(layout.placed[0].y_px, doc.padding_px);
    }

    #[test]
    fn test_more_content_measures_taller() {
        let short = doc_with(vec![Block::Paragraph {
            text: "One line.".to_string(),
            size_px: 11.0,
        }]);
        let long = doc_with(vec![Block::Paragraph {
            text: "One line. ".repeat(60),
            size_px: 11.0,
        }]);
        assert!(document_height(&long) > document_height(&short));
    }

    #[test]
    fn test_spacer_and_image_use_declared_heights() {
        let doc = doc_with(vec![
            Block::Spacer { height_px: 20.0 },
            Block::ProfileImage { height_px: 112.0 },
        ]);
        let layout = lay_out(&doc);
        assert_eq!(layout.placed[0].height_px, 20.0);
        assert_eq!(layout.placed[1].height_px, 112.0);
    }

    #[test]
    fn test_chips_wrap_into_rows() {
        let few = doc_with(vec![Block::Chips {
            items: vec!["Rust".to_string(), "SQL".to_string()],
            size_px: 10.0,
        }]);
        let many = doc_with(vec![Block::Chips {
            items: (0..40).map(|i| format!("Skill number {i}")).collect(),
            size_px: 10.0,
        }]);
        assert!(document_height(&many) > document_height(&few));
    }
}
