//! Template rendering: a pure function from (resume record, style
//! preferences) to a single continuously-flowing document.
//!
//! A `Document` is the flat block list a template emits — the stand-in for
//! the single rendered flow the preview clips into page frames and the
//! exporter rasterizes. Templates never paginate; they only accumulate
//! styled blocks top to bottom.

pub mod templates;

use crate::models::{FontClass, ResumeRecord, StylePreferences};

/// One styled block in the rendered flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Top-level name heading.
    Heading { text: String, size_px: f32 },
    /// Section heading.
    Subheading { text: String, size_px: f32 },
    Paragraph { text: String, size_px: f32 },
    /// Bulleted lines (experience descriptions, custom sections).
    Bullets { items: Vec<String>, size_px: f32 },
    /// Pill-style skill chips that wrap horizontally.
    Chips { items: Vec<String>, size_px: f32 },
    /// Inline contact line: items joined on one wrapping row.
    ContactRow { items: Vec<String>, size_px: f32 },
    /// Horizontal divider rule.
    Rule,
    Spacer { height_px: f32 },
    /// Profile image placeholder; rendered square.
    ProfileImage { height_px: f32 },
}

/// The rendered flow plus the resolved style context measurement and
/// rasterization need.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
    /// Uniform inner padding of the flow, in px.
    pub padding_px: f32,
    pub heading_font: FontClass,
    pub body_font: FontClass,
    /// Resolved colors, `#RRGGBB`.
    pub primary_color: String,
    pub text_color: String,
}

impl Document {
    /// Starts an empty document with the template's font defaults resolved
    /// against the user's style preferences.
    pub fn new(styles: &StylePreferences, default_heading: FontClass, default_body: FontClass) -> Self {
        Document {
            blocks: Vec::new(),
            padding_px: 32.0,
            heading_font: styles.heading_font.class_or(default_heading),
            body_font: styles.body_font.class_or(default_body),
            primary_color: styles.primary_color.clone(),
            text_color: styles.text_color.clone(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// A resume template: a pure view over the record. The pagination and export
/// engines are template-agnostic and work against any implementation.
pub trait Template: Send + Sync {
    /// Canonical template id.
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn render(&self, data: &ResumeRecord, styles: &StylePreferences) -> Document;

    /// Gallery thumbnail. Most templates reuse the full render.
    fn thumbnail(&self, data: &ResumeRecord, styles: &StylePreferences) -> Document {
        self.render(data, styles)
    }
}

/// Splits a multi-line description into non-empty bullet lines.
pub(crate) fn bullet_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flattens skill groups into individual chip labels.
pub(crate) fn flatten_skills(record: &ResumeRecord) -> Vec<String> {
    record
        .skills
        .iter()
        .flat_map(|group| group.skills.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Contact line items in display order, empty fields skipped.
pub(crate) fn contact_items(record: &ResumeRecord) -> Vec<String> {
    [
        &record.contact.email,
        &record.contact.phone,
        &record.contact.linkedin,
        &record.contact.github,
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .cloned()
    .collect()
}
