//! The template gallery.
//!
//! Gallery ids outnumber implementations on purpose: several visual variants
//! share one block-level layout, differing only in the styling the record's
//! preferences already control.

mod classic;
mod executive;
mod minimalist;
mod modern;

pub use classic::ClassicTemplate;
pub use executive::ExecutiveTemplate;
pub use minimalist::MinimalistTemplate;
pub use modern::ModernTemplate;

use super::Template;

/// One gallery entry: a user-facing id/name bound to a template.
pub struct GalleryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub template: &'static dyn Template,
}

static CLASSIC: ClassicTemplate = ClassicTemplate;
static MODERN: ModernTemplate = ModernTemplate;
static MINIMALIST: MinimalistTemplate = MinimalistTemplate;
static EXECUTIVE: ExecutiveTemplate = ExecutiveTemplate;

static GALLERY: &[GalleryEntry] = &[
    GalleryEntry { id: "cambridge", name: "Cambridge", template: &EXECUTIVE },
    GalleryEntry { id: "executive", name: "Executive", template: &EXECUTIVE },
    GalleryEntry { id: "timeline", name: "Timeline", template: &MODERN },
    GalleryEntry { id: "creative", name: "Creative", template: &MODERN },
    GalleryEntry { id: "professional", name: "Professional", template: &CLASSIC },
    GalleryEntry { id: "minimalist-clean", name: "Minimalist", template: &MINIMALIST },
    GalleryEntry { id: "modern-sleek", name: "Modern Sleek", template: &MODERN },
    GalleryEntry { id: "classic-professional", name: "Classic Professional", template: &CLASSIC },
    GalleryEntry { id: "modern-creative", name: "Modern Creative", template: &MODERN },
    GalleryEntry { id: "classic-minimalist", name: "Classic Minimalist", template: &MINIMALIST },
    GalleryEntry { id: "modern-tech", name: "Modern Tech", template: &MODERN },
    GalleryEntry { id: "classic-academic", name: "Classic Academic", template: &CLASSIC },
    GalleryEntry { id: "modern-bold", name: "Modern Bold", template: &MODERN },
    GalleryEntry { id: "classic-elegant", name: "Classic Elegant", template: &CLASSIC },
    GalleryEntry { id: "classic-standard", name: "Classic Standard", template: &CLASSIC },
    GalleryEntry { id: "modern-vibrant", name: "Modern Vibrant", template: &MODERN },
    GalleryEntry { id: "classic-corporate", name: "Classic Corporate", template: &CLASSIC },
    GalleryEntry { id: "modern-designer", name: "Modern Designer", template: &MODERN },
];

pub fn gallery() -> &'static [GalleryEntry] {
    GALLERY
}

/// Looks up a template by gallery id.
pub fn find(id: &str) -> Option<&'static dyn Template> {
    GALLERY.iter().find(|e| e.id == id).map(|e| e.template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResumeRecord, StylePreferences};

    #[test]
    fn test_every_gallery_id_resolves() {
        for entry in gallery() {
            assert!(find(entry.id).is_some(), "gallery id {} must resolve", entry.id);
        }
        assert!(find("nonexistent").is_none());
    }

    // A brand-new user has an all-empty record; every template must render
    // it without panicking.
    #[test]
    fn test_empty_record_renders_in_every_template() {
        let record = ResumeRecord::default();
        let styles = StylePreferences::default();
        for entry in gallery() {
            let doc = entry.template.render(&record, &styles);
            assert!(doc.padding_px > 0.0, "{}", entry.id);
            let thumb = entry.template.thumbnail(&record, &styles);
            assert_eq!(thumb.padding_px, doc.padding_px);
        }
    }
}
