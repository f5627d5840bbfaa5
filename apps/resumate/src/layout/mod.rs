//! Pagination and viewport geometry for the preview and exporter.
//!
//! Everything here works in CSS pixels at zoom 1.0. The preview applies zoom
//! as a pure visual transform after the fact, so measured heights and page
//! counts never depend on the current zoom level.

pub mod measure;
pub mod metrics;
pub mod pagination;
pub mod pan;
pub mod zoom;

/// A4 page width at 96 CSS px/in (210mm).
pub const A4_WIDTH_PX: f32 = 793.7;
/// A4 page height at 96 CSS px/in (297mm).
pub const A4_HEIGHT_PX: f32 = 1122.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// The unzoomed page footprint every page frame shares.
pub fn a4_page_size() -> Size {
    Size {
        width: A4_WIDTH_PX,
        height: A4_HEIGHT_PX,
    }
}
