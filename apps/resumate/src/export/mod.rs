//! PDF export: rasterize the flow at natural scale, slice it into A4 bands,
//! and write a single file.
//!
//! The slicer is pure over the raster, so the page boundaries the PDF gets
//! are exactly the ones pagination computed. The file is built fully in
//! memory and written once; a failed export leaves no partial file behind.

pub mod raster;

use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use image::RgbImage;
use printpdf::{ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Px};
use thiserror::Error;
use tracing::info;

use crate::layout::zoom::{NaturalZoomGuard, ZoomController};
use crate::render::Document;

/// Wait after forcing natural zoom before capturing, letting the layout
/// settle the way the interactive preview does.
pub const EXPORT_SETTLE: Duration = Duration::from_millis(300);
/// Raster supersampling factor for print sharpness.
pub const SUPERSAMPLE: f32 = 2.0;
pub const EXPORT_FILENAME: &str = "ResuMate_Resume.pdf";

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("pdf assembly failed: {0}")]
    Pdf(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Number of A4 bands a raster of the given height slices into. The band
/// height in device pixels follows from the raster width and the A4 aspect
/// ratio. Never zero.
pub fn page_band_count(image_width: u32, image_height: u32) -> usize {
    let band_height = band_height_px(image_width);
    if band_height == 0 || image_height == 0 {
        return 1;
    }
    (image_height as usize).div_ceil(band_height as usize).max(1)
}

fn band_height_px(image_width: u32) -> u32 {
    (image_width as f32 * A4_HEIGHT_MM / A4_WIDTH_MM).round() as u32
}

/// Copies one band out of the raster onto a full-page white canvas. The
/// final band is usually short; the rest of its page stays blank.
fn extract_band(image: &RgbImage, band_index: usize, band_height: u32) -> RgbImage {
    let top = band_index as u32 * band_height;
    let mut band = RgbImage::from_pixel(image.width(), band_height, image::Rgb([255, 255, 255]));
    for y in 0..band_height.min(image.height().saturating_sub(top)) {
        for x in 0..image.width() {
            band.put_pixel(x, y, *image.get_pixel(x, top + y));
        }
    }
    band
}

/// Slices the raster into A4 pages and assembles the PDF in memory.
pub fn slice_into_pdf(image: &RgbImage) -> Result<Vec<u8>, ExportError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(ExportError::Raster("empty raster".to_string()));
    }
    let band_height = band_height_px(image.width());
    let pages = page_band_count(image.width(), image.height());
    let dpi = image.width() as f32 / (A4_WIDTH_MM / 25.4);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "ResuMate Resume",
        Mm(A4_WIDTH_MM),
        Mm(A4_HEIGHT_MM),
        "Layer 1",
    );

    for page_index in 0..pages {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        let band = extract_band(image, page_index, band_height);
        let (width, height) = band.dimensions();
        let pdf_image = Image::from(ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: band.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });
        pdf_image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(0.0)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

/// Drives a full export: natural zoom, settle, rasterize, slice, write.
pub struct PdfExporter {
    export_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        PdfExporter {
            export_dir: export_dir.into(),
        }
    }

    /// Exports the document and returns the written path. The user's zoom
    /// level is restored whether or not the export succeeds.
    pub async fn export(
        &self,
        doc: &Document,
        zoom: &mut ZoomController,
    ) -> Result<PathBuf, ExportError> {
        let _natural = NaturalZoomGuard::new(zoom);
        tokio::time::sleep(EXPORT_SETTLE).await;

        let image = raster::rasterize(doc, SUPERSAMPLE);
        let pages = page_band_count(image.width(), image.height());
        let bytes = slice_into_pdf(&image)?;

        let path = self.output_path();
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), pages, "exported pdf");
        Ok(path)
    }

    pub fn output_path(&self) -> PathBuf {
        self.export_dir.join(EXPORT_FILENAME)
    }
}
