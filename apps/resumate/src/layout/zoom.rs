//! Zoom-to-fit and manual zoom control.
//!
//! Zoom is a pure visual transform over the page stack; it never feeds back
//! into measurement or pagination. Fit recomputes from the viewport, manual
//! steps nudge by a fixed increment, and both stay inside the same bounds.

use crate::layout::Size;

/// Hard ceiling for any zoom level, fit or manual.
pub const ZOOM_CAP: f32 = 1.5;
/// Floor for manual zoom-out.
pub const ZOOM_MIN: f32 = 0.4;
/// Manual zoom increment.
pub const ZOOM_STEP: f32 = 0.1;
/// Breathing room subtracted from each viewport dimension before fitting.
pub const FIT_PADDING_PX: f32 = 64.0;

/// The zoom that fits one full page inside the viewport, with padding, never
/// magnifying past the cap. Degenerate viewports (zero or negative inner
/// dimensions) fall back to the neutral 1.0.
pub fn fit_zoom(viewport: Size, page: Size) -> f32 {
    let inner_w = viewport.width - FIT_PADDING_PX;
    let inner_h = viewport.height - FIT_PADDING_PX;
    if inner_w <= 0.0 || inner_h <= 0.0 || page.width <= 0.0 || page.height <= 0.0 {
        return 1.0;
    }
    (inner_w / page.width).min(inner_h / page.height).min(ZOOM_CAP)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomController {
    level: f32,
}

impl Default for ZoomController {
    fn default() -> Self {
        ZoomController { level: 1.0 }
    }
}

impl ZoomController {
    pub fn new() -> Self {
        ZoomController::default()
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set(self.level + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set(self.level - ZOOM_STEP)
    }

    /// Recomputes fit against the given viewport and adopts it.
    pub fn fit(&mut self, viewport: Size, page: Size) -> f32 {
        self.level = fit_zoom(viewport, page);
        self.level
    }

    pub fn set(&mut self, level: f32) -> f32 {
        self.level = level.clamp(ZOOM_MIN, ZOOM_CAP);
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 1.0;
    }
}

/// Forces natural scale for the duration of an export, restoring the user's
/// zoom when dropped, including on the error path.
pub struct NaturalZoomGuard<'a> {
    controller: &'a mut ZoomController,
    saved: f32,
}

impl<'a> NaturalZoomGuard<'a> {
    pub fn new(controller: &'a mut ZoomController) -> Self {
        let saved = controller.level();
        controller.reset();
        NaturalZoomGuard { controller, saved }
    }
}

impl Drop for NaturalZoomGuard<'_> {
    fn drop(&mut self) {
        // Exact restore: a fit-derived level may sit below the manual floor.
        self.controller.level = self.saved;
    }
}
