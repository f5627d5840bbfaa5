//! Page-count derivation and stale-measurement protection.
//!
//! The preview shows N stacked A4 frames, each clipping the same continuous
//! flow at a successive vertical offset. N comes only from the measured flow
//! height. Content edits invalidate the measurement; a generation counter
//! makes sure a measurement started before an edit can never land after it.

use tracing::debug;

use crate::layout::A4_HEIGHT_PX;

/// Pages needed to show a flow of the given height. Never zero: an empty
/// flow still shows one blank page.
pub fn page_count_for_height(height_px: f32) -> usize {
    if height_px <= 0.0 || !height_px.is_finite() {
        return 1;
    }
    ((height_px / A4_HEIGHT_PX).ceil() as usize).max(1)
}

/// One page frame: a fixed A4 window over the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFrame {
    pub index: usize,
}

impl PageFrame {
    /// How far the flow is shifted up inside this frame, in px.
    pub fn offset_px(&self) -> f32 {
        self.index as f32 * A4_HEIGHT_PX
    }

    /// The flow interval this frame makes visible.
    pub fn visible_range(&self) -> (f32, f32) {
        let top = self.offset_px();
        (top, top + A4_HEIGHT_PX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MeasureState {
    /// No valid measurement; the preview keeps showing the last page count.
    Unmeasured,
    Measured { height_px: f32 },
}

/// A claim on one measurement round. Completing it after the paginator has
/// been invalidated again is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct Paginator {
    state: MeasureState,
    generation: u64,
    /// Last committed page count; retained across invalidation so the frame
    /// stack never collapses to zero mid-edit.
    page_count: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            state: MeasureState::Unmeasured,
            generation: 0,
            page_count: 1,
        }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Paginator::default()
    }

    /// Marks the current measurement stale. Subsequent `complete_measure`
    /// calls holding older tickets are discarded.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state = MeasureState::Unmeasured;
    }

    /// Starts a measurement round against the current content generation.
    pub fn begin_measure(&self) -> MeasureTicket {
        MeasureTicket {
            generation: self.generation,
        }
    }

    /// Commits a measured flow height. Returns the resulting page count, or
    /// `None` when the ticket is stale and the result was dropped.
    pub fn complete_measure(&mut self, ticket: MeasureTicket, height_px: f32) -> Option<usize> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale measurement"
            );
            return None;
        }
        self.state = MeasureState::Measured { height_px };
        self.page_count = page_count_for_height(height_px);
        Some(self.page_count)
    }

    pub fn is_measured(&self) -> bool {
        matches!(self.state, MeasureState::Measured { .. })
    }

    pub fn measured_height_px(&self) -> Option<f32> {
        match self.state {
            MeasureState::Measured { height_px } => Some(height_px),
            MeasureState::Unmeasured => None,
        }
    }

    /// Current page count. Always at least 1.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// The frame stack for the current page count.
    pub fn frames(&self) -> Vec<PageFrame> {
        (0..self.page_count).map(|index| PageFrame { index }).collect()
    }
}
