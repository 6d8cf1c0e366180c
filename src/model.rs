//! Viewer state for Liquid Text.
//! Scale and overlap live in a reducer; everything the panel renders is derived
//! from them through `map_state`.

use std::rc::Rc;
use yew::Reducible;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 3.0;
pub const DEFAULT_SCALE: f64 = 1.0;
/// Pinch distance (px) that moves the scale by 1.0.
pub const PINCH_DISTANCE_PER_UNIT: f64 = 200.0;
/// Line height forced while overlap mode is on.
pub const OVERLAP_LINE_HEIGHT_EM: f64 = 0.5;

/// Maps an absolute pinch offset to a zoom factor in `[MIN_SCALE, MAX_SCALE]`.
pub fn clamp_scale(distance: f64) -> f64 {
    let distance = if distance.is_nan() { 0.0 } else { distance };
    (DEFAULT_SCALE + distance / PINCH_DISTANCE_PER_UNIT).clamp(MIN_SCALE, MAX_SCALE)
}

/// Target style values for the text panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentationState {
    pub line_height_em: f64,
    pub progress_width_pct: f64,
}

impl PresentationState {
    pub fn line_height_css(&self) -> String {
        format!("{}em", round_css(self.line_height_em))
    }

    pub fn progress_width_css(&self) -> String {
        format!("{}%", round_css(self.progress_width_pct))
    }
}

// Trims float noise so `2.0` renders as `2` and animated values stay short.
fn round_css(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Overlap always wins over scale for line height; progress tracks scale alone.
pub fn map_state(scale: f64, overlap: bool) -> PresentationState {
    PresentationState {
        line_height_em: if overlap { OVERLAP_LINE_HEIGHT_EM } else { scale },
        progress_width_pct: scale / MAX_SCALE * 100.0,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewerState {
    pub scale: f64,
    pub overlap: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            overlap: false,
        }
    }
}

impl ViewerState {
    pub fn presentation(&self) -> PresentationState {
        map_state(self.scale, self.overlap)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerAction {
    /// Absolute offset of the current gesture, not a delta on the last update.
    Pinch { distance: f64 },
    ToggleOverlap,
    Reset,
}

impl Reducible for ViewerState {
    type Action = ViewerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewerAction::*;
        let mut new = *self;
        match action {
            Pinch { distance } => {
                new.scale = clamp_scale(distance);
            }
            ToggleOverlap => {
                new.overlap = !new.overlap;
                log::debug!("overlap -> {}", new.overlap);
            }
            Reset => {
                new = ViewerState::default();
                log::debug!("viewer reset");
            }
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}
