//! Two-finger pinch tracking.
//!
//! Reports an absolute offset that carries over between gestures: lifting the
//! fingers commits the current offset, the next pinch continues from there.

use serde::{Deserialize, Serialize};

use crate::model::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, PINCH_DISTANCE_PER_UNIT};

/// Offsets past these map to a clamped scale anyway; bounding them keeps a
/// reverse pinch responsive after overshooting.
pub fn clamp_offset(offset: f64) -> f64 {
    let lo = (MIN_SCALE - DEFAULT_SCALE) * PINCH_DISTANCE_PER_UNIT;
    let hi = (MAX_SCALE - DEFAULT_SCALE) * PINCH_DISTANCE_PER_UNIT;
    offset.clamp(lo, hi)
}

/// Which component of the finger separation drives the offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureAxis {
    #[default]
    X,
    Y,
    Magnitude,
}

impl GestureAxis {
    pub fn separation(self, a: (f64, f64), b: (f64, f64)) -> f64 {
        let dx = (b.0 - a.0).abs();
        let dy = (b.1 - a.1).abs();
        match self {
            GestureAxis::X => dx,
            GestureAxis::Y => dy,
            GestureAxis::Magnitude => (dx * dx + dy * dy).sqrt(),
        }
    }
}

/// Raw input forwarded by the text panel, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PinchEvent {
    Start((f64, f64), (f64, f64)),
    Move((f64, f64), (f64, f64)),
    End,
    Wheel { delta_y: f64 },
}

impl PinchEvent {
    /// Reads a DOM event type plus the touches still down. Touch counts
    /// below two never start or move a pinch; wheel only counts with ctrl.
    pub fn from_dom(event_type: &str, touches: &[(f64, f64)], ctrl_key: bool, delta_y: f64) -> Option<Self> {
        match (event_type, touches) {
            ("touchstart", [a, b, ..]) => Some(PinchEvent::Start(*a, *b)),
            ("touchmove", [a, b, ..]) => Some(PinchEvent::Move(*a, *b)),
            ("touchend" | "touchcancel", rest) if rest.len() < 2 => Some(PinchEvent::End),
            ("wheel", _) if ctrl_key => Some(PinchEvent::Wheel { delta_y }),
            _ => None,
        }
    }

    /// Whether the browser's own scroll or zoom must be suppressed.
    pub fn blocks_default(&self) -> bool {
        !matches!(self, PinchEvent::End)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PinchTracker {
    pub axis: GestureAxis,
    /// Offset committed by earlier gestures.
    base_offset: f64,
    /// Offset of the gesture in progress.
    offset: f64,
    start_separation: Option<f64>,
}

impl PinchTracker {
    pub fn new(axis: GestureAxis) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.start_separation.is_some()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Called on touchstart with at least two touches down.
    pub fn start(&mut self, a: (f64, f64), b: (f64, f64)) {
        if self.is_pinching() {
            self.commit();
        }
        self.start_separation = Some(self.axis.separation(a, b));
        self.offset = self.base_offset;
    }

    /// Returns the new absolute offset, or None if no pinch is active.
    pub fn update(&mut self, a: (f64, f64), b: (f64, f64)) -> Option<f64> {
        let start = self.start_separation?;
        self.offset = clamp_offset(self.base_offset + (self.axis.separation(a, b) - start));
        Some(self.offset)
    }

    /// Called once fewer than two touches remain.
    pub fn end(&mut self) {
        if self.is_pinching() {
            self.commit();
        }
    }

    /// Trackpad pinch arrives as ctrl+wheel; a negative delta means zoom in.
    pub fn wheel(&mut self, delta_y: f64) -> f64 {
        self.base_offset = clamp_offset(self.base_offset - delta_y);
        self.offset = self.base_offset;
        self.offset
    }

    /// Feeds one event; returns the absolute offset when it changed.
    pub fn handle(&mut self, event: PinchEvent) -> Option<f64> {
        match event {
            PinchEvent::Start(a, b) => {
                self.start(a, b);
                None
            }
            PinchEvent::Move(a, b) => self.update(a, b),
            PinchEvent::End => {
                self.end();
                None
            }
            PinchEvent::Wheel { delta_y } => Some(self.wheel(delta_y)),
        }
    }

    pub fn reset(&mut self) {
        self.base_offset = 0.0;
        self.offset = 0.0;
        self.start_separation = None;
    }

    fn commit(&mut self) {
        self.base_offset = self.offset;
        self.start_separation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::clamp_scale;

    #[test]
    fn axis_separation() {
        let a = (10.0, 10.0);
        let b = (40.0, 50.0);
        assert_eq!(GestureAxis::X.separation(a, b), 30.0);
        assert_eq!(GestureAxis::Y.separation(b, a), 40.0);
        assert_eq!(GestureAxis::Magnitude.separation(a, b), 50.0);
    }

    #[test]
    fn update_without_start_is_ignored() {
        let mut t = PinchTracker::default();
        assert_eq!(t.update((0.0, 0.0), (100.0, 0.0)), None);
        assert_eq!(t.offset(), 0.0);
    }

    #[test]
    fn spreading_fingers_grows_offset() {
        let mut t = PinchTracker::new(GestureAxis::X);
        t.start((100.0, 0.0), (200.0, 0.0));
        assert_eq!(t.update((50.0, 0.0), (250.0, 0.0)), Some(100.0));
        assert_eq!(clamp_scale(t.offset()), 1.5);
        assert_eq!(t.update((150.0, 0.0), (160.0, 0.0)), Some(-90.0));
    }

    #[test]
    fn next_gesture_continues_from_committed_offset() {
        let mut t = PinchTracker::default();
        t.start((0.0, 0.0), (100.0, 0.0));
        t.update((0.0, 0.0), (300.0, 0.0));
        t.end();
        assert!(!t.is_pinching());
        t.start((0.0, 0.0), (50.0, 0.0));
        assert_eq!(t.offset(), 200.0);
        assert_eq!(t.update((0.0, 0.0), (100.0, 0.0)), Some(250.0));
    }

    #[test]
    fn y_axis_ignores_horizontal_spread() {
        let mut t = PinchTracker::new(GestureAxis::Y);
        t.start((0.0, 0.0), (100.0, 100.0));
        assert_eq!(t.update((0.0, 0.0), (400.0, 100.0)), Some(0.0));
    }

    #[test]
    fn reset_clears_base_and_active_gesture() {
        let mut t = PinchTracker::default();
        t.start((0.0, 0.0), (100.0, 0.0));
        t.update((0.0, 0.0), (500.0, 0.0));
        t.reset();
        assert!(!t.is_pinching());
        assert_eq!(t.offset(), 0.0);
        t.start((0.0, 0.0), (100.0, 0.0));
        assert_eq!(t.update((0.0, 0.0), (120.0, 0.0)), Some(20.0));
    }

    #[test]
    fn offset_is_bounded_to_scale_domain() {
        let mut t = PinchTracker::default();
        t.start((0.0, 0.0), (100.0, 0.0));
        assert_eq!(t.update((0.0, 0.0), (1100.0, 0.0)), Some(400.0));
        t.end();
        t.start((0.0, 0.0), (300.0, 0.0));
        assert_eq!(t.update((0.0, 0.0), (200.0, 0.0)), Some(300.0));
        assert_eq!(t.wheel(5000.0), -100.0);
    }

    #[test]
    fn handle_drives_scale_through_a_whole_gesture() {
        let mut t = PinchTracker::default();
        assert_eq!(t.handle(PinchEvent::Start((0.0, 0.0), (100.0, 0.0))), None);
        let d = t.handle(PinchEvent::Move((0.0, 0.0), (300.0, 40.0))).unwrap();
        assert_eq!(clamp_scale(d), 2.0);
        assert_eq!(t.handle(PinchEvent::End), None);
        assert_eq!(t.handle(PinchEvent::Move((0.0, 0.0), (900.0, 0.0))), None);
        assert_eq!(t.handle(PinchEvent::Wheel { delta_y: 100.0 }), Some(100.0));
    }

    #[test]
    fn wheel_zoom_shares_offset() {
        let mut t = PinchTracker::default();
        assert_eq!(t.wheel(-40.0), 40.0);
        assert_eq!(t.wheel(10.0), 30.0);
        t.start((0.0, 0.0), (100.0, 0.0));
        assert_eq!(t.update((0.0, 0.0), (110.0, 0.0)), Some(40.0));
    }

    #[test]
    fn dom_events_map_to_pinch_events() {
        let two = [(0.0, 0.0), (80.0, 0.0)];
        let one = [(0.0, 0.0)];
        assert_eq!(
            PinchEvent::from_dom("touchstart", &two, false, 0.0),
            Some(PinchEvent::Start((0.0, 0.0), (80.0, 0.0)))
        );
        assert_eq!(PinchEvent::from_dom("touchstart", &one, false, 0.0), None);
        assert_eq!(PinchEvent::from_dom("touchmove", &one, false, 0.0), None);
        assert_eq!(PinchEvent::from_dom("touchend", &one, false, 0.0), Some(PinchEvent::End));
        assert_eq!(PinchEvent::from_dom("touchcancel", &[], false, 0.0), Some(PinchEvent::End));
        assert_eq!(PinchEvent::from_dom("touchend", &two, false, 0.0), None);
        assert_eq!(PinchEvent::from_dom("wheel", &[], false, 12.0), None);
        assert_eq!(
            PinchEvent::from_dom("wheel", &[], true, 12.0),
            Some(PinchEvent::Wheel { delta_y: 12.0 })
        );
    }

    #[test]
    fn only_active_pinch_input_blocks_browser_default() {
        assert!(PinchEvent::Start((0.0, 0.0), (1.0, 0.0)).blocks_default());
        assert!(PinchEvent::Move((0.0, 0.0), (1.0, 0.0)).blocks_default());
        assert!(PinchEvent::Wheel { delta_y: -3.0 }.blocks_default());
        assert!(!PinchEvent::End.blocks_default());
    }
}
