pub mod animation;
pub mod touch;

pub use animation::use_animated_presentation;
pub use touch::{GestureAxis, PinchEvent, PinchTracker};
