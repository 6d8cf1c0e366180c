//! Damped spring used to ease style values toward their targets.
//!
//! Integration runs in fixed 1 ms sub-steps regardless of frame rate, so the
//! curve is the same at 60 Hz and 144 Hz.

use serde::{Deserialize, Serialize};

use crate::model::PresentationState;

const STEP_SECS: f64 = 0.001;
/// Longest frame delta fed to the integrator (backgrounded tabs).
const MAX_FRAME_SECS: f64 = 0.064;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub tension: f64,
    pub friction: f64,
    pub mass: f64,
    /// Distance and speed below which the spring snaps to rest.
    pub precision: f64,
}

impl SpringConfig {
    pub const fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            mass: 1.0,
            precision: 0.001,
        }
    }

    pub const fn line_height() -> Self {
        Self::new(200.0, 20.0)
    }

    pub const fn progress() -> Self {
        Self::new(180.0, 12.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::line_height()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    config: SpringConfig,
}

impl Spring {
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            config,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advances by `dt_secs`. Returns true while the spring is still moving.
    pub fn step(&mut self, dt_secs: f64) -> bool {
        if self.is_settled() {
            return false;
        }
        let cfg = self.config;
        let mass = if cfg.mass > 0.0 { cfg.mass } else { 1.0 };
        let mut remaining = dt_secs.clamp(0.0, MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(STEP_SECS);
            let spring_force = -cfg.tension * (self.value - self.target);
            let damping_force = -cfg.friction * self.velocity;
            let accel = (spring_force + damping_force) / mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;

            if (self.value - self.target).abs() < cfg.precision && self.velocity.abs() < cfg.precision {
                self.value = self.target;
                self.velocity = 0.0;
                return false;
            }
        }
        true
    }
}

/// The pair of springs behind the text panel style.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimatedPresentation {
    line_height: Spring,
    progress: Spring,
}

impl AnimatedPresentation {
    pub fn new(initial: PresentationState, line_height: SpringConfig, progress: SpringConfig) -> Self {
        Self {
            line_height: Spring::new(initial.line_height_em, line_height),
            progress: Spring::new(initial.progress_width_pct, progress),
        }
    }

    pub fn set_target(&mut self, target: PresentationState) {
        self.line_height.set_target(target.line_height_em);
        self.progress.set_target(target.progress_width_pct);
    }

    pub fn step(&mut self, dt_secs: f64) -> bool {
        let a = self.line_height.step(dt_secs);
        let b = self.progress.step(dt_secs);
        a || b
    }

    pub fn is_settled(&self) -> bool {
        self.line_height.is_settled() && self.progress.is_settled()
    }

    pub fn current(&self) -> PresentationState {
        PresentationState {
            line_height_em: self.line_height.value(),
            progress_width_pct: self.progress.value(),
        }
    }
}
