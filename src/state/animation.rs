// requestAnimationFrame driver for the presentation springs.
use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use yew::prelude::*;

use crate::model::PresentationState;
use crate::spring::{AnimatedPresentation, SpringConfig};

struct Driver {
    springs: AnimatedPresentation,
    frame: Option<AnimationFrame>,
    running: bool,
}

fn schedule(driver: Rc<RefCell<Driver>>, last_ts: Option<f64>, out: UseStateSetter<PresentationState>) {
    let driver_cb = driver.clone();
    let handle = request_animation_frame(move |ts| {
        let dt = last_ts.map(|prev| (ts - prev) / 1000.0).unwrap_or(0.0);
        let (moving, current) = {
            let mut d = driver_cb.borrow_mut();
            let moving = d.springs.step(dt);
            (moving, d.springs.current())
        };
        out.set(current);
        if moving {
            schedule(driver_cb, Some(ts), out);
        } else {
            driver_cb.borrow_mut().running = false;
        }
    });
    driver.borrow_mut().frame = Some(handle);
}

/// Eases toward `target` and returns the value to render this frame.
/// Frames are only requested while a spring is moving.
#[hook]
pub fn use_animated_presentation(
    target: PresentationState,
    line_height: SpringConfig,
    progress: SpringConfig,
) -> PresentationState {
    let current = use_state(|| target);
    let driver = use_mut_ref(|| Driver {
        springs: AnimatedPresentation::new(target, line_height, progress),
        frame: None,
        running: false,
    });

    {
        let driver = driver.clone();
        let out = current.setter();
        use_effect_with(target, move |target| {
            let start = {
                let mut d = driver.borrow_mut();
                d.springs.set_target(*target);
                let start = !d.running && !d.springs.is_settled();
                if start {
                    d.running = true;
                }
                start
            };
            if start {
                schedule(driver, None, out);
            }
            || ()
        });
    }

    {
        let driver = driver.clone();
        use_effect_with((), move |_| {
            move || {
                let mut d = driver.borrow_mut();
                d.frame = None;
                d.running = false;
            }
        });
    }

    *current
}
