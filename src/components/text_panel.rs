use super::progress_bar::ProgressBar;
use crate::config::Palette;
use crate::model::PresentationState;
use crate::state::PinchEvent;
use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, TouchEvent, TouchList, WheelEvent};
use yew::prelude::*;

/// Attached natively: Yew registers touch listeners as passive, which
/// would make `prevent_default` a no-op.
const PINCH_EVENT_TYPES: [&str; 5] = ["touchstart", "touchmove", "touchend", "touchcancel", "wheel"];

#[derive(Properties, PartialEq, Clone)]
pub struct TextPanelProps {
    pub lines: Vec<String>,
    /// Replaces the lines when set.
    pub error: Option<String>,
    pub style: PresentationState,
    pub show_progress_bar: bool,
    pub palette: Palette,
    pub on_pinch: Callback<PinchEvent>,
}

fn touch_points(touches: &TouchList) -> Vec<(f64, f64)> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn read_pinch(e: &Event) -> Option<PinchEvent> {
    let kind = e.type_();
    if kind == "wheel" {
        let wheel = e.unchecked_ref::<WheelEvent>();
        PinchEvent::from_dom(&kind, &[], wheel.ctrl_key(), wheel.delta_y())
    } else {
        let touch = e.unchecked_ref::<TouchEvent>();
        PinchEvent::from_dom(&kind, &touch_points(&touch.touches()), false, 0.0)
    }
}

#[function_component(TextPanel)]
pub fn text_panel(props: &TextPanelProps) -> Html {
    let panel = use_node_ref();
    // Listeners live across renders; they read the latest callback from here.
    let on_pinch = use_mut_ref(|| props.on_pinch.clone());
    *on_pinch.borrow_mut() = props.on_pinch.clone();

    {
        let panel = panel.clone();
        let on_pinch = on_pinch.clone();
        use_effect_with((), move |_| {
            let listeners: Vec<EventListener> = match panel.cast::<HtmlElement>() {
                Some(el) => PINCH_EVENT_TYPES
                    .iter()
                    .map(|&kind| {
                        let on_pinch = on_pinch.clone();
                        EventListener::new_with_options(
                            &el,
                            kind,
                            EventListenerOptions::enable_prevent_default(),
                            move |e: &Event| {
                                if let Some(pinch) = read_pinch(e) {
                                    if pinch.blocks_default() {
                                        e.prevent_default();
                                    }
                                    let cb = on_pinch.borrow().clone();
                                    cb.emit(pinch);
                                }
                            },
                        )
                    })
                    .collect(),
                None => {
                    log::warn!("text panel not mounted; pinch input disabled");
                    Vec::new()
                }
            };
            move || drop(listeners)
        });
    }

    let body = if let Some(err) = &props.error {
        html! { <p style="color:#dc2626; font-weight:600;">{ err.clone() }</p> }
    } else {
        html! { <>{ for props.lines.iter().map(|line| html!{ <p style="font-size:16px; margin:0 0 16px 0;">{ line.clone() }</p> }) }</> }
    };

    let p = props.palette;
    html! {<div
        ref={panel}
        style={format!("position:relative; width:100%; max-width:48rem; height:70vh; overflow-y:scroll; background:{}; color:{}; box-shadow:0 10px 15px rgba(0,0,0,0.1); border-radius:8px; border:1px solid {}; padding:24px; text-align:center; box-sizing:border-box; touch-action:pan-y;", p.panel_background, p.text, p.track)}>
        <div style={format!("line-height:{};", props.style.line_height_css())}>
            { body }
        </div>
        { if props.show_progress_bar { html!{ <ProgressBar width={props.style.progress_width_css()} color={p.accent} track={p.track} /> } } else { html!{} } }
    </div>}
}
