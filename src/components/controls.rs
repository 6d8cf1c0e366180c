use crate::config::{Palette, Theme};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsProps {
    pub overlap: bool,
    pub palette: Palette,
    pub on_toggle_overlap: Callback<()>,
    pub on_reset: Callback<()>,
    pub theme: Theme,
    pub on_theme: Callback<Theme>,
}

pub fn overlap_label(overlap: bool) -> &'static str {
    if overlap { "Disable Overlap" } else { "Enable Overlap" }
}

fn button_style(background: &str) -> String {
    format!(
        "padding:8px 16px; background:{background}; color:#fff; border:none; border-radius:6px; box-shadow:0 2px 4px rgba(0,0,0,0.15); cursor:pointer;"
    )
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    let toggle_cb = {
        let cb = props.on_toggle_overlap.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let theme_cb = {
        let cb = props.on_theme.clone();
        Callback::from(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            if let Some(theme) = Theme::from_label(&select.value()) {
                cb.emit(theme);
            }
        })
    };
    html! {<div style="display:flex; gap:16px; margin-bottom:16px; align-items:center;">
        <button onclick={toggle_cb} style={button_style(props.palette.accent)}>{ overlap_label(props.overlap) }</button>
        <button onclick={reset_cb} style={button_style(props.palette.secondary)}>{"Reset"}</button>
        <select onchange={theme_cb} style="padding:6px 8px; border-radius:6px;">
            { for Theme::ALL.iter().map(|t| html!{
                <option value={t.label()} selected={*t == props.theme}>{ t.label() }</option>
            }) }
        </select>
    </div>}
}
