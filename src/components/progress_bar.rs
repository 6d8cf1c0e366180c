use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressBarProps {
    /// CSS width, e.g. "33.3333%".
    pub width: String,
    pub color: &'static str,
    pub track: &'static str,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    html! {<div style={format!("position:absolute; bottom:0; left:0; width:100%; height:8px; background:{}; border-radius:9999px;", props.track)}>
        <div style={format!("height:100%; width:{}; background:{}; border-radius:9999px;", props.width, props.color)}></div>
    </div>}
}
