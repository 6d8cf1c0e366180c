use crate::config::Palette;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PdfUploadProps {
    pub palette: Palette,
    pub loading: bool,
    pub num_pages: Option<usize>,
    pub on_select: Callback<Option<web_sys::File>>,
    pub on_load: Callback<()>,
}

#[function_component(PdfUpload)]
pub fn pdf_upload(props: &PdfUploadProps) -> Html {
    let change_cb = {
        let cb = props.on_select.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let file = input.files().and_then(|files| files.get(0));
            cb.emit(file);
        })
    };
    let load_cb = {
        let cb = props.on_load.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let label = if props.loading { "Loading..." } else { "Load PDF" };
    html! {<div style="display:flex; gap:12px; align-items:center; margin-bottom:16px;">
        <input type="file" accept="application/pdf" onchange={change_cb} />
        <button onclick={load_cb} disabled={props.loading}
            style={format!("padding:8px 16px; background:{}; color:#fff; border:none; border-radius:6px; cursor:pointer;", props.palette.accent)}>
            { label }
        </button>
        { if let Some(n) = props.num_pages { html!{ <span style={format!("font-size:13px; color:{};", props.palette.muted)}>{ format!("Pages: {n}") }</span> } } else { html!{} } }
    </div>}
}
