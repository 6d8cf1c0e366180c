use super::{controls::Controls, pdf_upload::PdfUpload, text_panel::TextPanel};
use crate::config::{Theme, ViewerConfig, placeholder_lines};
use crate::document::read_pdf;
use crate::ingest::{IngestAction, IngestState};
use crate::model::{ViewerAction, ViewerState};
use crate::state::{PinchEvent, PinchTracker, use_animated_presentation};
use yew::platform::spawn_local;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(ViewerConfig::load);
    let viewer = use_reducer(ViewerState::default);
    let ingest = use_reducer(IngestState::default);
    let tracker = use_mut_ref(|| PinchTracker::new(config.gesture_axis));
    // The picked file; only its name goes through the reducer.
    let selected_file = use_mut_ref(|| None::<gloo::file::File>);
    // Issues load tags; lives outside the reducer so each click gets a fresh one.
    let load_seq = use_mut_ref(|| 0_u64);

    let style = use_animated_presentation(
        viewer.presentation(),
        config.line_height_spring,
        config.progress_spring,
    );

    let on_pinch = {
        let viewer = viewer.clone();
        let tracker = tracker.clone();
        Callback::from(move |event: PinchEvent| {
            let offset = tracker.borrow_mut().handle(event);
            if let Some(distance) = offset {
                viewer.dispatch(ViewerAction::Pinch { distance });
            }
        })
    };
    let on_toggle_overlap = {
        let viewer = viewer.clone();
        Callback::from(move |_| viewer.dispatch(ViewerAction::ToggleOverlap))
    };
    let on_reset = {
        let viewer = viewer.clone();
        let tracker = tracker.clone();
        Callback::from(move |_| {
            tracker.borrow_mut().reset();
            viewer.dispatch(ViewerAction::Reset);
        })
    };
    let on_theme = {
        let config = config.clone();
        Callback::from(move |theme: Theme| {
            let next = ViewerConfig {
                theme,
                ..(*config).clone()
            };
            if let Err(err) = next.save() {
                log::warn!("could not persist config: {err}");
            }
            config.set(next);
        })
    };
    let on_select = {
        let ingest = ingest.clone();
        let selected_file = selected_file.clone();
        Callback::from(move |file: Option<web_sys::File>| {
            let file = file.map(gloo::file::File::from);
            let name = file.as_ref().map(|f| f.name());
            *selected_file.borrow_mut() = file;
            ingest.dispatch(IngestAction::SelectFile { name });
        })
    };
    let on_load = {
        let ingest = ingest.clone();
        let selected_file = selected_file.clone();
        let load_seq = load_seq.clone();
        Callback::from(move |_| {
            let tag = {
                let mut seq = load_seq.borrow_mut();
                *seq += 1;
                *seq
            };
            let file = selected_file.borrow().clone();
            ingest.dispatch(IngestAction::BeginLoad { tag });
            let Some(file) = file else {
                return;
            };
            let ingest = ingest.clone();
            spawn_local(async move {
                let result = read_pdf(file).await;
                ingest.dispatch(IngestAction::Finish { tag, result });
            });
        })
    };

    let palette = config.theme.palette();
    let placeholder = placeholder_lines(config.placeholder_lines);
    let lines = ingest.display_lines(&placeholder);

    html! {<div style={format!("display:flex; flex-direction:column; align-items:center; justify-content:center; min-height:100vh; padding:16px; box-sizing:border-box; background:{}; font-family:sans-serif;", palette.page_background)}>
        <Controls
            overlap={viewer.overlap}
            palette={palette}
            on_toggle_overlap={on_toggle_overlap}
            on_reset={on_reset}
            theme={config.theme}
            on_theme={on_theme}
        />
        { if config.enable_pdf_ingestion { html!{ <PdfUpload
            palette={palette}
            loading={ingest.is_loading()}
            num_pages={ingest.num_pages}
            on_select={on_select}
            on_load={on_load}
        /> } } else { html!{} } }
        <TextPanel
            lines={lines}
            error={ingest.error.clone()}
            style={style}
            show_progress_bar={config.show_progress_bar}
            palette={palette}
            on_pinch={on_pinch}
        />
        <div style={format!("color:{}; margin-top:16px; font-size:14px;", palette.muted)}>
            {"Use a two-finger pinch gesture to adjust line spacing."}
        </div>
    </div>}
}
