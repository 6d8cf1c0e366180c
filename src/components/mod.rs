pub mod app;
pub mod controls;
pub mod pdf_upload;
pub mod progress_bar;
pub mod text_panel;

pub use app::App;
