//! PDF ingestion state: Idle -> FileSelected -> Loading -> Loaded | Failed.
//!
//! Each load request carries a tag issued by the caller. The state remembers
//! the tag of the load in flight; a finished load is committed only when its
//! tag still matches, so a slow first load can never overwrite the content of
//! a file picked later.

use std::rc::Rc;
use yew::Reducible;

use crate::document::DocumentError;

pub const NO_FILE_MESSAGE: &str = "Please select a PDF file to upload.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load PDF. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestPhase {
    Idle,
    FileSelected,
    Loading,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngestState {
    pub phase: IngestPhase,
    /// Name of the picked file; the file handle itself lives in the component.
    pub file_name: Option<String>,
    pub pages: Vec<String>,
    pub num_pages: Option<usize>,
    pub error: Option<String>,
    /// Tag of the load in flight. Cleared by a new selection or a commit.
    pub pending: Option<u64>,
}

impl Default for IngestState {
    fn default() -> Self {
        Self {
            phase: IngestPhase::Idle,
            file_name: None,
            pages: Vec::new(),
            num_pages: None,
            error: None,
            pending: None,
        }
    }
}

impl IngestState {
    pub fn is_loading(&self) -> bool {
        self.phase == IngestPhase::Loading
    }

    pub fn has_content(&self) -> bool {
        !self.pages.is_empty()
    }

    /// Document pages once loaded, otherwise the placeholder lines.
    pub fn display_lines(&self, placeholder: &[String]) -> Vec<String> {
        if self.has_content() {
            self.pages.clone()
        } else {
            placeholder.to_vec()
        }
    }
}

#[derive(Debug)]
pub enum IngestAction {
    SelectFile { name: Option<String> },
    BeginLoad { tag: u64 },
    Finish {
        tag: u64,
        result: Result<Vec<String>, DocumentError>,
    },
}

impl Reducible for IngestState {
    type Action = IngestAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use IngestAction::*;
        let mut new = (*self).clone();
        match action {
            SelectFile { name } => {
                new.pending = None;
                new.pages.clear();
                new.num_pages = None;
                new.error = None;
                new.phase = if name.is_some() {
                    IngestPhase::FileSelected
                } else {
                    IngestPhase::Idle
                };
                new.file_name = name;
            }
            BeginLoad { tag } => {
                new.pages.clear();
                new.num_pages = None;
                if new.file_name.is_none() {
                    new.pending = None;
                    new.error = Some(NO_FILE_MESSAGE.to_string());
                    new.phase = IngestPhase::Failed;
                } else {
                    new.pending = Some(tag);
                    new.error = None;
                    new.phase = IngestPhase::Loading;
                }
            }
            Finish { tag, result } => {
                if new.pending != Some(tag) || new.phase != IngestPhase::Loading {
                    log::debug!("dropping stale load result (tag {tag}, pending {:?})", new.pending);
                    return self;
                }
                new.pending = None;
                match result {
                    Ok(pages) => {
                        log::info!("loaded {} pages", pages.len());
                        new.num_pages = Some(pages.len());
                        new.pages = pages;
                        new.error = None;
                        new.phase = IngestPhase::Loaded;
                    }
                    Err(err) => {
                        log::error!("PDF load failed: {err}");
                        new.pages.clear();
                        new.num_pages = None;
                        new.error = Some(LOAD_FAILED_MESSAGE.to_string());
                        new.phase = IngestPhase::Failed;
                    }
                }
            }
        }
        Rc::new(new)
    }
}
