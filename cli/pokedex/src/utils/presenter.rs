//! [Presenter] implementations of the CLI.
//!
//! The interactive command prints everything as it happens with
//! [TerminalPresenter]. One-shot commands only care about the final
//! result and collect it with [FramePresenter] before printing it as text
//! or JSON.

use std::sync::Mutex;

use anyhow::{Result, bail};
use pokedex_catalog::types::CatalogItem;
use pokedex_catalog::{Language, Notice, PaginationView, Presenter, SearchState};
use serde::Serialize;
use tracing::debug;

use super::display::{Styling, item_line, loading_text, notice_text, pagination_line};
use super::message;

/// Prints to the terminal immediately.
///
/// Items and pagination go to stdout, loading indicators and notices to stderr.
#[derive(Debug)]
pub struct TerminalPresenter {
    styling: Styling,
}

impl TerminalPresenter {
    pub fn new(styling: Styling) -> Self {
        Self { styling }
    }
}

impl Presenter for TerminalPresenter {
    fn show_loading(&self) {
        message::plain(loading_text(self.styling));
    }

    fn render_items(&self, items: &[CatalogItem]) {
        if items.is_empty() {
            return self.show_notice(&Notice::NoResults);
        }
        for item in items {
            println!("{}", item_line(item, self.styling));
        }
    }

    fn render_pagination(&self, view: &PaginationView) {
        if view.pages.is_empty() {
            return;
        }
        println!("{}", pagination_line(view, self.styling));
    }

    fn disable_pagination(&self) {}

    fn show_notice(&self, notice: &Notice) {
        let text = notice_text(notice, self.styling);
        if notice.is_error() {
            message::error(text);
        } else {
            message::plain(text);
        }
    }
}

/// The last complete output of a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub items: Vec<CatalogItem>,
    pub pagination: Option<PaginationView>,
    pub notice: Option<Notice>,
}

/// Keeps the latest [Frame] instead of printing.
#[derive(Debug, Default)]
pub struct FramePresenter {
    frame: Mutex<Frame>,
}

impl FramePresenter {
    pub fn frame(&self) -> Frame {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Frame> {
        self.frame.lock().expect("frame mutex poisoned")
    }
}

impl Presenter for FramePresenter {
    fn show_loading(&self) {
        *self.lock() = Frame::default();
    }

    fn render_items(&self, items: &[CatalogItem]) {
        let mut frame = self.lock();
        frame.items = items.to_vec();
        frame.notice = items.is_empty().then_some(Notice::NoResults);
    }

    fn render_pagination(&self, view: &PaginationView) {
        self.lock().pagination = Some(view.clone());
    }

    fn disable_pagination(&self) {
        self.lock().pagination = None;
    }

    fn show_notice(&self, notice: &Notice) {
        let mut frame = self.lock();
        frame.items.clear();
        frame.notice = Some(notice.clone());
    }
}

/// JSON representation of a [Frame]
#[derive(Debug, Serialize)]
pub struct JsonFrame<'a> {
    pub mode: String,
    pub page: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub items: &'a [CatalogItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<'a> JsonFrame<'a> {
    pub fn new(frame: &'a Frame, state: &SearchState, language: Language) -> Self {
        Self {
            mode: state.mode.to_string(),
            page: state.current_page,
            total_pages: state.total_pages,
            total_count: state.total_count,
            items: &frame.items,
            notice: frame.notice.as_ref().map(|notice| notice.message(language)),
        }
    }
}

/// Print the result of a one-shot command.
///
/// Error notices fail the command.
pub fn print_frame(frame: &Frame, state: &SearchState, styling: Styling, json: bool) -> Result<()> {
    if let Some(notice) = frame.notice.as_ref().filter(|notice| notice.is_error()) {
        bail!(notice.message(styling.language));
    }

    if json {
        debug!("printing frame as JSON");
        let json = serde_json::to_string(&JsonFrame::new(frame, state, styling.language))?;
        println!("{json}");
        return Ok(());
    }

    debug!("printing frame as user facing");
    if let Some(notice) = &frame.notice {
        message::plain(notice_text(notice, styling));
        return Ok(());
    }

    for item in &frame.items {
        println!("{}", item_line(item, styling));
    }
    if let Some(view) = frame.pagination.as_ref().filter(|view| !view.pages.is_empty()) {
        println!("{}", pagination_line(view, styling));
    }
    Ok(())
}
