pub mod config;
pub mod document;
pub mod page_translator;
pub mod utils;
pub mod view;

pub use config::{ReadableConfig, ReadableConfigBuilder};
pub use document::{BoxSize, DocumentError, DocumentModel, HtmlDocument};
pub use page_translator::{
    TableStrategy, clean_text, extract_text_with_links, is_table_related, translate_document,
    translate_html, translate_html_async,
};
pub use view::{
    ControlRequest, ControlResponse, PageSnapshot, PageState, ReadableView, ViewError, WaitOutcome,
    page_channel, wait_for_dynamic_content,
};
