//! Class names, ids and marker attributes shared with the server templates.

use html::Selector;

pub const SPA_ENABLED: &str = "spa-enabled";
pub const ACTIVE: &str = "active";
pub const SEARCH_HIGHLIGHT: &str = "search-highlight";
pub const FADE_OUT: &str = "fade-out-spa";
pub const FADE_IN: &str = "fade-in-spa";

pub fn spa_body() -> Selector {
    Selector::tag("body").and_class(SPA_ENABLED)
}

pub fn spa_link() -> Selector {
    Selector::tag("a").and_attr("data-spa", None)
}

pub fn main_content() -> Selector {
    Selector::class("main-content")
}

pub fn md_content() -> Selector {
    Selector::class("md-content")
}

pub fn breadcrumb() -> Selector {
    Selector::class("breadcrumb")
}

pub fn sidebar() -> Selector {
    Selector::class("md-sidebar")
}

/// Folders the sidebar snapshot indexes.
pub fn sidebar_folder() -> Selector {
    Selector::tag("details").and_class("folder")
}

/// Folders search and bulk operations act on.
pub fn folder() -> Selector {
    Selector::class("folder")
}

pub fn folder_summary() -> Selector {
    Selector::class("folder-summary")
}

pub fn folder_icon() -> Selector {
    Selector::class("folder-icon")
}

pub fn folder_content() -> Selector {
    Selector::class("folder-content")
}

pub fn file_item() -> Selector {
    Selector::class("file-item")
}

pub fn file_link() -> Selector {
    Selector::class("file-link")
}

pub fn file_name() -> Selector {
    Selector::class("file-name")
}

pub fn file_icon() -> Selector {
    Selector::class("file-icon")
}

pub fn search_input() -> Selector {
    Selector::id("file-search")
}

pub fn expand_all_button() -> Selector {
    Selector::id("expand-all")
}

pub fn collapse_all_button() -> Selector {
    Selector::id("collapse-all")
}
