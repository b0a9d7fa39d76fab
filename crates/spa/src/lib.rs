//! Client-side navigation for server-rendered documentation pages.
//!
//! A [`Navigator`] owns the live page as an [`html::Document`] and reacts to the events an
//! embedder forwards: link clicks become animated in-place loads, hovers warm a small
//! prefetch cache, folder summaries open and close with a staged animation, and the sidebar
//! search and arrow keys operate on the same tree. Window effects go through a [`Host`];
//! fetches go out as [`bus::CoreCommand`]s and come back as [`bus::CoreEvent`]s. Every delay
//! runs on a virtual clock advanced with [`Navigator::advance`].

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod folder;
pub mod host;
pub mod keyboard;
pub mod names;
pub mod patch;
pub mod search;
pub mod sidebar;
pub mod timers;

mod engine;
mod project;

pub use crate::cache::PrefetchCache;
pub use crate::config::{ConfigError, NavConfig};
pub use crate::engine::Navigator;
pub use crate::error::NavError;
pub use crate::events::{DomEvent, EventOutcome, Key};
pub use crate::folder::FolderPhase;
pub use crate::host::{HeadlessHost, Host, ScrollBehavior};
pub use crate::patch::PatchOutcome;
pub use crate::project::project_id;
pub use crate::sidebar::SidebarSnapshot;
pub use crate::timers::Timer;
