//! The navigator: owns the live document, the prefetch cache, the sidebar snapshot and the
//! folder controller, and turns page events, fetch results and elapsed timers into DOM
//! patches and window updates.

mod dispatch;
mod nav;

use std::collections::HashMap;
use std::sync::mpsc;

use bus::{CoreCommand, CoreEvent};
use core_types::{Millis, RequestId};
use html::{Document, Id};
use url::Url;

use crate::cache::PrefetchCache;
use crate::config::NavConfig;
use crate::folder::{FolderController, FolderPhase};
use crate::host::Host;
use crate::names;
use crate::project::project_id;
use crate::sidebar::{SidebarSnapshot, SidebarStore};
use crate::timers::{Scheduler, Timer};

/// A load between its fade-out and its patch.
#[derive(Debug)]
struct PendingLoad {
    url: Url,
    push_history: bool,
    same_project: bool,
    target_project: Option<String>,
    fade_target: Id,
}

pub struct Navigator<H: Host> {
    doc: Document,
    host: H,
    config: NavConfig,
    cmd_tx: mpsc::Sender<CoreCommand>,

    enabled: bool,
    current_project: Option<String>,
    nav_gen: RequestId,

    scheduler: Scheduler,
    cache: PrefetchCache,
    sidebar: SidebarStore,
    folders: FolderController,

    loads: HashMap<RequestId, PendingLoad>,
    /// In-flight prefetches by request id, valued by cache key.
    prefetches: HashMap<RequestId, String>,
}

impl<H: Host> Navigator<H> {
    /// Takes over `doc`, the page currently shown at `host.location()`.
    ///
    /// Pages whose `<body>` lacks the `spa-enabled` class get an inert navigator: every
    /// event keeps its default action.
    pub fn new(doc: Document, host: H, cmd_tx: mpsc::Sender<CoreCommand>, config: NavConfig) -> Self {
        let enabled = doc.query(doc.root(), &names::spa_body()).is_some();
        let cache = PrefetchCache::new(config.prefetch_capacity);
        let mut navigator = Self {
            doc,
            host,
            config,
            cmd_tx,
            enabled,
            current_project: None,
            nav_gen: 0,
            scheduler: Scheduler::new(),
            cache,
            sidebar: SidebarStore::new(),
            folders: FolderController::new(),
            loads: HashMap::new(),
            prefetches: HashMap::new(),
        };
        if !enabled {
            log::info!("spa: body is not {}, navigator inactive", names::SPA_ENABLED);
            return navigator;
        }

        navigator.current_project = project_id(
            navigator.host.location().path(),
            &navigator.config.project_prefix,
        )
        .map(str::to_string);
        if navigator.current_project.is_some() {
            navigator.sidebar.save(&navigator.doc);
        }
        navigator
            .folders
            .initialize(&mut navigator.doc, &navigator.config.icons);
        log::info!(
            "spa: ready at {} (project {:?})",
            navigator.host.location(),
            navigator.current_project
        );
        navigator
    }

    // -- Accessors ---
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// For embedder-side changes the navigator does not drive itself, such as the user
    /// scrolling the sidebar.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    pub fn cache(&self) -> &PrefetchCache {
        &self.cache
    }

    pub fn sidebar_snapshot(&self) -> Option<&SidebarSnapshot> {
        self.sidebar.snapshot()
    }

    pub fn current_project(&self) -> Option<&str> {
        self.current_project.as_deref()
    }

    pub fn folder_phase(&self, folder: Id) -> FolderPhase {
        self.folders.phase(&self.doc, folder)
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn next_timer_due(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    pub fn pending_loads(&self) -> usize {
        self.loads.len()
    }

    pub fn pending_prefetches(&self) -> usize {
        self.prefetches.len()
    }

    /// No timers queued and no fetch outstanding.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_empty() && self.loads.is_empty() && self.prefetches.is_empty()
    }

    // -- Clock ---
    pub fn advance(&mut self, by: Millis) {
        let until = self.scheduler.now().saturating_add(by);
        self.advance_to(until);
    }

    /// Fires every timer due at or before `until`, including ones scheduled along the way.
    pub fn advance_to(&mut self, until: Millis) {
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.on_timer(timer);
        }
        self.scheduler.settle(until);
    }

    fn on_timer(&mut self, timer: Timer) {
        log::trace!("spa: t={} {timer:?}", self.scheduler.now());
        match timer {
            Timer::FadeOutElapsed { request_id } => self.resolve_content(request_id),
            Timer::ClearFadeIn { target } => {
                if self.doc.is_live(target) {
                    self.doc.remove_class(target, names::FADE_IN);
                }
            }
            Timer::FolderIconOpen { folder } => {
                self.folders
                    .icon_open(&mut self.doc, &self.config.icons, folder)
            }
            Timer::FolderCloseBegin { folder } => self.folders.begin_close(
                &mut self.doc,
                &mut self.scheduler,
                &self.config,
                folder,
            ),
            Timer::FolderCloseFinish { folder } => {
                self.folders
                    .finish_close(&mut self.doc, &self.config.icons, folder)
            }
            Timer::FolderExpand { folder } => {
                self.folders.expand(&mut self.doc, &self.config.icons, folder)
            }
            Timer::RevealEntry { item } => {
                if self.doc.is_live(item) {
                    self.host.scroll_into_view(item);
                }
            }
        }
    }

    // -- Bus ---
    pub fn on_core_event(&mut self, evt: CoreEvent) {
        let request_id = evt.request_id();
        if let Some(key) = self.prefetches.remove(&request_id) {
            self.on_prefetch_result(key, evt);
        } else if let Some(load) = self.loads.remove(&request_id) {
            self.on_load_result(load, evt);
        } else {
            log::debug!("spa: dropping event for unknown request #{request_id}");
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.nav_gen = self.nav_gen.wrapping_add(1);
        self.nav_gen
    }

    fn request_headers(&self) -> Vec<(String, String)> {
        let header = &self.config.request_header;
        vec![(header.name.clone(), header.value.clone())]
    }

    /// False when the network runtime has shut down.
    fn send_cmd(&self, cmd: CoreCommand) -> bool {
        self.cmd_tx.send(cmd).is_ok()
    }
}
