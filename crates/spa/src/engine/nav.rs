use bus::{CoreCommand, CoreEvent};
use core_types::{FetchPurpose, RequestId};
use html::head::document_title;
use url::Url;

use super::{Navigator, PendingLoad};
use crate::error::NavError;
use crate::host::{Host, ScrollBehavior};
use crate::names;
use crate::patch::{self, PatchOutcome};
use crate::project::project_id;
use crate::timers::Timer;

/// What a navigation fetch produced.
enum Resolved {
    Page { html: String, final_url: Url },
    /// Not HTML: the browser has to handle it.
    External,
}

fn read_response(url: &Url, evt: CoreEvent) -> Result<Resolved, NavError> {
    match evt {
        CoreEvent::FetchDone {
            final_url,
            status,
            content_type,
            body,
            ..
        } => {
            if !(200..300).contains(&status) {
                return Err(NavError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            if !html::is_html(content_type.as_deref()) {
                return Ok(Resolved::External);
            }
            let html = String::from_utf8(body).map_err(|source| NavError::Decode {
                url: url.to_string(),
                source,
            })?;
            let final_url = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
            Ok(Resolved::Page { html, final_url })
        }
        CoreEvent::FetchFailed { error, .. } => Err(NavError::Network {
            url: url.to_string(),
            message: error,
        }),
    }
}

/// `path?query#fragment`, the form session history entries are pushed in.
fn history_entry(url: &Url) -> String {
    let mut entry = url.path().to_string();
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        entry.push('?');
        entry.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        entry.push('#');
        entry.push_str(fragment);
    }
    entry
}

impl<H: Host> Navigator<H> {
    // -- Navigation ---

    /// User-driven navigation to `href`, resolved against the current location. Navigating to
    /// the current location does nothing.
    pub fn navigate(&mut self, href: &str) {
        let url = match self.host.location().join(href) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("spa: cannot resolve link {href:?}: {err}");
                return;
            }
        };
        if url == *self.host.location() {
            log::debug!("spa: already at {url}");
            return;
        }
        self.load_page(url, true);
    }

    /// History moved; load the entry now current without pushing a new one.
    pub fn on_pop_state(&mut self) {
        let url = self.host.location().clone();
        self.load_page(url, false);
    }

    /// Starts a load: snapshot the sidebar when staying in the project, then fade out the
    /// region about to change. Content is resolved once the fade-out has played.
    pub fn load_page(&mut self, url: Url, push_history: bool) {
        let root = self.doc.root();
        let Some(container) = self.doc.query(root, &names::main_content()) else {
            log::debug!("spa: no main content region, ignoring load of {url}");
            return;
        };

        let target_project = project_id(url.path(), &self.config.project_prefix).map(str::to_string);
        let same_project = matches!(
            (&self.current_project, &target_project),
            (Some(current), Some(target)) if current == target
        );
        if same_project {
            self.sidebar.save(&self.doc);
        }

        let fade_target = if same_project {
            self.doc
                .query(container, &names::md_content())
                .unwrap_or(container)
        } else {
            container
        };
        self.doc.add_class(fade_target, names::FADE_OUT);

        let request_id = self.next_request_id();
        log::debug!(
            "spa: load #{request_id} {url} (same project: {same_project}, push: {push_history})"
        );
        self.loads.insert(
            request_id,
            PendingLoad {
                url,
                push_history,
                same_project,
                target_project,
                fade_target,
            },
        );
        self.scheduler
            .schedule(self.config.fade_out_ms, Timer::FadeOutElapsed { request_id });
    }

    /// Fade-out done: serve from the prefetch cache or go to the network.
    pub(super) fn resolve_content(&mut self, request_id: RequestId) {
        let Some(load) = self.loads.get(&request_id) else {
            return;
        };
        let key = load.url.as_str();

        if let Some(html) = self.cache.take(key) {
            log::debug!("spa: cache hit for {key}");
            if let Some(load) = self.loads.remove(&request_id) {
                let final_url = load.url.clone();
                self.complete(load, &html, final_url);
            }
            return;
        }

        let cmd = CoreCommand::Fetch {
            request_id,
            purpose: FetchPurpose::Navigate,
            url: key.to_string(),
            headers: self.request_headers(),
        };
        if !self.send_cmd(cmd) {
            if let Some(load) = self.loads.remove(&request_id) {
                let err = NavError::Network {
                    url: load.url.to_string(),
                    message: "network runtime is not running".into(),
                };
                self.fallback(&load.url, err);
            }
        }
    }

    pub(super) fn on_load_result(&mut self, load: PendingLoad, evt: CoreEvent) {
        match read_response(&load.url, evt) {
            Ok(Resolved::Page { html, final_url }) => self.complete(load, &html, final_url),
            Ok(Resolved::External) => {
                log::info!("spa: {} is not html, handing over to the browser", load.url);
                self.host.assign(&load.url);
            }
            Err(err) => self.fallback(&load.url, err),
        }
    }

    fn complete(&mut self, load: PendingLoad, html: &str, mut final_url: Url) {
        let fetched = html::parse_document(html);
        let outcome = patch::apply(
            &mut self.doc,
            &fetched,
            load.same_project,
            &self.config.icons,
        );
        match outcome {
            PatchOutcome::Partial => self
                .sidebar
                .restore(&mut self.doc, &self.config.icons.folder_open),
            PatchOutcome::Full => {
                // The old sidebar is gone along with everything recorded about it.
                self.sidebar.clear();
                self.folders.initialize(&mut self.doc, &self.config.icons);
            }
            PatchOutcome::Skipped => {}
        }

        if load.push_history {
            // Redirect targets come back without the fragment that was asked for.
            if final_url.fragment().is_none() {
                final_url.set_fragment(load.url.fragment());
            }
            self.host.push_state(&history_entry(&final_url));
        }
        if let Some(title) = document_title(&fetched) {
            self.host.set_title(&title);
        }
        self.current_project = load.target_project;
        self.host.scroll_to_top(ScrollBehavior::Smooth);

        if self.doc.is_live(load.fade_target) {
            self.doc.remove_class(load.fade_target, names::FADE_OUT);
            self.doc.add_class(load.fade_target, names::FADE_IN);
            self.scheduler.schedule(
                self.config.fade_in_ms,
                Timer::ClearFadeIn {
                    target: load.fade_target,
                },
            );
        }
        log::info!("spa: loaded {final_url} ({outcome:?})");
    }

    fn fallback(&mut self, url: &Url, err: NavError) {
        log::error!("spa nav error: {err}");
        self.host.assign(url);
    }

    // -- Prefetch ---

    /// Best-effort background fetch of `url` into the prefetch cache.
    pub fn prefetch(&mut self, url: Url) {
        let key = url.to_string();
        if self.cache.has(&key) || self.prefetches.values().any(|k| *k == key) {
            return;
        }
        let request_id = self.next_request_id();
        let cmd = CoreCommand::Fetch {
            request_id,
            purpose: FetchPurpose::Prefetch,
            url: key.clone(),
            headers: self.request_headers(),
        };
        if self.send_cmd(cmd) {
            log::debug!("spa: prefetch #{request_id} {key}");
            self.prefetches.insert(request_id, key);
        }
    }

    pub(super) fn on_prefetch_result(&mut self, key: String, evt: CoreEvent) {
        match evt {
            CoreEvent::FetchDone {
                status,
                content_type,
                body,
                ..
            } if (200..300).contains(&status) && html::is_html(content_type.as_deref()) => {
                match String::from_utf8(body) {
                    Ok(html) => {
                        log::debug!("spa: cached {key}");
                        self.cache.put(key, html);
                    }
                    Err(err) => log::debug!("spa: prefetch of {key} discarded: {err}"),
                }
            }
            CoreEvent::FetchDone { status, .. } => {
                log::debug!("spa: prefetch of {key} discarded (status {status})");
            }
            CoreEvent::FetchFailed { error, .. } => {
                log::debug!("spa: prefetch of {key} failed: {error}");
            }
        }
    }
}
