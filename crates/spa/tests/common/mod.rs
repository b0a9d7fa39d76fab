#![allow(dead_code)]

use std::sync::mpsc::{self, Receiver};

use bus::{CoreCommand, CoreEvent};
use core_types::{FetchPurpose, RequestId};
use html::{Id, Selector, parse_document};
use spa::{DomEvent, EventOutcome, HeadlessHost, Key, NavConfig, Navigator};
use url::Url;

pub const ORIGIN: &str = "http://docs.local";

/// A project page: folders `guide` (0) > `deep` (1), and `api` (2); files `a`, `b` in guide,
/// `c` in deep, `d` in api. `open` lists the folder indexes rendered open.
pub fn md_page(project: &str, active: &str, open: &[usize]) -> String {
    let file = |name: &str| {
        let (class, glyph) = if name == active {
            ("file-item active", "▶")
        } else {
            ("file-item", "📝")
        };
        format!(
            r#"<li class="{class}" id="item-{name}"><a class="file-link" id="link-{name}" data-spa href="/md/{project}/{name}"><span class="file-icon">{glyph}</span><span class="file-name">{name}.md</span></a></li>"#
        )
    };
    let folder = |index: usize, name: &str, body: String| {
        let open_attr = if open.contains(&index) { " open" } else { "" };
        format!(
            r#"<details class="folder" id="folder-{name}"{open_attr}><summary class="folder-summary" id="summary-{name}"><span class="folder-icon">📁</span><span class="folder-name">{name}</span></summary><div class="folder-content">{body}</div></details>"#
        )
    };
    let deep = folder(1, "deep", file("c"));
    let guide = folder(0, "guide", format!("{}{}{deep}", file("a"), file("b")));
    let api = folder(2, "api", file("d"));
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{project} / {active}</title></head>
<body class="spa-enabled">
<header><a data-spa href="/" id="home">home</a><a data-spa target="_blank" href="/md/{project}/b" id="external">b</a></header>
<div class="main-content">
  <nav class="md-sidebar">
    <input id="file-search" type="text"><button id="expand-all">+</button><button id="collapse-all">-</button>
    <ul>{guide}{api}</ul>
  </nav>
  <div class="breadcrumb">{project} › {active}</div>
  <article class="md-content"><h1>{project}:{active}</h1></article>
</div>
</body></html>"#
    )
}

pub fn home_page() -> String {
    r#"<html><head><title>Home</title></head><body class="spa-enabled">
<div class="main-content"><a data-spa href="/md/docs/a" id="to-docs">docs</a></div>
</body></html>"#
        .to_string()
}

pub fn url(path: &str) -> Url {
    Url::parse(ORIGIN).and_then(|o| o.join(path)).unwrap()
}

pub struct Fetch {
    pub request_id: RequestId,
    pub purpose: FetchPurpose,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

pub struct Harness {
    pub nav: Navigator<HeadlessHost>,
    cmd_rx: Receiver<CoreCommand>,
}

impl Harness {
    pub fn open(path: &str, page: &str) -> Self {
        Self::with_config(path, page, NavConfig::default())
    }

    pub fn with_config(path: &str, page: &str, config: NavConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let nav = Navigator::new(
            parse_document(page),
            HeadlessHost::new(url(path)),
            cmd_tx,
            config,
        );
        Self { nav, cmd_rx }
    }

    pub fn fetches(&self) -> Vec<Fetch> {
        self.cmd_rx
            .try_iter()
            .map(|cmd| match cmd {
                CoreCommand::Fetch {
                    request_id,
                    purpose,
                    url,
                    headers,
                } => Fetch {
                    request_id,
                    purpose,
                    url,
                    headers,
                },
            })
            .collect()
    }

    pub fn expect_fetch(&self, purpose: FetchPurpose) -> Fetch {
        let mut fetches = self.fetches();
        assert_eq!(fetches.len(), 1, "expected exactly one fetch");
        let fetch = fetches.remove(0);
        assert_eq!(fetch.purpose, purpose);
        fetch
    }

    pub fn respond_with(
        &mut self,
        fetch: &Fetch,
        status: u16,
        content_type: &str,
        final_url: &str,
        body: &str,
    ) {
        self.nav.on_core_event(CoreEvent::FetchDone {
            request_id: fetch.request_id,
            purpose: fetch.purpose,
            url: fetch.url.clone(),
            final_url: final_url.to_string(),
            status,
            content_type: Some(content_type.to_string()),
            body: body.as_bytes().to_vec(),
        });
    }

    pub fn respond(&mut self, fetch: &Fetch, body: &str) {
        let final_url = fetch.url.clone();
        self.respond_with(fetch, 200, "text/html; charset=utf-8", &final_url, body);
    }

    pub fn fail(&mut self, fetch: &Fetch, error: &str) {
        self.nav.on_core_event(CoreEvent::FetchFailed {
            request_id: fetch.request_id,
            purpose: fetch.purpose,
            url: fetch.url.clone(),
            error: error.to_string(),
        });
    }

    pub fn node(&self, id: &str) -> Id {
        let doc = self.nav.document();
        doc.query(doc.root(), &Selector::id(id))
            .unwrap_or_else(|| panic!("no #{id}"))
    }

    pub fn first(&self, selector: &str) -> Id {
        let doc = self.nav.document();
        doc.query(doc.root(), &Selector::parse(selector).unwrap())
            .unwrap_or_else(|| panic!("no {selector}"))
    }

    pub fn text(&self, id: Id) -> String {
        self.nav.document().text_content(id)
    }

    pub fn click(&mut self, id: &str) -> EventOutcome {
        let target = self.node(id);
        self.nav.dispatch(DomEvent::Click { target })
    }

    pub fn hover(&mut self, id: &str) -> EventOutcome {
        let target = self.node(id);
        self.nav.dispatch(DomEvent::MouseEnter { target })
    }

    pub fn key(&mut self, key: Key) -> EventOutcome {
        self.nav.dispatch(DomEvent::KeyDown { key, focus: None })
    }

    /// Id of the active file entry's `li`, without the `item-` prefix.
    pub fn active_files(&self) -> Vec<String> {
        let doc = self.nav.document();
        doc.query_all(doc.root(), &Selector::parse(".file-item.active").unwrap())
            .into_iter()
            .filter_map(|item| doc.attr(item, "id"))
            .map(|id| id.trim_start_matches("item-").to_string())
            .collect()
    }

    pub fn is_open(&self, folder: &str) -> bool {
        self.nav.document().is_open(self.node(&format!("folder-{folder}")))
    }

    pub fn folder_icon(&self, folder: &str) -> String {
        let doc = self.nav.document();
        let folder = self.node(&format!("folder-{folder}"));
        let icon = doc.query(folder, &Selector::class("folder-icon")).unwrap();
        doc.text_content(icon)
    }
}
