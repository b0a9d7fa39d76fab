mod common;

use common::{Harness, home_page, md_page, url};
use core_types::FetchPurpose;
use html::Selector;
use spa::{EventOutcome, HeadlessHost, Host, NavConfig, ScrollBehavior};

#[test]
fn same_project_navigation_patches_content_and_restores_sidebar() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[0]));
    assert_eq!(h.nav.current_project(), Some("docs"));

    // User opens `api` and scrolls the sidebar before following a link.
    h.click("summary-api");
    let sidebar = h.first(".md-sidebar");
    h.nav.document_mut().set_scroll_top(sidebar, 120.0);

    assert_eq!(h.click("link-b"), EventOutcome::PreventDefault);
    let content = h.first(".md-content");
    assert!(h.nav.document().has_class(content, "fade-out-spa"));

    // Sidebar state drifts while the page is loading.
    let api = h.node("folder-api");
    let doc = h.nav.document_mut();
    doc.set_open(api, false);
    doc.set_scroll_top(sidebar, 0.0);

    h.nav.advance(199);
    assert!(h.fetches().is_empty());
    h.nav.advance(1);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    assert_eq!(fetch.url, "http://docs.local/md/docs/b");
    assert_eq!(
        fetch.headers,
        [("X-Requested-With".to_string(), "XMLHttpRequest".to_string())]
    );
    h.respond(&fetch, &md_page("docs", "b", &[]));

    assert!(h.nav.document().is_live(sidebar), "sidebar must survive");
    assert!(h.is_open("guide") && h.is_open("api"));
    assert!(!h.is_open("deep"));
    assert_eq!(h.folder_icon("api"), "📂");
    assert_eq!(h.nav.document().scroll_top(sidebar), 120.0);

    assert_eq!(h.active_files(), ["b"]);
    assert_eq!(h.text(h.first(".md-content")), "docs:b");
    assert_eq!(h.text(h.first(".breadcrumb")), "docs › b");

    let host = h.nav.host();
    assert_eq!(host.pushes(), ["/md/docs/b"]);
    assert_eq!(host.location().path(), "/md/docs/b");
    assert_eq!(host.title(), "docs / b");
    assert_eq!(host.scrolls(), [ScrollBehavior::Smooth]);
    assert_eq!(host.assigned(), None);
}

#[test]
fn fade_markers_follow_the_load() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.click("link-b");
    let content = h.first(".md-content");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond(&fetch, &md_page("docs", "b", &[]));

    let doc = h.nav.document();
    assert!(!doc.has_class(content, "fade-out-spa"));
    assert!(doc.has_class(content, "fade-in-spa"));

    h.nav.advance(299);
    assert!(h.nav.document().has_class(content, "fade-in-spa"));
    h.nav.advance(1);
    assert!(!h.nav.document().has_class(content, "fade-in-spa"));
}

#[test]
fn cross_project_navigation_replaces_main_content() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[0, 1, 2]));
    let old_sidebar = h.first(".md-sidebar");
    let container = h.first(".main-content");

    h.nav.navigate("/md/other/c");
    assert!(h.nav.document().has_class(container, "fade-out-spa"));
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond(&fetch, &md_page("other", "c", &[]));

    assert!(!h.nav.document().is_live(old_sidebar));
    for folder in ["guide", "deep", "api"] {
        assert!(!h.is_open(folder), "{folder} should start closed");
        assert_eq!(h.folder_icon(folder), "📁");
    }
    assert_eq!(h.nav.sidebar_snapshot(), None);
    assert_eq!(h.nav.current_project(), Some("other"));
    assert_eq!(h.text(h.first(".md-content")), "other:c");
    assert!(h.nav.document().has_class(container, "fade-in-spa"));
    assert_eq!(h.nav.host().pushes(), ["/md/other/c"]);
}

#[test]
fn leaving_a_project_for_a_plain_page_is_a_full_replace() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[0]));
    assert_eq!(h.click("home"), EventOutcome::PreventDefault);
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond(&fetch, &home_page());

    assert_eq!(h.nav.current_project(), None);
    assert_eq!(h.nav.host().title(), "Home");
    h.node("to-docs");
}

#[test]
fn hovered_link_is_served_from_cache_once() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    let key = "http://docs.local/md/docs/b";

    h.hover("link-b");
    let prefetch = h.expect_fetch(FetchPurpose::Prefetch);
    assert_eq!(prefetch.url, key);
    // Hovering again while in flight does not fetch twice.
    h.hover("link-b");
    assert!(h.fetches().is_empty());
    h.respond(&prefetch, &md_page("docs", "b", &[]));
    assert!(h.nav.cache().has(key));

    h.hover("link-b");
    assert!(h.fetches().is_empty());

    h.click("link-b");
    h.nav.advance(200);
    assert!(h.fetches().is_empty(), "cache hit must not touch the network");
    assert!(!h.nav.cache().has(key));
    assert_eq!(h.active_files(), ["b"]);
    assert_eq!(h.nav.host().pushes(), ["/md/docs/b"]);
    assert_eq!(h.nav.pending_loads(), 0);
}

#[test]
fn prefetch_failures_are_silent() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.hover("link-b");
    let fetch = h.expect_fetch(FetchPurpose::Prefetch);
    h.respond_with(&fetch, 404, "text/html", &fetch.url, "gone");
    h.hover("link-c");
    let fetch = h.expect_fetch(FetchPurpose::Prefetch);
    h.fail(&fetch, "connection reset");
    h.hover("link-d");
    let fetch = h.expect_fetch(FetchPurpose::Prefetch);
    h.respond_with(&fetch, 200, "application/json", &fetch.url, "{}");

    assert!(h.nav.cache().is_empty());
    assert_eq!(h.nav.host().assigned(), None);
    assert_eq!(h.nav.pending_prefetches(), 0);
}

#[test]
fn prefetch_cache_keeps_the_ten_newest() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    for i in 0..11 {
        let link = format!("/md/docs/page-{i}");
        h.nav.prefetch(url(&link));
        let fetch = h.expect_fetch(FetchPurpose::Prefetch);
        h.respond(&fetch, "<div class=\"main-content\"></div>");
    }
    assert_eq!(h.nav.cache().len(), 10);
    assert!(!h.nav.cache().has("http://docs.local/md/docs/page-0"));
    assert!(h.nav.cache().has("http://docs.local/md/docs/page-10"));
}

#[test]
fn error_status_falls_back_to_full_navigation() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.click("link-b");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond_with(&fetch, 500, "text/html", &fetch.url, "boom");

    let host = h.nav.host();
    assert_eq!(host.assigned(), Some(&url("/md/docs/b")));
    assert!(host.pushes().is_empty());
    assert_eq!(host.location().path(), "/md/docs/a");
    assert_eq!(h.nav.pending_loads(), 0);
}

#[test]
fn network_failure_falls_back_to_full_navigation() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.nav.navigate("/md/docs/c");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.fail(&fetch, "connection refused");
    assert_eq!(h.nav.host().assigned(), Some(&url("/md/docs/c")));
    assert!(h.nav.host().pushes().is_empty());
}

#[test]
fn oversized_body_falls_back_and_is_never_cached() {
    let too_large = |url: &str| {
        net::FetchError::TooLarge {
            url: url.to_string(),
            limit: net::MAX_BODY_BYTES,
        }
        .to_string()
    };
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));

    h.hover("link-b");
    let fetch = h.expect_fetch(FetchPurpose::Prefetch);
    h.fail(&fetch, &too_large(&fetch.url));
    assert!(h.nav.cache().is_empty());
    assert_eq!(h.nav.host().assigned(), None);

    h.click("link-b");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.fail(&fetch, &too_large(&fetch.url));
    assert_eq!(h.nav.host().assigned(), Some(&url("/md/docs/b")));
    assert!(h.nav.host().pushes().is_empty());
    assert_eq!(h.active_files(), ["a"]);
}

#[test]
fn undecodable_body_falls_back_to_full_navigation() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.nav.navigate("/md/docs/c");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.nav.on_core_event(bus::CoreEvent::FetchDone {
        request_id: fetch.request_id,
        purpose: fetch.purpose,
        url: fetch.url.clone(),
        final_url: fetch.url.clone(),
        status: 200,
        content_type: Some("text/html".into()),
        body: vec![0xc3, 0x28],
    });
    assert_eq!(h.nav.host().assigned(), Some(&url("/md/docs/c")));
}

#[test]
fn non_html_response_is_handed_to_the_browser() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.nav.navigate("/md/docs/report.pdf");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond_with(&fetch, 200, "application/pdf", &fetch.url, "%PDF-1.7");
    assert_eq!(h.nav.host().assigned(), Some(&url("/md/docs/report.pdf")));
    assert!(h.nav.host().pushes().is_empty());
}

#[test]
fn redirected_load_pushes_the_final_url() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.nav.navigate("/md/docs/b?rev=2#usage");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond_with(
        &fetch,
        200,
        "text/html",
        "http://docs.local/md/docs/b/?rev=2",
        &md_page("docs", "b", &[]),
    );
    assert_eq!(h.nav.host().pushes(), ["/md/docs/b/?rev=2#usage"]);
}

#[test]
fn pop_state_reloads_without_pushing() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.click("link-b");
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    h.respond(&fetch, &md_page("docs", "b", &[]));

    assert!(h.nav.host_mut().back());
    h.nav.dispatch(spa::DomEvent::PopState);
    h.nav.advance(200);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    assert_eq!(fetch.url, "http://docs.local/md/docs/a");
    h.respond(&fetch, &md_page("docs", "a", &[]));

    let host = h.nav.host();
    assert_eq!(host.pushes().len(), 1);
    assert_eq!(host.location().path(), "/md/docs/a");
    assert_eq!(host.title(), "docs / a");
    assert_eq!(h.active_files(), ["a"]);
}

#[test]
fn links_to_the_current_page_or_with_target_are_not_loaded() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    assert_eq!(h.click("link-a"), EventOutcome::PreventDefault);
    assert_eq!(h.nav.pending_loads(), 0);

    assert_eq!(h.click("external"), EventOutcome::Default);
    assert_eq!(h.nav.pending_loads(), 0);

    h.nav.advance(1_000);
    assert!(h.fetches().is_empty());
}

#[test]
fn overlapping_loads_both_complete() {
    let mut h = Harness::open("/md/docs/a", &md_page("docs", "a", &[]));
    h.nav.navigate("/md/docs/b");
    h.nav.advance(100);
    h.nav.navigate("/md/docs/c");
    h.nav.advance(100);
    let first = h.expect_fetch(FetchPurpose::Navigate);
    h.nav.advance(100);
    let second = h.expect_fetch(FetchPurpose::Navigate);

    h.respond(&second, &md_page("docs", "c", &[]));
    h.respond(&first, &md_page("docs", "b", &[]));
    assert_eq!(h.nav.host().pushes(), ["/md/docs/c", "/md/docs/b"]);
    assert_eq!(h.active_files(), ["b"]);
}

#[test]
fn page_without_spa_marker_is_left_alone() {
    let page = md_page("docs", "a", &[]).replace("class=\"spa-enabled\"", "");
    let mut h = Harness::open("/md/docs/a", &page);
    assert!(!h.nav.is_enabled());
    assert_eq!(h.click("link-b"), EventOutcome::Default);
    assert_eq!(h.hover("link-b"), EventOutcome::Default);
    h.nav.advance(1_000);
    assert!(h.fetches().is_empty());
}

#[test]
fn custom_request_header_and_timings_apply() {
    let config = NavConfig::from_toml_str(
        "fade_out_ms = 50\n[request_header]\nname = \"X-Docs-Fragment\"\nvalue = \"1\"\n",
    )
    .unwrap();
    let mut h = Harness::with_config("/md/docs/a", &md_page("docs", "a", &[]), config);
    h.click("link-b");
    h.nav.advance(50);
    let fetch = h.expect_fetch(FetchPurpose::Navigate);
    assert_eq!(fetch.headers, [("X-Docs-Fragment".to_string(), "1".to_string())]);
}

#[test]
fn headless_host_starts_at_the_given_location() {
    let host = HeadlessHost::new(url("/md/docs/a"));
    assert_eq!(host.location().as_str(), "http://docs.local/md/docs/a");
    let doc = html::parse_document(&md_page("docs", "a", &[]));
    assert!(doc.query(doc.root(), &Selector::class("md-sidebar")).is_some());
}
