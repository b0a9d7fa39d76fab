//! Runs a navigator against a live server: page events come from replayed actions, fetches
//! go through the net runtime, and wall-clock time drives the navigator's timers.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use bus::{Bus, CoreCommand, CoreEvent};
use core_types::{FetchPurpose, RequestId};
use html::{Id, Selector};
use spa::{DomEvent, HeadlessHost, Host, NavConfig, Navigator};
use url::Url;

use crate::cli::Action;

/// Longest single wait for network events while nothing is scheduled.
const POLL: Duration = Duration::from_millis(50);
/// Give up on a page that never answers.
const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Driver {
    nav: Navigator<HeadlessHost>,
    cmd_tx: Sender<CoreCommand>,
    evt_rx: Receiver<CoreEvent>,
    config: NavConfig,
    /// Wall-clock instant of the navigator's time zero.
    epoch: Instant,
    /// Full page loads so far; their request ids count down from the top of the range so
    /// they never collide with the navigator's.
    page_loads: RequestId,
}

impl Driver {
    pub fn start(url: Url, config: NavConfig) -> Result<Self> {
        let Bus {
            cmd_tx,
            cmd_rx,
            evt_tx,
            evt_rx,
        } = Bus::new();
        runtime_net::start_net_runtime(cmd_rx, evt_tx);

        let (final_url, html) = full_load(&cmd_tx, &evt_rx, &url, RequestId::MAX)?;
        let nav = Navigator::new(
            html::parse_document(&html),
            HeadlessHost::new(final_url),
            cmd_tx.clone(),
            config.clone(),
        );
        Ok(Self {
            nav,
            cmd_tx,
            evt_rx,
            config,
            epoch: Instant::now(),
            page_loads: 1,
        })
    }

    fn now(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn find(&self, selector: &Selector) -> Result<Id> {
        let doc = self.nav.document();
        doc.query(doc.root(), selector)
            .ok_or_else(|| anyhow!("nothing matches {selector:?}"))
    }

    pub fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Click(selector) => {
                let target = self.find(&selector)?;
                let outcome = self.nav.dispatch(DomEvent::Click { target });
                log::debug!("click -> {outcome:?}");
            }
            Action::Hover(selector) => {
                let target = self.find(&selector)?;
                let _ = self.nav.dispatch(DomEvent::MouseEnter { target });
            }
            Action::Key(key) => {
                let _ = self.nav.dispatch(DomEvent::KeyDown { key, focus: None });
            }
            Action::Search(value) => {
                let target = self.find(&Selector::id("file-search"))?;
                let _ = self.nav.dispatch(DomEvent::Input { target, value });
            }
            Action::Goto(href) => self.nav.navigate(&href),
            Action::Back => {
                if self.nav.host_mut().back() {
                    let _ = self.nav.dispatch(DomEvent::PopState);
                }
            }
            Action::Forward => {
                if self.nav.host_mut().forward() {
                    let _ = self.nav.dispatch(DomEvent::PopState);
                }
            }
            Action::Wait(ms) => {
                let until = Instant::now() + Duration::from_millis(ms);
                while Instant::now() < until {
                    self.pump(until.saturating_duration_since(Instant::now()))?;
                }
            }
        }
        self.settle()
    }

    /// Runs timers and network events until the navigator has nothing left in flight.
    fn settle(&mut self) -> Result<()> {
        let deadline = Instant::now() + LOAD_TIMEOUT;
        while !self.nav.is_idle() {
            if Instant::now() > deadline {
                bail!("navigator did not settle within {LOAD_TIMEOUT:?}");
            }
            let wait = match self.nav.next_timer_due() {
                Some(due) => Duration::from_millis(due.saturating_sub(self.now())),
                None => POLL,
            };
            self.pump(wait.min(POLL))?;
        }
        Ok(())
    }

    fn pump(&mut self, wait: Duration) -> Result<()> {
        match self.evt_rx.recv_timeout(wait) {
            Ok(evt) => self.nav.on_core_event(evt),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => bail!("network runtime stopped"),
        }
        let now = self.now();
        self.nav.advance_to(now);
        if let Some(url) = self.nav.host_mut().take_assigned() {
            self.reload(url)?;
        }
        Ok(())
    }

    /// A full browser navigation: the page and everything the navigator held is replaced.
    fn reload(&mut self, url: Url) -> Result<()> {
        log::info!("full navigation to {url}");
        self.page_loads += 1;
        let request_id = RequestId::MAX - self.page_loads;
        let (final_url, html) = full_load(&self.cmd_tx, &self.evt_rx, &url, request_id)?;
        self.nav = Navigator::new(
            html::parse_document(&html),
            HeadlessHost::new(final_url),
            self.cmd_tx.clone(),
            self.config.clone(),
        );
        self.epoch = Instant::now();
        Ok(())
    }

    pub fn report(&self, outline_lines: usize) {
        let host = self.nav.host();
        println!("location: {}", host.location());
        println!("title:    {}", host.title());
        println!("project:  {}", self.nav.current_project().unwrap_or("-"));
        println!("cached:   {}", self.nav.cache().len());
        let doc = self.nav.document();
        let scope = doc
            .query(doc.root(), &spa::names::main_content())
            .unwrap_or(doc.root());
        for line in html::serialize::outline(doc, scope, outline_lines) {
            println!("{line}");
        }
    }
}

/// Plain top-level load, without the programmatic-request header.
fn full_load(
    cmd_tx: &Sender<CoreCommand>,
    evt_rx: &Receiver<CoreEvent>,
    url: &Url,
    request_id: RequestId,
) -> Result<(Url, String)> {
    cmd_tx
        .send(CoreCommand::Fetch {
            request_id,
            purpose: FetchPurpose::Navigate,
            url: url.to_string(),
            headers: Vec::new(),
        })
        .map_err(|_| anyhow!("network runtime stopped"))?;
    let evt = wait_for(evt_rx, request_id)?;
    match evt {
        CoreEvent::FetchDone {
            final_url,
            status,
            body,
            ..
        } => {
            if !(200..300).contains(&status) {
                bail!("{url} answered {status}");
            }
            let html = String::from_utf8(body).with_context(|| format!("{url} is not UTF-8"))?;
            let final_url = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
            Ok((final_url, html))
        }
        CoreEvent::FetchFailed { error, .. } => bail!("loading {url} failed: {error}"),
    }
}

fn wait_for(evt_rx: &Receiver<CoreEvent>, request_id: RequestId) -> Result<CoreEvent> {
    let deadline = Instant::now() + LOAD_TIMEOUT;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        let evt = evt_rx
            .recv_timeout(left)
            .with_context(|| format!("no response for request #{request_id}"))?;
        if evt.request_id() == request_id {
            return Ok(evt);
        }
        log::debug!("dropping stale event for #{}", evt.request_id());
    }
}
