use std::io::Read;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Response bodies above this size are rejected with [`FetchError::TooLarge`].
pub const MAX_BODY_BYTES: u64 = 8 * 1024 * 1024;
const MAX_REDIRECTS: u32 = 8;

#[derive(Clone, Debug)]
pub struct FetchRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A completed HTTP exchange. Non-2xx statuses are responses, not errors.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    pub requested_url: String,
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub duration_ms: u128,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error for {url}: {message}")]
    Transport { url: String, message: String },
    #[error("failed reading body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("body of {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: u64 },
}

pub type FetchCallback = Arc<dyn Fn(Result<FetchResponse, FetchError>) + Send + Sync>;

fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .redirects(MAX_REDIRECTS)
            .user_agent("docnav/0.1")
            .build()
    })
}

pub fn fetch_blocking(request: &FetchRequest) -> Result<FetchResponse, FetchError> {
    let start = Instant::now();
    let mut call = agent().get(&request.url);
    for (name, value) in &request.headers {
        call = call.set(name, value);
    }
    let response = match call.call() {
        Ok(resp) => resp,
        // ureq reports 4xx/5xx as errors; callers decide what a status means.
        Err(ureq::Error::Status(_, resp)) => resp,
        Err(ureq::Error::Transport(t)) => {
            return Err(FetchError::Transport {
                url: request.url.clone(),
                message: t.to_string(),
            });
        }
    };

    let status = response.status();
    let final_url = response.get_url().to_string();
    let content_type = response.header("content-type").map(str::to_string);

    let body = read_capped(response.into_reader(), MAX_BODY_BYTES, &request.url)?;

    let duration_ms = start.elapsed().as_millis();
    log::debug!(
        "fetched {} -> {} ({status}, {} bytes, {duration_ms} ms)",
        request.url,
        final_url,
        body.len()
    );
    Ok(FetchResponse {
        requested_url: request.url.clone(),
        final_url,
        status,
        content_type,
        body,
        duration_ms,
    })
}

fn read_capped(reader: impl Read, limit: u64, url: &str) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    reader
        .take(limit + 1)
        .read_to_end(&mut body)
        .map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
    if body.len() as u64 > limit {
        return Err(FetchError::TooLarge {
            url: url.to_string(),
            limit,
        });
    }
    Ok(body)
}

/// Runs the request on its own thread and hands the outcome to `cb` there.
pub fn fetch_page(request: FetchRequest, cb: FetchCallback) {
    thread::spawn(move || cb(fetch_blocking(&request)));
}
