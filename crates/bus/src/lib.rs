use core_types::{FetchPurpose, RequestId};
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug)]
pub enum CoreCommand {
    /// GET `url` with the programmatic-request headers attached.
    Fetch {
        request_id: RequestId,
        purpose: FetchPurpose,
        url: String,
        headers: Vec<(String, String)>,
    },
}

#[derive(Debug)]
pub enum CoreEvent {
    /// The server answered. `status` may be any HTTP status.
    FetchDone {
        request_id: RequestId,
        purpose: FetchPurpose,
        url: String,
        final_url: String,
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    /// No response: transport failure or unreadable body.
    FetchFailed {
        request_id: RequestId,
        purpose: FetchPurpose,
        url: String,
        error: String,
    },
}

impl CoreEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            CoreEvent::FetchDone { request_id, .. } | CoreEvent::FetchFailed { request_id, .. } => {
                *request_id
            }
        }
    }
}

/// Both channel pairs. The UI side keeps `cmd_tx` and `evt_rx`; the runtime takes `cmd_rx`
/// and a clone of `evt_tx`.
pub struct Bus {
    pub cmd_tx: Sender<CoreCommand>,
    pub cmd_rx: Receiver<CoreCommand>,
    pub evt_tx: Sender<CoreEvent>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        Self {
            cmd_tx,
            cmd_rx,
            evt_tx,
            evt_rx,
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
