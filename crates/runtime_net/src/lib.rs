use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use bus::{CoreCommand, CoreEvent};
use net::{FetchRequest, fetch_page};

/// Serves `CoreCommand::Fetch` until every command sender is dropped. Each fetch runs on
/// its own thread; completion order is whatever the network gives.
pub fn start_net_runtime(cmd_rx: Receiver<CoreCommand>, evt_tx: Sender<CoreEvent>) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                CoreCommand::Fetch {
                    request_id,
                    purpose,
                    url,
                    headers,
                } => {
                    log::debug!("net runtime: {} #{request_id} {url}", purpose.as_str());
                    let mut request = FetchRequest::new(url.clone());
                    for (name, value) in &headers {
                        request = request.header(name, value);
                    }
                    let evt_tx = evt_tx.clone();
                    fetch_page(
                        request,
                        Arc::new(move |result| {
                            let evt = match result {
                                Ok(resp) => CoreEvent::FetchDone {
                                    request_id,
                                    purpose,
                                    url: url.clone(),
                                    final_url: resp.final_url,
                                    status: resp.status,
                                    content_type: resp.content_type,
                                    body: resp.body,
                                },
                                Err(err) => CoreEvent::FetchFailed {
                                    request_id,
                                    purpose,
                                    url: url.clone(),
                                    error: err.to_string(),
                                },
                            };
                            let _ = evt_tx.send(evt);
                        }),
                    );
                }
            }
        }
        log::debug!("net runtime: command channel closed");
    });
}
