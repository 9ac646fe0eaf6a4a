use super::request::{Outcome, Request};
use super::source::DataSource;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Runs requests on a background thread, in arrival order. Outcomes come
/// back on the returned receiver; `notify` fires after each one so the host
/// can wake its event loop.
///
/// The thread exits once the request sender is dropped.
pub fn spawn_worker<F>(source: Arc<dyn DataSource>, notify: F) -> (Sender<Request>, Receiver<Outcome>)
where
    F: Fn() + Send + 'static,
{
    let (cmd_tx, cmd_rx) = channel::<Request>();
    let (res_tx, res_rx) = channel();

    thread::spawn(move || {
        while let Ok(request) = cmd_rx.recv() {
            tracing::debug!(ticket = request.ticket().seq(), "running finder request");
            let outcome = request.run(source.as_ref());
            if res_tx.send(outcome).is_err() {
                break;
            }
            notify();
        }
    });

    (cmd_tx, res_rx)
}
