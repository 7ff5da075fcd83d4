use super::action::Action;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Trailing-edge debounce of the search input. Each pushed value re-arms the
/// timer; the latest value is sent as `Action::QuerySettled` once no new value
/// arrived for `delay`.
pub struct Debouncer {
    tx: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>,
}

impl Debouncer {
    pub fn spawn(delay: Duration, action_tx: mpsc::Sender<Action>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = tokio::spawn(async move {
            let mut pending: Option<String> = None;
            loop {
                if pending.is_some() {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = Some(value),
                            None => break,
                        },
                        () = tokio::time::sleep(delay) => {
                            if let Some(value) = pending.take() {
                                if action_tx.send(Action::QuerySettled(value)).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                } else if let Some(value) = rx.recv().await {
                    pending = Some(value);
                } else {
                    break;
                }
            }
        });
        Self { tx, handle }
    }

    pub fn push(&self, value: String) {
        if self.tx.send(value).is_err() {
            log::warn!("debounce task stopped, dropping input");
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
