//! Transient notifications. At most one message is visible; it is dismissed
//! by a single scheduled task, which is aborted whenever the message is
//! replaced or the subsystem is dropped.

use std::{sync::Arc, time::Duration};
use tokio::{runtime::Handle, sync::watch, task::JoinHandle, time::sleep};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashMessage {
    id: u64,
    pub kind: FlashKind,
    pub text: String,
}

pub struct Flash {
    sender: Arc<watch::Sender<Option<FlashMessage>>>,
    pending: Option<JoinHandle<()>>,
    next_id: u64,
    timeout: Duration,
}

impl Flash {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            pending: None,
            next_id: 0,
            timeout,
        }
    }

    /// Shows `text`, replacing any visible message and its pending dismissal.
    pub fn show(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.cancel_pending();

        self.next_id += 1;
        let id = self.next_id;
        let message = FlashMessage {
            id,
            kind,
            text: text.into(),
        };
        debug!("flash {:?}: {}", message.kind, message.text);
        self.sender.send_replace(Some(message));

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime, flash message will not auto-dismiss");
            return;
        };

        let sender = Arc::clone(&self.sender);
        let timeout = self.timeout;
        self.pending = Some(runtime.spawn(async move {
            sleep(timeout).await;
            // Only clear the message this task was scheduled for.
            sender.send_if_modified(|current| {
                if current.as_ref().is_some_and(|message| message.id == id) {
                    *current = None;
                    true
                } else {
                    false
                }
            });
        }));
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(FlashKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(FlashKind::Error, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(FlashKind::Info, text);
    }

    /// Hides the current message immediately.
    pub fn dismiss(&mut self) {
        self.cancel_pending();
        self.sender.send_replace(None);
    }

    #[must_use]
    pub fn current(&self) -> Option<FlashMessage> {
        self.sender.borrow().clone()
    }

    /// Receiver that observes every change of the visible message.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<FlashMessage>> {
        self.sender.subscribe()
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for Flash {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
