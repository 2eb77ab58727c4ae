use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::models::{action::ActionOutcome, display_state::DisplayState};
use crate::traits::event_handler::DsrEventHandler;

/// Notification types
#[derive(Debug, Clone)]
pub enum Notification {
    StateUpdate(DisplayState),
    ActionResult(ActionOutcome),
    Error(String),
    Shutdown,
}

/// Notification queue for async processing.
///
/// Implements [`DsrEventHandler`] itself, so the tracker and the dispatcher
/// can hand events off without waiting on a slow handler.
pub struct NotificationQueue {
    sender: UnboundedSender<Notification>,
}

impl NotificationQueue {
    /// Create a new notification queue and its processing task
    pub fn new(handler: Arc<dyn DsrEventHandler>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = unbounded_channel();

        // Spawn a dedicated task for processing notifications
        let worker = tokio::spawn(Self::process_notifications(receiver, handler));

        (Self { sender }, worker)
    }

    /// Process notifications in a separate task
    async fn process_notifications(
        mut receiver: UnboundedReceiver<Notification>,
        handler: Arc<dyn DsrEventHandler>,
    ) {
        while let Some(notification) = receiver.recv().await {
            match notification {
                Notification::StateUpdate(state) => {
                    handler.on_state_update(&state).await;
                }
                Notification::ActionResult(outcome) => {
                    handler.on_action_result(&outcome).await;
                }
                Notification::Error(err_msg) => {
                    let err = anyhow::anyhow!("{}", err_msg);
                    handler.handle_error(&err).await;
                }
                Notification::Shutdown => {
                    warn!("Notification processor shutting down");
                    break;
                }
            }
        }
    }

    fn push(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            error!("Failed to queue notification: {}", e);
        }
    }

    /// Stop the processing task after queued notifications are handled
    pub fn shutdown(&self) {
        self.push(Notification::Shutdown);
    }
}

impl Clone for NotificationQueue {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[async_trait]
impl DsrEventHandler for NotificationQueue {
    async fn on_state_update(&self, state: &DisplayState) {
        self.push(Notification::StateUpdate(state.clone()));
    }

    async fn on_action_result(&self, outcome: &ActionOutcome) {
        self.push(Notification::ActionResult(outcome.clone()));
    }

    async fn handle_error(&self, error: &anyhow::Error) {
        // `{:#}` keeps the context chain in the message
        self.push(Notification::Error(format!("{:#}", error)));
    }
}
